//! Spreadsheet loading

use crate::error::{HeatloadError, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Loader for the tabular input file (CSV, Parquet, or line-delimited JSON)
pub struct DataLoader {
    infer_schema_length: Option<usize>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            infer_schema_length: Some(100),
        }
    }

    /// Load a CSV file
    pub fn load_csv(&self, path: &str) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| HeatloadError::DataError(e.to_string()))?;

        let reader = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .into_reader_with_file_handle(file);

        reader
            .finish()
            .map_err(|e| HeatloadError::DataError(e.to_string()))
    }

    /// Load a Parquet file
    pub fn load_parquet(&self, path: &str) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| HeatloadError::DataError(e.to_string()))?;

        ParquetReader::new(file)
            .finish()
            .map_err(|e| HeatloadError::DataError(e.to_string()))
    }

    /// Load a JSON file (line-delimited)
    pub fn load_json(&self, path: &str) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| HeatloadError::DataError(e.to_string()))?;

        JsonReader::new(file)
            .finish()
            .map_err(|e| HeatloadError::DataError(e.to_string()))
    }

    /// Detect file format from extension and load
    pub fn load_auto(&self, path: &str) -> Result<DataFrame> {
        let path_lower = path.to_lowercase();

        if path_lower.ends_with(".parquet") || path_lower.ends_with(".pq") {
            self.load_parquet(path)
        } else if path_lower.ends_with(".json") || path_lower.ends_with(".jsonl") {
            self.load_json(path)
        } else {
            // CSV as default
            self.load_csv(path)
        }
    }

    /// Get file info without loading full data
    pub fn get_file_info(&self, path: &str) -> Result<FileInfo> {
        let metadata =
            std::fs::metadata(path).map_err(|e| HeatloadError::DataError(e.to_string()))?;

        let file_size = metadata.len();

        // Quick row count for CSV
        let (n_rows, n_cols, columns) = if path.to_lowercase().ends_with(".csv") {
            let file = File::open(path).map_err(|e| HeatloadError::DataError(e.to_string()))?;
            let reader = BufReader::new(file);
            let mut lines = reader.lines();

            let header = lines
                .next()
                .transpose()
                .map_err(|e| HeatloadError::DataError(e.to_string()))?
                .unwrap_or_default();

            let columns: Vec<String> = header.split(',').map(|s| s.trim().to_string()).collect();

            let n_cols = columns.len();
            let n_rows = lines.count();

            (Some(n_rows), Some(n_cols), Some(columns))
        } else {
            (None, None, None)
        };

        Ok(FileInfo {
            path: path.to_string(),
            file_size,
            n_rows,
            n_cols,
            columns,
        })
    }
}

/// File information
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: String,
    pub file_size: u64,
    pub n_rows: Option<usize>,
    pub n_cols: Option<usize>,
    pub columns: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1,2,3").unwrap();
        writeln!(file, "4,5,6").unwrap();
        writeln!(file, "7,8,9").unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = create_test_csv();
        let loader = DataLoader::new();

        let df = loader.load_csv(file.path().to_str().unwrap()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let loader = DataLoader::new();
        let result = loader.load_csv("/nonexistent/path.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_auto_csv() {
        let file = create_test_csv();
        let loader = DataLoader::new();
        let df = loader.load_auto(file.path().to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_get_file_info() {
        let file = create_test_csv();
        let loader = DataLoader::new();

        let info = loader.get_file_info(file.path().to_str().unwrap()).unwrap();

        assert_eq!(info.n_rows, Some(3)); // 3 data rows (excluding header)
        assert_eq!(info.n_cols, Some(3));
        assert_eq!(info.columns.as_ref().unwrap().len(), 3);
    }
}
