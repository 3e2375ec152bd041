//! Command-line interface
//!
//! `heatload run` executes the full pipeline and prints the evaluation
//! report; `heatload info` summarizes the input file without running
//! anything.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::data::DataLoader;
use crate::error::Result;
use crate::pipeline::{self, PipelineConfig, PipelineReport};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}

fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn kv(key: &str, val: &str) {
    println!("  {:<28} {}", dim(key), val.white());
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "heatload")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Heating-load regression pipeline for building energy data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: split, preprocess, fit, evaluate, cross-validate
    Run {
        /// Input data file (CSV, Parquet, or line-delimited JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Random seed for the split and fold assignment
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Share of rows assigned to the training set
        #[arg(long, default_value = "0.75")]
        train_fraction: f64,

        /// Number of cross-validation folds
        #[arg(long, default_value = "5")]
        cv_folds: usize,

        /// Write the full report as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show basic information about a data file
    Info {
        /// Input data file
        #[arg(short, long)]
        data: PathBuf,
    },
}

/// Execute the `run` command
pub fn cmd_run(
    data: &PathBuf,
    seed: u64,
    train_fraction: f64,
    cv_folds: usize,
    output: Option<&PathBuf>,
) -> Result<()> {
    let path = data.to_string_lossy();
    let loader = DataLoader::new();
    let df = loader.load_auto(&path)?;
    step_ok(&format!("loaded {} rows from {}", df.height(), path));

    let config = PipelineConfig {
        train_fraction,
        seed,
        cv_folds,
        ..PipelineConfig::default()
    };
    let report = pipeline::run(&df, &config)?;

    print_report(&report);

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(out_path, json)?;
        step_ok(&format!("report written to {}", out_path.to_string_lossy()));
    }

    Ok(())
}

/// Execute the `info` command
pub fn cmd_info(data: &PathBuf) -> Result<()> {
    let path = data.to_string_lossy();
    let loader = DataLoader::new();
    let info = loader.get_file_info(&path)?;

    section("File");
    kv("path", &info.path);
    kv("size", &format!("{} bytes", info.file_size));
    if let Some(n_rows) = info.n_rows {
        kv("rows", &n_rows.to_string());
    }
    if let Some(n_cols) = info.n_cols {
        kv("columns", &n_cols.to_string());
    }
    if let Some(columns) = &info.columns {
        kv("names", &columns.join(", "));
    }
    println!();

    Ok(())
}

fn print_report(report: &PipelineReport) {
    section("Data");
    kv("rows", &report.n_rows.to_string());
    kv("train / test", &format!("{} / {}", report.n_train, report.n_test));

    if !report.outliers.is_empty() {
        section("Response outliers (report only)");
        kv("threshold", &format!("{:.1} sd", report.outliers.threshold));
        for row in &report.outliers.rows {
            kv(
                &format!("row {}", row.index),
                &format!("{:.2} (z = {:+.2})", row.value, row.z_score),
            );
        }
    }

    if !report.dropped_collinear.is_empty() {
        section("Collinearity");
        for name in &report.dropped_collinear {
            kv("dropped", name);
        }
    }

    section("Coefficients");
    kv("(intercept)", &format!("{:+.4}", report.intercept));
    for coef in &report.coefficients {
        kv(&coef.name, &format!("{:+.4}", coef.value));
    }

    section("Test metrics");
    kv("rmse", &format!("{:.4}", report.test_metrics.rmse));
    kv("mae", &format!("{:.4}", report.test_metrics.mae));
    kv("r_squared", &format!("{:.4}", report.test_metrics.r_squared));

    section(&format!("{}-fold cross-validation", report.cv.n_folds));
    kv(
        "rmse",
        &format!("{:.4} ± {:.4}", report.cv.mean_rmse, report.cv.std_rmse),
    );
    kv("mae", &format!("{:.4}", report.cv.mean_mae));
    kv("r_squared", &format!("{:.4}", report.cv.mean_r_squared));
    println!();
}
