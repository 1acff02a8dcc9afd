//! Report generation module.
//!
//! [`ExplorerReport`] gathers the dataset overview, coercion outcomes and
//! per-column profiles into one serializable value suitable for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_explorer::reporting::{ReportGenerator, report_base_name};
//!
//! let report = ReportGenerator::build_report(
//!     "data/train.csv",
//!     &config,
//!     summary.overview()?,
//!     coercions,
//!     profile,
//! );
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Or write to file
//! let generator = ReportGenerator::new("output");
//! generator.write_report_to_file(&report, &report_base_name("data/train.csv"))?;
//! ```

mod generator;

pub use generator::{ExplorerReport, ReportGenerator, report_base_name};
