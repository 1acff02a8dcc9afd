use crate::config::ProfilerConfig;
use crate::error::{ExplorerError, Result};
use crate::types::{
    CoercionOutcome, DatasetOverview, DatasetProfile, DatetimeProfile, NumericProfile,
    TextProfile,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ============================================================================
// Report Types
// ============================================================================

/// Everything the explorer learned about one dataset.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerReport {
    // Metadata
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Settings the profiles were computed with
    pub config: ProfilerConfig,

    // Whole-table statistics
    pub overview: DatasetOverview,
    /// One entry per column the caller asked to coerce to datetime
    pub coercions: Vec<CoercionOutcome>,

    // Per-column profiles, in table order within each type
    pub numeric: Vec<NumericProfile>,
    pub text: Vec<TextProfile>,
    pub datetime: Vec<DatetimeProfile>,
    /// Columns of type "other" that were counted but not profiled
    pub skipped_columns: Vec<String>,
}

impl ExplorerReport {
    /// Number of columns with a full profile.
    pub fn profiled_columns(&self) -> usize {
        self.numeric.len() + self.text.len() + self.datetime.len()
    }
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds reports and writes them to an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Assemble a report from the summary, coercion and profiling results.
    pub fn build_report(
        input_file: &str,
        config: &ProfilerConfig,
        overview: DatasetOverview,
        coercions: Vec<CoercionOutcome>,
        profile: DatasetProfile,
    ) -> ExplorerReport {
        debug!(
            "Building report for {} ({} numeric, {} text, {} datetime columns)",
            input_file,
            profile.numeric.len(),
            profile.text.len(),
            profile.datetime.len()
        );

        ExplorerReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            config: config.clone(),
            overview,
            coercions,
            numeric: profile.numeric,
            text: profile.text,
            datetime: profile.datetime,
            skipped_columns: profile.skipped,
        }
    }

    /// Write a report as pretty-printed JSON.
    ///
    /// If `report_base_name` is "train", the file will be "train_report.json".
    pub fn write_report_to_file(
        &self,
        report: &ExplorerReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        if report_base_name.trim().is_empty() {
            return Err(ExplorerError::ReportGenerationFailed(
                "report name must not be empty".to_string(),
            ));
        }

        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

/// Base name for a report file: the input's file stem, or "dataset".
pub fn report_base_name(input: impl AsRef<Path>) -> String {
    input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "dataset".to_string())
}
