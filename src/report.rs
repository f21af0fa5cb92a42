//! Append-only report sink for benchmark output.
//!
//! The benchmark's value lies entirely in the recorded log, so the sink is
//! opened once up front and any write failure aborts the run.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Order-preserving line sink consumed by the calibrator.
pub trait Reporter {
    fn write_line(&self, text: &str) -> Result<()>;
}

/// Reporter backed by a file created at construction time and held open
/// for the rest of the run.
pub struct FileReporter {
    file: Mutex<File>,
}

impl FileReporter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {:?}", path))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl Reporter for FileReporter {
    fn write_line(&self, text: &str) -> Result<()> {
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{}", text)?;
        Ok(())
    }
}

/// Derives the report filename from the run title, e.g.
/// "Hashing Benchmark" -> "hashing_benchmark.txt".
pub fn report_filename(title: &str) -> String {
    format!("{}.txt", title.to_lowercase().trim().replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename("Hashing Benchmark"), "hashing_benchmark.txt");
        assert_eq!(report_filename("  My Run  "), "my_run.txt");
        assert_eq!(report_filename("prod"), "prod.txt");
    }

    #[test]
    fn test_file_reporter_preserves_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("report.txt");

        let reporter = FileReporter::create(&path)?;
        reporter.write_line("first")?;
        reporter.write_line("")?;
        reporter.write_line("last")?;

        let content = fs::read_to_string(&path)?;
        assert_eq!(content, "first\n\nlast\n");
        Ok(())
    }

    #[test]
    fn test_file_reporter_bad_path_fails() {
        let result = FileReporter::create(Path::new("/nonexistent-dir/report.txt"));
        assert!(result.is_err());
    }
}
