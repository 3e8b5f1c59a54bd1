use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;
use tracing::{debug, warn};

/// 결과 파일 탐색을 담당하는 유틸리티 (Single Responsibility Principle)
pub struct DataLoader;

impl DataLoader {
    /// Glob 패턴으로 파일 목록 가져오기
    ///
    /// No match is not an error: the caller decides how to report an empty run.
    pub fn load_files(pattern: &str) -> Result<Vec<PathBuf>> {
        let mut data_files = Vec::new();

        for entry in glob(pattern).context("Failed to read glob pattern")? {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        data_files.push(path);
                    }
                }
                Err(e) => warn!("Error reading path: {}", e),
            }
        }

        // Sort files for consistent ordering
        data_files.sort();

        debug!(
            "Found {} file(s) matching pattern '{}'",
            data_files.len(),
            pattern
        );
        for (i, file) in data_files.iter().enumerate() {
            debug!("  [{}] {}", i + 1, file.display());
        }

        Ok(data_files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("performance_5000_2.csv"), "Metric,Value\n").unwrap();
        fs::write(dir.path().join("performance_1000_1.csv"), "Metric,Value\n").unwrap();
        fs::write(dir.path().join("orders_1000_1.csv"), "Latency_us\n").unwrap();
        fs::create_dir(dir.path().join("performance_dir.csv")).unwrap();

        let pattern = dir.path().join("performance_*.csv");
        let files = DataLoader::load_files(&pattern.to_string_lossy()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["performance_1000_1.csv", "performance_5000_2.csv"]);
    }

    #[test]
    fn test_load_files_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("orders_*.csv");
        let files = DataLoader::load_files(&pattern.to_string_lossy()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_load_files_bad_pattern() {
        assert!(DataLoader::load_files("[").is_err());
    }
}
