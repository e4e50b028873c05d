use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::analysis::{DEFAULT_MAX_FILE_SIZE, PYTHON_EXTENSIONS};
use crate::types::{Result, log_filter_warn};

/// Collects Python files under a root, honoring `.gitignore`, exclude globs
/// and a size ceiling.
pub struct FileScanner {
    root: PathBuf,
    exclude: Vec<String>,
    max_file_size: u64,
}

impl FileScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: vec![],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Scan for Python files, sorted by path.
    ///
    /// A root that is itself a file is returned as-is when it passes the
    /// extension and size checks.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        if self.root.is_file() {
            let metadata = self.root.metadata()?;
            let accepted = is_python_file(&self.root) && metadata.len() <= self.max_file_size;
            return Ok(if accepted {
                vec![ScannedFile {
                    path: self.root.clone(),
                    size: metadata.len(),
                }]
            } else {
                vec![]
            });
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .build();

        let mut files = Vec::new();

        for entry in walker.filter_map(|e| log_filter_warn(e, "walking directory")) {
            let path = entry.path();

            if !path.is_file() || !is_python_file(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluded by pattern: {}", path.display());
                continue;
            }

            if let Ok(metadata) = path.metadata() {
                if metadata.len() > self.max_file_size {
                    debug!(
                        "Skipping {} ({} bytes > {})",
                        path.display(),
                        metadata.len(),
                        self.max_file_size
                    );
                    continue;
                }

                files.push(ScannedFile {
                    path: path.to_path_buf(),
                    size: metadata.len(),
                });
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative.to_string_lossy();

        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
        })
    }
}

fn is_python_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| PYTHON_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_python_only() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.py", "x = 1\n");
        write(temp.path(), "pkg/b.py", "y = 2\n");
        write(temp.path(), "notes.md", "# notes\n");

        let files = FileScanner::new(temp.path()).scan().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("a.py"), PathBuf::from("pkg/b.py")]);
    }

    #[test]
    fn test_exclude_patterns() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "keep.py", "x = 1\n");
        write(temp.path(), ".venv/lib/site.py", "y = 2\n");

        let files = FileScanner::new(temp.path())
            .with_exclude(vec![".venv/**".to_string()])
            .scan()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("keep.py"));
    }

    #[test]
    fn test_max_file_size() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "small.py", "x = 1\n");
        write(temp.path(), "big.py", &"x = 1\n".repeat(100));

        let files = FileScanner::new(temp.path())
            .with_max_file_size(50)
            .scan()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("small.py"));
    }

    #[test]
    fn test_single_file_root() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "solo.py", "pass\n");
        write(temp.path(), "solo.txt", "pass\n");

        assert_eq!(
            FileScanner::new(temp.path().join("solo.py"))
                .scan()
                .unwrap()
                .len(),
            1
        );
        assert!(
            FileScanner::new(temp.path().join("solo.txt"))
                .scan()
                .unwrap()
                .is_empty()
        );
    }
}
