//! Size-rotated append-only file.
//!
//! Before each append the file size is checked; once it exceeds the policy
//! limit the file is shifted to `<name>.1`, earlier backups move up by one
//! (`.1` → `.2`, ...) and the oldest beyond `keep` is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// When to rotate and how many backups to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub keep: usize,
}

impl Default for RotationPolicy {
    /// 10 MB per file, three backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            keep: 3,
        }
    }
}

/// Line-oriented writer over a rotated file. The handle is opened lazily on
/// the first append.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Option<File>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing the file.
    pub fn append_line(&mut self, line: &str) -> io::Result<()> {
        if self.needs_rotation() {
            self.handle = None;
            self.rotate()?;
        }

        let file = match self.handle.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = self.handle.insert(file);
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.policy.max_bytes)
    }

    fn backup(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.keep == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup(self.policy.keep);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.policy.keep).rev() {
            let from = self.backup(index);
            if from.exists() {
                fs::rename(&from, self.backup(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_policy() -> RotationPolicy {
        RotationPolicy { max_bytes: 8, keep: 2 }
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut file = RotatingFile::new(dir.path().join("trace.json"), RotationPolicy::default());

        file.append_line("{\"a\":1}").expect("append");
        file.append_line("{\"b\":2}").expect("append");

        let contents = fs::read_to_string(file.path()).expect("read");
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_past_limit_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("trace.json");
        let mut file = RotatingFile::new(path.clone(), small_policy());

        for line in ["first-line", "second-line", "third-line", "fourth-line"] {
            file.append_line(line).expect("append");
        }

        assert_eq!(fs::read_to_string(&path).expect("current"), "fourth-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.json.1")).expect("b1"), "third-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.json.2")).expect("b2"), "second-line\n");
        assert!(!dir.path().join("trace.json.3").exists());
    }
}
