//! Rolling File Logger
//!
//! Installs a `tracing` subscriber that writes to `<log_dir>/<app>.log`.
//! When the file grows past `MAX_FILE_BYTES` it is rotated to `<app>.log.1`,
//! older files shift up, and the oldest beyond `MAX_ROTATED_FILES` is dropped.
//! `log` records from dependencies are captured as well.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// Rotate once the active file reaches this size
pub const MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;

/// Number of rotated files kept next to the active one
pub const MAX_ROTATED_FILES: usize = 3;

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

/// Size-bounded log file with numbered backups
pub struct RollingFile {
    dir: PathBuf,
    base_name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let base_name = format!("{}.log", app_name);
        let active = dir.join(&base_name);
        let file = OpenOptions::new().create(true).append(true).open(&active)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            base_name,
            max_bytes,
            max_files,
            file,
            written,
        })
    }

    /// Path of the active file (index 0) or of a rotated backup
    pub fn path(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(&self.base_name)
        } else {
            self.dir.join(format!("{}.{}", self.base_name, index))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = self.path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..self.max_files).rev() {
            let from = self.path(index);
            if from.exists() {
                fs::rename(&from, self.path(index + 1))?;
            }
        }

        self.file = OpenOptions::new().create(true).append(true).open(self.path(0))?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Install the global subscriber writing to `<log_dir>/<app_name>.log`
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    let rolling = RollingFile::open(&log_dir, app_name, MAX_FILE_BYTES, MAX_ROTATED_FILES)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;
    let path = rolling.path(0);

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(rolling))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    let _ = LOG_FILE.set(path.clone());
    tracing::info!(
        "{} logging to {} (started {})",
        app_name,
        path.display(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

/// Path of the active log file, once initialized
pub fn log_file() -> Option<&'static Path> {
    LOG_FILE.get().map(|p| p.as_path())
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::error!("{}", msg);
    Ok(())
}

fn ensure_initialized() -> Result<(), String> {
    if LOG_FILE.get().is_some() {
        Ok(())
    } else {
        Err("Logger not initialized".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 10, 2).unwrap();

        file.write_all(b"0123456789").unwrap();
        file.write_all(b"abcdef").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(file.path(1)).unwrap(), "0123456789");
        assert_eq!(fs::read_to_string(file.path(0)).unwrap(), "abcdef");
    }

    #[test]
    fn test_keeps_bounded_number_of_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 4, 2).unwrap();

        for chunk in ["aaaa", "bbbb", "cccc", "dddd"] {
            file.write_all(chunk.as_bytes()).unwrap();
        }
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(file.path(0)).unwrap(), "dddd");
        assert_eq!(fs::read_to_string(file.path(1)).unwrap(), "cccc");
        assert_eq!(fs::read_to_string(file.path(2)).unwrap(), "bbbb");
        assert!(!file.path(3).exists());
    }

    #[test]
    fn test_helpers_require_init() {
        if log_file().is_none() {
            assert!(info("not yet").is_err());
        }
    }
}
