use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::DensityError;

static TMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// ensures an output directory exists, creating missing parents. an existing
/// directory is left untouched.
pub fn create_dirs<P: AsRef<Path>>(path: P) -> Result<(), DensityError> {
    let directory = path.as_ref();
    if directory.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(directory).map_err(|source| DensityError::WriteFailure {
        filepath: directory.display().to_string(),
        source,
    })
}

/// writes `contents` to a hidden temporary file next to `path` and renames
/// it into place. readers of `path` see either the previous file or the
/// complete new one. the parent directory is created when missing.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), DensityError> {
    let filepath = path.to_str().unwrap_or_default().to_string();
    let write_failure = |source: std::io::Error| DensityError::WriteFailure {
        filepath: filepath.clone(),
        source,
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    create_dirs(parent)?;
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| {
            write_failure(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "destination has no file name",
            ))
        })?;
    let tmp_path = parent.join(format!(
        ".{filename}.{}.{}.tmp",
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let result = std::fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|_| std::fs::rename(&tmp_path, path));
    if let Err(e) = result {
        if tmp_path.exists() {
            if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
                log::warn!("unable to remove temporary file {tmp_path:?}: {cleanup}");
            }
        }
        return Err(write_failure(e));
    }
    Ok(())
}
