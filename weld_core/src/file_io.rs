//! # File I/O Module
//!
//! Handles project file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Projects are saved as `.wtp` (Weldtime project) files containing JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use weld_core::file_io::{load_project, save_project};
//! use weld_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::demo();
//! let path = Path::new("vessel.wtp");
//!
//! save_project(&project, path)?;
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.job_id, project.meta.job_id);
//! # Ok::<(), weld_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Extension of project files
pub const PROJECT_EXTENSION: &str = "wtp";

/// Temporary sibling used while a file is being written.
fn tmp_path_for(path: &Path) -> PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// Removes the temp file when a write step failed.
fn discard_on_error<T>(result: CalcResult<T>, tmp_path: &Path) -> CalcResult<T> {
    if result.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    result
}

/// Write `contents` to `path` with atomic write semantics.
///
/// 1. Write to a temporary file next to the target
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
///
/// An interrupted write leaves the previous file untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = tmp_file
        .write_all(contents)
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))
        .and_then(|_| {
            tmp_file.sync_all().map_err(|e| {
                CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
            })
        });
    drop(tmp_file);
    discard_on_error(written, &tmp_path)?;

    let renamed = fs::rename(&tmp_path, path)
        .map_err(|e| CalcError::file_error("rename to final", path.display().to_string(), e.to_string()));
    discard_on_error(renamed, &tmp_path)?;

    debug!(path = %path.display(), bytes = contents.len(), "file written");
    Ok(())
}

/// Save a project as pretty-printed JSON with atomic write semantics.
///
/// # Example
///
/// ```rust,no_run
/// use weld_core::file_io::save_project;
/// use weld_core::project::Project;
/// use std::path::Path;
///
/// let project = Project::new("Estimator", "25-001", "Client");
/// save_project(&project, Path::new("vessel.wtp"))?;
/// # Ok::<(), weld_core::errors::CalcError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CalcError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&project.meta.version)?;
    debug!(path = %path.display(), items = project.item_count(), "project loaded");

    Ok(project)
}

/// Validate that a file version is compatible with the current schema.
///
/// The major version must match; while the schema is 0.x a file with a newer
/// minor version is rejected too.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.trim().parse().ok()).collect() };

    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;
    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    if current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("weldtime_test_{}_{}.{}", std::process::id(), name, PROJECT_EXTENSION))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(tmp_path_for(Path::new("/jobs/vessel.wtp")), Path::new("/jobs/vessel.wtp.tmp"));
        assert_eq!(tmp_path_for(Path::new("/jobs/vessel")), Path::new("/jobs/vessel.tmp"));
    }

    #[test]
    fn test_failed_write_removes_tmp_file() {
        let tmp_path = tmp_path_for(&temp_project_path("failed_write"));
        fs::write(&tmp_path, b"partial").unwrap();

        let failed: CalcResult<()> = Err(CalcError::file_error("write temp file", "x", "disk full"));
        assert!(discard_on_error(failed, &tmp_path).is_err());
        assert!(!tmp_path.exists());

        fs::write(&tmp_path, b"complete").unwrap();
        discard_on_error(Ok(()), &tmp_path).unwrap();
        assert!(tmp_path.exists());
        let _ = fs::remove_file(&tmp_path);
    }

    #[test]
    fn test_rename_failure_leaves_no_tmp_file() {
        // Renaming a file over a non-empty directory fails
        let target = temp_project_path("rename_target");
        let _ = fs::remove_dir_all(&target);
        fs::create_dir_all(target.join("occupied")).unwrap();

        assert!(write_atomic(&target, b"{}").is_err());
        assert!(!tmp_path_for(&target).exists());
        let _ = fs::remove_dir_all(&target);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let project = Project::demo();
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded, project);
        assert_eq!(loaded.estimate().unwrap(), project.estimate().unwrap());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");

        let project = Project::new("Test", "TEST", "Client");
        save_project(&project, &path).unwrap();
        // Overwriting an existing file goes through the same rename
        save_project(&project, &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("").is_err());
        assert!(validate_version("beta").is_err());
    }

    #[test]
    fn test_newer_file_rejected_on_load() {
        let path = temp_project_path("newer");
        let mut project = Project::new("Test", "TEST", "Client");
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, CalcError::VersionMismatch { .. }));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_project_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = load_project(&temp_project_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
