use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{Result, UpdaterError};
use crate::types::ServiceVersions;

/// Reads the whole manifest. A missing or malformed file is fatal for the run.
pub fn load(path: &Path) -> Result<ServiceVersions> {
    let raw = fs::read_to_string(path).map_err(|source| UpdaterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let versions = serde_json::from_str(&raw).map_err(|source| UpdaterError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded manifest from {}", path.display());
    Ok(versions)
}

/// Pretty prints with two space indentation and a trailing newline.
pub fn to_pretty_json(versions: &ServiceVersions) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(versions)?;
    out.push('\n');
    Ok(out)
}

/// Rewrites the manifest. The content goes to a sibling of the resolved target
/// first and is renamed over it, so the old file stays intact if writing fails.
/// Symlinks are followed and the target's permissions are kept.
pub fn save(path: &Path, versions: &ServiceVersions) -> Result<()> {
    let body = to_pretty_json(versions).map_err(|source| UpdaterError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let target = resolve_target(path);
    let tmp = temp_path(&target);
    fs::write(&tmp, body).map_err(|source| UpdaterError::Io {
        path: tmp.clone(),
        source,
    })?;

    if let Ok(meta) = fs::metadata(&target) {
        if let Err(source) = fs::set_permissions(&tmp, meta.permissions()) {
            let _ = fs::remove_file(&tmp);
            return Err(UpdaterError::Io { path: tmp, source });
        }
    }

    if let Err(source) = fs::rename(&tmp, &target) {
        let _ = fs::remove_file(&tmp);
        return Err(UpdaterError::Io {
            path: target,
            source,
        });
    }

    debug!("Wrote manifest to {}", target.display());
    Ok(())
}

/// The file a write to `path` should land in. A path that doesn't exist yet
/// is used as given.
fn resolve_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
