use crate::error::{Result, WizardError};
use std::path::{Component, Path, PathBuf};

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => WizardError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => WizardError::from(e),
        })?;
    }
    Ok(())
}

/// Lexically normalize an archive entry name into a relative path.
///
/// `.` segments are dropped and `..` removes the previous segment; a `..` with
/// nothing left to remove is discarded, so the result can never climb above the
/// directory it is later joined onto. Both `/` and `\` are treated as separators.
/// Returns `None` when nothing remains (the archive root itself).
pub fn normalize_entry_path(name: &str) -> Option<PathBuf> {
    let mut parts: Vec<&str> = Vec::new();

    for segment in name.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return None;
    }

    Some(parts.iter().collect())
}

/// Resolve an archive entry name against `destination`, keeping it inside.
pub fn resolve_within(destination: &Path, name: &str) -> Option<PathBuf> {
    let relative = normalize_entry_path(name)?;

    // Drive prefixes or roots would make `join` discard the destination
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    Some(destination.join(relative))
}

pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(windows)]
    {
        path.is_file()
    }
}
