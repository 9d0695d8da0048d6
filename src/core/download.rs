use crate::core::api::QuarkusApi;
use crate::core::state::ProjectGenState;
use crate::error::{Result, WizardError};
use crate::utils::fs;
use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// One record read from the archive, resolved against the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    /// Permission bits from the upper half of the external attributes.
    pub mode: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub directories: usize,
    pub files: usize,
    pub bytes_written: u64,
}

/// Download the project described by `state` and unpack it into its target directory.
pub async fn download_project(api: &QuarkusApi, state: &ProjectGenState) -> Result<ExtractSummary> {
    let bytes = api.fetch_archive(state).await?;
    extract(bytes, &state.target_dir).await
}

/// Unpack a zip archive held in memory into `destination`.
///
/// Entries are handled one at a time in archive order. The returned future
/// completes only after every file has been written and flushed.
pub async fn extract(content: Vec<u8>, destination: &Path) -> Result<ExtractSummary> {
    let target = destination.to_path_buf();
    tokio::task::spawn_blocking(move || extract_to_dir(&content, &target))
        .await
        .map_err(|e| {
            tracing::debug!("Extraction task failed: {e}");
            WizardError::ExtractionError {
                path: destination.to_path_buf(),
            }
        })?
}

pub fn extract_to_dir(content: &[u8], destination: &Path) -> Result<ExtractSummary> {
    tracing::info!("Extracting project to {}", destination.display());
    fs::ensure_dir_exists(destination)?;

    let mut archive = ZipArchive::new(Cursor::new(content))?;
    let mut summary = ExtractSummary::default();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;

        let entry = match fs::resolve_within(destination, file.name()) {
            Some(path) => ArchiveEntry {
                path,
                is_dir: file.is_dir(),
                mode: file.unix_mode(),
            },
            // The archive root itself
            None => continue,
        };

        if entry.is_dir {
            tracing::trace!("Creating directory {}", entry.path.display());
            fs::ensure_dir_exists(&entry.path)?;
            summary.directories += 1;
        } else {
            tracing::trace!("Writing {}", entry.path.display());
            summary.bytes_written += write_entry(&mut file, &entry)?;
            summary.files += 1;
        }
    }

    tracing::debug!(
        "Extracted {} directories and {} files",
        summary.directories,
        summary.files
    );
    Ok(summary)
}

fn write_entry<R: Read>(reader: &mut R, entry: &ArchiveEntry) -> Result<u64> {
    if let Some(parent) = entry.path.parent() {
        fs::ensure_dir_exists(parent)?;
    }

    let mut outfile = File::create(&entry.path)?;
    let written = std::io::copy(reader, &mut outfile)?;
    outfile.flush()?;
    outfile.sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = entry.mode.map(|m| m & 0o7777).filter(|m| *m != 0) {
            std::fs::set_permissions(&entry.path, std::fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(written)
}
