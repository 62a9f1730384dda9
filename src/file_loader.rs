//! Level file discovery and loading.

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr as _};
use tracing::{debug, warn};

use crate::level::{Level, LEVEL_EXTENSION};

/// Scans `dir` for `.maze` files and appends the ones that decode to `levels`.
///
/// Files are visited in name order so the level list is stable between runs. Files that cannot be
/// read or do not hold a valid maze are logged and skipped. Returns the number of levels added.
///
/// # Errors
///
/// This function may return errors if the directory itself cannot be listed.
pub(crate) fn fetch_levels(dir: &Path, levels: &mut Vec<Level>) -> Result<usize> {
    let mut entries = Vec::new();
    for entry in
        fs::read_dir(dir).wrap_err_with(|| format!("failed to list {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_dir()
            && path
                .extension()
                .is_some_and(|extension| extension == LEVEL_EXTENSION)
        {
            entries.push(entry);
        }
    }
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut added = 0;
    for entry in entries {
        let path = entry.path();
        let loaded = fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))
            .and_then(|contents| Level::from_source(entry.file_name(), &contents));

        match loaded {
            Ok(level) => {
                debug!(name = %level.name, path = %path.display(), "loaded level");
                levels.push(level);
                added += 1;
            }
            Err(err) => warn!(path = %path.display(), "skipping level: {err:#}"),
        }
    }

    Ok(added)
}
