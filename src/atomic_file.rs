//! Crash-safe file replacement shared by the config file and the file store.

use std::io::{self, Write};
use std::path::Path;

const TEMP_NAME_ATTEMPTS: usize = 5;

/// Replace `path` with `data` through a sibling temp file and a rename.
///
/// Readers see either the old contents or the new ones. The temp file is
/// removed on failure and the parent directory is synced after the rename.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    use rand::TryRngCore;
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::other("path has no parent directory"))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path has no file name"))?;

    let mut last_err = None;
    for _ in 0..TEMP_NAME_ATTEMPTS {
        let mut bytes = [0u8; 6];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|source| {
                io::Error::other(format!("failed to generate temporary file suffix: {source}"))
            })?;
        let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let tmp_path = dir.join(format!("{}.tmp-{}", file_name.to_string_lossy(), suffix));

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path);
        let mut file = match file {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(err) => return Err(err),
        };

        if let Err(err) = file.write_all(data).and_then(|_| file.sync_all()) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err);
        }
        drop(file);
        if let Err(err) = replace_file(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err);
        }
        return sync_parent_dir(dir);
    }

    Err(io::Error::other(format!(
        "failed to create temporary file: {}",
        last_err
            .as_ref()
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unknown error".into())
    )))
}

fn replace_file(temp_path: &Path, path: &Path) -> io::Result<()> {
    match std::fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            #[cfg(target_os = "windows")]
            if err.kind() == io::ErrorKind::AlreadyExists
                || err.kind() == io::ErrorKind::PermissionDenied
            {
                if let Err(inner) = std::fs::remove_file(path) {
                    if inner.kind() != io::ErrorKind::NotFound {
                        return Err(inner);
                    }
                }
                std::fs::rename(temp_path, path)?;
                return Ok(());
            }
            Err(err)
        }
    }
}

fn sync_parent_dir(dir: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::fs::File::open(dir).and_then(|handle| handle.sync_all())?;
    }
    #[cfg(not(unix))]
    {
        let _ = dir;
    }
    Ok(())
}
