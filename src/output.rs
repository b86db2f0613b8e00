use crate::error::{HebscribeError, Result};
use regex::Regex;
use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::NamedTempFile;
use tracing::debug;

/// Characters that are invalid in file names on at least one major OS.
static BAD_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:/\\|?*"']"#).expect("Invalid filename regex"));

/// Strip characters that cannot appear in a file name.
pub fn sanitize_file_name(name: &str) -> String {
    BAD_FILENAME_CHARS.replace_all(name, "").into_owned()
}

/// `<dir>/<sanitized media stem>.<extension>`; `dir` defaults to the media's directory.
pub fn derive_output_path(media: &Path, output_dir: Option<&Path>, extension: &str) -> PathBuf {
    let stem = media
        .file_stem()
        .map(|s| sanitize_file_name(&s.to_string_lossy()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "transcript".to_string());

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => media.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    dir.join(format!("{}.{}", stem, extension))
}

/// Write `content` to `path` all at once.
///
/// The text goes to a temporary file next to `path` that is renamed into
/// place only after a complete write, so a failure never leaves a truncated
/// file at `path`.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let write_err = |source: std::io::Error| HebscribeError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;

    // Temp files are owner-only; replace that with the target's mode.
    if let Some(permissions) = output_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Keep the mode of a file being replaced; new files get `rw-r--r--`.
#[cfg(unix)]
fn output_permissions(path: &Path) -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(match fs::metadata(path) {
        Ok(metadata) => metadata.permissions(),
        Err(_) => Permissions::from_mode(0o644),
    })
}

#[cfg(not(unix))]
fn output_permissions(path: &Path) -> Option<Permissions> {
    fs::metadata(path).ok().map(|m| m.permissions())
}
