//! Writing the merged document.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use serde_json::Value as Json;

use crate::error::CliError;

/// Render `document` as pretty JSON with a trailing newline.
///
/// # Errors
///
/// Returns [`CliError::Serialize`] if serialisation fails.
pub fn render(document: &Json) -> Result<String, CliError> {
    let mut text = serde_json::to_string_pretty(document).map_err(CliError::Serialize)?;
    text.push('\n');
    Ok(text)
}

/// Write `document` to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the destination cannot be written.
pub fn write_document(path: Option<&Utf8Path>, document: &Json) -> Result<(), CliError> {
    let text = render(document)?;
    match path {
        Some(file) => write_file(file, &text),
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .map_err(|source| CliError::Io {
                path: "<stdout>".into(),
                source,
            }),
    }
}

fn write_file(path: &Utf8Path, text: &str) -> Result<(), CliError> {
    let io_error = |source: std::io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(io_error)?;
    file.write_all(text.as_bytes()).map_err(io_error)?;
    tracing::info!(%path, "wrote merged document");
    Ok(())
}
