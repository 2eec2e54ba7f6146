//! Reading input documents.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_merge::Structure;
use serde_json::Value as Json;

use crate::error::CliError;

/// Document formats accepted as input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    /// `.json` files.
    Json,
    /// `.toml` files.
    Toml,
}

impl Format {
    /// Pick the format from the extension of `path`, ignoring case.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse `text` read from `path` into a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Json`] or [`CliError::Toml`] on malformed input.
    pub fn parse(self, path: &Utf8Path, text: &str) -> Result<Json, CliError> {
        match self {
            Self::Json => serde_json::from_str(text).map_err(|source| CliError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Self::Toml => toml::from_str(text).map_err(|source| CliError::Toml {
                path: path.to_path_buf(),
                source: Box::new(source),
            }),
        }
    }
}

/// Read `path` and convert its top-level object into a [`Structure`].
///
/// # Errors
///
/// Returns a [`CliError`] when the file cannot be read, has an unsupported
/// extension, fails to parse, or is not an object.
pub fn read_structure(path: &Utf8Path) -> Result<Structure, CliError> {
    let format = Format::from_path(path).ok_or_else(|| CliError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = read_to_string(path)?;
    let document = format.parse(path, &text)?;
    tracing::debug!(%path, ?format, "read input document");
    Structure::from_json(document).ok_or_else(|| CliError::NotAnObject {
        path: path.to_path_buf(),
    })
}

fn read_to_string(path: &Utf8Path) -> Result<String, CliError> {
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
            "input path has no file name",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    dir.read_to_string(file_name).map_err(io_error)
}
