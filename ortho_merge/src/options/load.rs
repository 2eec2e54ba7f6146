//! Loading [`MergeOptions`] through figment.

use camino::Utf8Path;
use figment::Figment;
use figment::providers::Env;
#[cfg(any(feature = "toml", feature = "json"))]
use figment::providers::Format;
#[cfg(feature = "json")]
use figment::providers::Json;
#[cfg(feature = "toml")]
use figment::providers::Toml;

use super::MergeOptions;
use crate::error::{MergeError, MergeResult};

/// Environment prefix used by [`MergeOptions::load_layered`] callers that do
/// not need their own.
pub const DEFAULT_ENV_PREFIX: &str = "ORTHO_MERGE_";

impl MergeOptions {
    /// Extract an options record from a prepared figment.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Options`] when the figment cannot be extracted.
    pub fn from_figment(figment: &Figment) -> MergeResult<Self> {
        figment.extract().map_err(MergeError::options)
    }

    /// Load an options record from a TOML or JSON file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Options`] when the file is missing, has an
    /// unsupported extension, or fails to parse.
    pub fn load(path: &Utf8Path) -> MergeResult<Self> {
        Self::from_figment(&file_figment(path)?)
    }

    /// Load options from an optional file overlaid with environment variables
    /// starting with `env_prefix`, such as `ORTHO_MERGE_APPEND_ARRAYS=true`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Options`] when the file or an environment value
    /// cannot be read or parsed.
    pub fn load_layered(path: Option<&Utf8Path>, env_prefix: &str) -> MergeResult<Self> {
        let base = match path {
            Some(file) => file_figment(file)?,
            None => Figment::new(),
        };
        Self::from_figment(&base.merge(Env::prefixed(env_prefix)))
    }
}

fn file_figment(path: &Utf8Path) -> MergeResult<Figment> {
    if !path.is_file() {
        return Err(MergeError::options(figment::Error::from(format!(
            "options file '{path}' does not exist"
        ))));
    }
    let extension = path.extension().map(str::to_ascii_lowercase);
    match extension.as_deref() {
        #[cfg(feature = "toml")]
        Some("toml") => Ok(Figment::from(Toml::file(path.as_std_path()))),
        #[cfg(feature = "json")]
        Some("json") => Ok(Figment::from(Json::file(path.as_std_path()))),
        other => Err(MergeError::options(figment::Error::from(format!(
            "unsupported options format '{}' for '{path}'",
            other.unwrap_or_default()
        )))),
    }
}
