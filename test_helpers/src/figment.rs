//! Shared helpers for working with `figment::Jail` in tests.
//!
//! These utilities run option-loading code inside a jail, with its own
//! working directory and environment, and return the closure's output as an
//! `anyhow::Result`.

use anyhow::{Result, anyhow};
use camino::Utf8Path;
use ortho_merge::{MergeOptions, MergeSettings};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers own the error and map_err passes it by value"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}

/// Write `files` into a fresh jail, export `env`, and resolve the options
/// loaded from `path` (if any) overlaid with `ORTHO_MERGE_` variables.
///
/// # Errors
///
/// Returns an error when a file cannot be written or the options fail to
/// load.
pub fn load_settings_in_jail(
    files: &[(&str, &str)],
    env: &[(&str, &str)],
    path: Option<&str>,
) -> Result<MergeSettings> {
    with_jail(|jail| {
        for (name, contents) in files {
            jail.create_file(name, contents)?;
        }
        for (key, value) in env {
            jail.set_env(key, value);
        }
        MergeOptions::load_layered(path.map(Utf8Path::new), ortho_merge::DEFAULT_ENV_PREFIX)
            .map(|options| options.resolve())
            .map_err(figment_error)
    })
}
