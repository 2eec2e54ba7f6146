//! CLI definitions for `ortho-merge`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args as ClapArgs, Parser};
use ortho_merge::MergeOptions;

/// Command-line arguments for `ortho-merge`.
#[derive(Debug, Parser)]
#[command(
    name = "ortho-merge",
    about = "Deep merge JSON and TOML documents",
    version
)]
pub struct Args {
    /// Documents to merge, in order. Later documents win.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<Utf8PathBuf>,

    /// Write the merged document here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Load merge options from a TOML or JSON file.
    #[arg(long, value_name = "PATH")]
    pub options: Option<Utf8PathBuf>,

    /// Raise log verbosity; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Merge behaviour flags.
    #[command(flatten)]
    pub merge: MergeFlags,
}

/// Flags that mirror the fields of [`MergeOptions`].
///
/// An absent flag leaves the value from the options file or environment in
/// place; flags can only switch behaviour on.
#[derive(Debug, Default, ClapArgs)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag mirrors one boolean merge option"
)]
pub struct MergeFlags {
    /// Merge only this key (repeatable).
    #[arg(long = "only-key", value_name = "KEY")]
    pub only_keys: Vec<String>,

    /// Never merge this key (repeatable).
    #[arg(long = "skip-key", value_name = "KEY")]
    pub skip_keys: Vec<String>,

    /// Merge only keys found in at least two inputs.
    #[arg(long)]
    pub only_common_keys: bool,

    /// Merge only keys found in every input.
    #[arg(long)]
    pub only_universal_keys: bool,

    /// Merge only keys found in exactly one input.
    #[arg(long)]
    pub skip_common_keys: bool,

    /// Merge only keys missing from at least one input.
    #[arg(long)]
    pub skip_universal_keys: bool,

    /// Store getter results instead of getters.
    #[arg(long)]
    pub invoke_getters: bool,

    /// Drop setters instead of copying them.
    #[arg(long)]
    pub skip_setters: bool,

    /// Append incoming arrays to existing ones.
    #[arg(long)]
    pub append_arrays: bool,

    /// Prepend incoming arrays to existing ones.
    #[arg(long)]
    pub prepend_arrays: bool,

    /// Remove repeated array elements.
    #[arg(long)]
    pub dedup_arrays: bool,

    /// Sort merged arrays.
    #[arg(long)]
    pub sort_arrays: bool,

    /// Treat inherited enumerable keys as own keys.
    #[arg(long)]
    pub hoist_enumerable: bool,

    /// Copy merged prototype keys onto the result.
    #[arg(long)]
    pub hoist_proto: bool,

    /// Ignore prototype layers.
    #[arg(long)]
    pub skip_proto: bool,
}

type FlagSetter = fn(MergeOptions, bool) -> MergeOptions;

impl Args {
    /// Options set on the command line, ready to layer over loaded ones.
    #[must_use]
    pub fn merge_options(&self) -> MergeOptions {
        self.merge.to_options()
    }
}

impl MergeFlags {
    /// Convert the flags into an options record holding only what was set.
    #[must_use]
    pub fn to_options(&self) -> MergeOptions {
        let switches: [(bool, FlagSetter); 13] = [
            (self.only_common_keys, MergeOptions::only_common_keys),
            (self.only_universal_keys, MergeOptions::only_universal_keys),
            (self.skip_common_keys, MergeOptions::skip_common_keys),
            (self.skip_universal_keys, MergeOptions::skip_universal_keys),
            (self.invoke_getters, MergeOptions::invoke_getters),
            (self.skip_setters, MergeOptions::skip_setters),
            (self.append_arrays, MergeOptions::append_arrays),
            (self.prepend_arrays, MergeOptions::prepend_arrays),
            (self.dedup_arrays, MergeOptions::dedup_arrays),
            (self.sort_arrays, MergeOptions::sort_arrays),
            (self.hoist_enumerable, MergeOptions::hoist_enumerable),
            (self.hoist_proto, MergeOptions::hoist_proto),
            (self.skip_proto, MergeOptions::skip_proto),
        ];
        let mut options = switches
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .fold(MergeOptions::new(), |record, (_, set)| set(record, true));
        if !self.only_keys.is_empty() {
            options = options.only_keys(self.only_keys.iter().cloned());
        }
        if !self.skip_keys.is_empty() {
            options = options.skip_keys(self.skip_keys.iter().cloned());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use clap::Parser;
    use ortho_merge::{ArrayCombine, KeySetMode, PrototypeMode};
    use rstest::rstest;

    fn parse(extra: &[&str]) -> Result<Args> {
        let argv = ["ortho-merge", "a.json"].into_iter().chain(extra.iter().copied());
        Ok(Args::try_parse_from(argv)?)
    }

    #[rstest]
    fn absent_flags_leave_defaults() -> Result<()> {
        let settings = parse(&[])?.merge_options().resolve();
        ensure!(settings.key_set == KeySetMode::All, "key set changed");
        ensure!(settings.combine == ArrayCombine::Replace, "combine changed");
        ensure!(!settings.dedup && !settings.sort.is_enabled(), "array flags changed");
        ensure!(settings.prototype == PrototypeMode::Link, "prototype mode changed");
        Ok(())
    }

    #[rstest]
    #[case::common(&["--only-common-keys"], KeySetMode::Common)]
    #[case::universal(&["--only-universal-keys"], KeySetMode::Universal)]
    #[case::skip_common(&["--skip-common-keys"], KeySetMode::SkipCommon)]
    #[case::skip_universal(&["--skip-universal-keys"], KeySetMode::SkipUniversal)]
    #[case::common_wins(&["--skip-universal-keys", "--only-common-keys"], KeySetMode::Common)]
    fn key_set_flags(#[case] flags: &[&str], #[case] expected: KeySetMode) -> Result<()> {
        let settings = parse(flags)?.merge_options().resolve();
        ensure!(
            settings.key_set == expected,
            "expected {expected:?}, got {:?}",
            settings.key_set
        );
        Ok(())
    }

    #[rstest]
    fn array_and_prototype_flags() -> Result<()> {
        let settings = parse(&[
            "--prepend-arrays",
            "--dedup-arrays",
            "--sort-arrays",
            "--hoist-proto",
        ])?
        .merge_options()
        .resolve();
        ensure!(settings.combine == ArrayCombine::Prepend, "prepend not set");
        ensure!(settings.dedup, "dedup not set");
        ensure!(settings.sort.is_enabled(), "sort not set");
        ensure!(settings.prototype == PrototypeMode::Hoist, "hoist not set");
        Ok(())
    }

    #[rstest]
    fn repeated_key_flags_collect() -> Result<()> {
        let settings = parse(&["--only-key", "a", "--only-key", "b", "--skip-key", "c"])?
            .merge_options()
            .resolve();
        ensure!(settings.only_keys == ["a", "b"], "only keys: {:?}", settings.only_keys);
        ensure!(settings.skip_keys == ["c"], "skip keys: {:?}", settings.skip_keys);
        Ok(())
    }

    #[rstest]
    fn inputs_are_required() {
        assert!(Args::try_parse_from(["ortho-merge"]).is_err());
    }

    #[rstest]
    fn verbosity_counts() -> Result<()> {
        let args = parse(&["-vv", "--output", "out.json"])?;
        ensure!(args.verbose == 2, "verbose was {}", args.verbose);
        ensure!(
            args.output.as_deref().map(camino::Utf8Path::as_str) == Some("out.json"),
            "output path not parsed"
        );
        Ok(())
    }
}
