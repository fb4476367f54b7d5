//! Compile-time metadata about the `swapi` binary (name, version, authorship), harvested from the
//! crate manifest by the `built` crate and used to feed the CLI's `--help`/`--version` output and
//! the logging filter.

use log::LevelFilter;

pub mod built_info {
    // generated into OUT_DIR by build.rs
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Returns the default log-level: chattier for debug builds, `Info` otherwise.
pub fn default_log_level() -> LevelFilter {
    if built_info::DEBUG {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Returns the package name, as declared in the crate manifest.
pub fn package_name() -> &'static str {
    built_info::PKG_NAME
}

/// Returns the package's full semver version.
pub fn full_version() -> &'static str {
    built_info::PKG_VERSION
}

/// Returns the package's colon-separated list of authors.
pub fn authors() -> &'static str {
    built_info::PKG_AUTHORS
}

/// Returns the package's one-line description.
pub fn description() -> &'static str {
    built_info::PKG_DESCRIPTION
}
