//! Clap adapter for minicfg.
//!
//! This module is the **optional integration layer** between minicfg's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`DocsArgs`] is a clap derive struct you embed in your own command tree to
//! give users a `docs` subcommand that prints (or writes) documentation for
//! your configuration declaration. The only bridge to the core is
//! [`DocsArgs::render()`], which hands off to [`docs::emit`](crate::docs::emit).
//!
//! If you use a different CLI parser, skip this module and call
//! [`DocsGenerator`](crate::DocsGenerator) directly.

use std::path::PathBuf;

use clap::Args;

use crate::docs::{self, DocsOutput};
use crate::error::MinicfgError;
use crate::group::ConfigGroup;
use crate::types::DocsFormat;

/// Clap-derived args for a `docs` subcommand.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     /// Print configuration documentation.
///     Docs(DocsArgs),
/// }
/// ```
#[derive(Debug, Clone, Args)]
pub struct DocsArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = DocsFormat::Markdown)]
    pub format: DocsFormat,

    /// Write to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DocsArgs {
    /// Render documentation for `group` as requested on the command line.
    pub fn render(&self, group: &ConfigGroup) -> Result<DocsOutput, MinicfgError> {
        docs::emit(group, self.format, self.output.as_deref())
    }
}
