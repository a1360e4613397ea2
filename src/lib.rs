//! Declarative, provider-backed configuration. Declare your fields, point at
//! a key-value source, and read typed values.
//!
//! Minicfg resolves every declared field from a [`Provider`] (the process
//! environment by default), casts the raw string with the field's
//! [`Caster`], falls back to an optional `{NAME}_FILE` indirection and then
//! to a declared default, and reports precise errors when a value is
//! missing, conflicting or malformed.
//!
//! ```ignore
//! let config = Minicfg::new()
//!     .name("SERVICE")
//!     .child(
//!         "Database",
//!         Minicfg::new()
//!             .name("DATABASE")
//!             .field("HOST", Field::new().attach_file_field())
//!             .field("PORT", Field::new().caster(IntCaster).default(5432)),
//!     )
//!     .populated()?;
//!
//! let values = config.values()?;
//! let host = values.lookup("Database.HOST");  // SERVICE_DATABASE_HOST
//! ```
//!
//! # Declare, instantiate, populate
//!
//! A [`Minicfg`] is only a declaration. It never holds values and can be
//! reused freely. Turning it into something usable happens in two steps:
//!
//! - **[`instantiate()`](Minicfg::instantiate)** deep-clones the declaration
//!   into a [`ConfigGroup`] and resolves every final key. No I/O happens here,
//!   so an instantiated group is already enough to
//!   [generate documentation](DocsGenerator).
//! - **[`populate()`](ConfigGroup::populate)** walks the tree, fields first
//!   and then child groups, resolving each field against a provider.
//!
//! [`Minicfg::populated()`] and [`Minicfg::populated_with()`] do both at once.
//! Because every instance clones its own fields, two instances of the same
//! declaration never share state.
//!
//! After population, [`ConfigGroup::values()`] hands out a [`Populated`] view
//! with plain [`Value`]s: look them up by declared key, export them as JSON,
//! or [`extract`](Populated::extract) them into your own `Deserialize` struct.
//! Asking for values before population is a [`MinicfgError::NotPopulated`]
//! error rather than a half-empty result.
//!
//! # Naming
//!
//! Keys follow environment-variable conventions. A field's key is the name it
//! was declared under (or the explicit [`Field::named`] name), prefixed by
//! its group's name and separator:
//!
//! | Declaration | Key |
//! |-------------|-----|
//! | root field `DEBUG` | `DEBUG` |
//! | `DATABASE` group, field `HOST` | `DATABASE_HOST` |
//! | `SERVICE` → `DATABASE` → `HOST` | `SERVICE_DATABASE_HOST` |
//! | `SERVICE` → unnamed child → `TOKEN` | `SERVICE_TOKEN` |
//!
//! The separator defaults to `_` and is inherited by child groups unless they
//! set their own with [`Minicfg::separator`].
//!
//! # Resolution order
//!
//! For each field:
//!
//! ```text
//! NAME present          → cast it
//! NAME_FILE present     → read the file, trim it, cast it   (file fields only)
//! both present          → MinicfgError::Conflict, before any file is opened
//! neither present       → the default, exactly as declared (never cast)
//! no default            → MinicfgError::ValueNotProvided
//! ```
//!
//! An empty string is a provided value. Only an absent key falls through.
//!
//! # Providers
//!
//! [`EnvProvider`] reads the process environment. [`MapProvider`], `HashMap`
//! and `BTreeMap` serve values from memory. Implement [`Provider`] for any
//! other key-value source. A provider declared with [`Minicfg::provider`]
//! applies to that group and every descendant without one of its own;
//! [`ConfigGroup::populate_with`] overrides all of them for one call.
//!
//! # Casters
//!
//! [`IntCaster`], [`FloatCaster`], [`BoolCaster`] (`true/yes/on/enable/
//! enabled/1` and `false/no/off/disable/disabled/0`, case-sensitive),
//! [`ListCaster`] (split on a separator, optionally cast every item) and
//! [`JsonCaster`] cover the common cases. A list fails as a whole if any item
//! fails. Implement [`Caster`] for anything else.
//!
//! # Error handling
//!
//! Population is fail-fast: the first error stops the walk and is returned.
//! Fields resolved before it keep their values, but the group is not marked
//! populated. See [`MinicfgError`] for the full set.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the `clap` feature) offers [`DocsArgs`], a clap
//! derive struct you embed as a `docs` subcommand so users can print the
//! configuration reference as plaintext or Markdown.

pub mod docs;
pub mod error;
pub mod types;

mod caster;
#[cfg(feature = "clap")]
mod cli;
mod field;
mod group;
mod populated;
mod provider;
mod value;

#[cfg(test)]
mod fixtures;

pub use caster::{BoolCaster, Caster, FloatCaster, IntCaster, JsonCaster, ListCaster};
#[cfg(feature = "clap")]
pub use cli::DocsArgs;
pub use docs::{DocsGenerator, DocsOutput, FieldMeta};
pub use error::{CastError, FileOrigin, MinicfgError};
pub use field::Field;
pub use group::{ConfigGroup, Minicfg};
pub use populated::{Listing, Populated};
pub use provider::{EnvProvider, MapProvider, Provider};
pub use types::{DocsFormat, ValueSource};
pub use value::Value;
