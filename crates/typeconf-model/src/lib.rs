//! typeconf model builder: turns a parsed configuration template into a
//! typed intermediate representation.
//!
//! The transformation runs in two stages. The structural pass
//! ([`structs`]) folds the flat `path -> value` entry set of the parsed
//! config back into a nested tree of named nodes. The typing pass
//! ([`builder`]) then walks that tree recursively: it reads `@define` and
//! `@optional` annotations from key comments ([`annotation`]), parses the
//! inline type-spec DSL on leaf strings ([`dsl`]), resolves named types
//! through a lexically scoped registry ([`namespace`]), and produces the
//! [`ir`] types together with non-fatal [`warning`]s.

pub mod annotation;
pub mod builder;
pub mod dsl;
pub mod error;
pub mod ir;
pub mod namespace;
pub mod render;
pub mod structs;
pub mod warning;

pub use builder::{ModelBuildResult, ModelBuilder};
pub use error::BuildError;
pub use warning::Warning;

use typeconf_hocon::ConfigObject;

/// Build the typed model of a parsed config with default options.
pub fn build(conf: &ConfigObject) -> Result<ModelBuildResult, BuildError> {
    ModelBuilder::new().build(conf)
}
