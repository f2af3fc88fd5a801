//! Shared building blocks for the typeconf compiler.
//!
//! Hosts the dotted-key utilities used by the structural pass and the
//! name/value adjustment helpers shared between the model builder and
//! downstream emitters.

pub mod key;
pub mod names;
