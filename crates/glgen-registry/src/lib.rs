//! Resolution engine for the OpenGL XML registry.
//!
//! Given the registry document and a target (API, version, profile,
//! extension set), this crate computes the minimal closed set of types,
//! enumerants, groups and commands that must be declared, in
//! dependency-correct order, and drives a pluggable [`Emitter`] with the
//! fully resolved records.
//!
//! One call to [`generate`] is one run: load the document into fresh entity
//! stores, replay version-ordered feature deltas and extension deltas into
//! required-name sets, then close the type dependency graph and emit.
//! Errors are fatal for the run; there is no partial output.

pub mod config;
pub mod document;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod loader;
pub mod resolver;
pub mod store;
pub mod types;
pub mod version;

pub use config::{Api, ResolveRequest};
pub use document::Document;
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use loader::Registry;
pub use resolver::RequiredSet;
pub use types::{CommandInfo, EntityKind, EnumerantInfo, GroupInfo, ParamInfo, TypeInfo};
pub use version::Version;

/// Run the whole pipeline for one request against registry XML text.
///
/// `output_name` is handed through to the emitter's `start` call and names
/// the artifact (for file-writing emitters, the output base name).
pub fn generate(
    xml: &str,
    request: &ResolveRequest,
    output_name: &str,
    emitter: &mut dyn Emitter,
) -> Result<()> {
    let document = Document::parse(xml)?;
    let mut registry = Registry::from_document(&document, request.api)?;
    let required = resolver::resolve(&registry, request)?;
    driver::emit(&mut registry, &required, request, output_name, emitter)
}
