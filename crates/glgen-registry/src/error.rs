//! Error types for glgen-registry

use crate::types::EntityKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a registry or resolving a request.
///
/// All of these are fatal for the current run: the engine never recovers
/// into a partial result. The only non-fatal condition in the whole
/// pipeline — a requested extension that exists but is not supported by the
/// target API — is reported as a warning and never reaches this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Malformed registry document: {message}")]
    Parse { message: String },

    #[error("{element} element missing \"{attribute}\" attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("{parent} element missing <{child}> child")]
    MissingChild {
        parent: &'static str,
        child: &'static str,
    },

    #[error("Unknown API \"{name}\" (expected gl, gles1, gles2 or glsc2)")]
    UnknownApi { name: String },

    #[error("Unexpected element <{child}> inside <{parent}>")]
    UnexpectedElement { parent: &'static str, child: String },

    #[error("Invalid version string \"{value}\"")]
    InvalidVersion { value: String },

    #[error("Reference to undefined {kind} \"{name}\"")]
    Undefined { kind: EntityKind, name: String },

    #[error("No {kind} variant of \"{name}\" matches api \"{api}\"")]
    NoVariantForApi {
        kind: EntityKind,
        name: String,
        api: String,
    },

    #[error("Extension {extension} has an invalid \"supported\" pattern \"{pattern}\": {message}")]
    InvalidSupportedPattern {
        extension: String,
        pattern: String,
        message: String,
    },

    #[error("Requested extensions not found in the registry: {}", names.join(", "))]
    UnresolvedExtensions { names: Vec<String> },
}
