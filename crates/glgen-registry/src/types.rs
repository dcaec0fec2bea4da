//! Records for the API entities described by the registry.
//!
//! All records are built once by the loader and never mutated afterwards.
//! An `api` qualifier of `None` means the record applies to any API unless a
//! more specific variant exists for the requested one (see
//! [`crate::store::ApiEntity`]).

use std::fmt;

/// The four kinds of entity a feature delta or lookup can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Type,
    Enum,
    Command,
    Group,
}

impl EntityKind {
    /// Map a delta entry tag name (`<type>`, `<enum>`, ...) to a kind.
    pub fn from_tag(tag: &str) -> Option<EntityKind> {
        match tag {
            "type" => Some(EntityKind::Type),
            "enum" => Some(EntityKind::Enum),
            "command" => Some(EntityKind::Command),
            "group" => Some(EntityKind::Group),
            _ => None,
        }
    }

    /// The registry tag name for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Type => "type",
            EntityKind::Enum => "enum",
            EntityKind::Command => "command",
            EntityKind::Group => "group",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An API type such as `GLuint` or `GLDEBUGPROC`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfo {
    /// Type name.
    pub name: String,

    /// Literal C declaration for this type, reconstructed from the registry
    /// in document order.
    pub decl: String,

    /// Name of another type this declaration depends on.
    pub requires: Option<String>,

    /// API this variant applies to (`None` = any).
    pub api: Option<String>,
}

/// An enumerant such as `GL_TEXTURE_2D`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumerantInfo {
    /// Enumerant name.
    pub name: String,

    /// Literal value text.
    pub value: String,

    /// Numeric suffix to append to the value (`u`, `ull`, ...).
    pub suffix: Option<String>,

    /// Another enumerant name sharing this value.
    pub alias: Option<String>,

    /// API this variant applies to (`None` = any).
    pub api: Option<String>,
}

/// A named group of enumerants, e.g. `TextureTarget`.
///
/// Members are resolved eagerly while loading, so a group always carries
/// full enumerant records for the target API rather than bare names. Groups
/// are never API-qualified in the registry schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupInfo {
    /// Group name.
    pub name: String,

    /// Member enumerants, in declaration order.
    pub members: Vec<EnumerantInfo>,
}

/// One parameter of a command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamInfo {
    /// Parameter name.
    pub name: String,

    /// Full C type text (e.g. `const GLfloat *`).
    pub ctype: String,

    /// API type referenced by `ctype`, if any (e.g. `GLfloat`). Empty for
    /// plain C types such as `const void *`.
    pub type_ref: Option<String>,

    /// Enumerant group this parameter's legal values belong to.
    pub group: Option<String>,

    /// Length annotation: an element count, or a free-form expression over
    /// other parameters and GL state. Carried verbatim, never validated.
    pub len: Option<String>,
}

/// An API command such as `glBindTexture`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandInfo {
    /// Command name.
    pub name: String,

    /// Trimmed C return type text.
    pub return_type: String,

    /// API type referenced by the return type, if any.
    pub return_type_ref: Option<String>,

    /// Parameters in declaration order.
    pub params: Vec<ParamInfo>,

    /// Name of the command this one aliases.
    pub alias: Option<String>,

    /// Name of the vector-equivalent command.
    pub vec_equivalent: Option<String>,

    /// API this variant applies to (`None` = any).
    pub api: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_from_tag() {
        assert_eq!(EntityKind::from_tag("type"), Some(EntityKind::Type));
        assert_eq!(EntityKind::from_tag("enum"), Some(EntityKind::Enum));
        assert_eq!(EntityKind::from_tag("command"), Some(EntityKind::Command));
        assert_eq!(EntityKind::from_tag("group"), Some(EntityKind::Group));
        assert_eq!(EntityKind::from_tag("feature"), None);
    }

    #[test]
    fn entity_kind_display() {
        assert_eq!(EntityKind::Command.to_string(), "command");
    }
}
