//! Registry loader: one pass over the document tree.
//!
//! Fills the entity stores from the `types`, `enums`, `commands` and
//! `groups` sections and parses every `feature` and `extensions` block into
//! explicit ordered delta records for the resolver to replay.
//!
//! Declaration text is reconstructed by concatenating text children and
//! name-bearing sub-elements in document order. The reconstruction is
//! intentionally ordering-sensitive: reordering children changes the
//! emitted literal.
//!
//! Group members are resolved eagerly against the enumerant store, which is
//! why groups load after enumerants and why loading already needs to know
//! the target API.

use crate::config::Api;
use crate::document::{Document, Element, Node};
use crate::store::EntityStore;
use crate::types::{CommandInfo, EntityKind, EnumerantInfo, GroupInfo, ParamInfo, TypeInfo};
use crate::version::Version;
use crate::{Error, Result};

/// The in-memory registry for one run: entity stores plus the ordered
/// feature/extension delta blocks.
#[derive(Debug, Clone)]
pub struct Registry {
    pub types: EntityStore<TypeInfo>,
    pub enums: EntityStore<EnumerantInfo>,
    pub commands: EntityStore<CommandInfo>,
    pub groups: EntityStore<GroupInfo>,
    pub features: Vec<FeatureBlock>,
    pub extensions: Vec<ExtensionBlock>,
}

/// The incremental deltas one `(api, version)` feature contributes.
#[derive(Debug, Clone)]
pub struct FeatureBlock {
    /// API this feature belongs to.
    pub api: String,
    /// The version this feature describes the diff up to.
    pub version: Version,
    /// Require/remove lists in document order.
    pub deltas: Vec<Delta>,
}

/// An extension's delta list, applied without version gating.
#[derive(Debug, Clone)]
pub struct ExtensionBlock {
    /// Extension name, e.g. `GL_ARB_debug_output`.
    pub name: String,
    /// Pattern the target API name must match for the extension to apply.
    pub supported: String,
    /// Require/remove lists in document order.
    pub deltas: Vec<Delta>,
}

/// One `require` or `remove` list, optionally gated by a profile.
#[derive(Debug, Clone)]
pub struct Delta {
    pub action: DeltaAction,
    /// Entries apply only when this matches the requested profile.
    pub profile: Option<String>,
    pub entries: Vec<DeltaEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaAction {
    Require,
    Remove,
}

/// A reference to one entity inside a delta list.
#[derive(Debug, Clone)]
pub struct DeltaEntry {
    pub kind: EntityKind,
    pub name: String,
}

impl Registry {
    /// Build the registry for one run from a parsed document.
    ///
    /// `api` is the target API of the run; it is needed up front because
    /// group members resolve against API-specific enumerant variants.
    pub fn from_document(document: &Document, api: Api) -> Result<Registry> {
        let root = document.root();

        let mut registry = Registry {
            types: EntityStore::new(EntityKind::Type),
            enums: EntityStore::new(EntityKind::Enum),
            commands: EntityStore::new(EntityKind::Command),
            groups: EntityStore::new(EntityKind::Group),
            features: Vec::new(),
            extensions: Vec::new(),
        };

        if let Some(types) = root.first_child_named("types") {
            for element in types.children_named("type") {
                let info = load_type(element)?;
                registry.types.add(info.name.clone(), info);
            }
        }

        for enums in root.children_named("enums") {
            for element in enums.children_named("enum") {
                let info = load_enumerant(element)?;
                registry.enums.add(info.name.clone(), info);
            }
        }

        if let Some(commands) = root.first_child_named("commands") {
            for element in commands.children_named("command") {
                let info = load_command(element)?;
                registry.commands.add(info.name.clone(), info);
            }
        }

        // Groups resolve their members eagerly, so the enumerant store must
        // be complete by this point.
        if let Some(groups) = root.first_child_named("groups") {
            for element in groups.children_named("group") {
                let info = load_group(element, &registry.enums, api)?;
                registry.groups.add(info.name.clone(), info);
            }
        }

        for element in root.children_named("feature") {
            registry.features.push(load_feature(element)?);
        }

        if let Some(extensions) = root.first_child_named("extensions") {
            for element in extensions.children_named("extension") {
                registry.extensions.push(load_extension(element)?);
            }
        }

        tracing::debug!(
            features = registry.features.len(),
            extensions = registry.extensions.len(),
            "registry loaded"
        );
        Ok(registry)
    }
}

fn load_type(element: &Element) -> Result<TypeInfo> {
    let mut info = TypeInfo {
        name: element.attribute("name").unwrap_or_default().to_string(),
        requires: element.attribute("requires").map(str::to_string),
        api: element.attribute("api").map(str::to_string),
        ..Default::default()
    };

    for child in &element.children {
        match child {
            Node::Text(text) => info.decl.push_str(text),
            Node::Element(child) => match child.name.as_str() {
                "name" => {
                    info.name = child.text();
                    info.decl.push(' ');
                    info.decl.push_str(&info.name);
                }
                "apientry" => info.decl.push_str(" GL_APIENTRY "),
                other => {
                    return Err(Error::UnexpectedElement {
                        parent: "type",
                        child: other.to_string(),
                    });
                }
            },
        }
    }

    if info.name.is_empty() {
        return Err(Error::MissingAttribute {
            element: "type",
            attribute: "name",
        });
    }
    Ok(info)
}

fn load_enumerant(element: &Element) -> Result<EnumerantInfo> {
    let name = require_attribute(element, "enum", "name")?;
    let value = require_attribute(element, "enum", "value")?;
    Ok(EnumerantInfo {
        name,
        value,
        // The "type" attribute carries the numeric suffix (u, ull, ...).
        suffix: element.attribute("type").map(str::to_string),
        alias: element.attribute("alias").map(str::to_string),
        api: element.attribute("api").map(str::to_string),
    })
}

fn load_group(
    element: &Element,
    enums: &EntityStore<EnumerantInfo>,
    api: Api,
) -> Result<GroupInfo> {
    let name = require_attribute(element, "group", "name")?;
    let mut members = Vec::new();
    for member in element.children_named("enum") {
        let member_name = require_attribute(member, "enum", "name")?;
        members.push(enums.resolve(&member_name, api.name())?.clone());
    }
    Ok(GroupInfo { name, members })
}

fn load_command(element: &Element) -> Result<CommandInfo> {
    let prototype = element.first_child_named("proto").ok_or(Error::MissingChild {
        parent: "command",
        child: "proto",
    })?;

    let mut info = CommandInfo {
        api: element.attribute("api").map(str::to_string),
        ..Default::default()
    };

    // Each fragment gets a space in front so return types stay separated
    // even when the registry text runs sub-elements together.
    for child in &prototype.children {
        match child {
            Node::Text(text) => {
                info.return_type.push(' ');
                info.return_type.push_str(text);
            }
            Node::Element(child) => match child.name.as_str() {
                "ptype" => {
                    let referenced = child.text();
                    info.return_type.push(' ');
                    info.return_type.push_str(&referenced);
                    info.return_type_ref = Some(referenced);
                }
                "name" => info.name = child.text(),
                other => {
                    return Err(Error::UnexpectedElement {
                        parent: "proto",
                        child: other.to_string(),
                    });
                }
            },
        }
    }
    info.return_type = info.return_type.trim().to_string();

    if info.name.is_empty() {
        return Err(Error::MissingChild {
            parent: "proto",
            child: "name",
        });
    }

    for param in element.children_named("param") {
        info.params.push(load_param(param)?);
    }

    info.alias = child_name_attribute(element, "alias");
    info.vec_equivalent = child_name_attribute(element, "vecequiv");
    Ok(info)
}

fn load_param(element: &Element) -> Result<ParamInfo> {
    let mut info = ParamInfo {
        group: element.attribute("group").map(str::to_string),
        len: element.attribute("len").map(str::to_string),
        ..Default::default()
    };

    for child in &element.children {
        match child {
            Node::Text(text) => info.ctype.push_str(text),
            Node::Element(child) => match child.name.as_str() {
                "ptype" => {
                    let referenced = child.text();
                    info.ctype.push_str(&referenced);
                    info.type_ref = Some(referenced);
                }
                "name" => info.name = child.text(),
                other => {
                    return Err(Error::UnexpectedElement {
                        parent: "param",
                        child: other.to_string(),
                    });
                }
            },
        }
    }
    Ok(info)
}

fn load_feature(element: &Element) -> Result<FeatureBlock> {
    let api = require_attribute(element, "feature", "api")?;
    let number = require_attribute(element, "feature", "number")?;
    Ok(FeatureBlock {
        api,
        version: number.parse()?,
        deltas: load_deltas(element, "feature")?,
    })
}

fn load_extension(element: &Element) -> Result<ExtensionBlock> {
    let name = require_attribute(element, "extension", "name")?;
    let supported = require_attribute(element, "extension", "supported")?;
    Ok(ExtensionBlock {
        name,
        supported,
        deltas: load_deltas(element, "extension")?,
    })
}

fn load_deltas(element: &Element, parent: &'static str) -> Result<Vec<Delta>> {
    let mut deltas = Vec::new();
    for operation in element.child_elements() {
        let (action, tag) = match operation.name.as_str() {
            "require" => (DeltaAction::Require, "require"),
            "remove" => (DeltaAction::Remove, "remove"),
            other => {
                return Err(Error::UnexpectedElement {
                    parent,
                    child: other.to_string(),
                });
            }
        };

        let mut entries = Vec::new();
        for entry in operation.child_elements() {
            let kind = EntityKind::from_tag(&entry.name).ok_or_else(|| {
                Error::UnexpectedElement {
                    parent: tag,
                    child: entry.name.clone(),
                }
            })?;
            let name = entry
                .attribute("name")
                .filter(|name| !name.is_empty())
                .ok_or(Error::MissingAttribute {
                    element: kind.tag(),
                    attribute: "name",
                })?;
            entries.push(DeltaEntry {
                kind,
                name: name.to_string(),
            });
        }

        deltas.push(Delta {
            action,
            profile: operation.attribute("profile").map(str::to_string),
            entries,
        });
    }
    Ok(deltas)
}

fn require_attribute(
    element: &Element,
    name: &'static str,
    attribute: &'static str,
) -> Result<String> {
    element
        .attribute(attribute)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(Error::MissingAttribute {
            element: name,
            attribute,
        })
}

fn child_name_attribute(element: &Element, child: &str) -> Option<String> {
    element
        .first_child_named(child)
        .and_then(|child| child.attribute("name"))
        .map(str::to_string)
}
