//! Feature and extension resolution.
//!
//! A feature block describes the diff of one API version against the
//! previous one, so the full picture for a target version is obtained by
//! replaying every matching block's require/remove deltas in ascending
//! version order, stopping at the first block newer than the target.
//! Extensions are replayed afterwards, each independently and without
//! version gating.
//!
//! Removal is set erasure only. Types and groups inferred transitively from
//! an earlier required command stay required unless removed by name — the
//! registry relies on this, so it is deliberately not "undone" when the
//! command itself is removed later.

use std::collections::BTreeSet;

use regex::Regex;

use crate::config::ResolveRequest;
use crate::loader::{Delta, DeltaAction, ExtensionBlock, FeatureBlock, Registry};
use crate::types::EntityKind;
use crate::{Error, Result};

/// The four required-name sets accumulated by resolution.
///
/// Ordered sets keep one request producing one emission order, run after
/// run; only membership is meaningful to the algorithm itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSet {
    pub types: BTreeSet<String>,
    pub groups: BTreeSet<String>,
    pub enums: BTreeSet<String>,
    pub commands: BTreeSet<String>,
}

impl RequiredSet {
    fn names_mut(&mut self, kind: EntityKind) -> &mut BTreeSet<String> {
        match kind {
            EntityKind::Type => &mut self.types,
            EntityKind::Group => &mut self.groups,
            EntityKind::Enum => &mut self.enums,
            EntityKind::Command => &mut self.commands,
        }
    }
}

/// Compute the required-entity sets for one request.
///
/// Applies feature deltas for the request's API in ascending version order
/// up to and including the target version, then applies every requested,
/// supported extension. A requested extension that exists but is not
/// supported by the target API is reported as a warning and skipped; a
/// requested name that never matches any extension in the registry is a
/// fatal configuration error.
pub fn resolve(registry: &Registry, request: &ResolveRequest) -> Result<RequiredSet> {
    let mut required = RequiredSet::default();

    // Feature blocks may appear in any document order; sort stably so equal
    // versions keep their declaration order.
    let mut features: Vec<&FeatureBlock> = registry
        .features
        .iter()
        .filter(|feature| feature.api == request.api.name())
        .collect();
    features.sort_by_key(|feature| feature.version);

    for feature in features {
        if feature.version > request.version {
            break;
        }
        tracing::debug!(version = %feature.version, "applying feature deltas");
        apply_deltas(&feature.deltas, registry, request, &mut required)?;
    }

    let mut remaining = request.extensions.clone();
    for extension in &registry.extensions {
        if !remaining.contains(&extension.name) {
            continue;
        }
        remaining.remove(&extension.name);
        if supported_pattern(extension)?.is_match(request.api.name()) {
            tracing::debug!(extension = %extension.name, "applying extension deltas");
            apply_deltas(&extension.deltas, registry, request, &mut required)?;
        } else {
            tracing::warn!(
                extension = %extension.name,
                api = %request.api,
                "extension requested but not supported by the target API"
            );
        }
    }
    if !remaining.is_empty() {
        return Err(Error::UnresolvedExtensions {
            names: remaining.into_iter().collect(),
        });
    }

    Ok(required)
}

fn apply_deltas(
    deltas: &[Delta],
    registry: &Registry,
    request: &ResolveRequest,
    required: &mut RequiredSet,
) -> Result<()> {
    for delta in deltas {
        if delta
            .profile
            .as_deref()
            .is_some_and(|profile| profile != request.profile)
        {
            continue;
        }
        for entry in &delta.entries {
            match delta.action {
                DeltaAction::Require => {
                    required.names_mut(entry.kind).insert(entry.name.clone());
                    if entry.kind == EntityKind::Command {
                        infer_from_command(&entry.name, registry, request, required)?;
                    }
                }
                DeltaAction::Remove => {
                    required.names_mut(entry.kind).remove(&entry.name);
                }
            }
        }
    }
    Ok(())
}

/// Pull in the types and groups a command's signature references.
///
/// Feature blocks almost never name types or groups directly; they ride
/// along with the commands that use them.
fn infer_from_command(
    name: &str,
    registry: &Registry,
    request: &ResolveRequest,
    required: &mut RequiredSet,
) -> Result<()> {
    let command = registry.commands.resolve(name, request.api.name())?;
    if let Some(referenced) = &command.return_type_ref {
        required.types.insert(referenced.clone());
    }
    for param in &command.params {
        if let Some(referenced) = &param.type_ref {
            required.types.insert(referenced.clone());
        }
        if let Some(group) = &param.group {
            required.groups.insert(group.clone());
        }
    }
    Ok(())
}

/// Compile an extension's `supported` attribute into an anchored pattern.
///
/// The attribute is a regex-style alternation over API names, matched
/// against the whole target API name (`gl|glcore` must not match `gles2`).
fn supported_pattern(extension: &ExtensionBlock) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", extension.supported)).map_err(|e| {
        Error::InvalidSupportedPattern {
            extension: extension.name.clone(),
            pattern: extension.supported.clone(),
            message: e.to_string(),
        }
    })
}
