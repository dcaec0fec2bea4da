//! Entity store with per-API variant resolution.
//!
//! The registry may define the same entity name more than once, each
//! definition qualified by the API it applies to (an enumerant can have
//! different values in GL vs GL ES, for example). The store keeps every
//! variant in insertion order and picks the right one per lookup.

use std::collections::HashMap;

use crate::types::EntityKind;
use crate::{Error, Result};

/// A record that may be qualified by an API name.
pub trait ApiVariant {
    /// API this variant applies to; `None` means any API.
    fn api(&self) -> Option<&str>;
}

impl ApiVariant for crate::types::TypeInfo {
    fn api(&self) -> Option<&str> {
        self.api.as_deref()
    }
}

impl ApiVariant for crate::types::EnumerantInfo {
    fn api(&self) -> Option<&str> {
        self.api.as_deref()
    }
}

impl ApiVariant for crate::types::CommandInfo {
    fn api(&self) -> Option<&str> {
        self.api.as_deref()
    }
}

impl ApiVariant for crate::types::GroupInfo {
    // Groups are never API-qualified in the registry schema.
    fn api(&self) -> Option<&str> {
        None
    }
}

/// Every variant definition of one entity name.
#[derive(Debug, Clone)]
pub struct ApiEntity<T> {
    variants: Vec<T>,
    processed: bool,
}

impl<T> Default for ApiEntity<T> {
    fn default() -> Self {
        Self {
            variants: Vec::new(),
            processed: false,
        }
    }
}

impl<T: ApiVariant> ApiEntity<T> {
    /// Append a variant, preserving declaration order.
    pub fn add(&mut self, variant: T) {
        self.variants.push(variant);
    }

    /// Pick the variant that applies to `api`.
    ///
    /// Variants are scanned in insertion order: a qualifier-less variant is
    /// a candidate only while nothing has matched yet, and a variant whose
    /// qualifier equals `api` always takes over. The most specific,
    /// last-declared match wins; the qualifier-less variant is only a
    /// fallback.
    pub fn resolve(&self, api: &str) -> Option<&T> {
        let mut found = None;
        for variant in &self.variants {
            match variant.api() {
                None if found.is_none() => found = Some(variant),
                Some(qualifier) if qualifier == api => found = Some(variant),
                _ => {}
            }
        }
        found
    }

    /// Mark this entity as emitted. Used only by the type closure.
    pub fn mark_processed(&mut self) {
        self.processed = true;
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }
}

/// Maps entity names to their variant sets for one entity kind.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    kind: EntityKind,
    entries: HashMap<String, ApiEntity<T>>,
}

impl<T: ApiVariant> EntityStore<T> {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Append a variant to the named entity's list.
    pub fn add(&mut self, name: impl Into<String>, variant: T) {
        self.entries.entry(name.into()).or_default().add(variant);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ApiEntity<T>> {
        self.entries.get(name)
    }

    /// Resolve the variant of `name` that applies to `api`.
    ///
    /// Fails with a reference error if the name is undefined or no variant
    /// matches the API.
    pub fn resolve(&self, name: &str, api: &str) -> Result<&T> {
        let entity = self.entries.get(name).ok_or_else(|| Error::Undefined {
            kind: self.kind,
            name: name.to_string(),
        })?;
        entity.resolve(api).ok_or_else(|| Error::NoVariantForApi {
            kind: self.kind,
            name: name.to_string(),
            api: api.to_string(),
        })
    }

    pub fn is_processed(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(ApiEntity::is_processed)
    }

    pub fn mark_processed(&mut self, name: &str) {
        if let Some(entity) = self.entries.get_mut(name) {
            entity.mark_processed();
        }
    }
}
