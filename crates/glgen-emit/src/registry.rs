//! Emitter registry for selecting emitters by name.

use glgen_registry::Emitter;

use crate::c::CEmitter;

/// Names accepted by [`create`], in the order they should be listed to the
/// user. The first entry is the default emitter.
pub const NAMES: [&str; 2] = ["c", "c-null"];

/// Create the emitter registered under `name`, or `None` for an unknown
/// name.
pub fn create(name: &str) -> Option<Box<dyn Emitter>> {
    match name {
        "c" => Some(Box::new(CEmitter::loader())),
        "c-null" => Some(Box::new(CEmitter::null_driver())),
        _ => None,
    }
}
