//! Dependency closure and emission ordering.
//!
//! Turns the resolver's required-name sets into one correctly ordered
//! sequence of emitter calls. Types are expanded through their `requires`
//! edges depth-first, so a type is always emitted after everything it
//! depends on; the other kinds are emitted in the iteration order of their
//! required sets.

use crate::config::ResolveRequest;
use crate::emitter::Emitter;
use crate::loader::Registry;
use crate::resolver::RequiredSet;
use crate::store::EntityStore;
use crate::types::TypeInfo;
use crate::Result;

/// Types emitted up front whether or not anything names them.
///
/// `GLDEBUGPROC`'s callback signature uses these four scalars without
/// declaring them as dependencies in the registry (see
/// KhronosGroup/OpenGL-Registry issue 160). Listed here explicitly so the
/// workaround is visible and adjustable without touching closure logic.
/// A registry that does not define one of them simply skips it.
pub const BASELINE_TYPES: [&str; 4] = ["GLenum", "GLuint", "GLsizei", "GLchar"];

/// Drive `emitter` with every required entity, in the fixed lifecycle
/// order: start, types (dependency order), groups, enumerants, commands,
/// finish.
///
/// Required enumerant and command names were seeded from the registry
/// itself, so a name that no longer resolves is a fatal reference error. A
/// required group with no definition at all is skipped: the schema allows
/// groups to be referenced without ever being defined.
pub fn emit(
    registry: &mut Registry,
    required: &RequiredSet,
    request: &ResolveRequest,
    output_name: &str,
    emitter: &mut dyn Emitter,
) -> Result<()> {
    let api = request.api.name();

    emitter.start(
        output_name,
        api,
        &request.profile,
        request.version.major(),
        request.version.minor(),
    )?;

    for name in BASELINE_TYPES {
        if registry.types.contains(name) {
            emit_type_closure(&mut registry.types, name, api, emitter)?;
        } else {
            tracing::debug!(name, "baseline type not defined by this registry");
        }
    }

    for name in &required.types {
        emit_type_closure(&mut registry.types, name, api, emitter)?;
    }

    for name in &required.groups {
        if registry.groups.get(name).is_none() {
            tracing::debug!(name, "required group has no definition; skipping");
            continue;
        }
        let group = registry.groups.resolve(name, api)?;
        emitter.emit_enum_group(group)?;
    }

    for name in &required.enums {
        emitter.emit_enumerant(registry.enums.resolve(name, api)?)?;
    }

    for name in &required.commands {
        emitter.emit_command(registry.commands.resolve(name, api)?)?;
    }

    emitter.finish()
}

/// Emit `name` after everything its `requires` chain reaches.
///
/// Each type is emitted at most once per run; a repeated request for an
/// already-processed type is a no-op. The registry's requires edges form a
/// tree, so the recursion is bounded by chain depth.
fn emit_type_closure(
    types: &mut EntityStore<TypeInfo>,
    name: &str,
    api: &str,
    emitter: &mut dyn Emitter,
) -> Result<()> {
    let info = types.resolve(name, api)?.clone();
    if types.is_processed(name) {
        return Ok(());
    }
    if let Some(required_type) = &info.requires {
        emit_type_closure(types, required_type, api, emitter)?;
    }
    emitter.emit_type(&info)?;
    types.mark_processed(name);
    Ok(())
}
