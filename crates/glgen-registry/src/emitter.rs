//! The emitter contract.

use crate::types::{CommandInfo, EnumerantInfo, GroupInfo, TypeInfo};
use crate::Result;

/// Consumer of fully resolved entity records.
///
/// The driver makes the lifecycle calls in a fixed order: `start`, every
/// type in dependency order, every group, every enumerant, every command,
/// then `finish`. What an emitter does with the records — write C source,
/// build an in-memory model — is its own business.
pub trait Emitter {
    /// Begin one output artifact.
    fn start(
        &mut self,
        output_name: &str,
        api: &str,
        profile: &str,
        version_major: u32,
        version_minor: u32,
    ) -> Result<()>;

    /// Emit a type declaration. Types a declaration depends on have already
    /// been emitted.
    fn emit_type(&mut self, info: &TypeInfo) -> Result<()>;

    /// Emit an enumerant group with its resolved members.
    fn emit_enum_group(&mut self, group: &GroupInfo) -> Result<()>;

    /// Emit a single enumerant.
    fn emit_enumerant(&mut self, enumerant: &EnumerantInfo) -> Result<()>;

    /// Emit a command.
    fn emit_command(&mut self, command: &CommandInfo) -> Result<()>;

    /// End the artifact. No further calls follow.
    fn finish(&mut self) -> Result<()>;
}
