//! Output emitters for glgen.
//!
//! Implements the engine's [`glgen_registry::Emitter`] contract. The two
//! built-in emitters both target C: a header plus a lazy function-pointer
//! loader, and a null-driver variant that stubs every command out.

pub mod c;
pub mod preamble;
pub mod registry;

pub use c::CEmitter;
