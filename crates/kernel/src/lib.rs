//! Core traits, settings, and module registry for the shelf service.

pub mod module;
pub mod provider;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use provider::{Clock, IdGenerator, SystemClock, UuidV7Generator};
pub use registry::ModuleRegistry;
