//! Streaming transform engine.
//!
//! - [`CipherEngine`] - Stateful engine with `update()`/`finalize()` API

mod capacity;
mod transform;

pub use transform::CipherEngine;
