//! cipherbuf
//!
//! Buffer-oriented streaming block-cipher transforms for Rust.
//!
//! `cipherbuf` applies an injected single-block cipher to data presented
//! through generic byte-buffer views, writing transformed output into a
//! caller-supplied view, across one or more `update` calls and a terminal
//! `finalize`. It is designed as a small, composable primitive that yields
//! bit-identical output regardless of:
//!
//! - the view's storage strategy (heap, direct, read-only wrapper, offset slice)
//! - how the caller chunks input across calls (one call vs. many, aligned or not)
//!
//! The crate intentionally:
//! - does NOT implement any cipher primitive (key schedule, round function)
//! - does NOT compose modes of operation (ECB/CBC/GCM chaining, IV handling)
//! - does NOT select algorithms or construct key material
//! - does NOT stream over files or sockets
//!
//! It only does one thing: **buffer views in → transformed blocks out**
//!
//! # Example
//!
//! ```
//! use cipherbuf::{ByteView, CipherEngine, EngineConfig, CipherError};
//!
//! fn main() -> Result<(), CipherError> {
//!     // A toy single-block transform; any real block cipher fits the seam.
//!     let xor = |input: &[u8], output: &mut [u8]| {
//!         for (o, i) in output.iter_mut().zip(input) {
//!             *o = i ^ 0x5A;
//!         }
//!     };
//!
//!     let mut engine = CipherEngine::new(EngineConfig::new(16)?, xor)?;
//!
//!     let mut input = ByteView::copy_from_slice(&[7u8; 32]);
//!     let mut output = ByteView::alloc(32);
//!
//!     let n = engine.finalize(&mut input, &mut output)?;
//!     assert_eq!(n, 32);
//!     assert_eq!(input.remaining(), 0);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cipher;
mod config;
mod engine;
mod error;
mod view;

mod block; // internal (partial-block carry between calls)

//
// Public surface (intentionally tiny)
//

pub use cipher::{BlockPadding, BlockTransform, Pkcs7};
pub use config::EngineConfig;
pub use engine::CipherEngine;
pub use error::CipherError;
pub use view::{ByteView, StorageKind};
