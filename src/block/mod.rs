//! Internal partial-block carry between streaming calls.
//!
//! This module holds the bytes that are too few to form a whole block at
//! the end of one call and must be prepended to the next. It is an
//! implementation detail and not part of the public API.

mod accumulator;

pub(crate) use accumulator::BlockAccumulator;
