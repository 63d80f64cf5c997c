//! Buffer views: position/limit/capacity cursors over shared byte storage.
//!
//! - [`ByteView`] - A read or write cursor over a contiguous byte region,
//!   independent of how the region is stored.
//! - [`StorageKind`] - The physical allocation strategy behind a view.

mod byte_view;

pub use byte_view::{ByteView, StorageKind};
