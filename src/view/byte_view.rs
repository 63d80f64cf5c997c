//! The ByteView type - a cursor over a contiguous byte region.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::CipherError;

/// The physical allocation strategy behind a [`ByteView`].
///
/// All kinds obey the same cursor contract; they differ only in how the
/// backing region was allocated. Views created with [`ByteView::slice`] or
/// [`ByteView::as_read_only`] inherit the kind of the view they alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// An owned in-process heap region.
    Heap,

    /// A standalone region allocated for sharing outside the caller's own
    /// data structures (the analogue of a direct buffer).
    Direct,
}

/// Shared backing storage. Aliasing views hold clones of the same handle.
#[derive(Debug, Clone)]
struct Storage {
    kind: StorageKind,
    bytes: Rc<RefCell<Box<[u8]>>>,
}

impl Storage {
    fn new(kind: StorageKind, capacity: usize) -> Self {
        Self {
            kind,
            bytes: Rc::new(RefCell::new(vec![0u8; capacity].into_boxed_slice())),
        }
    }

    fn same_region(&self, other: &Storage) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }
}

/// A read or write cursor over a contiguous byte region.
///
/// `ByteView` abstracts the storage behind the region: an owned heap slice,
/// a standalone direct region, a read-only wrapper over another view, or an
/// offset slice of another view all expose the identical contract:
///
/// - `position` - index of the next byte to read or write
/// - `limit` - exclusive bound of the addressable window
/// - `capacity` - total window size
///
/// The invariant `0 <= position <= limit <= capacity` holds at all times;
/// cursor moves that would break it are rejected.
///
/// # Aliasing
///
/// [`ByteView::slice`] and [`ByteView::as_read_only`] produce views sharing
/// the same backing bytes with independent cursors. Aliasing is a relation,
/// not ownership: writes through one view are visible through every view of
/// the same region.
///
/// # Atomicity
///
/// [`ByteView::write_bytes`] and [`ByteView::read_into`] validate the whole
/// operation before moving a single byte, so a rejected call leaves the view
/// unmodified.
///
/// # Example
///
/// ```
/// use cipherbuf::ByteView;
///
/// let mut view = ByteView::alloc(8);
/// view.write_bytes(b"abcd")?;
/// assert_eq!(view.position(), 4);
/// assert_eq!(view.remaining(), 4);
///
/// view.flip();
/// let mut out = [0u8; 4];
/// view.read_into(&mut out)?;
/// assert_eq!(&out, b"abcd");
/// # Ok::<(), cipherbuf::CipherError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ByteView {
    storage: Storage,
    /// Window start within the backing region.
    base: usize,
    capacity: usize,
    position: usize,
    limit: usize,
    read_only: bool,
}

impl ByteView {
    fn from_storage(storage: Storage, capacity: usize) -> Self {
        Self {
            storage,
            base: 0,
            capacity,
            position: 0,
            limit: capacity,
            read_only: false,
        }
    }

    /// Allocates a zero-filled heap-backed view of the given capacity.
    ///
    /// Position starts at 0 and the limit at `capacity`.
    pub fn alloc(capacity: usize) -> Self {
        Self::from_storage(Storage::new(StorageKind::Heap, capacity), capacity)
    }

    /// Allocates a zero-filled direct view of the given capacity.
    ///
    /// Behaves identically to [`ByteView::alloc`]; the region is tagged
    /// [`StorageKind::Direct`] and allocated as a standalone block.
    pub fn alloc_direct(capacity: usize) -> Self {
        Self::from_storage(Storage::new(StorageKind::Direct, capacity), capacity)
    }

    /// Allocates a heap-backed view initialized with a copy of `data`.
    ///
    /// Position starts at 0 and the limit at `data.len()`, so the view is
    /// immediately readable.
    pub fn copy_from_slice(data: &[u8]) -> Self {
        let view = Self::alloc(data.len());
        view.storage.bytes.borrow_mut()[..data.len()].copy_from_slice(data);
        view
    }

    /// Returns the index of the next byte to read or write.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the exclusive bound of the addressable window.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the total window size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of bytes between position and limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns true if any bytes remain between position and limit.
    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Returns true if writes through this view are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns the allocation strategy of the backing region.
    pub fn storage_kind(&self) -> StorageKind {
        self.storage.kind
    }

    /// Moves the position.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::CursorOutOfBounds`] if `position > limit`.
    pub fn set_position(&mut self, position: usize) -> Result<(), CipherError> {
        if position > self.limit {
            return Err(CipherError::CursorOutOfBounds {
                position,
                limit: self.limit,
                capacity: self.capacity,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Moves the limit. If the current position exceeds the new limit, the
    /// position is pulled back to it.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::CursorOutOfBounds`] if `limit > capacity`.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), CipherError> {
        if limit > self.capacity {
            return Err(CipherError::CursorOutOfBounds {
                position: self.position,
                limit,
                capacity: self.capacity,
            });
        }
        self.limit = limit;
        if self.position > limit {
            self.position = limit;
        }
        Ok(())
    }

    /// Resets the cursor for a fresh pass over the whole window:
    /// position 0, limit at capacity. The bytes themselves are untouched.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity;
    }

    /// Flips the view from filling to draining: the limit moves to the
    /// current position and the position resets to 0.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    /// Resets the position to 0, leaving the limit in place.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Copies `src` into the window at the current position and advances
    /// the position by `src.len()`.
    ///
    /// The capacity check covers the entire operation before any byte is
    /// copied: a rejected call leaves the view unmodified.
    ///
    /// # Errors
    ///
    /// - [`CipherError::ImmutableView`] if this is a read-only view.
    /// - [`CipherError::InsufficientCapacity`] if `src.len() > remaining()`.
    pub fn write_bytes(&mut self, src: &[u8]) -> Result<(), CipherError> {
        if self.read_only {
            return Err(CipherError::ImmutableView);
        }
        if src.len() > self.remaining() {
            return Err(CipherError::InsufficientCapacity {
                required: src.len(),
                available: self.remaining(),
            });
        }

        let start = self.base + self.position;
        self.storage.bytes.borrow_mut()[start..start + src.len()].copy_from_slice(src);
        self.position += src.len();
        Ok(())
    }

    /// Copies the next `dst.len()` bytes out of the window and advances the
    /// position by `dst.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InsufficientData`] if `dst.len() > remaining()`;
    /// the view is left unmodified.
    pub fn read_into(&mut self, dst: &mut [u8]) -> Result<(), CipherError> {
        if dst.len() > self.remaining() {
            return Err(CipherError::InsufficientData {
                requested: dst.len(),
                available: self.remaining(),
            });
        }

        let start = self.base + self.position;
        dst.copy_from_slice(&self.storage.bytes.borrow()[start..start + dst.len()]);
        self.position += dst.len();
        Ok(())
    }

    /// Returns an aliasing view over exactly the next `n` bytes and advances
    /// the position by `n`.
    ///
    /// The returned view has its own cursor (position 0, limit and capacity
    /// `n`) and inherits this view's read-only flag.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InsufficientData`] if `n > remaining()`.
    pub fn read_slice(&mut self, n: usize) -> Result<ByteView, CipherError> {
        if n > self.remaining() {
            return Err(CipherError::InsufficientData {
                requested: n,
                available: self.remaining(),
            });
        }

        let view = ByteView {
            storage: self.storage.clone(),
            base: self.base + self.position,
            capacity: n,
            position: 0,
            limit: n,
            read_only: self.read_only,
        };
        self.position += n;
        Ok(view)
    }

    /// Returns an aliasing view over the window `[position, limit)` with an
    /// independent cursor starting at 0.
    ///
    /// This view's cursor is unchanged. Writes through either view are
    /// visible through the other.
    pub fn slice(&self) -> ByteView {
        let len = self.remaining();
        ByteView {
            storage: self.storage.clone(),
            base: self.base + self.position,
            capacity: len,
            position: 0,
            limit: len,
            read_only: self.read_only,
        }
    }

    /// Returns an aliasing read-only wrapper with the same window and cursor.
    ///
    /// All writes through the wrapper fail with
    /// [`CipherError::ImmutableView`], including writes from the engine.
    pub fn as_read_only(&self) -> ByteView {
        let mut view = self.clone();
        view.read_only = true;
        view
    }

    /// Copies the bytes in `[position, limit)` into a fresh vector without
    /// moving the cursor.
    pub fn to_vec(&self) -> Vec<u8> {
        let start = self.base + self.position;
        self.storage.bytes.borrow()[start..self.base + self.limit].to_vec()
    }

    /// Returns true if `self` and `other` share a backing region and their
    /// `[position, limit)` windows intersect.
    pub fn overlaps(&self, other: &ByteView) -> bool {
        if !self.storage.same_region(&other.storage) {
            return false;
        }
        let a = (self.base + self.position, self.base + self.limit);
        let b = (other.base + other.position, other.base + other.limit);
        a.0 < b.1 && b.0 < a.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_initial_cursor() {
        let view = ByteView::alloc(10);
        assert_eq!(view.position(), 0);
        assert_eq!(view.limit(), 10);
        assert_eq!(view.capacity(), 10);
        assert_eq!(view.remaining(), 10);
        assert!(!view.is_read_only());
        assert_eq!(view.storage_kind(), StorageKind::Heap);
    }

    #[test]
    fn test_alloc_direct_kind() {
        let view = ByteView::alloc_direct(10);
        assert_eq!(view.storage_kind(), StorageKind::Direct);
        assert_eq!(view.remaining(), 10);
    }

    #[test]
    fn test_write_then_read_round() {
        let mut view = ByteView::alloc(8);
        view.write_bytes(b"abcdefgh").unwrap();
        assert_eq!(view.remaining(), 0);

        view.flip();
        let mut out = [0u8; 8];
        view.read_into(&mut out).unwrap();
        assert_eq!(&out, b"abcdefgh");
    }

    #[test]
    fn test_write_rejection_is_atomic() {
        let mut view = ByteView::alloc(4);
        view.write_bytes(b"ab").unwrap();

        let err = view.write_bytes(b"toolong").unwrap_err();
        assert_eq!(
            err,
            CipherError::InsufficientCapacity {
                required: 7,
                available: 2,
            }
        );
        // Rejected call must not have moved the cursor
        assert_eq!(view.position(), 2);
    }

    #[test]
    fn test_read_rejection_is_atomic() {
        let mut view = ByteView::copy_from_slice(b"abc");
        let mut out = [0u8; 5];
        let err = view.read_into(&mut out).unwrap_err();
        assert_eq!(
            err,
            CipherError::InsufficientData {
                requested: 5,
                available: 3,
            }
        );
        assert_eq!(view.position(), 0);
    }

    #[test]
    fn test_read_only_rejects_all_writes() {
        let view = ByteView::alloc(8);
        let mut ro = view.as_read_only();
        assert!(ro.is_read_only());
        assert_eq!(ro.write_bytes(b"x").unwrap_err(), CipherError::ImmutableView);
        // Even an empty write is a programming error on a read-only view
        assert_eq!(ro.write_bytes(b"").unwrap_err(), CipherError::ImmutableView);
    }

    #[test]
    fn test_read_only_wrapper_sees_writes() {
        let mut view = ByteView::alloc(4);
        let mut ro = view.as_read_only();

        view.write_bytes(b"data").unwrap();

        let mut out = [0u8; 4];
        ro.read_into(&mut out).unwrap();
        assert_eq!(&out, b"data");
    }

    #[test]
    fn test_slice_aliases_storage() {
        let mut base = ByteView::alloc(16);
        base.set_position(4).unwrap();
        base.set_limit(12).unwrap();

        let mut window = base.slice();
        assert_eq!(window.capacity(), 8);
        assert_eq!(window.position(), 0);

        window.write_bytes(b"12345678").unwrap();

        // The write is visible through the original view
        base.clear();
        let all = base.to_vec();
        assert_eq!(&all[4..12], b"12345678");
        assert_eq!(&all[..4], &[0u8; 4]);
        assert_eq!(&all[12..], &[0u8; 4]);
    }

    #[test]
    fn test_read_slice_advances_and_aliases() {
        let mut view = ByteView::copy_from_slice(b"abcdef");
        let sub = view.read_slice(4).unwrap();
        assert_eq!(view.position(), 4);
        assert_eq!(sub.remaining(), 4);
        assert_eq!(sub.to_vec(), b"abcd");

        assert!(view.read_slice(3).is_err());
        assert_eq!(view.position(), 4);
    }

    #[test]
    fn test_set_position_bounds() {
        let mut view = ByteView::alloc(10);
        view.set_limit(6).unwrap();
        assert!(view.set_position(6).is_ok());
        assert!(view.set_position(7).is_err());
    }

    #[test]
    fn test_set_limit_pulls_position_back() {
        let mut view = ByteView::alloc(10);
        view.set_position(8).unwrap();
        view.set_limit(5).unwrap();
        assert_eq!(view.position(), 5);
        assert!(view.set_limit(11).is_err());
    }

    #[test]
    fn test_clear_and_flip() {
        let mut view = ByteView::alloc(8);
        view.write_bytes(b"abc").unwrap();

        view.flip();
        assert_eq!(view.position(), 0);
        assert_eq!(view.limit(), 3);

        view.clear();
        assert_eq!(view.position(), 0);
        assert_eq!(view.limit(), 8);
    }

    #[test]
    fn test_overlap_detection() {
        let mut base = ByteView::alloc(16);
        base.set_limit(8).unwrap();
        let front = base.slice();

        base.clear();
        base.set_position(8).unwrap();
        let back = base.slice();

        // Disjoint windows of the same storage
        assert!(!front.overlaps(&back));
        // The base window spans both
        base.clear();
        assert!(base.overlaps(&front));
        assert!(base.overlaps(&back));

        // Separate allocations never overlap
        let other = ByteView::alloc(16);
        assert!(!base.overlaps(&other));
    }

    #[test]
    fn test_overlap_empty_window() {
        let base = ByteView::alloc(8);
        let mut drained = base.clone();
        drained.set_position(8).unwrap();
        assert!(!base.overlaps(&drained));
    }
}
