use std::cell::UnsafeCell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::sem::Order;

use super::*;

/// The object owning the memory of a buffer, with an external reference count.
///
/// # Safety
///
/// Slices read and write through the descriptors filled by `init_descriptor` without further
/// checks on the memory. An implementation must guarantee that, while at least one reference
/// acquired with `acquire` is live:
///
/// - every element reachable from `data` through in-bounds indices, strides and suboffsets lies
///   in memory valid for reads and writes of `itemsize` bytes;
/// - every pointer stored in an indirect dimension points to such memory;
/// - the memory is not accessed concurrently through other means.
pub unsafe trait BufferHandle: fmt::Debug + Send + Sync {
    fn acquire(&self);

    fn release(&self);

    /// Describes the whole buffer in `desc`.
    fn init_descriptor(&self, desc: &mut BufferDescriptor) -> Result<(), RuntimeError>;
}

/// A heap buffer with a fixed layout.
pub struct OwnedBuffer {
    // `u64` words keep every element type aligned
    storage: Box<[UnsafeCell<u64>]>,
    itemsize: usize,
    offset: isize,
    shape: Vec<isize>,
    strides: Vec<isize>,
    refcount: AtomicUsize,
}

// SAFETY: the storage is only accessed through the raw pointers of the descriptors, whose users
// are responsible for synchronization.
unsafe impl Sync for OwnedBuffer {}

impl fmt::Debug for OwnedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("bytes", &(self.storage.len() * 8))
            .field("itemsize", &self.itemsize)
            .field("offset", &self.offset)
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("refcount", &self.refcount)
            .finish()
    }
}

/// The strides of a contiguous array of the given shape.
pub fn contiguous_strides(shape: &[usize], itemsize: usize, order: Order) -> Vec<isize> {
    let mut strides = vec![0; shape.len()];
    let mut size = itemsize as isize;
    let dims: Vec<usize> = match order {
        Order::C => (0..shape.len()).rev().collect(),
        Order::Fortran => (0..shape.len()).collect(),
    };
    for dim in dims {
        strides[dim] = size;
        size *= shape[dim] as isize;
    }
    strides
}

/// Checks that every byte reachable through `shape` and `strides` from `offset` lies within
/// `bytes` bytes.
fn check_bounds(
    bytes: usize,
    itemsize: usize,
    offset: isize,
    shape: &[isize],
    strides: &[isize],
) -> Result<(), RuntimeError> {
    let out_of_bounds = || RuntimeError::OutOfBounds { bytes };

    if shape.len() != strides.len() {
        return Err(RuntimeError::Malformed(format!(
            "{} dimensions and {} strides",
            shape.len(),
            strides.len()
        )));
    }
    if let Some(dim) = shape.iter().position(|&n| n < 0) {
        return Err(RuntimeError::Malformed(format!(
            "negative extent in dimension {}",
            dim
        )));
    }
    if offset < 0 || offset as usize > bytes {
        return Err(out_of_bounds());
    }
    if shape.contains(&0) {
        return Ok(());
    }

    let mut low = offset;
    let mut high = offset
        .checked_add(itemsize as isize)
        .ok_or_else(out_of_bounds)?;
    for (&n, &stride) in shape.iter().zip(strides) {
        let reach = (n - 1).checked_mul(stride).ok_or_else(out_of_bounds)?;
        if reach < 0 {
            low = low.checked_add(reach).ok_or_else(out_of_bounds)?;
        } else {
            high = high.checked_add(reach).ok_or_else(out_of_bounds)?;
        }
    }

    if low < 0 || high as usize > bytes {
        return Err(out_of_bounds());
    }
    Ok(())
}

impl OwnedBuffer {
    /// A zeroed contiguous buffer.
    pub fn contiguous(shape: &[usize], itemsize: usize, order: Order) -> Self {
        let bytes = shape.iter().product::<usize>() * itemsize;
        Self::zeroed(
            bytes,
            itemsize,
            0,
            shape.iter().map(|&n| n as isize).collect(),
            contiguous_strides(shape, itemsize, order),
        )
    }

    /// A zeroed buffer of `bytes` bytes, viewed with the given layout starting at `offset`.
    ///
    /// Fails unless every element of the layout lies within the buffer.
    pub fn with_layout(
        bytes: usize,
        itemsize: usize,
        offset: isize,
        shape: Vec<isize>,
        strides: Vec<isize>,
    ) -> Result<Self, RuntimeError> {
        check_bounds(bytes, itemsize, offset, &shape, &strides)?;
        Ok(Self::zeroed(bytes, itemsize, offset, shape, strides))
    }

    fn zeroed(
        bytes: usize,
        itemsize: usize,
        offset: isize,
        shape: Vec<isize>,
        strides: Vec<isize>,
    ) -> Self {
        let words = (bytes + 7) / 8;
        Self {
            storage: (0..words).map(|_| UnsafeCell::new(0)).collect(),
            itemsize,
            offset,
            shape,
            strides,
            refcount: AtomicUsize::new(0),
        }
    }

    /// The number of live references to the buffer.
    pub fn refcount(&self) -> usize {
        self.refcount.load(Ordering::SeqCst)
    }

    fn base(&self) -> *mut u8 {
        UnsafeCell::raw_get(self.storage.as_ptr()) as *mut u8
    }
}

// SAFETY: the layout is within the storage, checked by `with_layout` or contiguous by
// construction, and no dimension is indirect.
unsafe impl BufferHandle for OwnedBuffer {
    fn acquire(&self) {
        let count = self.refcount.fetch_add(1, Ordering::SeqCst) + 1;
        trace!("acquired buffer, {} references", count);
    }

    fn release(&self) {
        let previous = self.refcount.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "buffer released more times than acquired");
        trace!("released buffer, {} references", previous - 1);
    }

    fn init_descriptor(&self, desc: &mut BufferDescriptor) -> Result<(), RuntimeError> {
        // SAFETY: `offset` is within the storage, as checked by `with_layout`.
        desc.data = unsafe { self.base().offset(self.offset) };
        desc.itemsize = self.itemsize;
        desc.shape = self.shape.clone();
        desc.strides = self.strides.clone();
        desc.suboffsets = vec![-1; self.shape.len()];
        Ok(())
    }
}

/// A counted reference to a buffer handle: acquired when created or cloned, released when
/// dropped.
#[derive(Debug)]
pub struct HandleRef(Arc<dyn BufferHandle>);

impl HandleRef {
    pub fn new(handle: Arc<dyn BufferHandle>) -> Self {
        handle.acquire();
        Self(handle)
    }

    pub fn handle(&self) -> &Arc<dyn BufferHandle> {
        &self.0
    }

    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Clone for HandleRef {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl Drop for HandleRef {
    fn drop(&mut self) {
        self.0.release()
    }
}
