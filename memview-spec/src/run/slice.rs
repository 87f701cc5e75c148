use std::mem::size_of;
use std::ptr;
use std::sync::Arc;

use crate::sem::{AccessFlag, ViewType};

use super::*;

/// A slice: a descriptor of a buffer, together with a reference keeping the buffer alive.
///
/// A slice always has a view type, which decides how its elements are addressed. A bound slice
/// has a layout satisfying that type. An unbound slice holds neither a reference nor a valid
/// data pointer.
#[derive(Debug)]
pub struct SliceValue {
    handle: Option<HandleRef>,
    desc: BufferDescriptor,
    ty: ViewType,
    flags: Vec<AccessFlag>,
}

/// Describes the buffer of `handle`, checking its layout against `ty`.
fn describe(handle: &HandleRef, ty: &ViewType) -> Result<BufferDescriptor, RuntimeError> {
    let mut desc = BufferDescriptor::default();
    handle
        .handle()
        .init_descriptor(&mut desc)
        .map_err(|e| RuntimeError::Init(Box::new(e)))?;
    check_layout(&desc, ty)?;
    Ok(desc)
}

impl SliceValue {
    pub fn unbound(ty: &ViewType) -> Self {
        Self {
            handle: None,
            desc: BufferDescriptor::default(),
            ty: ty.clone(),
            flags: ty.flags(),
        }
    }

    /// Acquires `handle` and describes its buffer as a view of type `ty`.
    ///
    /// Fails if the layout of the buffer does not satisfy the type.
    pub fn bind(handle: Arc<dyn BufferHandle>, ty: &ViewType) -> Result<Self, RuntimeError> {
        let handle = HandleRef::new(handle);
        let desc = describe(&handle, ty)?;

        debug!("bound slice of type {} to {:?}", ty, handle);
        Ok(Self {
            handle: Some(handle),
            desc,
            ty: ty.clone(),
            flags: ty.flags(),
        })
    }

    pub fn descriptor(&self) -> &BufferDescriptor {
        &self.desc
    }

    pub fn view_type(&self) -> &ViewType {
        &self.ty
    }

    pub fn handle(&self) -> Option<&HandleRef> {
        self.handle.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    fn check_conforms(&self, src: &SliceValue) -> Result<(), RuntimeError> {
        if src.ty.conforms_to(&self.ty) {
            Ok(())
        } else {
            Err(RuntimeError::DoesNotConform {
                from: src.ty.to_string(),
                to: self.ty.to_string(),
            })
        }
    }

    /// Makes this slice share the buffer of `src`, which must conform to the type of this slice.
    ///
    /// The reference held by this slice is released before the one on `src` is acquired. The
    /// type of this slice is kept. On failure nothing changes.
    pub fn assign(&mut self, src: &SliceValue) -> Result<(), RuntimeError> {
        self.check_conforms(src)?;
        self.handle = None;
        self.handle = src.handle.clone();
        self.desc = src.desc.clone();
        Ok(())
    }

    /// Like [`SliceValue::assign`], but takes over the reference held by `src`.
    pub fn assign_move(&mut self, src: SliceValue) -> Result<(), RuntimeError> {
        self.check_conforms(&src)?;
        self.handle = None;
        self.handle = src.handle;
        self.desc = src.desc;
        Ok(())
    }

    /// Releases the buffer, leaving the slice unbound.
    pub fn clear(&mut self) {
        self.handle = None;
        self.desc = BufferDescriptor::default();
    }

    /// Describes again the whole buffer, keeping the reference. On failure the reference is
    /// released and the slice is left unbound.
    pub(crate) fn reinit(&mut self) -> Result<(), RuntimeError> {
        let handle = self.handle.take().ok_or(RuntimeError::Unbound)?;
        self.desc = BufferDescriptor::default();

        let desc = describe(&handle, &self.ty)?;
        self.handle = Some(handle);
        self.desc = desc;
        Ok(())
    }

    fn checked_pointer<T>(&self, indices: &[isize]) -> Result<*mut u8, RuntimeError> {
        if !self.is_bound() {
            return Err(RuntimeError::Unbound);
        }
        for found in [self.desc.ndim(), indices.len()] {
            if found != self.flags.len() {
                return Err(RuntimeError::NdimMismatch {
                    expected: self.flags.len(),
                    found,
                });
            }
        }
        if size_of::<T>() != self.desc.itemsize {
            return Err(RuntimeError::ItemsizeMismatch {
                expected: self.desc.itemsize,
                found: size_of::<T>(),
            });
        }
        for (dim, (&index, &extent)) in indices.iter().zip(&self.desc.shape).enumerate() {
            if index < 0 || index >= extent {
                return Err(RuntimeError::IndexOutOfBounds { dim, index });
            }
        }

        // SAFETY: the slice is bound, so `desc` describes a live buffer, and indices are in bounds.
        Ok(unsafe { item_pointer(&self.desc, &self.flags, indices) })
    }

    /// Reads the element at `indices`.
    pub fn get<T: Copy>(&self, indices: &[isize]) -> Result<T, RuntimeError> {
        let p = self.checked_pointer::<T>(indices)?;
        // SAFETY: `p` points to an element of size `size_of::<T>()`.
        Ok(unsafe { ptr::read_unaligned(p as *const T) })
    }

    /// Writes the element at `indices`.
    pub fn set<T: Copy>(&mut self, indices: &[isize], value: T) -> Result<(), RuntimeError> {
        let p = self.checked_pointer::<T>(indices)?;
        // SAFETY: as in `get`.
        unsafe { ptr::write_unaligned(p as *mut T, value) };
        Ok(())
    }
}
