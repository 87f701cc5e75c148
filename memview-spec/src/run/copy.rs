use std::ptr;
use std::sync::Arc;

use crate::code::CopyKey;
use crate::sem::{Order, ViewType};

use super::*;

/// Copies the elements of `from` into the buffer of `to`, after checking that their shapes
/// agree. `to` is then described again from its buffer.
///
/// The traversal is chosen from the types of the two slices. On a shape mismatch nothing is
/// written.
pub fn copy_contents(from: &SliceValue, to: &mut SliceValue) -> Result<(), RuntimeError> {
    let key = CopyKey::new(from.view_type(), to.view_type())?;

    if !from.is_bound() || !to.is_bound() {
        return Err(RuntimeError::Unbound);
    }

    let src = from.descriptor();
    let dst = to.descriptor();

    for desc in [src, dst] {
        if desc.ndim() != key.ndim {
            return Err(RuntimeError::NdimMismatch {
                expected: key.ndim,
                found: desc.ndim(),
            });
        }
    }
    for dim in 0..key.ndim {
        if src.shape[dim] != dst.shape[dim] {
            return Err(RuntimeError::ShapeMismatch { dim });
        }
    }
    if let Some(order) = key.order() {
        if !is_contiguous(dst, order) {
            return Err(RuntimeError::NotContiguous(order));
        }
    }

    trace!("copying {} elements ({:?})", src.len(), key);

    // SAFETY: both slices are bound, so their layouts satisfy their types and lie within their
    // buffers. They have the same shape, and both are direct since the key exists.
    unsafe {
        match key.order() {
            Some(order) => {
                let dims: Vec<usize> = match order {
                    Order::C => (0..key.ndim).collect(),
                    Order::Fortran => (0..key.ndim).rev().collect(),
                };
                let mut out = dst.data;
                gather(src, &dims, src.data, &mut out);
            }
            None => copy_strided(src, dst, 0, src.data, dst.data),
        }
    }

    to.reinit()
}

/// Copies the elements of `src` reachable from `base` along `dims` to consecutive positions
/// starting at `out`.
unsafe fn gather(src: &BufferDescriptor, dims: &[usize], base: *const u8, out: &mut *mut u8) {
    match dims {
        [] => {
            ptr::copy(base, *out, src.itemsize);
            *out = out.add(src.itemsize);
        }
        [dim, inner @ ..] => {
            for i in 0..src.shape[*dim] {
                gather(src, inner, base.offset(i * src.strides[*dim]), out);
            }
        }
    }
}

/// Walks `src` and `dst` together from dimension `dim`.
unsafe fn copy_strided(
    src: &BufferDescriptor,
    dst: &BufferDescriptor,
    dim: usize,
    from: *const u8,
    to: *mut u8,
) {
    if dim == src.ndim() {
        ptr::copy(from, to, src.itemsize);
        return;
    }
    for i in 0..src.shape[dim] {
        copy_strided(
            src,
            dst,
            dim + 1,
            from.offset(i * src.strides[dim]),
            to.offset(i * dst.strides[dim]),
        );
    }
}

/// Copies `from` into a new buffer, contiguous in `order`.
pub fn copy_new(from: &SliceValue, order: Order) -> Result<SliceValue, RuntimeError> {
    let from_ty = from.view_type();
    let to_ty = ViewType::contiguous(from_ty.dtype(), from_ty.ndim(), order);
    CopyKey::for_new(from_ty, &to_ty)?;

    if !from.is_bound() {
        return Err(RuntimeError::Unbound);
    }

    let shape: Vec<usize> = from
        .descriptor()
        .shape
        .iter()
        .map(|&n| n.max(0) as usize)
        .collect();
    let buffer = OwnedBuffer::contiguous(&shape, from_ty.dtype().itemsize(), order);
    let mut to = SliceValue::bind(Arc::new(buffer), &to_ty)?;

    // `to` releases the new buffer if the copy fails
    copy_contents(from, &mut to)?;
    Ok(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sem::{Access, AxisSpec, Dtype, Packing};
    use pretty_assertions::assert_eq;
    use speculoos::prelude::*;

    #[test]
    fn test_copy_into_strided_destination() {
        let ty = ViewType::new(
            Dtype::I16,
            vec![AxisSpec::new(Access::Direct, Packing::Strided)],
        )
        .unwrap();

        let mut src = SliceValue::bind(
            Arc::new(OwnedBuffer::contiguous(&[3], 2, Order::C)),
            &ty,
        )
        .unwrap();
        for i in 0..3 {
            src.set(&[i], i as i16 + 10).unwrap();
        }

        // every other element of a buffer of 6
        let every_other = OwnedBuffer::with_layout(12, 2, 0, vec![3], vec![4]).unwrap();
        let mut dst = SliceValue::bind(Arc::new(every_other), &ty).unwrap();

        copy_contents(&src, &mut dst).unwrap();
        let values: Vec<i16> = (0..3).map(|i| dst.get(&[i]).unwrap()).collect();
        assert_eq!(values, vec![10, 11, 12]);
    }

    #[test]
    fn test_unbound_source() {
        let ty = ViewType::contiguous(Dtype::U8, 1, Order::C);
        let src = SliceValue::unbound(&ty);
        assert_eq!(
            copy_new(&src, Order::C).map(|_| ()),
            Err(RuntimeError::Unbound)
        );
    }

    #[test]
    fn test_traversal_follows_the_destination_type() {
        let c_ty = ViewType::contiguous(Dtype::I32, 1, Order::C);
        let mut src = SliceValue::bind(
            Arc::new(OwnedBuffer::contiguous(&[3], 4, Order::C)),
            &c_ty,
        )
        .unwrap();
        for i in 0..3 {
            src.set(&[i], i as i32 + 10).unwrap();
        }

        // the same 3 elements, last to first
        let reversed = || OwnedBuffer::with_layout(12, 4, 8, vec![3], vec![-4]).unwrap();
        let strided_ty = ViewType::new(
            Dtype::I32,
            vec![AxisSpec::new(Access::Direct, Packing::Strided)],
        )
        .unwrap();
        assert_that!(SliceValue::bind(Arc::new(reversed()), &c_ty)).is_err();

        let mut dst = SliceValue::bind(Arc::new(reversed()), &strided_ty).unwrap();
        copy_contents(&src, &mut dst).unwrap();
        let values: Vec<i32> = (0..3).map(|i| dst.get(&[i]).unwrap()).collect();
        assert_eq!(values, vec![10, 11, 12]);
    }
}
