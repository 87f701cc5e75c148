use std::mem::size_of;

use crate::sem::{Access, BufferRequest, Order, Packing, ViewType};

use super::*;

/// Whether the layout of `desc` is contiguous in `order`.
///
/// Dimensions are visited from the fastest varying one. Each must be direct, with a stride equal
/// to the size in bytes of the dimensions visited before it.
pub fn is_contiguous(desc: &BufferDescriptor, order: Order) -> bool {
    let ndim = desc.ndim();
    if desc.strides.len() != ndim || desc.suboffsets.len() != ndim {
        return false;
    }

    let dims: Vec<usize> = match order {
        Order::C => (0..ndim).rev().collect(),
        Order::Fortran => (0..ndim).collect(),
    };

    let mut size = 1;
    for dim in dims {
        if desc.suboffsets[dim] >= 0 {
            return false;
        }
        if size * desc.itemsize as isize != desc.strides[dim] {
            return false;
        }
        size *= desc.shape[dim];
    }
    true
}

/// Checks that the layout of `desc` satisfies every axis of `ty`.
///
/// Dimensions of extent 0 or 1 never constrain the stride, since no step is ever taken along
/// them.
pub fn check_layout(desc: &BufferDescriptor, ty: &ViewType) -> Result<(), RuntimeError> {
    desc.check()?;

    if desc.ndim() != ty.ndim() {
        return Err(RuntimeError::NdimMismatch {
            expected: ty.ndim(),
            found: desc.ndim(),
        });
    }
    if desc.itemsize != ty.dtype().itemsize() {
        return Err(RuntimeError::ItemsizeMismatch {
            expected: ty.dtype().itemsize(),
            found: desc.itemsize,
        });
    }

    for (dim, spec) in ty.axes().iter().enumerate() {
        let indirect = desc.suboffsets[dim] >= 0;
        match spec.access {
            Access::Direct if indirect => return Err(RuntimeError::IndirectNotAllowed { dim }),
            Access::Ptr if !indirect => return Err(RuntimeError::NotIndirect { dim }),
            _ => (),
        }

        if desc.shape[dim] <= 1 {
            continue;
        }
        let stride = desc.strides[dim];
        match spec.packing {
            Packing::Contig if spec.access == Access::Direct => {
                if stride != desc.itemsize as isize {
                    return Err(RuntimeError::NotContiguousInDim { dim });
                }
            }
            Packing::Contig => {
                if stride != size_of::<*mut u8>() as isize {
                    return Err(RuntimeError::NotIndirectlyContiguous { dim });
                }
            }
            Packing::Follow => {
                if stride.unsigned_abs() < desc.itemsize {
                    return Err(RuntimeError::NotContiguousInDim { dim });
                }
            }
            Packing::Strided => (),
        }
    }

    match ty.buffer_request() {
        BufferRequest::CContiguous if !is_contiguous(desc, Order::C) => {
            Err(RuntimeError::NotContiguous(Order::C))
        }
        BufferRequest::FContiguous if !is_contiguous(desc, Order::Fortran) => {
            Err(RuntimeError::NotContiguous(Order::Fortran))
        }
        _ => Ok(()),
    }
}
