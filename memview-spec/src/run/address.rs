use crate::sem::AccessFlag;

use super::*;

/// Moves `bufp` along a dimension by `index`, following the pointer found there when the
/// dimension is indirect (`suboffset >= 0`).
///
/// # Safety
///
/// `bufp` must point into a buffer laid out with the given stride and suboffset, and `index`
/// must be within the bounds of the dimension.
pub unsafe fn index_full(bufp: *mut u8, index: isize, stride: isize, suboffset: isize) -> *mut u8 {
    let bufp = bufp.offset(index * stride);
    if suboffset >= 0 {
        (*(bufp as *const *mut u8)).offset(suboffset)
    } else {
        bufp
    }
}

/// The address of the element at `indices`, computed with the addressing of `flags`.
///
/// # Safety
///
/// `desc` must describe a live buffer with the layout `flags` declares, and every index must be
/// within bounds.
pub unsafe fn item_pointer(desc: &BufferDescriptor, flags: &[AccessFlag], indices: &[isize]) -> *mut u8 {
    let mut bufp = desc.data;

    for (dim, (flag, &index)) in flags.iter().zip(indices).enumerate() {
        let stride = desc.strides[dim];
        let suboffset = desc.suboffsets[dim];

        bufp = match flag {
            AccessFlag::Generic | AccessFlag::GenericContiguous => {
                index_full(bufp, index, stride, suboffset)
            }
            AccessFlag::Indirect => {
                (*(bufp.offset(index * stride) as *const *mut u8)).offset(suboffset)
            }
            AccessFlag::IndirectContiguous => {
                (*(bufp as *const *mut u8).offset(index)).offset(suboffset)
            }
            AccessFlag::Strided => bufp.offset(index * stride),
            AccessFlag::Contiguous => bufp.offset(index * desc.itemsize as isize),
        };
    }

    bufp
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indirect_rows() {
        let mut row0 = [1i32, 2, 3];
        let mut row1 = [4i32, 5, 6];
        let mut rows = [row0.as_mut_ptr() as *mut u8, row1.as_mut_ptr() as *mut u8];

        let desc = BufferDescriptor {
            data: rows.as_mut_ptr() as *mut u8,
            itemsize: 4,
            shape: vec![2, 3],
            strides: vec![8, 4],
            suboffsets: vec![0, -1],
        };

        let value = |flags: &[AccessFlag], i, j| unsafe {
            *(item_pointer(&desc, flags, &[i, j]) as *const i32)
        };

        assert_eq!(value(&[AccessFlag::Indirect, AccessFlag::Strided], 1, 2), 6);
        assert_eq!(value(&[AccessFlag::IndirectContiguous, AccessFlag::Contiguous], 1, 0), 4);
        assert_eq!(value(&[AccessFlag::Generic, AccessFlag::Generic], 0, 1), 2);
    }
}
