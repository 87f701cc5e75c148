use std::ptr;

use super::*;

/// The layout of a slice over a buffer.
///
/// `strides` and `suboffsets` are in bytes. A negative suboffset means that the dimension is
/// accessed directly; otherwise the address computed for the dimension holds a pointer, to be
/// followed and then moved by the suboffset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDescriptor {
    pub data: *mut u8,
    pub itemsize: usize,
    pub shape: Vec<isize>,
    pub strides: Vec<isize>,
    pub suboffsets: Vec<isize>,
}

impl Default for BufferDescriptor {
    fn default() -> Self {
        Self {
            data: ptr::null_mut(),
            itemsize: 0,
            shape: vec![],
            strides: vec![],
            suboffsets: vec![],
        }
    }
}

impl BufferDescriptor {
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.shape.iter().map(|&n| n.max(0) as usize).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that the descriptor is well formed: one stride and one suboffset per dimension,
    /// no negative extent, and a data pointer unless the buffer is empty.
    pub fn check(&self) -> Result<(), RuntimeError> {
        let ndim = self.ndim();
        if self.strides.len() != ndim || self.suboffsets.len() != ndim {
            return Err(RuntimeError::Malformed(format!(
                "{} dimensions, {} strides and {} suboffsets",
                ndim,
                self.strides.len(),
                self.suboffsets.len()
            )));
        }
        if let Some(dim) = self.shape.iter().position(|&n| n < 0) {
            return Err(RuntimeError::Malformed(format!(
                "negative extent in dimension {}",
                dim
            )));
        }
        if self.data.is_null() && !self.is_empty() {
            return Err(RuntimeError::Malformed("null data pointer".into()));
        }
        Ok(())
    }
}
