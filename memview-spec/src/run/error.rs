use thiserror::Error;

use crate::code::GenError;
use crate::sem::Order;

/// A failure of a slice procedure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("memoryview shapes not the same in dimension {dim}")]
    ShapeMismatch { dim: usize },
    #[error("buffer has wrong number of dimensions (expected {expected}, got {found})")]
    NdimMismatch { expected: usize, found: usize },
    #[error("item size of buffer ({found} bytes) does not match size of the element type ({expected} bytes)")]
    ItemsizeMismatch { expected: usize, found: usize },
    #[error("buffer is not {} contiguous", .0.as_char())]
    NotContiguous(Order),
    #[error("buffer not compatible with direct access in dimension {dim}")]
    IndirectNotAllowed { dim: usize },
    #[error("buffer is not indirectly accessible in dimension {dim}")]
    NotIndirect { dim: usize },
    #[error("buffer and memoryview are not contiguous in dimension {dim}")]
    NotContiguousInDim { dim: usize },
    #[error("buffer is not indirectly contiguous in dimension {dim}")]
    NotIndirectlyContiguous { dim: usize },
    #[error("malformed buffer descriptor: {0}")]
    Malformed(String),
    #[error("layout reaches outside the buffer of {bytes} bytes")]
    OutOfBounds { bytes: usize },
    #[error("a slice of type {from} does not conform to a slice of type {to}")]
    DoesNotConform { from: String, to: String },
    #[error("index {index} out of bounds in dimension {dim}")]
    IndexOutOfBounds { dim: usize, index: isize },
    #[error("the slice is not bound to a buffer")]
    Unbound,
    #[error("the buffer handle failed: {0}")]
    Handle(String),
    #[error("cannot initialize the slice")]
    Init(#[source] Box<RuntimeError>),
    #[error(transparent)]
    Gen(#[from] GenError),
}
