use thiserror::Error;

use crate::sem::{Access, Dtype, Mode};

/// A request for code which cannot be generated.
///
/// The front end rejects these cases with a diagnostic, so reaching one while generating code is
/// a defect of the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("dtype mismatch: `{from}` and `{to}`")]
    DtypeMismatch { from: Dtype, to: Dtype },
    #[error("number of dimensions mismatch: {from} and {to}")]
    RankMismatch { from: usize, to: usize },
    #[error("the destination must be C or Fortran contiguous, but it is {0}")]
    DestinationNotContiguous(Mode),
    #[error("cannot copy from a view with `{access}` access (axis {axis})")]
    UnsupportedSource { axis: usize, access: Access },
    #[error("cannot copy into a view with `{access}` access (axis {axis})")]
    UnsupportedDestination { axis: usize, access: Access },
}
