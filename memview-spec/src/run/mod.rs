//! Native execution of the slice procedures on raw buffer descriptors.
//!
//! The procedures mirror the generated ones: they address elements, test contiguity, copy
//! contents and assign slices, with the same preconditions and the same failures.

mod address;
mod check;
mod copy;
mod descriptor;
mod error;
mod handle;
mod slice;

pub use address::*;
pub use check::*;
pub use copy::*;
pub use descriptor::*;
pub use error::*;
pub use handle::*;
pub use slice::*;
