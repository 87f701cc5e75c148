//! Semantics of memory-view types: axis specifications, their resolution and validation,
//! contiguity and conformance.

mod axis_spec;
mod conform;
mod contig;
mod dtype;
mod error;
mod resolve;
mod scope;
mod validate;
mod view_ty;

pub use axis_spec::*;
pub use conform::*;
pub use contig::*;
pub use dtype::*;
pub use error::*;
pub use resolve::*;
pub use scope::*;
pub use validate::*;
pub use view_ty::*;
