//! Generation of the support code of memory views, as a tree of C-like statements.

mod address;
mod assign;
mod cache;
mod check;
mod copy;
mod error;
pub mod host;
mod tree;
mod unit;

pub use address::*;
pub use assign::*;
pub use cache::*;
pub use check::*;
pub use copy::*;
pub use error::*;
pub use host::host_hooks;
pub use tree::*;
pub use unit::*;
