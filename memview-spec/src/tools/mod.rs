//! Entry points of the command line tools.

pub mod memview_check;
pub mod memview_gen;
mod share;

pub use share::*;
