//! # memview
//!
//! Command line front end of the memory-view compiler: the option parsing, the logger setup and
//! the error reporting shared by the tools.

#[macro_use]
extern crate log;

mod autocompletion;
pub mod error;
pub mod opt;

pub use autocompletion::*;
pub use opt::*;
