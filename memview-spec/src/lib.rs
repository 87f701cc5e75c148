//! Compiler and runtime support for typed, multi-dimensional memory-view slices.
//!
//! A declaration file lists views (`f64[:, ::1] a;`), copies between them and slice
//! assignments. Views are parsed into an AST, compiled into an IR where axis specifiers are
//! resolved and validated, and the procedures the IR needs are generated as C code.

#[macro_use]
extern crate log;

mod share;
mod spec;

pub mod code;
pub mod lang;
pub mod run;
pub mod sem;
pub mod tools;

pub use share::compile;
pub use share::dgns;
pub use spec::ast;

pub mod ir {
    //! Intermediate Representation (IR) of a declaration file.
    //!
    //! Names are resolved by linking each use to the node declaring the view, so that every
    //! statement carries the resolved view types it operates on.

    use super::*;

    pub use share::ir::*;
    pub use spec::ir::*;
}

pub mod gen {
    //! Rendering of code trees as text.

    use super::*;

    pub use share::gen::*;
}
