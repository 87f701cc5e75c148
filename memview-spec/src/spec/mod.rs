//! Implementation of each construct of the declaration language.

mod axis;
mod decl;
mod elem_ty;
mod name;
mod root;
mod stmt;

pub mod ast {
    //! Abstract Syntax Tree (AST), obtained by parsing a declaration file.

    use super::*;

    pub use axis::ast::*;
    pub use decl::ast::*;
    pub use name::ast::*;
    pub use root::ast::*;
    pub use stmt::ast::*;

    pub mod kw {
        //! Custom keywords

        use super::*;

        pub use stmt::kw::*;
    }
}

pub mod ir {
    use super::*;

    pub use decl::ir::*;
    pub use elem_ty::ir::*;
    pub use name::ir::*;
    pub use root::ir::*;
    pub use stmt::ir::*;
}
