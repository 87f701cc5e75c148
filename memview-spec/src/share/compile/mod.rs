//! Implements compilation from AST to IR.

mod env;
mod options;
mod traits;

use std::rc::Rc;

pub use crate::dgns::*;
use crate::sem::ViewScope;

pub use env::*;
pub use options::*;
pub use traits::*;

/// Compiles a declaration file, resolving view constants through the modules in `options`.
pub fn compile(
    ast: &crate::ast::Spec,
    dgns: &mut DiagnosticContext,
    options: CompileOptions,
) -> Result<crate::ir::Spec> {
    let scope = Rc::new(options.scope());
    compile_with_scope(ast, dgns, options, scope)
}

pub fn compile_with_scope(
    ast: &crate::ast::Spec,
    dgns: &mut DiagnosticContext,
    options: CompileOptions,
    scope: Rc<dyn ViewScope>,
) -> Result<crate::ir::Spec> {
    ast.compile(&Env::root(options, scope), dgns)
}
