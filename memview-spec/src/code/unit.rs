//! Collection of the utilities needed by a compiled declaration file.

use crate::ir;

use super::*;

/// The utilities used by a statement, requirements excluded.
fn statement_utilities(stmt: &ir::Stmt) -> Vec<UtilityKey> {
    match stmt {
        ir::Stmt::Decl(decl) => {
            let mut keys = vec![UtilityKey::ItemAccessor(decl.ty.clone())];
            if let Some(order) = decl.ty.order() {
                keys.push(UtilityKey::IsContiguous(order));
            }
            keys
        }
        ir::Stmt::Copy(copy) if copy.to_new => vec![UtilityKey::CopyNew(copy.key)],
        ir::Stmt::Copy(copy) => vec![UtilityKey::CopyContents(copy.key)],
        ir::Stmt::Assign(assign) => vec![UtilityKey::Assign {
            ndim: assign.dst.ty.ndim(),
        }],
    }
}

/// Requests from `cache` every utility used by `spec`, and returns the unit defining them.
///
/// The unit contains all the functions in the cache, including the ones requested by other
/// declaration files sharing it.
pub fn build_unit(spec: &ir::Spec, cache: &UtilityCache) -> Result<Unit, GenError> {
    for stmt in &spec.stmts {
        for key in statement_utilities(stmt) {
            cache.request(&key)?;
        }
    }

    Ok(Unit {
        max_dims: spec.options.max_dims,
        externs: host_hooks(),
        functions: cache.functions(),
    })
}
