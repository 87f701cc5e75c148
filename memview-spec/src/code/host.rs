//! Functions the generated code expects from the host.

use super::*;

pub const INCREF: &str = "memview_handle_incref";
pub const DECREF: &str = "memview_handle_decref";
pub const INIT_SLICE: &str = "memview_init_slice";
pub const ALLOC_CONTIGUOUS: &str = "memview_alloc_contiguous";
pub const ERROR: &str = "memview_error";

pub fn host_hooks() -> Vec<Prototype> {
    let handle = || Param::new(CTy::Handle.ptr(), "handle");

    vec![
        Prototype::new(INCREF, CTy::Void, vec![handle()]),
        Prototype::new(DECREF, CTy::Void, vec![handle()]),
        Prototype::new(
            INIT_SLICE,
            CTy::Int,
            vec![
                handle(),
                Param::new(CTy::Int, "ndim"),
                Param::new(CTy::Slice.ptr(), "slice"),
            ],
        ),
        Prototype::new(
            ALLOC_CONTIGUOUS,
            CTy::Handle.ptr(),
            vec![
                Param::new(CTy::Int, "ndim"),
                Param::new(CTy::SSize.constant().ptr(), "shape"),
                Param::new(CTy::SSize, "itemsize"),
                Param::new(CTy::Char, "order"),
            ],
        ),
        Prototype {
            variadic: true,
            ..Prototype::new(
                ERROR,
                CTy::Void,
                vec![Param::new(CTy::Char.constant().ptr(), "format")],
            )
        },
    ]
}

/// Drops the reference held by `slice` and leaves it unbound.
pub(crate) fn release_slice(slice: &Expr) -> Vec<Stmt> {
    vec![
        Stmt::If {
            cond: slice.clone().arrow("handle").binary(BinOp::Ne, Expr::Null),
            then: vec![Stmt::Expr(Expr::call(
                DECREF,
                vec![slice.clone().arrow("handle")],
            ))],
        },
        Stmt::assign(slice.clone().arrow("handle"), Expr::Null),
        Stmt::assign(slice.clone().arrow("data"), Expr::Null),
    ]
}
