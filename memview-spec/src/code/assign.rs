use super::*;

pub fn assign_name(ndim: usize) -> String {
    format!("memview_assign_{}d", ndim)
}

/// Makes `dst` share the buffer of `src`.
///
/// The reference held by `dst` is released first. A new reference on the buffer of `src` is
/// acquired only when `incref_src` is set, so that ownership can also be moved.
pub fn assign(ndim: usize) -> Function {
    let dst = Expr::var("dst");
    let src = Expr::var("src");

    let mut body = vec![
        Stmt::If {
            cond: dst.clone().arrow("handle").binary(BinOp::Ne, Expr::Null),
            then: vec![Stmt::Expr(Expr::call(
                host::DECREF,
                vec![dst.clone().arrow("handle")],
            ))],
        },
        Stmt::If {
            cond: Expr::var("incref_src").binary(
                BinOp::And,
                src.clone().arrow("handle").binary(BinOp::Ne, Expr::Null),
            ),
            then: vec![Stmt::Expr(Expr::call(
                host::INCREF,
                vec![src.clone().arrow("handle")],
            ))],
        },
        Stmt::assign(dst.clone().arrow("handle"), src.clone().arrow("handle")),
        Stmt::assign(dst.clone().arrow("data"), src.clone().arrow("data")),
    ];

    for dim in 0..ndim {
        for field in ["shape", "strides", "suboffsets"] {
            body.push(Stmt::assign(
                dst.clone().arrow(field).index(Expr::int(dim)),
                src.clone().arrow(field).index(Expr::int(dim)),
            ));
        }
    }

    Function {
        proto: Prototype::new(
            assign_name(ndim),
            CTy::Void,
            vec![
                Param::new(CTy::Slice.ptr(), "dst"),
                Param::new(CTy::Slice.constant().ptr(), "src"),
                Param::new(CTy::Int, "incref_src"),
            ],
        ),
        body,
        inline: true,
    }
}
