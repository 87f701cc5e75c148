use crate::sem::Order;

use super::*;

pub fn is_contiguous_name(order: Order) -> String {
    format!("memview_is_{}_contiguous", order)
}

/// A predicate telling whether the descriptor of a slice is contiguous in the given order.
///
/// Dimensions are visited from the fastest varying one; each must be direct and have a stride
/// equal to the size of the dimensions visited before it.
pub fn is_contiguous(order: Order) -> Function {
    let slice = Expr::var("mvs");
    let i = Expr::var("i");
    let size = Expr::var("size");

    let (start, cond, step) = match order {
        Order::C => (
            Expr::var("ndim").binary(BinOp::Sub, Expr::int(1)),
            i.clone().binary(BinOp::Gt, Expr::int(-1)),
            -1,
        ),
        Order::Fortran => (
            Expr::int(0),
            i.clone().binary(BinOp::Lt, Expr::var("ndim")),
            1,
        ),
    };

    let reject = |cond: Expr| Stmt::If {
        cond,
        then: vec![Stmt::ret(Expr::int(0))],
    };

    Function {
        proto: Prototype::new(
            is_contiguous_name(order),
            CTy::Int,
            vec![
                Param::new(CTy::Slice.constant().ptr(), "mvs"),
                Param::new(CTy::Int, "ndim"),
                Param::new(CTy::SSize, "itemsize"),
            ],
        ),
        body: vec![
            Stmt::decl(CTy::SSize, "size", Expr::int(1)),
            Stmt::For(ForLoop {
                index: "i".into(),
                start,
                cond,
                step,
                advance: vec![],
                body: vec![
                    reject(
                        slice
                            .clone()
                            .arrow("suboffsets")
                            .index(i.clone())
                            .binary(BinOp::Ge, Expr::int(0)),
                    ),
                    reject(
                        size.clone()
                            .mul(Expr::var("itemsize"))
                            .binary(BinOp::Ne, slice.clone().arrow("strides").index(i.clone())),
                    ),
                    Stmt::assign(size.clone(), size.mul(slice.arrow("shape").index(i))),
                ],
            }),
            Stmt::ret(Expr::int(1)),
        ],
        inline: false,
    }
}
