//! Computation of the address of an element, one dimension at a time.

use crate::sem::{AccessFlag, ViewType};

use super::*;

pub const INDEX_FULL: &str = "memview_index_full";

/// The helper deciding at run time between direct and indirect access, shared by the
/// `generic` and `generic_contiguous` axes.
pub fn index_full() -> Function {
    let bufp = Expr::var("bufp");

    Function {
        proto: Prototype::new(
            INDEX_FULL,
            CTy::char_ptr(),
            vec![
                Param::new(CTy::char_ptr(), "bufp"),
                Param::new(CTy::SSize, "idx"),
                Param::new(CTy::SSize, "stride"),
                Param::new(CTy::SSize, "suboffset"),
            ],
        ),
        body: vec![
            Stmt::assign(
                bufp.clone(),
                bufp.clone().add(Expr::var("idx").mul(Expr::var("stride"))),
            ),
            Stmt::If {
                cond: Expr::var("suboffset").binary(BinOp::Ge, Expr::int(0)),
                then: vec![Stmt::assign(
                    bufp.clone(),
                    bufp.clone()
                        .cast(CTy::char_ptr().ptr())
                        .deref()
                        .add(Expr::var("suboffset")),
                )],
            },
            Stmt::ret(bufp),
        ],
        inline: true,
    }
}

/// Whether addressing `view` goes through [`index_full`].
pub fn needs_index_full(view: &ViewType) -> bool {
    view.flags()
        .iter()
        .any(|f| matches!(f, AccessFlag::Generic | AccessFlag::GenericContiguous))
}

/// The address of the element of the slice pointed to by `slice` at `indices`.
pub fn item_pointer(view: &ViewType, slice: &Expr, indices: &[Expr]) -> Expr {
    let elem = CTy::Elem(view.dtype());
    let mut bufp = slice.clone().arrow("data");

    for (dim, (flag, index)) in view.flags().into_iter().zip(indices).enumerate() {
        let stride = slice.clone().arrow("strides").index(Expr::int(dim));
        let suboffset = slice.clone().arrow("suboffsets").index(Expr::int(dim));

        bufp = match flag {
            AccessFlag::Generic | AccessFlag::GenericContiguous => {
                Expr::call(INDEX_FULL, vec![bufp, index.clone(), stride, suboffset])
            }
            AccessFlag::Indirect => bufp
                .add(index.clone().mul(stride))
                .cast(CTy::char_ptr().ptr())
                .deref()
                .add(suboffset),
            AccessFlag::IndirectContiguous => bufp
                .cast(CTy::char_ptr().ptr())
                .add(index.clone())
                .deref()
                .add(suboffset),
            AccessFlag::Strided => bufp.add(index.clone().mul(stride)),
            AccessFlag::Contiguous => bufp
                .cast(elem.clone().ptr())
                .add(index.clone())
                .cast(CTy::char_ptr()),
        };
    }

    bufp.cast(elem.ptr())
}

/// An accessor returning a pointer to the element at the given indices.
pub fn item_accessor(name: &str, view: &ViewType) -> Function {
    let slice = Expr::var("mvs");
    let indices: Vec<_> = (0..view.ndim()).map(|d| format!("i{}", d)).collect();

    let mut params = vec![Param::new(CTy::Slice.constant().ptr(), "mvs")];
    params.extend(indices.iter().map(|i| Param::new(CTy::SSize, i.as_str())));

    let index_exprs: Vec<_> = indices.iter().map(|i| Expr::var(i.as_str())).collect();

    Function {
        proto: Prototype::new(name, CTy::Elem(view.dtype()).ptr(), params),
        body: vec![Stmt::ret(item_pointer(view, &slice, &index_exprs))],
        inline: true,
    }
}
