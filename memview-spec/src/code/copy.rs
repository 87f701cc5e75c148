//! Copy of the elements of a view into another view of the same shape.

use serde::{Deserialize, Serialize};

use crate::sem::{Access, Dtype, Mode, Order, ViewType};

use super::*;

/// Identifies a copy routine: the routine only depends on the element type, the rank and the
/// layout modes of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CopyKey {
    pub dtype: Dtype,
    pub ndim: usize,
    pub from: Mode,
    pub to: Mode,
}

fn first_indirect(view: &ViewType) -> Option<(usize, Access)> {
    view.axes()
        .iter()
        .enumerate()
        .find(|(_, axis)| axis.access != Access::Direct)
        .map(|(axis, spec)| (axis, spec.access))
}

impl CopyKey {
    /// A copy of the contents of `from` into the existing buffer of `to`.
    ///
    /// Both views must have only direct axes.
    pub fn new(from: &ViewType, to: &ViewType) -> Result<Self, GenError> {
        if from.dtype() != to.dtype() {
            return Err(GenError::DtypeMismatch {
                from: from.dtype(),
                to: to.dtype(),
            });
        }
        if from.ndim() != to.ndim() {
            return Err(GenError::RankMismatch {
                from: from.ndim(),
                to: to.ndim(),
            });
        }
        if let Some((axis, access)) = first_indirect(from) {
            return Err(GenError::UnsupportedSource { axis, access });
        }
        if let Some((axis, access)) = first_indirect(to) {
            return Err(GenError::UnsupportedDestination { axis, access });
        }

        Ok(Self {
            dtype: from.dtype(),
            ndim: from.ndim(),
            from: from.mode(),
            to: to.mode(),
        })
    }

    /// A copy of `from` into a newly allocated buffer laid out as `to`, which must be C or
    /// Fortran contiguous.
    pub fn for_new(from: &ViewType, to: &ViewType) -> Result<Self, GenError> {
        let key = Self::new(from, to)?;
        match key.to {
            Mode::C | Mode::Fortran => Ok(key),
            mode => Err(GenError::DestinationNotContiguous(mode)),
        }
    }

    /// The memory order of the destination, if contiguous.
    pub fn order(&self) -> Option<Order> {
        self.to.order()
    }

    pub fn contents_name(&self) -> String {
        format!(
            "memview_copy_{}_{}d_{}_to_{}",
            self.dtype, self.ndim, self.from, self.to
        )
    }

    pub fn new_name(&self) -> String {
        format!(
            "memview_new_{}_{}_{}d_from_{}",
            self.to, self.dtype, self.ndim, self.from
        )
    }
}

fn shape(slice: &str, dim: usize) -> Expr {
    Expr::var(slice).arrow("shape").index(Expr::int(dim))
}

fn stride(slice: &str, dim: usize) -> Expr {
    Expr::var(slice).arrow("strides").index(Expr::int(dim))
}

/// `for (ssize_t i{dim} = 0; i{dim} < from_mvs->shape[dim]; i{dim}++)`
fn dim_loop(dim: usize, advance: Vec<(String, Expr)>, body: Vec<Stmt>) -> Stmt {
    let index = format!("i{}", dim);
    Stmt::For(ForLoop {
        cond: Expr::var(index.as_str()).binary(BinOp::Lt, shape("from_mvs", dim)),
        index,
        start: Expr::int(0),
        step: 1,
        advance,
        body,
    })
}

/// Visits the source in the memory order of a contiguous destination, copying each element to
/// the next position of the destination.
fn contiguous_traversal(key: &CopyKey, order: Order) -> Vec<Stmt> {
    let itemsize = Expr::SizeOf(CTy::Elem(key.dtype));
    let dims: Vec<usize> = match order {
        Order::C => (0..key.ndim).collect(),
        Order::Fortran => (0..key.ndim).rev().collect(),
    };

    let innermost = format!("idx{}", dims[dims.len() - 1]);
    let mut body = vec![
        Stmt::Expr(Expr::call(
            "memmove",
            vec![
                Expr::var("to_buf"),
                Expr::var("from_buf").add(Expr::var(innermost)),
                itemsize.clone(),
            ],
        )),
        Stmt::assign(Expr::var("to_buf"), Expr::var("to_buf").add(itemsize)),
    ];

    for (pos, &dim) in dims.iter().enumerate().rev() {
        let mut offset = Expr::var(format!("i{}", dim)).mul(stride("from_mvs", dim));
        if pos > 0 {
            offset = offset.add(Expr::var(format!("idx{}", dims[pos - 1])));
        }
        let mut inner = vec![Stmt::decl(CTy::SSize, format!("idx{}", dim), offset)];
        inner.extend(body);
        body = vec![dim_loop(dim, vec![], inner)];
    }

    body
}

/// Walks source and destination together, one pointer pair per dimension.
fn strided_traversal(key: &CopyKey) -> Vec<Stmt> {
    let elem_ptr = CTy::Elem(key.dtype).ptr();
    let last = key.ndim - 1;

    let mut body = vec![Stmt::assign(
        Expr::var(format!("tp{}", last)).cast(elem_ptr.clone()).deref(),
        Expr::var(format!("fp{}", last)).cast(elem_ptr).deref(),
    )];

    for dim in (0..key.ndim).rev() {
        let (from_base, to_base) = if dim == 0 {
            ("from_buf".to_string(), "to_buf".to_string())
        } else {
            (format!("fp{}", dim - 1), format!("tp{}", dim - 1))
        };
        let fp = format!("fp{}", dim);
        let tp = format!("tp{}", dim);

        body = vec![
            Stmt::decl(CTy::char_ptr(), fp.as_str(), Expr::var(from_base)),
            Stmt::decl(CTy::char_ptr(), tp.as_str(), Expr::var(to_base)),
            dim_loop(
                dim,
                vec![(fp, stride("from_mvs", dim)), (tp, stride("to_mvs", dim))],
                body,
            ),
        ];
    }

    body
}

/// Copies the elements of `from_mvs` into `to_mvs`, after checking that their shapes agree.
///
/// Returns `-1` without touching the destination when the shapes differ.
pub fn copy_contents(key: &CopyKey) -> Function {
    let from = Expr::var("from_mvs");
    let to = Expr::var("to_mvs");
    let dim = Expr::var("dim");

    let mut body = vec![
        Stmt::decl(CTy::char_ptr(), "from_buf", from.clone().arrow("data")),
        Stmt::decl(CTy::char_ptr(), "to_buf", to.clone().arrow("data")),
        Stmt::For(ForLoop {
            index: "dim".into(),
            start: Expr::int(0),
            cond: dim.clone().binary(BinOp::Lt, Expr::int(key.ndim)),
            step: 1,
            advance: vec![],
            body: vec![Stmt::If {
                cond: from
                    .clone()
                    .arrow("shape")
                    .index(dim.clone())
                    .binary(BinOp::Ne, to.clone().arrow("shape").index(dim.clone())),
                then: vec![
                    Stmt::Fail {
                        message: "memoryview shapes not the same in dimension %d".into(),
                        args: vec![dim.cast(CTy::Int)],
                    },
                    Stmt::ret(Expr::int(-1)),
                ],
            }],
        }),
    ];

    match key.order() {
        Some(order) => {
            body.push(Stmt::comment(format!("{} order traversal", order)));
            body.extend(contiguous_traversal(key, order));
        }
        None => {
            body.push(Stmt::comment("strided traversal"));
            body.extend(strided_traversal(key));
        }
    }

    let mut reinit = vec![Stmt::Fail {
        message: "cannot reinitialize the destination of a copy".into(),
        args: vec![],
    }];
    reinit.push(Stmt::Expr(Expr::call(host::DECREF, vec![Expr::var("handle")])));
    reinit.push(Stmt::ret(Expr::int(-1)));

    body.extend([
        Stmt::decl(CTy::Handle.ptr(), "handle", to.clone().arrow("handle")),
        Stmt::assign(to.clone().arrow("handle"), Expr::Null),
        Stmt::assign(to.clone().arrow("data"), Expr::Null),
        Stmt::If {
            cond: Expr::call(
                host::INIT_SLICE,
                vec![Expr::var("handle"), Expr::int(key.ndim), to],
            )
            .binary(BinOp::Eq, Expr::int(-1)),
            then: reinit,
        },
        Stmt::ret(Expr::int(0)),
    ]);

    Function {
        proto: Prototype::new(
            key.contents_name(),
            CTy::Int,
            vec![
                Param::new(CTy::Slice.constant().ptr(), "from_mvs"),
                Param::new(CTy::Slice.ptr(), "to_mvs"),
            ],
        ),
        body,
        inline: false,
    }
}

/// Binds `to_mvs` to a newly allocated contiguous buffer holding a copy of `from_mvs`.
///
/// The copy is made into a temporary slice, and `to_mvs` is released and replaced only once it
/// succeeded, so `from_mvs` and `to_mvs` may be the same slice. On failure `to_mvs` is untouched.
///
/// The caller must have checked that `key` has a contiguous destination.
pub fn copy_new(key: &CopyKey, order: Order) -> Function {
    let from = Expr::var("from_mvs");
    let to = Expr::var("to_mvs");
    let tmp = Expr::var("tmp").addr_of();
    let handle = Expr::var("handle");
    let failed = |call: Expr| call.binary(BinOp::Eq, Expr::int(-1));

    let mut on_init_error = vec![Stmt::Expr(Expr::call(host::DECREF, vec![handle.clone()]))];
    on_init_error.push(Stmt::ret(Expr::int(-1)));

    let mut on_copy_error = host::release_slice(&tmp);
    on_copy_error.push(Stmt::ret(Expr::int(-1)));

    let mut body = vec![
        Stmt::decl(
            CTy::Handle.ptr(),
            "handle",
            Expr::call(
                host::ALLOC_CONTIGUOUS,
                vec![
                    Expr::int(key.ndim),
                    from.clone().arrow("shape"),
                    Expr::SizeOf(CTy::Elem(key.dtype)),
                    Expr::Char(order.as_char()),
                ],
            ),
        ),
        Stmt::If {
            cond: handle.clone().binary(BinOp::Eq, Expr::Null),
            then: vec![Stmt::ret(Expr::int(-1))],
        },
        Stmt::Decl {
            ty: CTy::Slice,
            name: "tmp".into(),
            init: None,
        },
        Stmt::If {
            cond: failed(Expr::call(
                host::INIT_SLICE,
                vec![handle, Expr::int(key.ndim), tmp.clone()],
            )),
            then: on_init_error,
        },
        Stmt::If {
            cond: failed(Expr::call(key.contents_name(), vec![from, tmp])),
            then: on_copy_error,
        },
    ];
    body.extend(host::release_slice(&to));
    body.extend([
        Stmt::assign(to.deref(), Expr::var("tmp")),
        Stmt::ret(Expr::int(0)),
    ]);

    Function {
        proto: Prototype::new(
            key.new_name(),
            CTy::Int,
            vec![
                Param::new(CTy::Slice.constant().ptr(), "from_mvs"),
                Param::new(CTy::Slice.ptr(), "to_mvs"),
            ],
        ),
        body,
        inline: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::emit_string;
    use crate::lang::c::C;
    use crate::sem::{AxisSpec, Packing};
    use pretty_assertions::assert_eq;

    fn strided(ndim: usize) -> ViewType {
        ViewType::new(
            Dtype::F64,
            vec![AxisSpec::new(Access::Direct, Packing::Strided); ndim],
        )
        .unwrap()
    }

    #[test]
    fn test_key_preconditions() {
        let c = ViewType::contiguous(Dtype::F64, 2, Order::C);
        assert_eq!(
            CopyKey::new(&strided(2), &c).unwrap().contents_name(),
            "memview_copy_f64_2d_strided_to_c"
        );
        assert_eq!(
            CopyKey::new(&strided(1), &c),
            Err(GenError::RankMismatch { from: 1, to: 2 })
        );
        assert_eq!(
            CopyKey::for_new(&c, &strided(2)),
            Err(GenError::DestinationNotContiguous(Mode::Strided))
        );

        let indirect = ViewType::new(
            Dtype::F64,
            vec![
                AxisSpec::new(Access::Direct, Packing::Strided),
                AxisSpec::new(Access::Ptr, Packing::Strided),
            ],
        )
        .unwrap();
        assert_eq!(
            CopyKey::new(&indirect, &c),
            Err(GenError::UnsupportedSource {
                axis: 1,
                access: Access::Ptr
            })
        );
    }

    #[test]
    fn test_fortran_traversal_is_reversed() {
        let key = CopyKey::new(&strided(2), &ViewType::contiguous(Dtype::F64, 2, Order::Fortran))
            .unwrap();
        let traversal = contiguous_traversal(&key, Order::Fortran);
        match &traversal[..] {
            [Stmt::For(outer)] => assert_eq!(outer.index, "i1"),
            other => panic!("unexpected traversal {:?}", other),
        }
    }

    #[test]
    fn test_new_copy_replaces_destination_last() {
        let c = ViewType::contiguous(Dtype::F64, 2, Order::C);
        let key = CopyKey::for_new(&c, &c).unwrap();
        let text = emit_string(&copy_new(&key, Order::C), &C);

        let copy = text
            .find("memview_copy_f64_2d_c_to_c(from_mvs, (&tmp))")
            .unwrap();
        let release = text.find("memview_handle_decref(to_mvs->handle)").unwrap();
        let replace = text.find("(*to_mvs) = tmp;").unwrap();
        assert!(copy < release && release < replace, "{}", text);
        // a failed copy only drops the temporary
        assert!(text.contains("memview_handle_decref((&tmp)->handle)"), "{}", text);
    }
}
