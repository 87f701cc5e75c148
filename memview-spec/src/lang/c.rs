use crate::code::*;
use crate::gen::*;

pub struct C;

lang_mixin!(C, Expr, CommonMixin);

impl Emit<C> for CTy {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        match self {
            CTy::Void => emit!(ctx, "void"),
            CTy::Int => emit!(ctx, "int"),
            CTy::SSize => emit!(ctx, "ssize_t"),
            CTy::Char => emit!(ctx, "char"),
            CTy::Elem(dtype) => emit!(ctx, "{}" % (&Raw(dtype.c_decl()))),
            CTy::Slice => emit!(ctx, "memview_slice"),
            CTy::Handle => emit!(ctx, "memview_handle"),
            // `char **`, not `char * *`
            CTy::Ptr(inner) if matches!(inner.as_ref(), CTy::Ptr(_)) => emit!(ctx, "{}*" % inner),
            CTy::Ptr(inner) => emit!(ctx, "{} *" % inner),
            CTy::Const(inner) => emit!(ctx, "const {}" % inner),
        }
    }
}

/// A declaration of `name` with type `ty`, e.g. `char *bufp`.
struct Declarator<'a>(&'a CTy, &'a str);

impl Emit<C> for Declarator<'_> {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        let Self(ty, name) = self;
        match ty {
            CTy::Ptr(_) => emit!(ctx, "{}{}" % (*ty, &Raw(name))),
            _ => emit!(ctx, "{} {}" % (*ty, &Raw(name))),
        }
    }
}

impl Emit<C> for Param {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        let Self { ty, name } = self;
        emit!(ctx, "{}" % (&Declarator(ty, name)))
    }
}

/// The increment clause of a `for` loop.
struct Increment<'a>(&'a ForLoop);

impl Emit<C> for Increment<'_> {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        let ForLoop {
            index,
            step,
            advance,
            ..
        } = self.0;
        let op = if *step < 0 { "--" } else { "++" };
        emit!(ctx, "{}{}" % (&Raw(index), &Raw(op)))?;
        for (pointer, stride) in advance {
            emit!(ctx, ", {} += {}" % (&Raw(pointer), stride))?;
        }
        Ok(())
    }
}

/// A C string literal.
struct StrLit<'a>(&'a str);

impl Emit<C> for StrLit<'_> {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        ctx.append(format_args!("{:?}", self.0))
    }
}

impl Emit<C> for Stmt {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        match self {
            Stmt::Decl {
                ty,
                name,
                init: Some(init),
            } => emit!(ctx, {
                "{} = {};" % (&Declarator(ty, name), init);
            }),
            Stmt::Decl {
                ty,
                name,
                init: None,
            } => emit!(ctx, {
                "{};" % (&Declarator(ty, name));
            }),
            Stmt::Assign { lhs, rhs } => emit!(ctx, {
                "{} = {};" % (lhs, rhs);
            }),
            Stmt::Expr(expr) => emit!(ctx, {
                "{};" % expr;
            }),
            Stmt::If { cond, then } if cond.is_parenthesized() => emit!(ctx, {
                "if {} {{" % cond;
                ({ then });
                "}";
            }),
            Stmt::If { cond, then } => emit!(ctx, {
                "if ({}) {{" % cond;
                ({ then });
                "}";
            }),
            Stmt::For(for_loop) => {
                let ForLoop {
                    index,
                    start,
                    cond,
                    body,
                    ..
                } = for_loop;
                emit!(ctx, {
                    "for (ssize_t {} = {}; {}; {}) {{"
                        % (&Raw(index), start, cond, &Increment(for_loop));
                    ({ body });
                    "}";
                })
            }
            Stmt::Return(None) => emit!(ctx, {
                "return;";
            }),
            Stmt::Return(Some(value)) => emit!(ctx, {
                "return {};" % value;
            }),
            Stmt::Fail { message, args } if args.is_empty() => emit!(ctx, {
                "{}({});" % (&Raw(host::ERROR), &StrLit(message));
            }),
            Stmt::Fail { message, args } => emit!(ctx, {
                "{}({}, {});"
                    % (
                        &Raw(host::ERROR),
                        &StrLit(message),
                        &Punctuated(args.to_vec(), ", "),
                    );
            }),
            Stmt::Comment(text) => emit!(ctx, {
                "/* {} */" % (&Raw(text));
            }),
        }
    }
}

impl Emit<C> for Prototype {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        let Self {
            name,
            ret,
            params,
            variadic,
        } = self;
        let params = Punctuated(params.to_vec(), ", ");
        let ellipsis = if *variadic { ", ..." } else { "" };
        emit!(ctx, "{}({}{})" % (&Declarator(ret, name), &params, &Raw(ellipsis)))
    }
}

/// The declaration of a function defined later in the unit.
struct Forward<'a>(&'a Function);

impl Emit<C> for Forward<'_> {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        let Function { proto, inline, .. } = self.0;
        let storage = if *inline { "static inline " } else { "static " };
        emit!(ctx, {
            "{}{};" % (&Raw(storage), proto);
        })
    }
}

impl Emit<C> for Function {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        let Self {
            proto,
            body,
            inline,
        } = self;
        let storage = if *inline { "static inline " } else { "static " };
        emit!(ctx, {
            "{}{} {{" % (&Raw(storage), proto);
            ({ body });
            "}";
        })
    }
}

impl Emit<C> for Unit {
    fn emit(&self, ctx: EmitContext<C>) -> Result {
        let Self {
            max_dims,
            externs,
            functions,
        } = self;

        emit!(ctx, {
            "/* Generated by memview. Do not edit. */";
            "#include <stddef.h>";
            "#include <stdint.h>";
            "#include <string.h>";
            "#include <sys/types.h>";
            ();
            "#define MEMVIEW_MAX_DIMS {}" % (&Raw(max_dims));
            ();
            "typedef struct memview_handle memview_handle;";
            ();
            "typedef struct {";
            ({
                "memview_handle *handle;";
                "char *data;";
                "ssize_t shape[MEMVIEW_MAX_DIMS];";
                "ssize_t strides[MEMVIEW_MAX_DIMS];";
                "ssize_t suboffsets[MEMVIEW_MAX_DIMS];";
            });
            "} memview_slice;";
            ();
        })?;

        for proto in externs {
            emit!(ctx, {
                "extern {};" % proto;
            })?;
        }
        emit!(ctx, ;)?;

        for function in functions {
            emit!(ctx, (&Forward(function)))?;
        }

        for function in functions {
            emit!(ctx, {
                ();
                (function);
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sem::{Dtype, Order};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_types() {
        assert_eq!(emit_string(&CTy::char_ptr().ptr(), &C), "char **");
        assert_eq!(
            emit_string(&CTy::Slice.constant().ptr(), &C),
            "const memview_slice *"
        );
        assert_eq!(emit_string(&CTy::Elem(Dtype::U16), &C), "uint16_t");
    }

    #[test]
    fn test_expressions_are_parenthesized() {
        let expr = Expr::var("bufp")
            .add(Expr::var("idx").mul(Expr::var("stride")))
            .cast(CTy::char_ptr().ptr())
            .deref();
        assert_eq!(
            emit_string(&expr, &C),
            "(*((char **)(bufp + (idx * stride))))"
        );
    }

    #[test]
    fn test_contiguity_check() {
        let text = emit_string(&is_contiguous(Order::C), &C);
        assert_eq!(
            text,
            "static int memview_is_c_contiguous(const memview_slice *mvs, int ndim, ssize_t itemsize) {
    ssize_t size = 1;
    for (ssize_t i = (ndim - 1); (i > -1); i--) {
        if (mvs->suboffsets[i] >= 0) {
            return 0;
        }
        if ((size * itemsize) != mvs->strides[i]) {
            return 0;
        }
        size = (size * mvs->shape[i]);
    }
    return 1;
}
"
        );
    }
}
