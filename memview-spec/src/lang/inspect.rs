use crate::code::*;
use crate::gen::*;

lang_mixin!(Inspect, Expr, CommonMixin);

impl Emit<Inspect> for CTy {
    fn emit(&self, ctx: EmitContext<Inspect>) -> Result {
        match self {
            CTy::Void => emit!(ctx, "()"),
            CTy::Int => emit!(ctx, "int"),
            CTy::SSize => emit!(ctx, "isize"),
            CTy::Char => emit!(ctx, "byte"),
            CTy::Elem(dtype) => emit!(ctx, "{}" % (&Raw(dtype))),
            CTy::Slice => emit!(ctx, "Slice"),
            CTy::Handle => emit!(ctx, "Handle"),
            CTy::Ptr(inner) => emit!(ctx, "*{}" % inner),
            CTy::Const(inner) => emit!(ctx, "const {}" % inner),
        }
    }
}

impl Emit<Inspect> for Param {
    fn emit(&self, ctx: EmitContext<Inspect>) -> Result {
        let Self { ty, name } = self;
        emit!(ctx, "{}: {}" % (&Raw(name), ty))
    }
}

impl Emit<Inspect> for Stmt {
    fn emit(&self, ctx: EmitContext<Inspect>) -> Result {
        match self {
            Stmt::Decl {
                ty,
                name,
                init: Some(init),
            } => emit!(ctx, {
                "let {}: {} = {};" % (&Raw(name), ty, init);
            }),
            Stmt::Decl { ty, name, .. } => emit!(ctx, {
                "let {}: {};" % (&Raw(name), ty);
            }),
            Stmt::Assign { lhs, rhs } => emit!(ctx, {
                "{} = {};" % (lhs, rhs);
            }),
            Stmt::Expr(expr) => emit!(ctx, {
                "{};" % expr;
            }),
            Stmt::If { cond, then } => emit!(ctx, {
                "if {} {{" % cond;
                ({ then });
                "}";
            }),
            Stmt::For(ForLoop {
                index,
                start,
                cond,
                step,
                advance,
                body,
            }) => emit!(ctx, {
                "for {} from {} while {} by {} {{" % (&Raw(index), start, cond, &Raw(step));
                ({
                    (&AdvanceNote(advance));
                    body;
                });
                "}";
            }),
            Stmt::Return(None) => emit!(ctx, {
                "return;";
            }),
            Stmt::Return(Some(value)) => emit!(ctx, {
                "return {};" % value;
            }),
            Stmt::Fail { message, args } => emit!(ctx, {
                "fail \"{}\" with ({});" % (&Raw(message), &Punctuated(args.to_vec(), ", "));
            }),
            Stmt::Comment(text) => emit!(ctx, {
                "// {}" % (&Raw(text));
            }),
        }
    }
}

/// Lists the pointers moved together with the index of a loop.
struct AdvanceNote<'a>(&'a [(String, Expr)]);

impl Emit<Inspect> for AdvanceNote<'_> {
    fn emit(&self, ctx: EmitContext<Inspect>) -> Result {
        for (pointer, stride) in self.0 {
            emit!(ctx, {
                "// each step: {} += {}" % (&Raw(pointer), stride);
            })?;
        }
        Ok(())
    }
}

impl Emit<Inspect> for Function {
    fn emit(&self, ctx: EmitContext<Inspect>) -> Result {
        let Function {
            proto:
                Prototype {
                    name,
                    ret,
                    params,
                    variadic,
                },
            body,
            inline,
        } = self;
        let ellipsis = if *variadic { ", ..." } else { "" };

        if *inline {
            emit!(ctx, "#[inline]";)?;
        }
        emit!(ctx, {
            "fn {}({}{}) -> {} {{"
                % (&Raw(name), &Punctuated(params.to_vec(), ", "), &Raw(ellipsis), ret);
            ({ body });
            "}";
        })
    }
}

impl Emit<Inspect> for Unit {
    fn emit(&self, ctx: EmitContext<Inspect>) -> Result {
        let Self {
            max_dims,
            externs,
            functions,
        } = self;

        emit!(ctx, {
            "// max dims: {}" % (&Raw(max_dims));
        })?;
        for Prototype {
            name,
            ret,
            params,
            variadic,
        } in externs
        {
            let ellipsis = if *variadic { ", ..." } else { "" };
            emit!(ctx, {
                "extern fn {}({}{}) -> {};"
                    % (&Raw(name), &Punctuated(params.to_vec(), ", "), &Raw(ellipsis), ret);
            })?;
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
