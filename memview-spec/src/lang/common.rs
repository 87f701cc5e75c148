use crate::code::*;
use crate::gen::*;

/// Expressions are fully parenthesized, so precedence never depends on the target.
impl<L> Emit<CommonMixin<'_, L>> for Expr
where
    Expr: Emit<L>,
    CTy: Emit<L>,
{
    fn emit(&self, ctx: EmitContext<CommonMixin<'_, L>>) -> Result {
        let ctx = &mut ctx.with_lang(ctx.lang.0);
        match self {
            Expr::Var(name) => emit!(ctx, "{}" % (&Raw(name))),
            Expr::Int(value) => emit!(ctx, "{}" % (&Raw(value))),
            Expr::Char(c) => emit!(ctx, "'{}'" % (&Raw(c))),
            Expr::Null => emit!(ctx, "NULL"),
            Expr::Arrow(base, field) => emit!(ctx, "{}->{}" % (base, &Raw(field))),
            Expr::Index(base, index) => emit!(ctx, "{}[{}]" % (base, index)),
            Expr::Binary(op, lhs, rhs) => {
                emit!(ctx, "({} {} {})" % (lhs, &Raw(op.symbol()), rhs))
            }
            Expr::Cast(ty, inner) => emit!(ctx, "(({}){})" % (ty, inner)),
            Expr::Deref(inner) => emit!(ctx, "(*{})" % inner),
            Expr::AddrOf(inner) => emit!(ctx, "(&{})" % inner),
            Expr::Not(inner) => emit!(ctx, "(!{})" % inner),
            Expr::SizeOf(ty) => emit!(ctx, "sizeof({})" % ty),
            Expr::Call(name, args) => {
                emit!(ctx, "{}({})" % (&Raw(name), &Punctuated(args.to_vec(), ", ")))
            }
        }
    }
}
