pub mod ast {
    use syn::punctuated::Punctuated;

    use crate::ast::*;

    /// AST of a view declaration, e.g. `f64[:, ::1] a;`
    #[derive(Debug, Clone)]
    pub struct Decl {
        pub ty: Name,
        pub bracket: syn::token::Bracket,
        pub axes: Punctuated<Axis, syn::Token![,]>,
        pub name: Name,
        pub semi: syn::Token![;],
    }
}

mod parse {
    use crate::ast::*;

    use syn::parse::*;

    impl Parse for Decl {
        fn parse(input: ParseStream) -> Result<Self> {
            let content;
            Ok(Self {
                ty: input.parse()?,
                bracket: syn::bracketed!(content in input),
                axes: content.parse_terminated(Axis::parse, syn::Token![,])?,
                name: input.parse()?,
                semi: input.parse()?,
            })
        }
    }
}

pub mod ir {
    use crate::ir::*;
    use crate::sem;

    /// IR of a view declaration
    #[derive(Debug)]
    pub struct ViewDecl {
        pub name: Ir<Name>,
        pub elem_ty: Ir<ElemTy>,
        pub ty: sem::ViewType,
    }
}

mod compile {
    use itertools::Itertools;

    use crate::ast;
    use crate::compile::*;
    use crate::ir::*;
    use crate::sem;

    impl CompileFrom<ast::Decl> for ViewDecl {
        fn compile(ast: &ast::Decl, env: &Env, dgns: &mut DiagnosticContext) -> Result<Self> {
            let elem_ty: Ir<ElemTy> = ast.ty.compile(env, dgns)?;
            let name: Ir<Name> = ast.name.compile(env, dgns)?;

            let slots: Vec<_> = ast.axes.iter().map(|axis| axis.slots()).collect();
            let ty = sem::resolve_view_type(
                elem_ty.dtype,
                &ast.bracket.span.join(),
                &slots,
                env.scope.as_ref(),
                env.options.max_dims,
            );

            match ty {
                Ok(ty) => {
                    debug!("view `{}` has type {} ({})", name.ident, ty, ty.mode());
                    Ok(Self { name, elem_ty, ty })
                }
                Err(sem::Spanned { span, error }) => {
                    match help(&error) {
                        Some(help) => dgns.error_with_help(&error.to_string(), span, &help),
                        None => dgns.error(&error.to_string(), span),
                    }
                    Err(CompileStop)
                }
            }
        }
    }

    fn help(error: &sem::SpecError) -> Option<String> {
        match error {
            sem::SpecError::Invalid => Some(format!(
                "valid axis specifications are {}",
                sem::ViewConstant::all().iter().map(|c| c.name()).join(", ")
            )),
            sem::SpecError::Step => Some("use `::1` to declare a contiguous axis".into()),
            sem::SpecError::SymbolicInContiguous => {
                Some("axes of a contiguous view are `:` or `::1`".into())
            }
            _ => None,
        }
    }
}

mod dgns {
    use crate::dgns::*;
    use crate::ir::*;

    impl HasSpan for ViewDecl {
        fn span(&self) -> Span {
            self.name.span()
        }
    }
}
