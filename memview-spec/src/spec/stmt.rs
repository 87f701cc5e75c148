pub mod kw {
    syn::custom_keyword!(copy);
    syn::custom_keyword!(to);
    syn::custom_keyword!(new);
}

pub mod ast {
    use crate::ast::*;

    /// AST of a statement
    #[derive(Debug, Clone)]
    pub enum Stmt {
        Decl(Decl),
        Copy(CopyStmt),
        Assign(AssignStmt),
    }

    /// `copy b to a;` copies the elements of `b` into `a`, while `copy b to new a;` binds `a`
    /// to a newly allocated copy of `b`.
    #[derive(Debug, Clone)]
    pub struct CopyStmt {
        pub kw: kw::copy,
        pub src: Name,
        pub to_kw: kw::to,
        pub new_kw: Option<kw::new>,
        pub dst: Name,
        pub semi: syn::Token![;],
    }

    /// `a = b;` makes `a` share the buffer of `b`.
    #[derive(Debug, Clone)]
    pub struct AssignStmt {
        pub dst: Name,
        pub eq: syn::Token![=],
        pub src: Name,
        pub semi: syn::Token![;],
    }
}

mod parse {
    use crate::ast::*;

    use syn::parse::*;
    use syn::Token;

    impl Parse for Stmt {
        fn parse(input: ParseStream) -> Result<Self> {
            Ok(if input.peek(kw::copy) {
                Stmt::Copy(input.parse()?)
            } else if input.peek2(Token![=]) {
                Stmt::Assign(input.parse()?)
            } else {
                Stmt::Decl(input.parse()?)
            })
        }
    }

    impl Parse for CopyStmt {
        fn parse(input: ParseStream) -> Result<Self> {
            Ok(Self {
                kw: input.parse()?,
                src: input.parse()?,
                to_kw: input.parse()?,
                new_kw: if input.peek(kw::new) {
                    Some(input.parse()?)
                } else {
                    None
                },
                dst: input.parse()?,
                semi: input.parse()?,
            })
        }
    }

    impl Parse for AssignStmt {
        fn parse(input: ParseStream) -> Result<Self> {
            Ok(Self {
                dst: input.parse()?,
                eq: input.parse()?,
                src: input.parse()?,
                semi: input.parse()?,
            })
        }
    }
}

pub mod ir {
    use crate::code::CopyKey;
    use crate::ir::*;

    /// IR of a statement
    #[derive(Debug)]
    pub enum Stmt {
        Decl(Ir<ViewDecl>),
        Copy(Ir<CopyStmt>),
        Assign(Ir<AssignStmt>),
    }

    #[derive(Debug)]
    pub struct CopyStmt {
        pub src: Ir<ViewDecl>,
        pub dst: Ir<ViewDecl>,
        /// Whether `dst` is bound to a new buffer rather than overwritten.
        pub to_new: bool,
        pub key: CopyKey,
    }

    #[derive(Debug)]
    pub struct AssignStmt {
        pub dst: Ir<ViewDecl>,
        pub src: Ir<ViewDecl>,
    }
}

mod compile {
    use crate::ast;
    use crate::code::CopyKey;
    use crate::compile::*;
    use crate::ir::*;

    impl ast::Stmt {
        /// Compiles the statement, declaring in `env` the view it defines, if any.
        pub fn compile_in(&self, env: &mut Env, dgns: &mut DiagnosticContext) -> Result<Stmt> {
            Ok(match self {
                ast::Stmt::Decl(decl) => {
                    let decl: Ir<ViewDecl> = decl.compile(env, dgns)?;
                    env.declare(&decl, dgns)?;
                    Stmt::Decl(decl)
                }
                ast::Stmt::Copy(copy) => Stmt::Copy(copy.compile(env, dgns)?),
                ast::Stmt::Assign(assign) => Stmt::Assign(assign.compile(env, dgns)?),
            })
        }
    }

    impl CompileFrom<ast::CopyStmt> for CopyStmt {
        fn compile(ast: &ast::CopyStmt, env: &Env, dgns: &mut DiagnosticContext) -> Result<Self> {
            let src: Ir<Name> = ast.src.compile(env, dgns)?;
            let dst: Ir<Name> = ast.dst.compile(env, dgns)?;
            let src = env.resolve(&src, dgns)?;
            let dst = env.resolve(&dst, dgns)?;
            let to_new = ast.new_kw.is_some();

            if !to_new && Ir::same(&src, &dst) {
                dgns.warning(
                    &format!("copying `{}` onto itself has no effect", src.name.ident),
                    dst.name.span(),
                );
            }

            let key = if to_new {
                CopyKey::for_new(&src.ty, &dst.ty)
            } else {
                CopyKey::new(&src.ty, &dst.ty)
            };

            match key {
                Ok(key) => Ok(Self {
                    src,
                    dst,
                    to_new,
                    key,
                }),
                Err(e) => {
                    dgns.error_with_note(
                        &format!("cannot copy `{}` to `{}`", src.name.ident, dst.name.ident),
                        dst.name.span(),
                        &e.to_string(),
                    );
                    Err(CompileStop)
                }
            }
        }
    }

    impl CompileFrom<ast::AssignStmt> for AssignStmt {
        fn compile(ast: &ast::AssignStmt, env: &Env, dgns: &mut DiagnosticContext) -> Result<Self> {
            let dst: Ir<Name> = ast.dst.compile(env, dgns)?;
            let src: Ir<Name> = ast.src.compile(env, dgns)?;
            let dst = env.resolve(&dst, dgns)?;
            let src = env.resolve(&src, dgns)?;

            if !src.ty.conforms_to(&dst.ty) {
                dgns.error_with_note(
                    &format!("cannot assign `{}` to `{}`", src.name.ident, dst.name.ident),
                    src.name.span(),
                    &format!("a view of type {} is not a view of type {}", src.ty, dst.ty),
                );
                return Err(CompileStop);
            }

            Ok(Self { dst, src })
        }
    }
}
