pub mod ir {
    use crate::ir::*;
    use crate::sem;

    /// IR of the element type of a view
    #[derive(Debug)]
    pub struct ElemTy {
        pub name: Ir<Name>,
        pub dtype: sem::Dtype,
    }
}

mod compile {
    use std::str::FromStr;

    use itertools::Itertools;

    use crate::ast;
    use crate::compile::*;
    use crate::ir::*;
    use crate::sem;

    impl CompileFrom<ast::Name> for ElemTy {
        fn compile(ast: &ast::Name, env: &Env, dgns: &mut DiagnosticContext) -> Result<Self> {
            let name: Ir<Name> = ast.compile(env, dgns)?;

            match sem::Dtype::from_str(&name.ident.to_string()) {
                Ok(dtype) => Ok(Self { name, dtype }),
                Err(()) => {
                    dgns.error_with_help(
                        &format!("invalid element type `{}`", name.ident),
                        name.span(),
                        &format!(
                            "supported types are {}",
                            sem::Dtype::all().iter().map(|ty| ty.to_string()).join(", ")
                        ),
                    );
                    Err(CompileStop)
                }
            }
        }
    }
}

mod dgns {
    use crate::dgns::*;
    use crate::ir::*;

    impl HasSpan for ElemTy {
        fn span(&self) -> Span {
            self.name.span()
        }
    }
}
