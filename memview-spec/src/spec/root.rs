pub mod ast {
    use crate::ast::*;

    /// AST of a whole declaration file
    #[derive(Debug, Clone)]
    pub struct Spec {
        pub stmts: Vec<Stmt>,
    }
}

mod parse {
    use crate::ast::*;

    use syn::parse::*;

    impl Parse for Spec {
        fn parse(input: ParseStream) -> Result<Self> {
            let mut stmts = vec![];
            while !input.is_empty() {
                stmts.push(input.parse()?);
            }
            Ok(Self { stmts })
        }
    }
}

pub mod ir {
    use crate::compile::CompileOptions;
    use crate::ir::*;

    /// IR of a whole declaration file
    #[derive(Debug)]
    pub struct Spec {
        pub stmts: Vec<Stmt>,
        pub options: Ir<CompileOptions>,
    }

    impl Spec {
        pub fn views(&self) -> impl Iterator<Item = &Ir<ViewDecl>> + '_ {
            self.stmts.iter().filter_map(|stmt| match stmt {
                Stmt::Decl(decl) => Some(decl),
                _ => None,
            })
        }
    }
}

mod compile {
    use crate::ast;
    use crate::compile::*;
    use crate::ir::*;

    impl CompileFrom<ast::Spec> for Spec {
        fn compile(ast: &ast::Spec, env: &Env, dgns: &mut DiagnosticContext) -> Result<Self> {
            let mut env = env.clone();
            let mut stmts = vec![];
            let mut failed = 0;

            // keep going after a failed statement, to report as many errors as possible
            for stmt in &ast.stmts {
                match stmt.compile_in(&mut env, dgns) {
                    Ok(stmt) => stmts.push(stmt),
                    Err(CompileStop) => failed += 1,
                }
            }

            if failed > 0 {
                info!("{} statements failed to compile", failed);
                return Err(CompileStop);
            }

            Ok(Self {
                stmts,
                options: env.options.clone(),
            })
        }
    }
}
