use std::rc::Rc;

use crate::ir::*;
use crate::sem::ViewScope;

use super::{CompileOptions, CompileStop, DiagnosticContext, HasSpan, Result};

#[derive(Clone)]
pub struct Env {
    views: Vec<Ir<ViewDecl>>,

    pub scope: Rc<dyn ViewScope>,
    pub options: Ir<CompileOptions>,
}

impl Env {
    pub fn root(options: CompileOptions, scope: Rc<dyn ViewScope>) -> Self {
        Self {
            views: Vec::new(),
            scope,
            options: Ir::new(options),
        }
    }

    pub fn declare(&mut self, decl: &Ir<ViewDecl>, dgns: &mut DiagnosticContext) -> Result<()> {
        match self.maybe_resolve(&decl.name) {
            None => {
                self.views.push(decl.clone());
                Ok(())
            }
            Some(other) => {
                let line = other.name.span().start().line;
                dgns.error_with_note(
                    &format!("view `{}` already defined", decl.name.ident),
                    decl.name.span(),
                    &format!("the first definition is at line {}", line),
                );
                Err(CompileStop)
            }
        }
    }

    pub fn resolve(&self, name: &Ir<Name>, dgns: &mut DiagnosticContext) -> Result<Ir<ViewDecl>> {
        match self.maybe_resolve(name) {
            Some(decl) => Ok(decl),
            None => {
                dgns.error(
                    &format!("no view named `{}` found in the current scope", name.ident),
                    name.span(),
                );
                Err(CompileStop)
            }
        }
    }

    fn maybe_resolve(&self, name: &Ir<Name>) -> Option<Ir<ViewDecl>> {
        self.views
            .iter()
            .find(|decl| decl.name.ident == name.ident)
            .cloned()
    }

    pub fn views(&self) -> &[Ir<ViewDecl>] {
        &self.views
    }
}
