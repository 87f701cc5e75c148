pub mod ast {
    /// AST of the `start:stop:step` specification of one axis
    #[derive(Debug, Clone)]
    pub struct Axis {
        pub start: Option<syn::Expr>,
        pub colon: syn::Token![:],
        pub stop: Option<syn::Expr>,
        pub step_colon: Option<syn::Token![:]>,
        pub step: Option<syn::Expr>,
    }
}

mod parse {
    use crate::ast::*;

    use syn::parse::*;
    use syn::Token;

    fn at_slot_end(input: ParseStream) -> bool {
        input.is_empty() || input.peek(Token![:]) || input.peek(Token![,])
    }

    fn parse_slot(input: ParseStream) -> Result<Option<syn::Expr>> {
        Ok(if at_slot_end(input) {
            None
        } else {
            Some(input.parse()?)
        })
    }

    impl Parse for Axis {
        fn parse(input: ParseStream) -> Result<Self> {
            let start = parse_slot(input)?;
            let colon = input.parse()?;
            let stop = parse_slot(input)?;
            let (step_colon, step) = if input.peek(Token![:]) {
                (Some(input.parse()?), parse_slot(input)?)
            } else {
                (None, None)
            };

            Ok(Self {
                start,
                colon,
                stop,
                step_colon,
                step,
            })
        }
    }
}

mod compile {
    use syn::spanned::Spanned;

    use crate::ast::*;
    use crate::dgns::*;
    use crate::sem::{AxisSlots, Slot};

    impl Axis {
        /// Classifies the content of each slot.
        pub fn slots(&self) -> AxisSlots<Span> {
            AxisSlots {
                span: self.span(),
                start: slot(self.start.as_ref()),
                stop: slot(self.stop.as_ref()),
                step: slot(self.step.as_ref()),
            }
        }
    }

    fn slot(expr: Option<&syn::Expr>) -> Slot<Span> {
        let expr = match expr {
            Some(expr) => expr,
            None => return Slot::Absent,
        };
        let span = expr.span();

        match expr {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Int(lit),
                ..
            }) => match lit.base10_parse() {
                Ok(value) => Slot::Int { value, span },
                Err(_) => Slot::Expr { span },
            },
            syn::Expr::Path(_) | syn::Expr::Field(_) => match dotted_path(expr) {
                Some(mut path) if path.len() == 1 => Slot::Name {
                    name: path.remove(0),
                    span,
                },
                Some(path) => Slot::Path { path, span },
                None => Slot::Expr { span },
            },
            _ => Slot::Expr { span },
        }
    }

    /// The names in `a.b.c` (or `a::b::c`), if the expression has this shape.
    fn dotted_path(expr: &syn::Expr) -> Option<Vec<String>> {
        match expr {
            syn::Expr::Path(path) if path.qself.is_none() && path.path.leading_colon.is_none() => {
                path.path
                    .segments
                    .iter()
                    .map(|s| s.arguments.is_none().then(|| s.ident.to_string()))
                    .collect()
            }
            syn::Expr::Field(field) => {
                let mut path = dotted_path(&field.base)?;
                match &field.member {
                    syn::Member::Named(ident) => path.push(ident.to_string()),
                    syn::Member::Unnamed(_) => return None,
                }
                Some(path)
            }
            _ => None,
        }
    }
}

mod dgns {
    use syn::spanned::Spanned;

    use crate::ast::*;
    use crate::dgns::*;

    impl HasSpan for Axis {
        fn span(&self) -> Span {
            let first = match &self.start {
                Some(start) => start.span(),
                None => self.colon.spans[0],
            };
            let last = match (&self.step, &self.step_colon, &self.stop) {
                (Some(step), _, _) => step.span(),
                (None, Some(colon), _) => colon.spans[0],
                (None, None, Some(stop)) => stop.span(),
                (None, None, None) => self.colon.spans[0],
            };
            first.join(last).unwrap_or(first)
        }
    }
}
