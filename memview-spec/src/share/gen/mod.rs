//! Machinery to render code trees as text in a target language.

use std::fmt::Display;
use std::fmt::Write;

mod emit_macro;
pub(crate) use emit_macro::*;

/// Renders code trees in a readable form, for debugging.
pub struct Inspect;

/// Renders constructs which are spelled the same way in every target.
pub struct CommonMixin<'a, L>(pub &'a L);

macro_rules! lang_mixin {
    ($lang_ty:ty, $target:ty, $mixin_ty:expr) => {
        impl Emit<$lang_ty> for $target {
            fn emit(&self, ctx: EmitContext<$lang_ty>) -> Result {
                let mixin = $mixin_ty(ctx.lang);
                let ctx = &mut ctx.with_lang(&mixin);
                self.emit(ctx)
            }
        }
    };
}

pub(crate) use lang_mixin;

pub use std::fmt::Result;

pub type EmitContext<'a, 'b, L> = &'a mut Emitter<'b, L>;

pub struct Emitter<'a, L> {
    pub lang: &'a L,
    pub fmt: &'a mut dyn Write,
    pub needs_indent: &'a mut bool,
    pub indent: u8,
}

pub trait Emit<L> {
    fn emit(&self, ctx: EmitContext<L>) -> Result;
}

pub struct EmitToken<'a, L, T> {
    pub lang: &'a L,
    pub inner: &'a T,
    pub indent: u8,
}

impl<L, T: Emit<L>> Display for EmitToken<'_, L, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        let Self {
            indent,
            lang,
            inner,
        } = self;
        inner.emit(&mut Emitter {
            lang,
            fmt: f,
            needs_indent: &mut false,
            indent: *indent,
        })
    }
}

const INDENT_ONE: &str = "    ";

impl<L> Emitter<'_, L> {
    pub fn append<T: Display>(&mut self, token: T) -> Result {
        if *self.needs_indent {
            for _ in 0..self.indent {
                write!(self.fmt, "{}", INDENT_ONE)?;
            }
            *self.needs_indent = false;
        }
        write!(self.fmt, "{}", token)
    }

    pub fn emit<T: Emit<L>>(&mut self, token: &T) -> Result {
        token.emit(self)
    }

    pub fn endl(&mut self) -> Result {
        writeln!(self.fmt)?;
        *self.needs_indent = true;
        Ok(())
    }

    pub fn block_begin(&mut self) -> Result {
        self.indent += 1;
        Ok(())
    }

    pub fn block_end(&mut self) -> Result {
        self.indent -= 1;
        Ok(())
    }

    pub fn with_lang<'b, M>(&'b mut self, lang: &'b M) -> Emitter<'b, M> {
        Emitter {
            lang,
            fmt: self.fmt,
            needs_indent: self.needs_indent,
            indent: self.indent,
        }
    }
}

pub fn emit_string<L, T: Emit<L>>(item: &T, lang: &L) -> String {
    let mut str = String::new();

    let mut ctx = Emitter {
        lang,
        fmt: &mut str,
        indent: 0,
        needs_indent: &mut true,
    };

    item.emit(&mut ctx)
        .expect("emitting into a String does not fail");

    str
}

impl<L, T> Emit<L> for crate::ir::Ir<T>
where
    T: Emit<L>,
{
    fn emit(&self, ctx: EmitContext<L>) -> Result {
        self.as_ref().emit(ctx)
    }
}

impl<L, T> Emit<L> for Box<T>
where
    T: Emit<L>,
{
    fn emit(&self, ctx: EmitContext<L>) -> Result {
        self.as_ref().emit(ctx)
    }
}

impl<L, T> Emit<L> for Vec<T>
where
    T: Emit<L>,
{
    fn emit(&self, ctx: EmitContext<L>) -> Result {
        for item in self {
            emit!(ctx, item)?;
        }
        emit!(ctx)
    }
}

pub struct Punctuated<T, P>(pub Vec<T>, pub P);

impl<L, T, P> Emit<L> for Punctuated<T, P>
where
    T: Emit<L>,
    P: Display,
{
    fn emit(&self, ctx: EmitContext<L>) -> Result {
        let Self(items, punct) = self;

        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                ctx.append(punct)?;
            }
            emit!(ctx, item)?;
        }

        emit!(ctx)
    }
}

/// Newtype for items that are emitted verbatim
pub struct Raw<T>(pub T);

impl<L, T> Emit<L> for Raw<T>
where
    T: Display,
{
    fn emit(&self, ctx: EmitContext<L>) -> Result {
        ctx.append(&self.0)
    }
}
