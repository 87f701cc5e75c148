//! Typed nodes of the generated support code.

use crate::sem::Dtype;

/// A C type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CTy {
    Void,
    Int,
    SSize,
    Char,
    Elem(Dtype),
    /// The slice struct: handle, data pointer and per-dimension arrays.
    Slice,
    /// The opaque buffer handle.
    Handle,
    Ptr(Box<CTy>),
    Const(Box<CTy>),
}

impl CTy {
    pub fn ptr(self) -> Self {
        CTy::Ptr(Box::new(self))
    }

    pub fn constant(self) -> Self {
        CTy::Const(Box::new(self))
    }

    pub fn char_ptr() -> Self {
        CTy::Char.ptr()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Eq,
    Ne,
    Lt,
    Gt,
    Ge,
    And,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Var(String),
    Int(i64),
    Char(char),
    Null,
    /// `e->field`
    Arrow(Box<Expr>, &'static str),
    Index(Box<Expr>, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Cast(CTy, Box<Expr>),
    Deref(Box<Expr>),
    AddrOf(Box<Expr>),
    Not(Box<Expr>),
    SizeOf(CTy),
    Call(String, Vec<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn int(value: impl TryInto<i64>) -> Self {
        Expr::Int(value.try_into().unwrap_or(i64::MAX))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(name.into(), args)
    }

    pub fn arrow(self, field: &'static str) -> Self {
        Expr::Arrow(Box::new(self), field)
    }

    pub fn index(self, index: Expr) -> Self {
        Expr::Index(Box::new(self), Box::new(index))
    }

    pub fn binary(self, op: BinOp, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(self), Box::new(rhs))
    }

    pub fn add(self, rhs: Expr) -> Self {
        self.binary(BinOp::Add, rhs)
    }

    pub fn mul(self, rhs: Expr) -> Self {
        self.binary(BinOp::Mul, rhs)
    }

    pub fn cast(self, ty: CTy) -> Self {
        Expr::Cast(ty, Box::new(self))
    }

    pub fn deref(self) -> Self {
        Expr::Deref(Box::new(self))
    }

    pub fn addr_of(self) -> Self {
        Expr::AddrOf(Box::new(self))
    }

    /// Whether the rendering of the expression is already wrapped in parentheses.
    pub fn is_parenthesized(&self) -> bool {
        matches!(
            self,
            Expr::Binary(..)
                | Expr::Cast(..)
                | Expr::Deref(..)
                | Expr::AddrOf(..)
                | Expr::Not(..)
        )
    }
}

/// A `for` loop over `index` from `start` while `cond` holds, stepping by `step` (`1` or `-1`).
///
/// Each `(pointer, stride)` pair in `advance` is incremented together with the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForLoop {
    pub index: String,
    pub start: Expr,
    pub cond: Expr,
    pub step: i64,
    pub advance: Vec<(String, Expr)>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Decl {
        ty: CTy,
        name: String,
        init: Option<Expr>,
    },
    Assign {
        lhs: Expr,
        rhs: Expr,
    },
    Expr(Expr),
    If {
        cond: Expr,
        then: Vec<Stmt>,
    },
    For(ForLoop),
    Return(Option<Expr>),
    /// Reports an error through the host, formatting `args` into `message`.
    Fail {
        message: String,
        args: Vec<Expr>,
    },
    Comment(String),
}

impl Stmt {
    pub fn decl(ty: CTy, name: impl Into<String>, init: Expr) -> Self {
        Stmt::Decl {
            ty,
            name: name.into(),
            init: Some(init),
        }
    }

    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Stmt::Assign { lhs, rhs }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(text.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub ty: CTy,
    pub name: String,
}

impl Param {
    pub fn new(ty: CTy, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

/// The signature of a function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prototype {
    pub name: String,
    pub ret: CTy,
    pub params: Vec<Param>,
    pub variadic: bool,
}

impl Prototype {
    pub fn new(name: impl Into<String>, ret: CTy, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            ret,
            params,
            variadic: false,
        }
    }
}

/// A function defined in the generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub proto: Prototype,
    pub body: Vec<Stmt>,
    pub inline: bool,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.proto.name
    }
}

/// A complete generated unit: the host hooks it relies on and the functions it defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub max_dims: usize,
    pub externs: Vec<Prototype>,
    pub functions: Vec<Function>,
}
