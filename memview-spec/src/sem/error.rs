use thiserror::Error;

/// A user-facing error in a memory-view type declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("there must be nothing or the value 0 (zero) in the start slot.")]
    Start,
    #[error("there must be nothing in the stop slot.")]
    Stop,
    #[error("Only the value 1 (one) or valid axis specification allowed in the step slot.")]
    Step,
    #[error("The value 1 (one) may appear in the first or last axis specification only.")]
    OneNotFirstOrLast,
    #[error("Cannot specify an array that is both C and Fortran contiguous.")]
    BothCAndFortran,
    #[error("Invalid axis specification.")]
    Invalid,
    #[error("no expressions allowed in axis spec, only names and literals.")]
    Expression,
    #[error("Invalid axis specification for a C/Fortran contiguous array.")]
    SymbolicInContiguous,
    #[error("undeclared name not builtin: {0}")]
    UndeclaredModule(String),
    #[error("Indirect contiguous dimensions must precede direct contiguous")]
    IndirectAfterContig,
    #[error("Generic contiguous cannot be combined with direct contiguous")]
    GenericWithContig,
    #[error("Only one direct contiguous axis may be specified.")]
    MultipleContig,
    #[error("A memoryview cannot have both follow and strided axis specifiers.")]
    FollowWithStrided,
    #[error("Invalid use of the follow specifier.")]
    InvalidFollow,
    #[error("a memoryview needs at least one axis")]
    NoAxes,
    #[error("a memoryview may have at most {max} dimensions, this one has {ndim}")]
    TooManyDims { ndim: usize, max: usize },
}

/// A [`SpecError`] at a position of type `S`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<S> {
    pub span: S,
    pub error: SpecError,
}

impl<S> Spanned<S> {
    pub fn new(span: S, error: SpecError) -> Self {
        Self { span, error }
    }
}
