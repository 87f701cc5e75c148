//! Resolution of the `start:stop:step` slots of each axis into an [`AxisSpec`].

use super::*;

/// The content of one slot of an axis, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<S> {
    Absent,
    Int { value: i64, span: S },
    Name { name: String, span: S },
    Path { path: Vec<String>, span: S },
    /// Anything else, including an attribute access on something which is not a name.
    Expr { span: S },
}

impl<S: Clone> Slot<S> {
    fn span_or(&self, fallback: &S) -> S {
        match self {
            Slot::Absent => fallback.clone(),
            Slot::Int { span, .. }
            | Slot::Name { span, .. }
            | Slot::Path { span, .. }
            | Slot::Expr { span } => span.clone(),
        }
    }
}

/// The three slots of an axis, plus the position of the whole axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSlots<S> {
    pub span: S,
    pub start: Slot<S>,
    pub stop: Slot<S>,
    pub step: Slot<S>,
}

/// Resolves the axis specs, without checking the rules spanning the whole sequence.
///
/// `whole` is the position of the whole axis list, used when there is no axis at all.
pub fn resolve_axes<S: Clone>(
    whole: &S,
    axes: &[AxisSlots<S>],
    scope: &dyn ViewScope,
    max_dims: usize,
) -> Result<Vec<AxisSpec>, Spanned<S>> {
    let (first, last) = match (axes.first(), axes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Spanned::new(whole.clone(), SpecError::NoAxes)),
    };
    if axes.len() > max_dims {
        return Err(Spanned::new(
            axes[max_dims].span.clone(),
            SpecError::TooManyDims {
                ndim: axes.len(),
                max: max_dims,
            },
        ));
    }

    let contiguous = is_declared_contiguous(first, last, axes.len())?;
    debug!("declared contiguous: {}", contiguous);

    axes.iter()
        .enumerate()
        .map(|(index, axis)| resolve_axis(index, axes.len(), axis, contiguous, scope))
        .collect()
}

/// Looks for a literal step on the first and last axis.
fn is_declared_contiguous<S: Clone>(
    first: &AxisSlots<S>,
    last: &AxisSlots<S>,
    ndim: usize,
) -> Result<bool, Spanned<S>> {
    let mut is_f = false;
    let mut is_c = false;

    if let Slot::Int { value, span } = &first.step {
        if *value != 1 {
            return Err(Spanned::new(span.clone(), SpecError::Step));
        }
        is_f = true;
    }

    if ndim > 1 {
        if let Slot::Int { value, span } = &last.step {
            if *value != 1 {
                return Err(Spanned::new(span.clone(), SpecError::Step));
            }
            if is_f {
                return Err(Spanned::new(span.clone(), SpecError::BothCAndFortran));
            }
            is_c = true;
        }
    }

    Ok(is_c || is_f)
}

fn resolve_axis<S: Clone>(
    index: usize,
    ndim: usize,
    axis: &AxisSlots<S>,
    contiguous: bool,
    scope: &dyn ViewScope,
) -> Result<AxisSpec, Spanned<S>> {
    let err = |slot: &Slot<S>, error| Err(Spanned::new(slot.span_or(&axis.span), error));

    match &axis.start {
        Slot::Absent | Slot::Int { value: 0, .. } => (),
        other => return err(other, SpecError::Start),
    }

    if !matches!(axis.stop, Slot::Absent) {
        return err(&axis.stop, SpecError::Stop);
    }

    match &axis.step {
        Slot::Absent if contiguous => Ok(AxisSpec::new(Access::Direct, Packing::Follow)),
        Slot::Absent => Ok(AxisSpec::new(Access::Direct, Packing::Strided)),
        Slot::Int { .. } if index != 0 && index != ndim - 1 => {
            err(&axis.step, SpecError::OneNotFirstOrLast)
        }
        Slot::Int { .. } => Ok(AxisSpec::new(Access::Direct, Packing::Contig)),
        Slot::Name { .. } | Slot::Path { .. } if contiguous => {
            err(&axis.step, SpecError::SymbolicInContiguous)
        }
        Slot::Name { name, .. } => match scope.resolve(name) {
            Some(constant) => Ok(constant.axis_spec()),
            None => err(&axis.step, SpecError::Invalid),
        },
        Slot::Path { path, .. } => {
            for end in 1..path.len() {
                if !scope.is_module(&path[..end]) {
                    return err(
                        &axis.step,
                        SpecError::UndeclaredModule(path[end - 1].clone()),
                    );
                }
            }
            match scope.resolve_path(path) {
                Some(constant) => Ok(constant.axis_spec()),
                None => err(&axis.step, SpecError::Invalid),
            }
        }
        Slot::Expr { .. } => err(&axis.step, SpecError::Expression),
    }
}

/// Resolves and validates the axes of a view declaration.
///
/// Validation failures are reported at the position of the offending axis.
pub fn resolve_view_type<S: Clone>(
    dtype: Dtype,
    whole: &S,
    axes: &[AxisSlots<S>],
    scope: &dyn ViewScope,
    max_dims: usize,
) -> Result<ViewType, Spanned<S>> {
    let specs = resolve_axes(whole, axes, scope, max_dims)?;
    ViewType::new(dtype, specs).map_err(|(index, error)| {
        let span = axes.get(index).map_or(whole, |axis| &axis.span);
        Spanned::new(span.clone(), error)
    })
}
