use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Access, AxisSpec, Packing};

/// Memory order of a contiguous view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Order {
    /// Last axis varies fastest.
    C,
    /// First axis varies fastest.
    Fortran,
}

impl Order {
    pub fn name(&self) -> &'static str {
        match self {
            Order::C => "c",
            Order::Fortran => "fortran",
        }
    }

    /// The order character passed to the allocator.
    pub fn as_char(&self) -> char {
        match self {
            Order::C => 'C',
            Order::Fortran => 'F',
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse classification of a view layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    C,
    Fortran,
    Full,
    Strided,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::C => "c",
            Mode::Fortran => "fortran",
            Mode::Full => "full",
            Mode::Strided => "strided",
        }
    }

    pub fn order(&self) -> Option<Order> {
        match self {
            Mode::C => Some(Order::C),
            Mode::Fortran => Some(Order::Fortran),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_direct_with(spec: &AxisSpec, packing: Packing) -> bool {
    spec.access == Access::Direct && spec.packing == packing
}

/// Computes whether a sequence of axis specs describes a C-contiguous and/or a
/// Fortran-contiguous layout, in this order.
///
/// A single `(direct, contig)` axis is classified as C. Otherwise C requires a contiguous last
/// axis with every other axis `(direct, follow)`, and Fortran the mirror image. The two results
/// are never both true.
pub fn is_cf_contig(specs: &[AxisSpec]) -> (bool, bool) {
    match specs {
        [] => (false, false),
        [only] => (is_direct_with(only, Packing::Contig), false),
        [first, .., last] => {
            let inner = &specs[1..specs.len() - 1];
            let inner_follow = inner.iter().all(|s| is_direct_with(s, Packing::Follow));

            let is_c = inner_follow
                && is_direct_with(first, Packing::Follow)
                && is_direct_with(last, Packing::Contig);
            let is_f = inner_follow
                && is_direct_with(first, Packing::Contig)
                && is_direct_with(last, Packing::Follow);

            (is_c, is_f)
        }
    }
}

/// Classifies a layout: `c` or `fortran` when contiguous, `full` when some axis is not direct,
/// `strided` otherwise.
pub fn mode(specs: &[AxisSpec]) -> Mode {
    match is_cf_contig(specs) {
        (true, _) => Mode::C,
        (_, true) => Mode::Fortran,
        _ if specs.iter().any(|s| s.access != Access::Direct) => Mode::Full,
        _ => Mode::Strided,
    }
}
