use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::*;

/// The buffer features requested from the exporter when a view is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferRequest {
    CContiguous,
    FContiguous,
    /// Indirect (suboffsets) allowed.
    Full,
    /// Strides required, no indirection.
    Strided,
}

/// A validated memory-view type: element type and one [`AxisSpec`] per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewType {
    dtype: Dtype,
    axes: Vec<AxisSpec>,
    is_c_contig: bool,
    is_f_contig: bool,
}

impl ViewType {
    /// Validates `axes` and builds the type. On failure, returns the index of the offending axis.
    pub fn new(dtype: Dtype, axes: Vec<AxisSpec>) -> Result<Self, (usize, SpecError)> {
        if axes.is_empty() {
            return Err((0, SpecError::NoAxes));
        }
        validate_axes_specs(&axes)?;

        let (is_c_contig, is_f_contig) = is_cf_contig(&axes);
        Ok(Self {
            dtype,
            axes,
            is_c_contig,
            is_f_contig,
        })
    }

    /// A contiguous view of the given order and rank.
    pub fn contiguous(dtype: Dtype, ndim: usize, order: Order) -> Self {
        let follow = AxisSpec::new(Access::Direct, Packing::Follow);
        let contig = AxisSpec::new(Access::Direct, Packing::Contig);

        let mut axes = vec![follow; ndim.max(1)];
        match order {
            Order::C => axes[ndim.max(1) - 1] = contig,
            Order::Fortran => axes[0] = contig,
        }
        let (is_c_contig, is_f_contig) = is_cf_contig(&axes);

        Self {
            dtype,
            axes,
            is_c_contig,
            is_f_contig,
        }
    }

    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    pub fn axes(&self) -> &[AxisSpec] {
        &self.axes
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    pub fn is_c_contig(&self) -> bool {
        self.is_c_contig
    }

    pub fn is_f_contig(&self) -> bool {
        self.is_f_contig
    }

    pub fn mode(&self) -> Mode {
        mode(&self.axes)
    }

    pub fn order(&self) -> Option<Order> {
        self.mode().order()
    }

    pub fn flags(&self) -> Vec<AccessFlag> {
        self.axes.iter().map(AccessFlag::of).collect()
    }

    pub fn buffer_request(&self) -> BufferRequest {
        if self.is_c_contig {
            BufferRequest::CContiguous
        } else if self.is_f_contig {
            BufferRequest::FContiguous
        } else if self.axes.iter().any(|a| a.access != Access::Direct) {
            BufferRequest::Full
        } else {
            BufferRequest::Strided
        }
    }

    /// A name fragment identifying the type, e.g. `f64_d__dc` for `f64[:, ::1]`.
    pub fn specialization_suffix(&self) -> String {
        format!(
            "{}_{}",
            self.dtype,
            self.axes.iter().map(|a| a.abbrev()).join("_")
        )
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.dtype,
            self.axes.iter().map(|a| a.abbrev()).join(", ")
        )
    }
}
