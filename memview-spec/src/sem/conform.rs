use super::*;

/// Whether a view of type `src` can be used where a view of type `dst` is expected.
///
/// `full` access and `strided` packing in `dst` accept anything.
pub fn conforms(src: &ViewType, dst: &ViewType) -> bool {
    if src.dtype() != dst.dtype() || src.ndim() != dst.ndim() {
        return false;
    }

    src.axes().iter().zip(dst.axes()).all(|(s, d)| {
        (d.access == Access::Full || s.access == d.access)
            && (d.packing == Packing::Strided || s.packing == d.packing)
    })
}

impl ViewType {
    pub fn conforms_to(&self, dst: &ViewType) -> bool {
        conforms(self, dst)
    }
}
