use super::*;

/// Checks the structural rules spanning the whole axis sequence.
///
/// On failure, returns the index of the offending axis. Axes are visited in order, so a
/// `strided` axis rejects any `follow` axis after it, but not before it.
pub fn validate_axes_specs(specs: &[AxisSpec]) -> Result<(), (usize, SpecError)> {
    let (is_c_contig, is_f_contig) = is_cf_contig(specs);

    let mut has_contig = false;
    let mut has_strided = false;
    let mut has_generic_contig = false;

    for (index, spec) in specs.iter().enumerate() {
        match spec.packing {
            Packing::Strided => has_strided = true,
            Packing::Contig => {
                if has_contig {
                    let error = if spec.access == Access::Ptr {
                        SpecError::IndirectAfterContig
                    } else if has_generic_contig || spec.access == Access::Full {
                        SpecError::GenericWithContig
                    } else {
                        SpecError::MultipleContig
                    };
                    return Err((index, error));
                }
                // `full` does not count as an additional, possibly contiguous, axis
                has_contig = spec.access != Access::Ptr;
                has_generic_contig |= spec.access == Access::Full;
            }
            Packing::Follow => {
                if has_strided {
                    return Err((index, SpecError::FollowWithStrided));
                }
                if !(is_c_contig || is_f_contig) {
                    return Err((index, SpecError::InvalidFollow));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use Access::*;
    use Packing::*;

    fn validate(items: &[(Access, Packing)]) -> Result<(), (usize, SpecError)> {
        let specs: Vec<_> = items.iter().map(|&(a, p)| AxisSpec::new(a, p)).collect();
        validate_axes_specs(&specs)
    }

    #[test]
    fn test_accepts_common_layouts() {
        assert_eq!(validate(&[(Direct, Strided), (Direct, Strided)]), Ok(()));
        assert_eq!(validate(&[(Direct, Follow), (Direct, Contig)]), Ok(()));
        assert_eq!(validate(&[(Ptr, Contig), (Direct, Contig)]), Ok(()));
        assert_eq!(validate(&[(Full, Strided), (Direct, Contig)]), Ok(()));
    }

    #[test]
    fn test_two_direct_contig() {
        assert_eq!(
            validate(&[(Direct, Contig), (Direct, Contig)]),
            Err((1, SpecError::MultipleContig))
        );
    }

    #[test]
    fn test_indirect_after_direct_contig() {
        assert_eq!(
            validate(&[(Direct, Contig), (Ptr, Contig)]),
            Err((1, SpecError::IndirectAfterContig))
        );
    }

    #[test]
    fn test_generic_with_direct_contig() {
        assert_eq!(
            validate(&[(Full, Contig), (Direct, Contig)]),
            Err((1, SpecError::GenericWithContig))
        );
        assert_eq!(
            validate(&[(Direct, Contig), (Full, Contig)]),
            Err((1, SpecError::GenericWithContig))
        );
    }

    #[test]
    fn test_follow_after_strided() {
        assert_eq!(
            validate(&[(Direct, Strided), (Direct, Follow)]),
            Err((1, SpecError::FollowWithStrided))
        );
    }

    #[test]
    fn test_follow_in_non_contiguous_type() {
        assert_eq!(
            validate(&[(Direct, Follow), (Direct, Strided)]),
            Err((0, SpecError::InvalidFollow))
        );
    }
}
