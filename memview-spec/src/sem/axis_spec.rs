use std::fmt;

use serde::{Deserialize, Serialize};

/// How an index along an axis is turned into an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Access {
    /// Address is base plus index times stride.
    Direct,
    /// Address is read through a pointer, then offset by the suboffset.
    Ptr,
    /// Either of the above, decided at run time by the sign of the suboffset.
    Full,
}

/// How consecutive elements along an axis are laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Packing {
    /// Elements are adjacent: stride equals the item size.
    Contig,
    /// Arbitrary stride.
    Strided,
    /// Contiguous as a consequence of a neighbouring contiguous axis.
    Follow,
}

/// The layout of one axis of a memory view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisSpec {
    pub access: Access,
    pub packing: Packing,
}

impl AxisSpec {
    pub fn new(access: Access, packing: Packing) -> Self {
        Self { access, packing }
    }

    /// The one-letter abbreviations of access and packing, in this order.
    pub fn abbrev(&self) -> String {
        format!("{}{}", self.access.abbrev(), self.packing.abbrev())
    }

    pub fn flag(&self) -> AccessFlag {
        AccessFlag::of(self)
    }
}

impl Access {
    pub fn name(&self) -> &'static str {
        match self {
            Access::Direct => "direct",
            Access::Ptr => "ptr",
            Access::Full => "full",
        }
    }

    pub fn abbrev(&self) -> char {
        match self {
            Access::Direct => 'd',
            Access::Ptr => 'p',
            Access::Full => 'f',
        }
    }
}

impl Packing {
    pub fn name(&self) -> &'static str {
        match self {
            Packing::Contig => "contig",
            Packing::Strided => "strided",
            Packing::Follow => "follow",
        }
    }

    pub fn abbrev(&self) -> char {
        match self {
            Packing::Contig => 'c',
            Packing::Strided => 's',
            Packing::Follow => '_',
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Packing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.access, self.packing)
    }
}

/// Which addressing code is emitted for an axis.
///
/// `follow` is addressed like `strided`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessFlag {
    Generic,
    GenericContiguous,
    Indirect,
    IndirectContiguous,
    Strided,
    Contiguous,
}

impl AccessFlag {
    pub fn of(spec: &AxisSpec) -> Self {
        use Access::*;
        use Packing::*;

        match (spec.access, spec.packing) {
            (Full, Contig) => AccessFlag::GenericContiguous,
            (Full, _) => AccessFlag::Generic,
            (Ptr, Contig) => AccessFlag::IndirectContiguous,
            (Ptr, _) => AccessFlag::Indirect,
            (Direct, Contig) => AccessFlag::Contiguous,
            (Direct, _) => AccessFlag::Strided,
        }
    }
}

/// Named axis layouts which can be written in the step slot of an axis, e.g. `::view.indirect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewConstant {
    Generic,
    Strided,
    Indirect,
    GenericContiguous,
    Contiguous,
    IndirectContiguous,
}

impl ViewConstant {
    pub fn all() -> Vec<Self> {
        use ViewConstant::*;
        vec![
            Generic,
            Strided,
            Indirect,
            GenericContiguous,
            Contiguous,
            IndirectContiguous,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewConstant::Generic => "generic",
            ViewConstant::Strided => "strided",
            ViewConstant::Indirect => "indirect",
            ViewConstant::GenericContiguous => "generic_contiguous",
            ViewConstant::Contiguous => "contiguous",
            ViewConstant::IndirectContiguous => "indirect_contiguous",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.name() == name)
    }

    pub fn axis_spec(&self) -> AxisSpec {
        use Access::*;
        use Packing::*;

        match self {
            ViewConstant::Generic => AxisSpec::new(Full, Strided),
            ViewConstant::Strided => AxisSpec::new(Direct, Strided),
            ViewConstant::Indirect => AxisSpec::new(Ptr, Strided),
            ViewConstant::GenericContiguous => AxisSpec::new(Full, Contig),
            ViewConstant::Contiguous => AxisSpec::new(Direct, Contig),
            ViewConstant::IndirectContiguous => AxisSpec::new(Ptr, Contig),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags() {
        use Access::*;
        use Packing::*;

        let cases = [
            ((Full, Strided), AccessFlag::Generic),
            ((Full, Follow), AccessFlag::Generic),
            ((Full, Contig), AccessFlag::GenericContiguous),
            ((Ptr, Strided), AccessFlag::Indirect),
            ((Ptr, Follow), AccessFlag::Indirect),
            ((Ptr, Contig), AccessFlag::IndirectContiguous),
            ((Direct, Strided), AccessFlag::Strided),
            ((Direct, Follow), AccessFlag::Strided),
            ((Direct, Contig), AccessFlag::Contiguous),
        ];
        for ((access, packing), flag) in cases {
            assert_eq!(AxisSpec::new(access, packing).flag(), flag);
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(
            ViewConstant::from_name("indirect_contiguous").map(|c| c.axis_spec()),
            Some(AxisSpec::new(Access::Ptr, Packing::Contig))
        );
        assert_eq!(ViewConstant::from_name("direct"), None);
    }

    #[test]
    fn test_abbrev() {
        assert_eq!(AxisSpec::new(Access::Direct, Packing::Follow).abbrev(), "d_");
        assert_eq!(AxisSpec::new(Access::Full, Packing::Contig).abbrev(), "fc");
    }
}
