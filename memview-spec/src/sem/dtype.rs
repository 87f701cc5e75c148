use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Element type of a memory view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dtype {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Isize,
    Usize,
}

use Dtype::*;

impl Dtype {
    pub fn all() -> Vec<Self> {
        vec![I8, I16, I32, I64, U8, U16, U32, U64, F32, F64, Isize, Usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            I8 => "i8",
            I16 => "i16",
            I32 => "i32",
            I64 => "i64",
            U8 => "u8",
            U16 => "u16",
            U32 => "u32",
            U64 => "u64",
            F32 => "f32",
            F64 => "f64",
            Isize => "isize",
            Usize => "usize",
        }
    }

    /// Size in bytes of one element.
    pub fn itemsize(&self) -> usize {
        match self {
            I8 | U8 => 1,
            I16 | U16 => 2,
            I32 | U32 | F32 => 4,
            I64 | U64 | F64 => 8,
            Isize | Usize => std::mem::size_of::<usize>(),
        }
    }

    /// The C spelling of the type.
    pub fn c_decl(&self) -> &'static str {
        match self {
            I8 => "int8_t",
            I16 => "int16_t",
            I32 => "int32_t",
            I64 => "int64_t",
            U8 => "uint8_t",
            U16 => "uint16_t",
            U32 => "uint32_t",
            U64 => "uint64_t",
            F32 => "float",
            F64 => "double",
            Isize => "ssize_t",
            Usize => "size_t",
        }
    }
}

impl FromStr for Dtype {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all().into_iter().find(|k| k.name() == s).ok_or(())
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
