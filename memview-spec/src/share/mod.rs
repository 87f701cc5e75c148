pub mod compile;
pub mod dgns;
pub mod gen;
pub mod ir;
