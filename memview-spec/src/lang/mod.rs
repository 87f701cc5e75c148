//! Backends rendering the generated code tree.

pub mod c;

mod common;
mod inspect;
