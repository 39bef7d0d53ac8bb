//! Normalization of heterogeneous dataset values into floating-point numbers

pub mod value;

pub use value::*;
