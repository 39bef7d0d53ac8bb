//! Fee-rule matching and fee computation

pub mod fee;
pub mod matcher;
pub mod query;

pub use fee::*;
pub use matcher::*;
pub use query::*;
