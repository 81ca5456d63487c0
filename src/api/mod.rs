//! Row operations and HTTP dialects

mod dialect;
mod rows;

pub use dialect::*;
pub use rows::*;
