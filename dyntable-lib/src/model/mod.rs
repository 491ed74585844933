//! Row data model

mod row;
mod value;

pub use row::*;
pub use value::*;
