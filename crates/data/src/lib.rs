//! Pack loading and validation for game content.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
