//! Card catalogue and rules loading, with validation.

pub mod load;

pub use load::*;
