pub mod error;
pub mod flatten;
