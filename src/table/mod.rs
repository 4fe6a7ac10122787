pub mod builder;
pub mod error;
pub mod schema;
pub mod writer;
