pub mod error;
pub mod path;
