mod error;
mod spec;
mod types;

pub use error::*;
pub use types::*;
