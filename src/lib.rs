pub mod codegen;
pub mod error;
pub mod inflect;
pub mod ir;
pub mod parse;
