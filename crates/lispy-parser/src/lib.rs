//! Lispy reader: converts a token stream into expression trees.

mod atom;
mod parser;

pub use atom::parse_atom;
pub use parser::{parse, parse_all, Parser};
