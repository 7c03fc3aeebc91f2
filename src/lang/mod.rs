/*!
# Language Module

This Rust module reads the text side of the machine: fenced assembly
source, its tagged lines, and the tokens typed by an operator.

*/

#[macro_use]
mod error;
mod lex;
mod line;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::{fenced, tokens, FENCE};
pub use line::{Item, Line, NOP_COLUMN};
