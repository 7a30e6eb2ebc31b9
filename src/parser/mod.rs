mod ast;
mod error;
pub mod tokenizer;

pub(crate) use ast::Expression;
pub use ast::Operator;
pub use error::{Error, SyntaxError};
pub use tokenizer::{tokenize, Token, TokenType};
