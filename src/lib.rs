mod parser;
pub use parser::tokenizer::{tokenize, Token, TokenType};
pub use parser::{Error, Operator, SyntaxError};

mod interpreter;
pub use interpreter::Interpreter;
