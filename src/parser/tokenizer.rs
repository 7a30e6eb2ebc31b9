use const_format::concatcp;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    typ: TokenType,
    lexeme: String,
}

impl Token {
    pub fn typ(&self) -> TokenType {
        self.typ
    }
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenType {
    Arrow,
    Operator,
    Equal,
    LPar,
    RPar,
    Name,
    Number,
}

/// Capture group names, in the order the alternatives are tried.
const GROUPS: [(&str, TokenType); 7] = [
    ("arrow", TokenType::Arrow),
    ("operator", TokenType::Operator),
    ("equal", TokenType::Equal),
    ("lpar", TokenType::LPar),
    ("rpar", TokenType::RPar),
    ("name", TokenType::Name),
    ("number", TokenType::Number),
];

macro_rules! alternative {
    ($t:expr) => {{
        $t
    }};
    ($t:expr, $($ts:expr),+) => {{
        concatcp!($t, "|", alternative!($($ts),+))
    }}
}

macro_rules! named {
    ($name:expr, $t:expr) => {
        concatcp!(r"(?P<", $name, ">", $t, ")")
    };
}

const S_ARROW: &str = r"=>";
const S_OPERATOR: &str = r"[-+*/%]";
const S_EQUAL: &str = r"=";
const S_LPAR: &str = r"\(";
const S_RPAR: &str = r"\)";
const S_NAME: &str = r"[A-Za-z_][A-Za-z0-9_]*";
const S_NUMBER: &str = r"[0-9]*\.?[0-9]+";
const S_TOKEN: &str = alternative!(
    named!("arrow", S_ARROW),
    named!("operator", S_OPERATOR),
    named!("equal", S_EQUAL),
    named!("lpar", S_LPAR),
    named!("rpar", S_RPAR),
    named!("name", S_NAME),
    named!("number", S_NUMBER)
);

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(S_TOKEN).expect("Error compiling regex."));

fn classify(caps: &Captures) -> Option<Token> {
    GROUPS.iter().find_map(|(group, typ)| {
        caps.name(group).map(|m| Token {
            typ: *typ,
            lexeme: m.as_str().to_string(),
        })
    })
}

/// Splits a line into tokens. Whitespace and characters no token can start with
/// are dropped silently.
pub fn tokenize(input: &str) -> Vec<Token> {
    TOKEN
        .captures_iter(input)
        .filter_map(|caps| classify(&caps))
        .collect()
}
