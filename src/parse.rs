//! Tokenizer and graceful recursive-descent parser for expression text.
//!
//! Parsing never fails hard: malformed input degrades to a best-effort partial
//! tree or to `None`, as documented on [parse_expression].

use crate::{Expr, Operator, Variable};
use pest::Parser;

/// Lexical grammar: letter runs, parentheses, everything else is dropped.
///
/// The catch-all `junk` rule makes the tokenizer total, so [tokenize] cannot fail.
#[derive(Parser)]
#[grammar_inline = r####"
tokens = { SOI ~ tok* ~ EOI }
tok    = _{ lpar | rpar | word | junk }
lpar   =  { "(" }
rpar   =  { ")" }
word   = @{ ASCII_ALPHA+ }
junk   = _{ ANY }

WHITESPACE = _{ " " | "\t" | "\r" | "\n" }
"####]
struct Tokenizer;

/// A lexical token of the expression language.
///
/// Operator keywords are recognized as whole words only: ```ANDY``` is a single
/// [Var](Token::Var) token, not an operator followed by a variable. Variable tokens
/// keep the full letter run; runs longer than one letter are rejected later by the
/// parser rather than by the tokenizer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    /// A maximal run of letters which is not an operator keyword
    Var(String),
    /// A binary operator keyword
    Op(Operator),
    /// The NOT keyword
    Not,
    /// An opening parenthesis
    LParen,
    /// A closing parenthesis
    RParen,
}

/// Split a textual expression into a flat token sequence.
///
/// The input is uppercased first, so the token stream is case-insensitive.
/// Unrecognized characters are dropped. This function never fails.
///
/// ```
/// use gatekit::{Operator, Token};
///
/// let tokens = gatekit::tokenize("a AND B");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Var("A".to_string()),
///         Token::Op(Operator::And),
///         Token::Var("B".to_string()),
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    let text = text.to_uppercase();
    let parsed = match Tokenizer::parse(Rule::tokens, &text) {
        Ok(mut pairs) => pairs.next().unwrap(),
        // The grammar accepts any input, this branch is unreachable
        Err(_) => return Vec::new(),
    };
    parsed
        .into_inner()
        .filter_map(|pair| match pair.as_rule() {
            Rule::lpar => Some(Token::LParen),
            Rule::rpar => Some(Token::RParen),
            Rule::word => Some(classify_word(pair.as_str())),
            _ => None,
        })
        .collect()
}

fn classify_word(word: &str) -> Token {
    match word {
        "AND" => Token::Op(Operator::And),
        "OR" => Token::Op(Operator::Or),
        "XOR" => Token::Op(Operator::Xor),
        "NOT" => Token::Not,
        _ => Token::Var(word.to_string()),
    }
}

/// Parse a textual expression into an expression tree.
///
/// If the text contains ```=```, only the part after the first ```=``` is parsed:
/// the left side names the output variable and is ignored here (the
/// [answer generator](crate::generate_all_accepted_answers) is the one consumer
/// that cares about it).
///
/// Returns `None` for empty or whitespace-only input. Malformed input never
/// raises an error; the parser degrades to a best-effort partial tree:
/// * a trailing binary operator is dropped, keeping the left operand
///   (```A OR``` parses as ```A```);
/// * a dangling NOT with no operand yields nothing;
/// * a missing closing parenthesis is tolerated;
/// * letter runs longer than one letter are not valid variables and yield nothing.
///
/// ```
/// use gatekit::{parse_expression, Expr, Operator, Variable};
///
/// // AND binds tighter than OR
/// let e = parse_expression("Q = A OR B AND C").unwrap();
/// assert_eq!(format!("{}", e), "A OR B AND C");
///
/// assert!(parse_expression("  ").is_none());
/// assert_eq!(format!("{}", parse_expression("A OR").unwrap()), "A");
/// ```
pub fn parse_expression(text: &str) -> Option<Expr> {
    let rhs = match text.find('=') {
        Some(idx) => &text[idx + 1..],
        None => text,
    };
    if rhs.trim().is_empty() {
        return None;
    }
    parse_tokens(&tokenize(rhs))
}

/// Parse a token sequence into an expression tree.
///
/// This is the token-level entry point reused by [parse_expression]; it follows
/// the same graceful-degradation policy. Tokens left over after the first full
/// expression are ignored.
pub fn parse_tokens(tokens: &[Token]) -> Option<Expr> {
    TokenCursor { tokens, pos: 0 }.or_expr()
}

/// Grammar, lowest priority first (binary operators fold left-associatively):
/// * ```Or  := And (OR And)*```
/// * ```And := Xor (AND Xor)*```
/// * ```Xor := Not (XOR Not)*```
/// * ```Not := NOT Not | Primary```
/// * ```Primary := VAR | '(' Or ')'```
struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl TokenCursor<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn or_expr(&mut self) -> Option<Expr> {
        self.binary_chain(Operator::Or, Self::and_expr)
    }

    fn and_expr(&mut self) -> Option<Expr> {
        self.binary_chain(Operator::And, Self::xor_expr)
    }

    fn xor_expr(&mut self) -> Option<Expr> {
        self.binary_chain(Operator::Xor, Self::not_expr)
    }

    fn binary_chain(
        &mut self,
        op: Operator,
        next: fn(&mut Self) -> Option<Expr>,
    ) -> Option<Expr> {
        let mut expr = next(self)?;
        while self.eat(&Token::Op(op)) {
            match next(self) {
                Some(rhs) => expr = op.join(expr, rhs),
                // Trailing operator: keep the left side
                None => break,
            }
        }
        Some(expr)
    }

    fn not_expr(&mut self) -> Option<Expr> {
        if self.eat(&Token::Not) {
            return self.not_expr().map(|e| !e);
        }
        self.primary()
    }

    fn primary(&mut self) -> Option<Expr> {
        match self.peek()? {
            Token::Var(word) => {
                let var = single_letter(word);
                self.pos += 1;
                var.map(Expr::from)
            }
            Token::LParen => {
                self.pos += 1;
                let inner = self.or_expr();
                // tolerate a missing closing parenthesis
                self.eat(&Token::RParen);
                inner
            }
            _ => None,
        }
    }
}

fn single_letter(word: &str) -> Option<Variable> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Variable::new(c),
        _ => None,
    }
}
