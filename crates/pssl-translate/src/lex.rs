//! Minimal lexer for the rewrite pass.
//!
//! Only identifiers need to be recognized precisely; everything else is passed through verbatim.
//! Numeric literals are consumed as a unit so suffixes and exponents (`1.0f`, `2e5`) are never
//! mistaken for identifiers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Whitespace,
    Punct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset into the lexed line.
    pub offset: usize,
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split one line into tokens. Concatenating every token's text yields the input.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let kind = if c.is_ascii_alphabetic() || c == '_' {
            while chars.next_if(|&(_, c)| is_word(c)).is_some() {}
            TokenKind::Ident
        } else if c.is_ascii_digit() {
            while chars.next_if(|&(_, c)| is_word(c) || c == '.').is_some() {}
            TokenKind::Number
        } else if c.is_whitespace() {
            while chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
            TokenKind::Whitespace
        } else {
            TokenKind::Punct
        };
        let end = chars.peek().map_or(line.len(), |&(i, _)| i);
        out.push(Token {
            kind,
            text: &line[start..end],
            offset: start,
        });
    }

    out
}

/// Index of the next non-whitespace token after `i`.
pub fn next_significant(tokens: &[Token<'_>], i: usize) -> Option<usize> {
    (i + 1..tokens.len()).find(|&j| tokens[j].kind != TokenKind::Whitespace)
}

/// Index of the previous non-whitespace token before `i`.
pub fn prev_significant(tokens: &[Token<'_>], i: usize) -> Option<usize> {
    (0..i)
        .rev()
        .find(|&j| tokens[j].kind != TokenKind::Whitespace)
}

/// `true` if the token at `i` is a plain `=` (not `==`, `<=`, `+=`...).
pub fn is_assign(tokens: &[Token<'_>], i: usize) -> bool {
    if tokens[i].text != "=" {
        return false;
    }
    let followed_by_eq = tokens.get(i + 1).is_some_and(|t| t.text == "=");
    let preceded_by_op = i > 0
        && matches!(
            tokens[i - 1].text,
            "=" | "!" | "<" | ">" | "+" | "-" | "*" | "/" | "%" | "&" | "|" | "^"
        );
    !followed_by_eq && !preceded_by_op
}
