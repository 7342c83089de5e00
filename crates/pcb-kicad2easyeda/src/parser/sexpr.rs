//! Minimal S-expression reader for KiCad footprint files

use crate::error::FormatError;

/// Deepest list nesting accepted. KiCad footprints stay well under ten levels.
pub const MAX_DEPTH: usize = 256;

/// A node in a KiCad S-expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Sexpr {
    /// Bare token: keyword, number, or unquoted name
    Symbol(String),
    /// Quoted string with escapes resolved
    String(String),
    List(Vec<Sexpr>),
}

impl Sexpr {
    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Sexpr::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Sexpr::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Sexpr::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text of either a symbol or a quoted string.
    ///
    /// KiCad quotes names inconsistently across versions (`(pad 1 ...)` vs `(pad "1" ...)`).
    pub fn as_text(&self) -> Option<&str> {
        self.as_str().or_else(|| self.as_sym())
    }

    pub fn as_float(&self) -> Option<f64> {
        self.as_sym()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Head keyword of a list, e.g. `pad` for `(pad "1" smd rect ...)`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()
            .and_then(|items| items.first())
            .and_then(|s| s.as_sym())
    }

    /// First child list whose head keyword is `key`.
    pub fn child(&self, key: &str) -> Option<&[Sexpr]> {
        self.as_list()?
            .iter()
            .skip(1)
            .find(|item| item.tag() == Some(key))
            .and_then(|item| item.as_list())
    }
}

/// Parse exactly one root expression from `input`.
pub fn parse(input: &str) -> Result<Sexpr, FormatError> {
    let mut reader = Reader {
        src: input.as_bytes(),
        text: input,
        pos: 0,
        depth: 0,
    };

    reader.skip_whitespace();
    if reader.is_eof() {
        return Err(FormatError::Empty);
    }

    let root = reader.parse_expr()?;

    reader.skip_whitespace();
    if !reader.is_eof() {
        return Err(FormatError::TrailingContent(reader.pos));
    }

    Ok(root)
}

struct Reader<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl Reader<'_> {
    fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn parse_expr(&mut self) -> Result<Sexpr, FormatError> {
        match self.peek() {
            Some(b'(') => self.parse_list(),
            Some(b')') => Err(FormatError::UnexpectedClose(self.pos)),
            Some(b'"') => self.parse_string(),
            Some(_) => Ok(self.parse_symbol()),
            None => Err(FormatError::UnexpectedEof(self.pos)),
        }
    }

    fn parse_list(&mut self) -> Result<Sexpr, FormatError> {
        let start = self.pos;
        if self.depth >= MAX_DEPTH {
            return Err(FormatError::TooDeep(start));
        }
        self.depth += 1;
        self.pos += 1;

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(FormatError::UnexpectedEof(start)),
                Some(b')') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(Sexpr::List(items));
                }
                Some(_) => items.push(self.parse_expr()?),
            }
        }
    }

    fn parse_string(&mut self) -> Result<Sexpr, FormatError> {
        let start = self.pos;
        self.pos += 1;

        let mut out = String::new();
        let mut chars = self.text[self.pos..].char_indices();
        while let Some((offset, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.pos += offset + 1;
                    return Ok(Sexpr::String(out));
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, other)) => out.push(other),
                    None => break,
                },
                _ => out.push(ch),
            }
        }

        Err(FormatError::UnexpectedEof(start))
    }

    fn parse_symbol(&mut self) -> Sexpr {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b'(' || b == b')' || b == b'"' {
                break;
            }
            self.pos += 1;
        }
        Sexpr::Symbol(self.text[start..self.pos].to_string())
    }
}
