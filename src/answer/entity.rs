//! Entity-list answers and a strict parser for `['a', "b"]`-shaped literals.
//!
//! Model output for the NER tasks is expected to be a list of quoted strings.
//! The parser accepts exactly that shape and nothing richer: no numbers, no
//! nesting, no expressions. Anything that does not match degrades to an empty
//! set so that one malformed response scores as "no entities found".

use std::collections::BTreeSet;
use std::iter::Peekable;
use std::str::Chars;

/// Set of entity strings. Duplicates collapse; order is irrelevant.
pub type EntitySet = BTreeSet<String>;

/// Parse a raw response into a set of entities.
///
/// Returns an empty set when the text is not a list literal of strings.
pub fn parse_entity_list(raw: &str) -> EntitySet {
    match parse_string_list(raw) {
        Some(items) => items.into_iter().collect(),
        None => {
            log::debug!("Response is not a string list literal: {:?}", truncate(raw, 80));
            EntitySet::new()
        }
    }
}

/// Parse a list literal of quoted strings, preserving order and duplicates.
///
/// Grammar (whitespace allowed between all tokens):
/// `'[' (string (',' string)* ','?)? ']'`
pub fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    let mut lexer = ListLexer {
        chars: raw.chars().peekable(),
    };

    lexer.skip_ws();
    lexer.expect('[')?;
    let mut items = Vec::new();

    lexer.skip_ws();
    if lexer.eat(']') {
        return lexer.finish(items);
    }

    loop {
        lexer.skip_ws();
        items.push(lexer.string()?);
        lexer.skip_ws();
        if lexer.eat(']') {
            break;
        }
        lexer.expect(',')?;
        lexer.skip_ws();
        // Trailing comma before the closing bracket
        if lexer.eat(']') {
            break;
        }
    }

    lexer.finish(items)
}

struct ListLexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl ListLexer<'_> {
    fn skip_ws(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        self.eat(expected).then_some(())
    }

    fn finish(mut self, items: Vec<String>) -> Option<Vec<String>> {
        self.skip_ws();
        match self.chars.next() {
            None => Some(items),
            Some(_) => None,
        }
    }

    /// A single- or double-quoted literal on one logical line.
    fn string(&mut self) -> Option<String> {
        let quote = match self.chars.next()? {
            q @ ('\'' | '"') => q,
            _ => return None,
        };

        let mut out = String::new();
        loop {
            match self.chars.next()? {
                c if c == quote => return Some(out),
                '\n' => return None,
                '\\' => self.escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Option<()> {
        let c = self.chars.next()?;
        match c {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '0'..='7' => out.push(self.octal_char(c)?),
            'x' => out.push(self.hex_char(2)?),
            'u' => out.push(self.hex_char(4)?),
            'U' => out.push(self.hex_char(8)?),
            other => {
                // Unknown escapes are kept verbatim
                out.push('\\');
                out.push(other);
            }
        }
        Some(())
    }

    /// Up to three octal digits, the first already consumed.
    fn octal_char(&mut self, first: char) -> Option<char> {
        let mut code = first.to_digit(8)?;
        for _ in 0..2 {
            match self.chars.peek().and_then(|c| c.to_digit(8)) {
                Some(d) => {
                    code = code * 8 + d;
                    self.chars.next();
                }
                None => break,
            }
        }
        char::from_u32(code)
    }

    fn hex_char(&mut self, digits: usize) -> Option<char> {
        let mut code = 0u32;
        for _ in 0..digits {
            let d = self.chars.next()?.to_digit(16)?;
            code = code * 16 + d;
        }
        char::from_u32(code)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
