//! Relaxed literal parser: a permissive superset of JSON.
//!
//! Generators trained on Python emit `repr`-style literals: single-quoted
//! strings, tuples, `True`/`False`/`None`, trailing commas. Strict JSON
//! parsing rejects all of these, so the extractor falls back to this
//! grammar. Output is always a plain `serde_json::Value`; tuples become
//! arrays.

use serde_json::{Map, Number, Value};

pub(crate) fn parse(text: &str) -> Option<Value> {
    let mut parser = Parser {
        chars: text.as_bytes(),
        pos: 0,
    };
    parser.skip_ws();
    let value = parser.value()?;
    parser.skip_ws();
    // Trailing garbage means this was not a literal after all.
    if parser.pos != parser.chars.len() {
        return None;
    }
    Some(value)
}

struct Parser<'a> {
    chars: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.chars[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    fn value(&mut self) -> Option<Value> {
        self.skip_ws();
        match self.peek()? {
            b'{' => self.mapping(),
            b'[' => self.sequence(b'[', b']'),
            b'(' => self.sequence(b'(', b')'),
            b'\'' | b'"' => self.string().map(Value::String),
            b't' | b'f' | b'n' => self.json_keyword(),
            b'T' | b'F' | b'N' => self.python_keyword(),
            b'-' | b'+' | b'0'..=b'9' | b'.' => self.number(),
            _ => None,
        }
    }

    fn json_keyword(&mut self) -> Option<Value> {
        if self.eat_word("true") {
            Some(Value::Bool(true))
        } else if self.eat_word("false") {
            Some(Value::Bool(false))
        } else if self.eat_word("null") {
            Some(Value::Null)
        } else {
            None
        }
    }

    fn python_keyword(&mut self) -> Option<Value> {
        if self.eat_word("True") {
            Some(Value::Bool(true))
        } else if self.eat_word("False") {
            Some(Value::Bool(false))
        } else if self.eat_word("None") {
            Some(Value::Null)
        } else {
            None
        }
    }

    fn string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                b'\\' => match self.bump()? {
                    b'n' => out.push('\n'),
                    b't' => out.push('\t'),
                    b'r' => out.push('\r'),
                    b'u' => {
                        let mut code = 0u32;
                        for _ in 0..4 {
                            let digit = (self.bump()? as char).to_digit(16)?;
                            code = code * 16 + digit;
                        }
                        out.push(char::from_u32(code)?);
                    }
                    escaped => out.push(escaped as char),
                },
                c => {
                    // Re-assemble multi-byte UTF-8 sequences byte by byte.
                    if c < 0x80 {
                        out.push(c as char);
                    } else {
                        let start = self.pos - 1;
                        while self
                            .peek()
                            .is_some_and(|b| b >= 0x80 && (b & 0xC0) == 0x80)
                        {
                            self.pos += 1;
                        }
                        out.push_str(std::str::from_utf8(&self.chars[start..self.pos]).ok()?);
                    }
                }
            }
        }
    }

    fn number(&mut self) -> Option<Value> {
        let start = self.pos;
        if self.peek() == Some(b'+') || self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                b'0'..=b'9' | b'_' => self.pos += 1,
                b'.' | b'e' | b'E' => {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.peek(), Some(b'+' | b'-')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        let text: String = std::str::from_utf8(&self.chars[start..self.pos])
            .ok()?
            .chars()
            .filter(|c| *c != '_')
            .collect();
        if is_float {
            Number::from_f64(text.parse::<f64>().ok()?).map(Value::Number)
        } else {
            text.parse::<i64>().ok().map(|n| Value::Number(n.into()))
        }
    }

    fn sequence(&mut self, open: u8, close: u8) -> Option<Value> {
        if !self.eat(open) {
            return None;
        }
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(close) {
                return Some(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_ws();
            if !self.eat(b',') && self.peek() != Some(close) {
                return None;
            }
        }
    }

    fn mapping(&mut self) -> Option<Value> {
        if !self.eat(b'{') {
            return None;
        }
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.eat(b'}') {
                return Some(Value::Object(map));
            }
            let key = match self.peek()? {
                b'\'' | b'"' => self.string()?,
                _ => return None,
            };
            self.skip_ws();
            if !self.eat(b':') {
                return None;
            }
            map.insert(key, self.value()?);
            self.skip_ws();
            if !self.eat(b',') && self.peek() != Some(b'}') {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_single_quoted_mappings() {
        let value = parse("{'a': 'x', 'b': 1}").unwrap();
        assert_eq!(value, json!({"a": "x", "b": 1}));
    }

    #[test]
    fn parses_tuples_as_arrays() {
        let value = parse("('C2', 'F1', 'P1')").unwrap();
        assert_eq!(value, json!(["C2", "F1", "P1"]));
    }

    #[test]
    fn parses_python_keywords_and_trailing_commas() {
        let value = parse("{'ok': True, 'gap': None, 'list': [1, 2,],}").unwrap();
        assert_eq!(value, json!({"ok": true, "gap": null, "list": [1, 2]}));
    }

    #[test]
    fn accepts_strict_json_too() {
        let value = parse("[{\"a\": 1.5e-3}]").unwrap();
        assert_eq!(value, json!([{"a": 0.0015}]));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse("{'a': 1} and more").is_none());
        assert!(parse("not a literal").is_none());
    }
}
