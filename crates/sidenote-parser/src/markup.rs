//! Lozenge markup reader.
//!
//! Source text is prose interleaved with commands:
//!
//! ```text
//! ◊section{A heading}
//! Plain text with ◊em{emphasis} and a ◊link[href="https://example.com"]{link}.
//! ◊margin-note{Set in the margin.}
//! ◊◊ is a literal lozenge.
//! ```
//!
//! A command is `◊name`, optionally followed by `[key="value" ...]` and then
//! optionally by a `{body}`. Braces inside text must balance.

use sidenote_core::{Child, Node};
use thiserror::Error;

/// The command character.
pub const LOZENGE: char = '◊';

/// Markup syntax errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    /// Malformed markup at a 1-based line and column.
    #[error("{line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}

/// Result type for markup operations.
pub type Result<T> = std::result::Result<T, MarkupError>;

/// Parse markup into the children of a document root.
pub fn parse_markup(source: &str) -> Result<Vec<Child>> {
    let mut reader = Reader { src: source, pos: 0 };
    reader.content(None)
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> MarkupError {
        let before = &self.src[..pos];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map_or(before, |nl| &before[nl + 1..])
            .chars()
            .count()
            + 1;
        MarkupError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    fn error(&self, message: impl Into<String>) -> MarkupError {
        self.error_at(self.pos, message)
    }

    /// Read children until end of input, or until the `}` closing the brace
    /// opened at `open`.
    fn content(&mut self, open: Option<usize>) -> Result<Vec<Child>> {
        let mut children = Vec::new();
        let mut text = String::new();
        // Positions of literal '{' still waiting for their '}'.
        let mut pending: Vec<usize> = Vec::new();

        loop {
            match self.peek() {
                None => {
                    if let Some(open) = open.or_else(|| pending.first().copied()) {
                        return Err(self.error_at(open, "unclosed '{'"));
                    }
                    break;
                }
                Some(LOZENGE) => {
                    self.bump();
                    if self.peek() == Some(LOZENGE) {
                        self.bump();
                        text.push(LOZENGE);
                        continue;
                    }
                    if !text.is_empty() {
                        children.push(Child::Text(std::mem::take(&mut text)));
                    }
                    children.push(Child::Node(self.command()?));
                }
                Some('{') => {
                    pending.push(self.pos);
                    self.bump();
                    text.push('{');
                }
                Some('}') if !pending.is_empty() => {
                    self.bump();
                    pending.pop();
                    text.push('}');
                }
                Some('}') => {
                    if open.is_none() {
                        return Err(self.error("unmatched '}'"));
                    }
                    self.bump();
                    break;
                }
                Some(c) => {
                    self.bump();
                    text.push(c);
                }
            }
        }

        if !text.is_empty() {
            children.push(Child::Text(text));
        }
        Ok(children)
    }

    fn command(&mut self) -> Result<Node> {
        let name = self.name();
        if name.is_empty() || !name.starts_with(|c: char| c.is_alphabetic()) {
            return Err(self.error(format!("expected a tag name after '{LOZENGE}'")));
        }

        let mut node = Node::new(name);

        if self.peek() == Some('[') {
            self.attributes(&mut node)?;
        }

        if self.peek() == Some('{') {
            let open = self.pos;
            self.bump();
            node.children = self.content(Some(open))?;
        }

        Ok(node)
    }

    fn name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        name
    }

    fn skip_separators(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace() || c == ',') {
            self.bump();
        }
    }

    fn attributes(&mut self, node: &mut Node) -> Result<()> {
        let open = self.pos;
        self.bump();

        loop {
            self.skip_separators();
            match self.peek() {
                None => return Err(self.error_at(open, "unclosed '['")),
                Some(']') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
            }

            let key_pos = self.pos;
            let key = self.name();
            if key.is_empty() {
                return Err(self.error("expected an attribute name"));
            }
            self.skip_separators();
            if self.bump() != Some('=') {
                return Err(self.error(format!("expected '=' after attribute {key:?}")));
            }
            self.skip_separators();
            let value = self.quoted()?;

            if node.attrs.contains_key(&key) {
                return Err(self.error_at(key_pos, format!("duplicate attribute {key:?}")));
            }
            node.set_attr(key, value);
        }
    }

    fn quoted(&mut self) -> Result<String> {
        let open = self.pos;
        if self.bump() != Some('"') {
            return Err(self.error_at(open, "expected a quoted attribute value"));
        }

        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error_at(open, "unterminated attribute value")),
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(self.error_at(open, "unterminated attribute value")),
                },
                Some(c) => value.push(c),
            }
        }
    }
}
