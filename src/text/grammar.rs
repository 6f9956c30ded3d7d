//! Grammar recognizer for Axion text.
//!
//! [`recognize`] turns raw text into a concrete syntax tree of [`SyntaxNode`]s,
//! each tagged with the name of the production it matched (see [`symbols`]).
//! Leaf nodes keep the raw token text, escapes and delimiters included; the
//! kind-specific parsers in [`crate::text`] decode them.
//!
//! ```rust
//! use axion::text::grammar::{recognize, symbols};
//!
//! let tree = recognize(symbols::ION_INT, "units::0x1F").unwrap();
//! assert_eq!(tree.symbol(), symbols::ION_INT);
//! assert_eq!(tree.children()[0].symbol(), symbols::ANNOTATION_LIST);
//!
//! let literal = &tree.children()[1];
//! assert_eq!(literal.symbol(), symbols::INT_LITERAL);
//! assert_eq!(literal.children()[0].symbol(), symbols::HEX_INT);
//! ```

use crate::symbol::{is_identifier_char, is_identifier_start, is_operator_char};
use crate::{Error, IonType, Result};

/// Production names.
pub mod symbols {
    pub const ION_VALUE: &str = "ion-value";
    pub const ANNOTATION_LIST: &str = "annotation-list";
    pub const ANNOTATION: &str = "annotation";

    pub const ION_NULL: &str = "ion-null";
    pub const NULL_LITERAL: &str = "null-literal";

    pub const ION_BOOL: &str = "ion-bool";
    pub const NULL_BOOL: &str = "null-bool";
    pub const BOOL_LITERAL: &str = "bool-literal";

    pub const ION_INT: &str = "ion-int";
    pub const NULL_INT: &str = "null-int";
    pub const INT_LITERAL: &str = "int-literal";
    pub const DECIMAL_INT: &str = "decimal-int";
    pub const HEX_INT: &str = "hex-int";
    pub const BINARY_INT: &str = "binary-int";

    pub const ION_FLOAT: &str = "ion-float";
    pub const NULL_FLOAT: &str = "null-float";
    pub const FLOAT_LITERAL: &str = "float-literal";

    pub const ION_DECIMAL: &str = "ion-decimal";
    pub const NULL_DECIMAL: &str = "null-decimal";
    pub const DECIMAL_LITERAL: &str = "decimal-literal";

    pub const ION_TIMESTAMP: &str = "ion-timestamp";
    pub const NULL_TIMESTAMP: &str = "null-timestamp";
    pub const TIMESTAMP_LITERAL: &str = "timestamp-literal";

    pub const ION_STRING: &str = "ion-string";
    pub const NULL_STRING: &str = "null-string";
    pub const SINGLELINE_STRING: &str = "singleline-string";
    pub const MULTILINE_STRING: &str = "multiline-string";
    pub const STRING_SEGMENT: &str = "string-segment";

    pub const ION_SYMBOL: &str = "ion-symbol";
    pub const NULL_SYMBOL: &str = "null-symbol";
    pub const IDENTIFIER: &str = "identifier";
    pub const QUOTED_SYMBOL: &str = "quoted-symbol";
    pub const OPERATOR: &str = "operator";

    pub const ION_BLOB: &str = "ion-blob";
    pub const NULL_BLOB: &str = "null-blob";
    pub const BLOB_LITERAL: &str = "blob-literal";

    pub const ION_CLOB: &str = "ion-clob";
    pub const NULL_CLOB: &str = "null-clob";
    pub const CLOB_LITERAL: &str = "clob-literal";

    pub const ION_LIST: &str = "ion-list";
    pub const NULL_LIST: &str = "null-list";
    pub const LIST_ITEMS: &str = "list-items";

    pub const ION_SEXP: &str = "ion-sexp";
    pub const NULL_SEXP: &str = "null-sexp";
    pub const SEXP_ITEMS: &str = "sexp-items";

    pub const ION_STRUCT: &str = "ion-struct";
    pub const NULL_STRUCT: &str = "null-struct";
    pub const STRUCT_FIELDS: &str = "struct-fields";
    pub const STRUCT_FIELD: &str = "struct-field";
    pub const PROPERTY_NAME: &str = "property-name";
}

use symbols::*;

/// The `(value production, null production)` pair for a kind.
#[must_use]
pub const fn productions(ion_type: IonType) -> (&'static str, &'static str) {
    match ion_type {
        IonType::Null => (ION_NULL, NULL_LITERAL),
        IonType::Bool => (ION_BOOL, NULL_BOOL),
        IonType::Int => (ION_INT, NULL_INT),
        IonType::Float => (ION_FLOAT, NULL_FLOAT),
        IonType::Decimal => (ION_DECIMAL, NULL_DECIMAL),
        IonType::Timestamp => (ION_TIMESTAMP, NULL_TIMESTAMP),
        IonType::String => (ION_STRING, NULL_STRING),
        IonType::Symbol => (ION_SYMBOL, NULL_SYMBOL),
        IonType::Blob => (ION_BLOB, NULL_BLOB),
        IonType::Clob => (ION_CLOB, NULL_CLOB),
        IonType::List => (ION_LIST, NULL_LIST),
        IonType::Sexp => (ION_SEXP, NULL_SEXP),
        IonType::Struct => (ION_STRUCT, NULL_STRUCT),
    }
}

fn is_value_production(symbol: &str) -> bool {
    symbol == ION_VALUE || IonType::ALL.iter().any(|t| productions(*t).0 == symbol)
}

/// A node of the concrete syntax tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxNode {
    symbol: &'static str,
    text: String,
    line: usize,
    column: usize,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    fn new(
        symbol: &'static str,
        text: &str,
        (line, column): (usize, usize),
        children: Vec<SyntaxNode>,
    ) -> Self {
        SyntaxNode {
            symbol,
            text: text.to_string(),
            line,
            column,
            children,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// The raw source text this node spans.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    #[must_use]
    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        self.children.get(index)
    }

    /// The first direct child with the given symbol name.
    #[must_use]
    pub fn find(&self, symbol: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.symbol == symbol)
    }
}

/// Recognizes `input` as the production named `symbol`.
///
/// `ion-value` accepts any value and wraps it in an `ion-value` node; a kind
/// production such as `ion-int` only accepts that kind.
///
/// # Errors
///
/// Returns [`Error::Syntax`] when the text does not match the grammar,
/// [`Error::SymbolMismatch`] when it holds a different kind than requested and
/// [`Error::Argument`] for an unknown production name.
pub fn recognize(symbol: &str, input: &str) -> Result<SyntaxNode> {
    if !is_value_production(symbol) {
        return Err(Error::argument(format!(
            "unknown grammar symbol '{}'",
            symbol
        )));
    }
    let mut recognizer = Recognizer::new(input);
    let node = recognizer.value()?;
    recognizer.skip_whitespace();
    if !recognizer.at_end() {
        return Err(recognizer.error("unexpected content after value"));
    }
    if symbol == ION_VALUE {
        let position = (node.line, node.column);
        let text = node.text.clone();
        return Ok(SyntaxNode::new(ION_VALUE, &text, position, vec![node]));
    }
    if node.symbol != symbol {
        return Err(Error::symbol_mismatch(symbol, node.symbol));
    }
    Ok(node)
}

#[derive(Clone, Copy)]
struct Mark {
    position: usize,
    line: usize,
    column: usize,
}

struct Recognizer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Recognizer<'a> {
    fn new(input: &'a str) -> Self {
        Recognizer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn advance(&mut self, count: usize) {
        for _ in 0..count {
            self.next_char();
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn reset(&mut self, mark: Mark) {
        self.position = mark.position;
        self.line = mark.line;
        self.column = mark.column;
    }

    fn since(&self, mark: Mark) -> &'a str {
        &self.input[mark.position..self.position]
    }

    fn leaf(&self, symbol: &'static str, mark: Mark) -> SyntaxNode {
        SyntaxNode::new(symbol, self.since(mark), (mark.line, mark.column), Vec::new())
    }

    fn node(&self, symbol: &'static str, mark: Mark, children: Vec<SyntaxNode>) -> SyntaxNode {
        SyntaxNode::new(symbol, self.since(mark), (mark.line, mark.column), children)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn error(&self, msg: &str) -> Error {
        let start = self.input[..self.position]
            .rfind('\n')
            .map_or(0, |pos| pos + 1);
        let end = self.input[self.position..]
            .find('\n')
            .map_or(self.input.len(), |pos| self.position + pos);
        Error::syntax(self.line, self.column, msg, &self.input[start..end])
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.starts_with(token) {
            self.advance(token.chars().count());
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", token)))
        }
    }

    fn scan_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if predicate(ch) {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn scan_word(&mut self) -> &'a str {
        let mark = self.mark();
        self.scan_while(is_identifier_char);
        self.since(mark)
    }

    /// Scans a `"` or `'` delimited token, escapes included.
    fn scan_quoted(&mut self, delimiter: char) -> Result<()> {
        self.next_char();
        loop {
            match self.next_char() {
                Some('\\') => {
                    if self.next_char().is_none() {
                        return Err(self.error("unterminated escape sequence"));
                    }
                }
                Some('\n') => return Err(self.error("newline in quoted text")),
                Some(ch) if ch == delimiter => return Ok(()),
                Some(_) => {}
                None => return Err(self.error("unterminated quoted text")),
            }
        }
    }

    fn scan_long_segment(&mut self) -> Result<()> {
        self.advance(3);
        loop {
            if self.starts_with("'''") {
                self.advance(3);
                return Ok(());
            }
            match self.next_char() {
                Some('\\') => {
                    if self.next_char().is_none() {
                        return Err(self.error("unterminated escape sequence"));
                    }
                }
                Some(_) => {}
                None => return Err(self.error("unterminated ''' string")),
            }
        }
    }

    /// One or more `'''` segments separated by whitespace.
    fn long_string(&mut self) -> Result<SyntaxNode> {
        let start = self.mark();
        let mut segments = Vec::new();
        loop {
            let mark = self.mark();
            self.scan_long_segment()?;
            segments.push(self.leaf(STRING_SEGMENT, mark));
            let after = self.mark();
            self.skip_whitespace();
            if !self.starts_with("'''") {
                self.reset(after);
                break;
            }
        }
        Ok(self.node(MULTILINE_STRING, start, segments))
    }

    fn short_string(&mut self) -> Result<SyntaxNode> {
        let mark = self.mark();
        self.scan_quoted('"')?;
        Ok(self.leaf(SINGLELINE_STRING, mark))
    }

    fn quoted_symbol(&mut self) -> Result<SyntaxNode> {
        let mark = self.mark();
        self.scan_quoted('\'')?;
        Ok(self.leaf(QUOTED_SYMBOL, mark))
    }

    fn annotations(&mut self) -> Result<Option<SyntaxNode>> {
        let start = self.mark();
        let mut annotations = Vec::new();
        loop {
            let candidate = self.mark();
            let node = match self.peek_char() {
                Some(ch) if is_identifier_start(ch) => {
                    self.scan_word();
                    self.leaf(ANNOTATION, candidate)
                }
                Some('\'') if !self.starts_with("'''") => {
                    self.scan_quoted('\'')?;
                    self.leaf(ANNOTATION, candidate)
                }
                _ => break,
            };
            self.skip_whitespace();
            if self.starts_with("::") {
                self.advance(2);
                self.skip_whitespace();
                annotations.push(node);
            } else {
                self.reset(candidate);
                break;
            }
        }
        if annotations.is_empty() {
            return Ok(None);
        }
        let end = self.mark();
        let text = self.since(start).trim_end();
        let node = SyntaxNode::new(ANNOTATION_LIST, text, (start.line, start.column), annotations);
        self.reset(end);
        Ok(Some(node))
    }

    fn value(&mut self) -> Result<SyntaxNode> {
        self.skip_whitespace();
        let start = self.mark();
        let annotations = self.annotations()?;
        let (production, body) = self.literal()?;
        let mut children = Vec::with_capacity(2);
        children.extend(annotations);
        children.push(body);
        Ok(self.node(production, start, children))
    }

    fn literal(&mut self) -> Result<(&'static str, SyntaxNode)> {
        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => return Err(self.error("expected a value, found end of input")),
        };
        match ch {
            '"' => Ok((ION_STRING, self.short_string()?)),
            '\'' if self.starts_with("'''") => Ok((ION_STRING, self.long_string()?)),
            '\'' => Ok((ION_SYMBOL, self.quoted_symbol()?)),
            '{' if self.starts_with("{{") => self.lob(),
            '{' => Ok((ION_STRUCT, self.structure()?)),
            '[' => Ok((ION_LIST, self.list()?)),
            '(' => Ok((ION_SEXP, self.sexp()?)),
            c if c.is_ascii_digit() => self.number(),
            '-' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => self.number(),
            '+' | '-' if self.is_signed_infinity() => {
                let mark = self.mark();
                self.advance(4);
                Ok((ION_FLOAT, self.leaf(FLOAT_LITERAL, mark)))
            }
            c if is_operator_char(c) => {
                let mark = self.mark();
                self.scan_while(is_operator_char);
                Ok((ION_SYMBOL, self.leaf(OPERATOR, mark)))
            }
            c if is_identifier_start(c) => self.keyword_or_identifier(),
            other => Err(self.error(&format!("unexpected character '{}'", other))),
        }
    }

    fn is_signed_infinity(&self) -> bool {
        let rest = self.rest();
        (rest.starts_with("+inf") || rest.starts_with("-inf"))
            && !rest[4..].chars().next().is_some_and(is_identifier_char)
    }

    fn keyword_or_identifier(&mut self) -> Result<(&'static str, SyntaxNode)> {
        let mark = self.mark();
        let word = self.scan_word();
        match word {
            "null" => {
                let is_typed = self.peek_char() == Some('.')
                    && self.peek_nth(1).is_some_and(is_identifier_start);
                if !is_typed {
                    return Ok((ION_NULL, self.leaf(NULL_LITERAL, mark)));
                }
                self.next_char();
                let type_name = self.scan_word();
                let ion_type = IonType::from_name(type_name)
                    .ok_or_else(|| self.error(&format!("unknown null type 'null.{}'", type_name)))?;
                let (production, null_symbol) = productions(ion_type);
                Ok((production, self.leaf(null_symbol, mark)))
            }
            "true" | "false" | "TRUE" | "FALSE" | "True" | "False" => {
                Ok((ION_BOOL, self.leaf(BOOL_LITERAL, mark)))
            }
            "nan" => Ok((ION_FLOAT, self.leaf(FLOAT_LITERAL, mark))),
            _ => Ok((ION_SYMBOL, self.leaf(IDENTIFIER, mark))),
        }
    }

    fn is_timestamp_start(&self) -> bool {
        let mut chars = self.rest().chars();
        (0..4).all(|_| chars.next().is_some_and(|c| c.is_ascii_digit()))
            && matches!(chars.next(), Some('T') | Some('-'))
    }

    fn number(&mut self) -> Result<(&'static str, SyntaxNode)> {
        let mark = self.mark();
        if self.is_timestamp_start() {
            self.scan_while(|c| c.is_ascii_digit() || matches!(c, '-' | ':' | '.' | '+' | 'T' | 'Z'));
            return Ok((ION_TIMESTAMP, self.leaf(TIMESTAMP_LITERAL, mark)));
        }

        if self.peek_char() == Some('-') {
            self.next_char();
        }
        let radix = if self.starts_with("0x") || self.starts_with("0X") {
            Some((16, HEX_INT))
        } else if self.starts_with("0b") || self.starts_with("0B") {
            Some((2, BINARY_INT))
        } else {
            None
        };
        if let Some((radix, symbol)) = radix {
            self.advance(2);
            let digits = self.mark();
            self.scan_while(|c| c == '_' || c.is_digit(radix));
            if self.since(digits).is_empty() {
                return Err(self.error("expected digits after radix prefix"));
            }
            self.check_number_end()?;
            let digits = self.leaf(symbol, mark);
            return Ok((ION_INT, self.node(INT_LITERAL, mark, vec![digits])));
        }

        self.scan_while(|c| c.is_ascii_digit() || c == '_');
        let mut production = ION_INT;
        if self.peek_char() == Some('.') {
            self.next_char();
            self.scan_while(|c| c.is_ascii_digit());
            production = ION_DECIMAL;
        }
        match self.peek_char() {
            Some('e') | Some('E') => {
                production = ION_FLOAT;
                self.exponent()?;
            }
            Some('d') | Some('D') => {
                production = ION_DECIMAL;
                self.exponent()?;
            }
            _ => {}
        }
        self.check_number_end()?;
        let node = match production {
            ION_INT => {
                let digits = self.leaf(DECIMAL_INT, mark);
                self.node(INT_LITERAL, mark, vec![digits])
            }
            ION_DECIMAL => self.leaf(DECIMAL_LITERAL, mark),
            _ => self.leaf(FLOAT_LITERAL, mark),
        };
        Ok((production, node))
    }

    fn exponent(&mut self) -> Result<()> {
        self.next_char();
        if matches!(self.peek_char(), Some('+') | Some('-')) {
            self.next_char();
        }
        let digits = self.mark();
        self.scan_while(|c| c.is_ascii_digit());
        if self.since(digits).is_empty() {
            return Err(self.error("expected exponent digits"));
        }
        Ok(())
    }

    fn check_number_end(&self) -> Result<()> {
        match self.peek_char() {
            Some(c) if is_identifier_char(c) || c == '.' => {
                Err(self.error(&format!("unexpected character '{}' in number", c)))
            }
            _ => Ok(()),
        }
    }

    fn lob(&mut self) -> Result<(&'static str, SyntaxNode)> {
        let mark = self.mark();
        self.advance(2);
        self.skip_whitespace();
        if self.starts_with("\"") || self.starts_with("'''") {
            let text = if self.starts_with("\"") {
                self.short_string()?
            } else {
                self.long_string()?
            };
            self.skip_whitespace();
            self.expect("}}")?;
            return Ok((ION_CLOB, self.node(CLOB_LITERAL, mark, vec![text])));
        }
        self.scan_while(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=') || c.is_whitespace());
        self.expect("}}")?;
        Ok((ION_BLOB, self.leaf(BLOB_LITERAL, mark)))
    }

    fn list(&mut self) -> Result<SyntaxNode> {
        let mark = self.mark();
        self.next_char();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek_char() == Some(']') {
                self.next_char();
                break;
            }
            items.push(self.value()?);
            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some(']') => {}
                Some(_) => return Err(self.error("expected ',' or ']' in list")),
                None => return Err(self.error("unterminated list")),
            }
        }
        Ok(self.node(LIST_ITEMS, mark, items))
    }

    fn sexp(&mut self) -> Result<SyntaxNode> {
        let mark = self.mark();
        self.next_char();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some(')') => {
                    self.next_char();
                    break;
                }
                Some(_) => items.push(self.value()?),
                None => return Err(self.error("unterminated s-expression")),
            }
        }
        Ok(self.node(SEXP_ITEMS, mark, items))
    }

    fn property_name(&mut self) -> Result<SyntaxNode> {
        let mark = self.mark();
        let name = match self.peek_char() {
            Some(c) if is_identifier_start(c) => {
                self.scan_word();
                self.leaf(IDENTIFIER, mark)
            }
            Some('\'') if !self.starts_with("'''") => self.quoted_symbol()?,
            _ => return Err(self.error("expected a property name")),
        };
        Ok(self.node(PROPERTY_NAME, mark, vec![name]))
    }

    fn structure(&mut self) -> Result<SyntaxNode> {
        let mark = self.mark();
        self.next_char();
        let mut fields = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek_char() == Some('}') {
                self.next_char();
                break;
            }
            if self.at_end() {
                return Err(self.error("unterminated struct"));
            }
            let field = self.mark();
            let name = self.property_name()?;
            self.skip_whitespace();
            if self.starts_with("::") {
                return Err(self.error("property names cannot carry annotations"));
            }
            self.expect(":")?;
            let value = self.value()?;
            fields.push(self.node(STRUCT_FIELD, field, vec![name, value]));
            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some('}') => {}
                Some(_) => return Err(self.error("expected ',' or '}' in struct")),
                None => return Err(self.error("unterminated struct")),
            }
        }
        Ok(self.node(STRUCT_FIELDS, mark, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(text: &str) -> &'static str {
        recognize(ION_VALUE, text).unwrap().children()[0].symbol()
    }

    #[test]
    fn test_lexical_dispatch() {
        assert_eq!(kind_of("null"), ION_NULL);
        assert_eq!(kind_of("null.null"), ION_NULL);
        assert_eq!(kind_of("null.struct"), ION_STRUCT);
        assert_eq!(kind_of("TRUE"), ION_BOOL);
        assert_eq!(kind_of("-12_345"), ION_INT);
        assert_eq!(kind_of("-0b1010"), ION_INT);
        assert_eq!(kind_of("1.5e3"), ION_FLOAT);
        assert_eq!(kind_of("-inf"), ION_FLOAT);
        assert_eq!(kind_of("nan"), ION_FLOAT);
        assert_eq!(kind_of("54."), ION_DECIMAL);
        assert_eq!(kind_of("1.2D3"), ION_DECIMAL);
        assert_eq!(kind_of("2023T"), ION_TIMESTAMP);
        assert_eq!(kind_of("2023-05-17T10:30+02:00"), ION_TIMESTAMP);
        assert_eq!(kind_of("\"s\""), ION_STRING);
        assert_eq!(kind_of("'''a''' '''b'''"), ION_STRING);
        assert_eq!(kind_of("'sym'"), ION_SYMBOL);
        assert_eq!(kind_of("<=>"), ION_SYMBOL);
        assert_eq!(kind_of("infinity"), ION_SYMBOL);
        assert_eq!(kind_of("{{aGk=}}"), ION_BLOB);
        assert_eq!(kind_of("{{\"hi\"}}"), ION_CLOB);
        assert_eq!(kind_of("[1, 2]"), ION_LIST);
        assert_eq!(kind_of("(a + b)"), ION_SEXP);
        assert_eq!(kind_of("{a:1}"), ION_STRUCT);
    }

    #[test]
    fn test_annotations_are_collected() {
        let tree = recognize(ION_STRING, "a::'b c'::\"x\"").unwrap();
        let annotations = tree.find(ANNOTATION_LIST).unwrap();
        let texts: Vec<_> = annotations.children().iter().map(SyntaxNode::text).collect();
        assert_eq!(texts, vec!["a", "'b c'"]);
    }

    #[test]
    fn test_multiline_segments() {
        let tree = recognize(ION_STRING, "'''ab'''\n  '''cd'''").unwrap();
        let body = tree.find(MULTILINE_STRING).unwrap();
        assert_eq!(body.children().len(), 2);
        assert_eq!(body.children()[1].text(), "'''cd'''");
    }

    #[test]
    fn test_struct_fields() {
        let tree = recognize(ION_STRUCT, "{b:1, 'a b':x::2,}").unwrap();
        let fields = tree.find(STRUCT_FIELDS).unwrap();
        assert_eq!(fields.children().len(), 2);
        let second = &fields.children()[1];
        assert_eq!(second.children()[0].children()[0].symbol(), QUOTED_SYMBOL);
        assert_eq!(second.children()[1].symbol(), ION_INT);
    }

    #[test]
    fn test_sexp_splits_operators_and_identifiers() {
        let tree = recognize(ION_SEXP, "(a+b -1)").unwrap();
        let items = tree.find(SEXP_ITEMS).unwrap();
        let symbols: Vec<_> = items.children().iter().map(SyntaxNode::symbol).collect();
        assert_eq!(symbols, vec![ION_SYMBOL, ION_SYMBOL, ION_SYMBOL, ION_INT]);
    }

    #[test]
    fn test_errors_carry_position() {
        match recognize(ION_VALUE, "[1,\n 2 3]") {
            Err(Error::Syntax { line, col, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(col, 4);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
        assert!(matches!(
            recognize(ION_VALUE, "12abc"),
            Err(Error::Syntax { .. })
        ));
        assert!(matches!(
            recognize(ION_VALUE, "null.widget"),
            Err(Error::Syntax { .. })
        ));
    }

    #[test]
    fn test_kind_mismatch_and_unknown_symbol() {
        assert_eq!(
            recognize(ION_INT, "\"text\""),
            Err(Error::symbol_mismatch(ION_INT, ION_STRING))
        );
        assert!(matches!(
            recognize("ion-widget", "1"),
            Err(Error::Argument(_))
        ));
    }
}
