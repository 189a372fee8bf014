//! Lexical primitives over DDL text.
//!
//! A [`Cursor`] walks the source by byte offset. Every `eat_*` method first
//! skips whitespace and comments, and either consumes a match or leaves the
//! position where the match was attempted. Callers backtrack with
//! [`Cursor::reset`]. Failed expectations are recorded at the furthest offset
//! reached so the final error points at the most specific location.

use std::cmp::Ordering;

use crate::error::{ParseError, ParseErrorKind};

pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    furthest: usize,
    expected: Vec<&'static str>,
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            furthest: 0,
            expected: Vec::new(),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn slice(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn is_eof(&mut self) -> bool {
        self.skip_trivia();
        self.pos >= self.text.len()
    }

    /// Skips whitespace, `-- line` comments and `/* block */` comments.
    pub fn skip_trivia(&mut self) {
        loop {
            let remaining = self.rest();

            let ws: usize = remaining
                .chars()
                .take_while(|c| c.is_whitespace())
                .map(char::len_utf8)
                .sum();
            if ws > 0 {
                self.pos += ws;
                continue;
            }

            if let Some(body) = remaining.strip_prefix("/*") {
                // Unclosed comment runs to end of input
                self.pos += body.find("*/").map_or(remaining.len(), |end| 2 + end + 2);
                continue;
            }

            if remaining.starts_with("--") {
                self.pos += remaining.find('\n').map_or(remaining.len(), |nl| nl + 1);
                continue;
            }

            break;
        }
    }

    /// Runs `matched` after skipping trivia; on `None` the cursor is left
    /// where it was, otherwise it advances by the returned byte count.
    fn eat_with(&mut self, matched: impl FnOnce(&str) -> Option<usize>) -> bool {
        let start = self.pos;
        self.skip_trivia();
        match matched(self.rest()) {
            Some(len) => {
                self.pos += len;
                true
            }
            None => {
                self.pos = start;
                false
            }
        }
    }

    pub fn peek_char(&mut self, expected: char) -> bool {
        let start = self.pos;
        let found = self.eat_char(expected);
        self.pos = start;
        found
    }

    pub fn eat_char(&mut self, expected: char) -> bool {
        self.eat_with(|rest| rest.starts_with(expected).then(|| expected.len_utf8()))
    }

    pub fn eat_str(&mut self, expected: &str) -> bool {
        self.eat_with(|rest| rest.starts_with(expected).then_some(expected.len()))
    }

    /// Matches `keyword` case-insensitively as a whole word.
    pub fn peek_keyword(&mut self, keyword: &str) -> bool {
        let start = self.pos;
        let found = self.eat_keyword(keyword);
        self.pos = start;
        found
    }

    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.eat_with(|rest| {
            let head_matches = rest
                .get(..keyword.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(keyword));
            let boundary = !rest
                .get(keyword.len()..)
                .and_then(|tail| tail.chars().next())
                .is_some_and(is_word_char);
            (head_matches && boundary).then_some(keyword.len())
        })
    }

    /// Matches a keyword sequence such as `NOT NULL`; consumes nothing on failure.
    pub fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        let start = self.pos;
        for keyword in keywords {
            if !self.eat_keyword(keyword) {
                self.pos = start;
                return false;
            }
        }
        true
    }

    pub fn eat_any_keyword(&mut self, keywords: &[&'static str]) -> Option<&'static str> {
        keywords.iter().copied().find(|kw| self.eat_keyword(kw))
    }

    pub fn expect_keyword(&mut self, keyword: &'static str) -> Option<()> {
        if self.eat_keyword(keyword) {
            Some(())
        } else {
            self.fail(keyword)
        }
    }

    pub fn expect_char(&mut self, expected: char, description: &'static str) -> Option<()> {
        if self.eat_char(expected) {
            Some(())
        } else {
            self.fail(description)
        }
    }

    /// A run of letters, digits and underscores.
    pub fn word(&mut self) -> Option<&'a str> {
        self.skip_trivia();
        let len: usize = self
            .rest()
            .chars()
            .take_while(|&c| is_word_char(c))
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        Some(self.slice(start))
    }

    /// An identifier, either quoted with backticks/double quotes or a bare run
    /// of word characters (plus any of `extra`).
    ///
    /// Quoted identifiers may contain any character; a doubled closing quote
    /// stands for itself.
    pub fn identifier(&mut self, extra: &[char]) -> Option<String> {
        self.skip_trivia();
        let rest = self.rest();
        match rest.chars().next() {
            Some(quote @ ('`' | '"')) => {
                let len = quoted_len(rest, quote, false)?;
                self.pos += len;
                let doubled = format!("{quote}{quote}");
                Some(rest[1..len - 1].replace(&doubled, &quote.to_string()))
            }
            Some(_) => {
                let len: usize = rest
                    .chars()
                    .take_while(|&c| is_word_char(c) || extra.contains(&c))
                    .map(char::len_utf8)
                    .sum();
                if len == 0 {
                    return None;
                }
                self.pos += len;
                Some(rest[..len].to_string())
            }
            None => None,
        }
    }

    /// The raw contents of a string literal delimited by `quote`.
    ///
    /// Backslash escapes and doubled quotes are kept verbatim.
    pub fn quoted(&mut self, quote: char) -> Option<&'a str> {
        self.skip_trivia();
        let rest = self.rest();
        if !rest.starts_with(quote) {
            return None;
        }
        let Some(len) = quoted_len(rest, quote, true) else {
            return self.fail("closing quote");
        };
        self.pos += len;
        Some(&rest[quote.len_utf8()..len - quote.len_utf8()])
    }

    /// An unsigned integer. Values beyond `u32::MAX` saturate.
    pub fn number(&mut self) -> Option<u32> {
        let start = self.pos;
        self.skip_trivia();
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            self.pos = start;
            return None;
        }
        // Only an overflow can fail on an all-digit run.
        let value = self.rest()[..digits].parse().unwrap_or(u32::MAX);
        self.pos += digits;
        Some(value)
    }

    /// An unquoted value token. Parenthesized groups and quoted strings are
    /// taken whole; the token ends at whitespace, a comment, `,` or an
    /// unbalanced `)`. With `stop_at_cast`, it also ends before `::`.
    pub fn bare_token(&mut self, stop_at_cast: bool) -> Option<&'a str> {
        self.skip_trivia();
        let rest = self.rest();
        let mut depth = 0usize;
        let mut i = 0;
        while let Some(c) = rest[i..].chars().next() {
            let tail = &rest[i..];
            if depth == 0
                && (c.is_whitespace()
                    || c == ','
                    || c == ')'
                    || tail.starts_with("--")
                    || tail.starts_with("/*")
                    || (stop_at_cast && tail.starts_with("::")))
            {
                break;
            }
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                '\'' | '"' | '`' => {
                    i += quoted_len(tail, c, c != '`').unwrap_or(tail.len());
                    continue;
                }
                _ => {}
            }
            i += c.len_utf8();
        }
        if i == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += i;
        Some(self.slice(start))
    }

    /// True at `,`, `)` or end of input: the boundary of a table item.
    pub fn at_item_end(&mut self) -> bool {
        self.skip_trivia();
        matches!(self.rest().chars().next(), None | Some(',' | ')'))
    }

    /// Consumes one unit of text nobody claimed: a quoted literal, a
    /// parenthesized group, a word, or a single character.
    pub fn skip_token(&mut self) -> bool {
        self.skip_trivia();
        let rest = self.rest();
        let Some(c) = rest.chars().next() else {
            return false;
        };
        self.pos += match c {
            '\'' | '"' | '`' => quoted_len(rest, c, c != '`').unwrap_or(rest.len()),
            '(' => group_len(rest),
            c if is_word_char(c) => rest
                .chars()
                .take_while(|&c| is_word_char(c))
                .map(char::len_utf8)
                .sum(),
            c => c.len_utf8(),
        };
        true
    }

    /// Skips unclaimed text up to the end of the current table item.
    pub fn skip_to_item_end(&mut self) {
        while !self.at_item_end() {
            self.skip_token();
        }
    }

    /// Records that `expected` was required at the current position.
    pub fn fail<T>(&mut self, expected: &'static str) -> Option<T> {
        self.skip_trivia();
        match self.pos.cmp(&self.furthest) {
            Ordering::Greater => {
                self.furthest = self.pos;
                self.expected = vec![expected];
            }
            Ordering::Equal => {
                if !self.expected.contains(&expected) {
                    self.expected.push(expected);
                }
            }
            Ordering::Less => {}
        }
        None
    }

    /// Builds the error for the furthest failed expectation.
    pub fn error(&self) -> ParseError {
        let expected = match self.expected.as_slice() {
            [] => "CREATE TABLE statement".to_string(),
            [one] => (*one).to_string(),
            many => format!("one of {}", many.join(", ")),
        };
        let keywords_only = !self.expected.is_empty()
            && self
                .expected
                .iter()
                .all(|e| e.chars().all(|c| c.is_ascii_uppercase() || c == ' '));

        let found = self.text[self.furthest..].split_whitespace().next();
        let (message, kind) = match found {
            Some(token) => {
                let token: String = token.chars().take(20).collect();
                let kind = if keywords_only {
                    ParseErrorKind::MissingClause
                } else {
                    ParseErrorKind::SyntaxError
                };
                (format!("expected {expected}, found '{token}'"), kind)
            }
            None => (
                format!("expected {expected}, found end of input"),
                ParseErrorKind::UnexpectedEof,
            ),
        };
        ParseError::at_offset(message, self.text, self.furthest).with_kind(kind)
    }
}

/// Byte length of the quoted literal opening `s`, both quotes included.
/// Returns `None` when the closing quote is missing.
fn quoted_len(s: &str, quote: char, backslash_escapes: bool) -> Option<usize> {
    let mut chars = s.char_indices().skip(1).peekable();
    while let Some((idx, c)) = chars.next() {
        if backslash_escapes && c == '\\' {
            chars.next();
            continue;
        }
        if c == quote {
            if chars.peek().is_some_and(|&(_, next)| next == quote) {
                chars.next();
                continue;
            }
            return Some(idx + c.len_utf8());
        }
    }
    None
}

/// Byte length of the balanced parenthesized group opening `s`.
fn group_len(s: &str) -> usize {
    let mut depth = 0usize;
    let mut i = 0;
    while let Some(c) = s[i..].chars().next() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            '\'' | '"' | '`' => {
                i += quoted_len(&s[i..], c, c != '`').unwrap_or(s.len() - i);
                continue;
            }
            _ => {}
        }
        i += c.len_utf8();
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_and_comments() {
        let mut cursor = Cursor::new("  -- note\n /* block */ CREATE");
        assert!(cursor.eat_keyword("create"));
        assert!(cursor.is_eof());
    }

    #[test]
    fn unclosed_block_comment_runs_to_end() {
        let mut cursor = Cursor::new("/* never closed");
        assert!(cursor.is_eof());
    }

    #[test]
    fn keyword_requires_word_boundary() {
        let mut cursor = Cursor::new("unique_id int");
        assert!(!cursor.eat_keyword("UNIQUE"));
        assert_eq!(cursor.word(), Some("unique_id"));
    }

    #[test]
    fn keyword_sequence_backtracks() {
        let mut cursor = Cursor::new("NOT DEFERRABLE");
        assert!(!cursor.eat_keywords(&["NOT", "NULL"]));
        assert_eq!(cursor.pos(), 0);
        assert!(cursor.eat_keywords(&["not", "deferrable"]));
    }

    #[test]
    fn quoted_identifiers() {
        let mut cursor = Cursor::new("`Col_01` \"Col 05\" \"a\"\"b\" Sample<T>");
        assert_eq!(cursor.identifier(&[]).as_deref(), Some("Col_01"));
        assert_eq!(cursor.identifier(&[]).as_deref(), Some("Col 05"));
        assert_eq!(cursor.identifier(&[]).as_deref(), Some("a\"b"));
        assert_eq!(cursor.identifier(&['<', '>']).as_deref(), Some("Sample<T>"));
    }

    #[test]
    fn quoted_value_keeps_escapes_raw() {
        let mut cursor = Cursor::new(r"'a\'bc' 'it''s' ''");
        assert_eq!(cursor.quoted('\''), Some(r"a\'bc"));
        assert_eq!(cursor.quoted('\''), Some("it''s"));
        assert_eq!(cursor.quoted('\''), Some(""));
    }

    #[test]
    fn unterminated_quote_fails() {
        let mut cursor = Cursor::new("'abc");
        assert_eq!(cursor.quoted('\''), None);
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn bare_token_balances_parentheses() {
        let mut cursor = Cursor::new("nextval('seq'::regclass) NOT NULL");
        assert_eq!(cursor.bare_token(false), Some("nextval('seq'::regclass)"));
        assert!(cursor.eat_keywords(&["NOT", "NULL"]));
    }

    #[test]
    fn bare_token_stops_at_item_end() {
        let mut cursor = Cursor::new("0,");
        assert_eq!(cursor.bare_token(false), Some("0"));
        assert!(cursor.at_item_end());

        let mut cursor = Cursor::new("CURRENT_TIMESTAMP)");
        assert_eq!(cursor.bare_token(false), Some("CURRENT_TIMESTAMP"));
        assert!(cursor.at_item_end());
    }

    #[test]
    fn bare_token_can_stop_before_cast() {
        let mut cursor = Cursor::new("0::integer");
        assert_eq!(cursor.bare_token(true), Some("0"));
        assert!(cursor.eat_str("::"));
    }

    #[test]
    fn number_saturates_on_overflow() {
        let mut cursor = Cursor::new("99999999999, 2");
        assert_eq!(cursor.number(), Some(u32::MAX));
        assert!(cursor.eat_char(','));
        assert_eq!(cursor.number(), Some(2));
    }

    #[test]
    fn failed_matches_leave_trivia_unconsumed() {
        let mut cursor = Cursor::new("x  -- note\n  , y");
        assert_eq!(cursor.word(), Some("x"));
        let end = cursor.pos();

        assert!(!cursor.eat_keyword("UNSIGNED"));
        assert!(!cursor.eat_char('['));
        assert!(!cursor.eat_str("::"));
        assert_eq!(cursor.number(), None);
        assert!(!cursor.peek_keyword("ZEROFILL"));
        assert!(cursor.peek_char(','));
        assert_eq!(cursor.pos(), end);

        assert!(cursor.eat_char(','));
        assert_eq!(cursor.word(), Some("y"));
    }

    #[test]
    fn skip_token_consumes_groups_and_literals() {
        let mut cursor = Cursor::new("enum('a', 'b)') ON UPDATE x, next");
        assert!(cursor.skip_token());
        assert!(cursor.skip_token());
        assert!(cursor.peek_keyword("ON"));
        cursor.skip_to_item_end();
        assert!(cursor.eat_char(','));
    }

    #[test]
    fn error_reports_furthest_failure() {
        let mut cursor = Cursor::new("CREATE TABEL t");
        assert!(cursor.eat_keyword("CREATE"));
        let _ = cursor.fail::<()>("TABLE");
        cursor.reset(0);
        let _ = cursor.fail::<()>("CREATE");
        let err = cursor.error();
        assert_eq!(err.message, "expected TABLE, found 'TABEL'");
        assert_eq!(err.kind, ParseErrorKind::MissingClause);
        assert_eq!(err.position.map(|p| p.column), Some(8));
    }

    #[test]
    fn error_at_end_of_input() {
        let mut cursor = Cursor::new("CREATE TABLE t (");
        cursor.reset(16);
        let _ = cursor.fail::<()>("column definition");
        let err = cursor.error();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert!(err.message.ends_with("found end of input"));
    }
}
