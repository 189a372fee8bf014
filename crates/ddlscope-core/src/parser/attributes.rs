//! Free-order column attribute clause.
//!
//! Column attributes (`NOT NULL`, `DEFAULT ...`, `COMMENT ...`, ...) may
//! appear in any order, each at most once. [`EachOnce`] tries a fixed set of
//! sub-parsers against the input until none of the unused ones matches.

use super::cursor::Cursor;
use super::grammar::type_spec;
use super::nodes::{ColumnAttributes, KeyMarker, Nullability};

/// A sub-parser: consumes its clause and records it into `S`, or returns
/// `false` without touching `S`.
pub(crate) type AttributeParser<S> = fn(&mut Cursor<'_>, &mut S) -> bool;

pub(crate) struct EachOnce<'p, S> {
    parsers: &'p [AttributeParser<S>],
    used: Vec<bool>,
}

impl<'p, S> EachOnce<'p, S> {
    pub fn new(parsers: &'p [AttributeParser<S>]) -> Self {
        Self {
            parsers,
            used: vec![false; parsers.len()],
        }
    }

    /// Applies the first unused sub-parser that matches at the cursor.
    pub fn step(&mut self, cursor: &mut Cursor<'_>, state: &mut S) -> bool {
        for (parser, used) in self.parsers.iter().zip(self.used.iter_mut()) {
            if *used {
                continue;
            }
            let start = cursor.pos();
            if parser(cursor, state) {
                *used = true;
                return true;
            }
            cursor.reset(start);
        }
        false
    }
}

const COLUMN_ATTRIBUTES: &[AttributeParser<ColumnAttributes>] = &[
    nullability,
    auto_increment,
    key_marker,
    default_value,
    comment,
    encode,
    distkey,
    sortkey,
    character_set,
];

/// Reads attributes up to the end of the column item. Text no sub-parser
/// claims (`COLLATE x`, `ON UPDATE ...`, a repeated attribute) is skipped.
pub(crate) fn column_attributes(cursor: &mut Cursor<'_>) -> ColumnAttributes {
    let mut attributes = ColumnAttributes::default();
    let mut each = EachOnce::new(COLUMN_ATTRIBUTES);
    loop {
        if each.step(cursor, &mut attributes) {
            continue;
        }
        if cursor.at_item_end() {
            break;
        }
        cursor.skip_token();
    }
    attributes
}

fn nullability(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    let value = if cursor.eat_keywords(&["NOT", "NULL"]) {
        Nullability::NotNull
    } else if cursor.eat_keyword("NULL") {
        Nullability::Null
    } else {
        return false;
    };
    attributes.nullability = Some(value);
    true
}

fn auto_increment(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    if cursor
        .eat_any_keyword(&["AUTO_INCREMENT", "AUTOINCREMENT"])
        .is_none()
    {
        return false;
    }
    attributes.auto_increment = true;
    true
}

fn key_marker(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    let marker = if cursor.eat_keyword("PRIMARY") {
        KeyMarker::Primary
    } else if cursor.eat_keyword("UNIQUE") {
        KeyMarker::Unique
    } else {
        return false;
    };
    cursor.eat_keyword("KEY");
    attributes.key = Some(marker);
    true
}

fn default_value(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    if !cursor.eat_keyword("DEFAULT") {
        return false;
    }
    match value(cursor) {
        Some(value) => {
            attributes.default = Some(value);
            true
        }
        None => false,
    }
}

fn comment(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    if !cursor.eat_keyword("COMMENT") {
        return false;
    }
    match value(cursor) {
        Some(value) => {
            // `COMMENT ''` carries no description.
            attributes.comment = (!value.is_empty()).then_some(value);
            true
        }
        None => false,
    }
}

fn encode(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    if !cursor.eat_keyword("ENCODE") {
        return false;
    }
    match cursor.word() {
        Some(codec) => {
            attributes.encode = Some(codec.to_string());
            true
        }
        None => false,
    }
}

fn distkey(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    if !cursor.eat_keyword("DISTKEY") {
        return false;
    }
    attributes.distkey = true;
    true
}

fn sortkey(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    if !cursor.eat_keyword("SORTKEY") {
        return false;
    }
    attributes.sortkey = true;
    true
}

fn character_set(cursor: &mut Cursor<'_>, attributes: &mut ColumnAttributes) -> bool {
    if !(cursor.eat_keywords(&["CHARACTER", "SET"]) || cursor.eat_keyword("CHARSET")) {
        return false;
    }
    cursor.eat_char('=');
    match cursor.identifier(&[]) {
        Some(name) => {
            attributes.character_set = Some(name);
            true
        }
        None => false,
    }
}

/// An attribute value, tried in priority order: a `::` cast expression
/// (kept verbatim, quotes included), a single-quoted string, a
/// double-quoted string, then a bare token. Quoted strings yield their raw
/// contents.
pub(crate) fn value(cursor: &mut Cursor<'_>) -> Option<String> {
    let start = cursor.pos();
    if let Some(cast) = cast_expression(cursor) {
        return Some(cast);
    }
    cursor.reset(start);

    if let Some(text) = cursor.quoted('\'').or_else(|| cursor.quoted('"')) {
        return Some(text.to_string());
    }
    cursor.bare_token(false).map(str::to_string)
}

fn cast_expression(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.skip_trivia();
    let start = cursor.pos();
    cursor
        .quoted('\'')
        .or_else(|| cursor.quoted('"'))
        .or_else(|| cursor.bare_token(true))?;

    let mut casts = 0;
    loop {
        let save = cursor.pos();
        if !(cursor.eat_str("::") && type_spec(cursor).is_some()) {
            cursor.reset(save);
            break;
        }
        casts += 1;
    }

    (casts > 0).then(|| cursor.slice(start).to_string())
}
