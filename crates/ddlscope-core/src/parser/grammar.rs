//! `CREATE TABLE` statement grammar.
//!
//! Hand-written recursive descent over [`Cursor`]. Alternatives backtrack by
//! resetting the cursor; each rule returns `None` when it does not match and
//! records what it expected so [`Cursor::error`] can report the furthest
//! failure.

use super::attributes::column_attributes;
use super::cursor::Cursor;
use super::nodes::{ColumnDef, CreateTableStatement, TableItem, TypeSpec};
use crate::error::{ParseError, ParseErrorKind};
use crate::model::{ConstraintKind, ForeignKeyReference, Length, ReferentialAction, TableConstraint};

#[cfg(feature = "tracing")]
use tracing::warn;

/// Table names may carry generic-looking suffixes such as `Sample<T>`.
const TABLE_NAME_EXTRA: &[char] = &['<', '>'];

/// Keyword runs that extend a type name, e.g. `DOUBLE PRECISION`.
const TYPE_MODIFIERS: &[&[&str]] = &[
    &["WITHOUT", "TIME", "ZONE"],
    &["WITH", "LOCAL", "TIME", "ZONE"],
    &["WITH", "TIME", "ZONE"],
    &["PRECISION"],
    &["VARYING"],
];

/// Parses exactly one `CREATE TABLE` statement.
///
/// Table options after the closing parenthesis are skipped. Statements after
/// the terminating `;` are ignored unless they are another `CREATE TABLE`.
pub(crate) fn parse_create_table(text: &str) -> Result<CreateTableStatement, ParseError> {
    let mut cursor = Cursor::new(text);
    let Some(statement) = create_table(&mut cursor) else {
        return Err(cursor.error());
    };

    while !cursor.is_eof() {
        let start = cursor.pos();
        if starts_create_table(&mut cursor) {
            #[cfg(feature = "tracing")]
            warn!(table = statement.name.as_str(), offset = start, "rejecting second CREATE TABLE");
            return Err(ParseError::at_offset(
                "only one CREATE TABLE statement is supported per input",
                text,
                start,
            )
            .with_kind(ParseErrorKind::MultipleStatements));
        }
        skip_statement(&mut cursor);
    }

    Ok(statement)
}

fn create_table(cursor: &mut Cursor<'_>) -> Option<CreateTableStatement> {
    cursor.expect_keyword("CREATE")?;
    cursor.eat_any_keyword(&["GLOBAL", "LOCAL"]);
    let temp = cursor.eat_any_keyword(&["TEMPORARY", "TEMP"]).is_some();
    cursor.expect_keyword("TABLE")?;
    cursor.eat_keywords(&["IF", "NOT", "EXISTS"]);
    let (schema, name) = qualified_name(cursor, TABLE_NAME_EXTRA)?;
    let items = table_items(cursor)?;
    skip_statement(cursor);

    Some(CreateTableStatement {
        temp,
        schema,
        name,
        items,
    })
}

fn starts_create_table(cursor: &mut Cursor<'_>) -> bool {
    let start = cursor.pos();
    let found = cursor.eat_keyword("CREATE") && {
        cursor.eat_any_keyword(&["GLOBAL", "LOCAL"]);
        cursor.eat_any_keyword(&["TEMPORARY", "TEMP"]);
        cursor.eat_keyword("TABLE")
    };
    cursor.reset(start);
    found
}

/// Skips to just past the next `;`, stopping early before a `CREATE TABLE`.
fn skip_statement(cursor: &mut Cursor<'_>) {
    while !cursor.is_eof() && !cursor.eat_char(';') && !starts_create_table(cursor) {
        cursor.skip_token();
    }
}

/// `[schema.]name`; deeper qualifiers fold into the schema part.
fn qualified_name(cursor: &mut Cursor<'_>, extra: &[char]) -> Option<(Option<String>, String)> {
    let mut parts = vec![cursor.identifier(extra).or_else(|| cursor.fail("table name"))?];
    while cursor.eat_char('.') {
        parts.push(cursor.identifier(extra).or_else(|| cursor.fail("table name"))?);
    }
    let name = parts.pop()?;
    let schema = (!parts.is_empty()).then(|| parts.join("."));
    Some((schema, name))
}

fn table_items(cursor: &mut Cursor<'_>) -> Option<Vec<TableItem>> {
    cursor.expect_char('(', "'('")?;
    let mut items = Vec::new();
    // A trailing comma before `)` is accepted.
    while !cursor.peek_char(')') {
        if let Some(item) = table_item(cursor)? {
            items.push(item);
        }
        if !cursor.eat_char(',') {
            break;
        }
    }
    cursor.expect_char(')', "',' or ')'")?;
    Some(items)
}

/// `Some(None)` for items that are recognized but carry nothing we keep.
fn table_item(cursor: &mut Cursor<'_>) -> Option<Option<TableItem>> {
    let start = cursor.pos();
    if ignored_item(cursor).is_some() {
        return Some(None);
    }
    cursor.reset(start);
    if let Some(constraint) = table_constraint(cursor) {
        return Some(Some(TableItem::Constraint(constraint)));
    }
    cursor.reset(start);
    column_def(cursor).map(|column| Some(TableItem::Column(column)))
}

/// Index declarations (`KEY idx (a)`, `FULLTEXT INDEX (b)`) and `CHECK`
/// constraints.
fn ignored_item(cursor: &mut Cursor<'_>) -> Option<()> {
    let start = cursor.pos();
    if cursor.eat_keyword("CONSTRAINT") {
        cursor.identifier(&[])?;
    }
    if cursor.eat_keyword("CHECK") {
        if !cursor.peek_char('(') {
            return None;
        }
        cursor.skip_to_item_end();
        return Some(());
    }
    cursor.reset(start);

    cursor.eat_any_keyword(&["FULLTEXT", "SPATIAL"]);
    cursor.eat_any_keyword(&["KEY", "INDEX"])?;
    if !cursor.peek_char('(') {
        cursor.identifier(&[])?;
    }
    if !cursor.peek_char('(') {
        return None;
    }
    cursor.skip_to_item_end();
    Some(())
}

fn table_constraint(cursor: &mut Cursor<'_>) -> Option<TableConstraint> {
    let mut name = None;
    if cursor.eat_keyword("CONSTRAINT") {
        name = Some(cursor.identifier(&[]).or_else(|| cursor.fail("constraint name"))?);
    }

    let kind = if cursor.eat_keywords(&["PRIMARY", "KEY"]) {
        ConstraintKind::PrimaryKey
    } else if cursor.eat_keyword("UNIQUE") {
        cursor.eat_any_keyword(&["KEY", "INDEX"]);
        ConstraintKind::Unique
    } else if cursor.eat_keywords(&["NOT", "NULL"]) {
        ConstraintKind::NotNull
    } else if cursor.eat_keywords(&["FOREIGN", "KEY"]) {
        ConstraintKind::ForeignKey
    } else if name.is_some() {
        return cursor.fail("PRIMARY KEY, UNIQUE, NOT NULL or FOREIGN KEY");
    } else {
        return None;
    };

    if !cursor.peek_char('(') {
        let inline_name = cursor.identifier(&[]).or_else(|| cursor.fail("'('"))?;
        name = name.or(Some(inline_name));
    }
    let columns = column_list(cursor)?;
    let references = match kind {
        ConstraintKind::ForeignKey => references_clause(cursor),
        _ => None,
    };
    // Index options such as `USING BTREE` or `DEFERRABLE`
    cursor.skip_to_item_end();

    Some(TableConstraint {
        name,
        kind,
        columns,
        references,
    })
}

fn column_list(cursor: &mut Cursor<'_>) -> Option<Vec<String>> {
    cursor.expect_char('(', "'('")?;
    let mut columns = Vec::new();
    loop {
        columns.push(cursor.identifier(&[]).or_else(|| cursor.fail("column name"))?);

        // MySQL index prefix length, e.g. `name(10)`
        let save = cursor.pos();
        if !(cursor.eat_char('(') && cursor.number().is_some() && cursor.eat_char(')')) {
            cursor.reset(save);
        }
        cursor.eat_any_keyword(&["ASC", "DESC"]);

        if !cursor.eat_char(',') {
            break;
        }
    }
    cursor.expect_char(')', "',' or ')'")?;
    Some(columns)
}

fn references_clause(cursor: &mut Cursor<'_>) -> Option<ForeignKeyReference> {
    let start = cursor.pos();
    if !cursor.eat_keyword("REFERENCES") {
        return None;
    }
    let reference = references_target(cursor);
    if reference.is_none() {
        cursor.reset(start);
    }
    reference
}

fn references_target(cursor: &mut Cursor<'_>) -> Option<ForeignKeyReference> {
    let (schema, table) = qualified_name(cursor, &[])?;
    let table = match schema {
        Some(schema) => format!("{schema}.{table}"),
        None => table,
    };
    let columns = if cursor.peek_char('(') {
        column_list(cursor)?
    } else {
        Vec::new()
    };

    let mut reference = ForeignKeyReference {
        table,
        columns,
        match_mode: None,
        on_delete: None,
        on_update: None,
    };

    if cursor.eat_keyword("MATCH") {
        reference.match_mode = cursor.word().map(str::to_uppercase);
    }

    loop {
        let save = cursor.pos();
        if !cursor.eat_keyword("ON") {
            break;
        }
        let event = cursor.eat_any_keyword(&["DELETE", "UPDATE"]);
        match (event, referential_action(cursor)) {
            (Some("DELETE"), Some(action)) => reference.on_delete = Some(action),
            (Some(_), Some(action)) => reference.on_update = Some(action),
            _ => {
                cursor.reset(save);
                break;
            }
        }
    }

    Some(reference)
}

fn referential_action(cursor: &mut Cursor<'_>) -> Option<ReferentialAction> {
    if cursor.eat_keyword("RESTRICT") {
        Some(ReferentialAction::Restrict)
    } else if cursor.eat_keyword("CASCADE") {
        Some(ReferentialAction::Cascade)
    } else if cursor.eat_keywords(&["SET", "NULL"]) {
        Some(ReferentialAction::SetNull)
    } else if cursor.eat_keywords(&["NO", "ACTION"]) {
        Some(ReferentialAction::NoAction)
    } else {
        None
    }
}

fn column_def(cursor: &mut Cursor<'_>) -> Option<ColumnDef> {
    let name = cursor
        .identifier(&[])
        .or_else(|| cursor.fail("column definition"))?;
    let data_type = type_spec(cursor).or_else(|| cursor.fail("data type"))?;
    let attributes = column_attributes(cursor);

    Some(ColumnDef {
        name,
        data_type,
        attributes,
    })
}

/// A data type: name words, optional `(length[, scale])`, MySQL
/// `UNSIGNED`/`ZEROFILL` and `[]` array markers.
pub(crate) fn type_spec(cursor: &mut Cursor<'_>) -> Option<TypeSpec> {
    let mut spec = TypeSpec {
        words: vec![cursor.word()?.to_string()],
        ..TypeSpec::default()
    };
    type_modifiers(cursor, &mut spec.words);

    if let Some((length, scale)) = length_group(cursor) {
        spec.length = Some(length);
        spec.scale = scale;
        // `TIMESTAMP(3) WITH TIME ZONE`
        type_modifiers(cursor, &mut spec.words);
    }

    loop {
        if !spec.unsigned && cursor.eat_keyword("UNSIGNED") {
            spec.unsigned = true;
        } else if !spec.zerofill && cursor.eat_keyword("ZEROFILL") {
            spec.zerofill = true;
        } else {
            break;
        }
    }

    spec.array_dimensional = array_brackets(cursor);
    Some(spec)
}

fn type_modifiers(cursor: &mut Cursor<'_>, words: &mut Vec<String>) {
    while let Some(modifier) = TYPE_MODIFIERS
        .iter()
        .find(|modifier| cursor.eat_keywords(modifier))
    {
        words.extend(modifier.iter().map(|word| word.to_string()));
    }
}

/// `(n)`, `(n, s)`, `(*)`, `(*, s)` with optional Oracle `CHAR`/`BYTE`
/// length semantics. Anything else (e.g. `enum('a')`) is left untouched.
fn length_group(cursor: &mut Cursor<'_>) -> Option<(Length, Option<u32>)> {
    let start = cursor.pos();
    let group = length_group_body(cursor);
    if group.is_none() {
        cursor.reset(start);
    }
    group
}

fn length_group_body(cursor: &mut Cursor<'_>) -> Option<(Length, Option<u32>)> {
    if !cursor.eat_char('(') {
        return None;
    }
    let length = if cursor.eat_char('*') {
        Length::Any
    } else {
        Length::Value(cursor.number()?)
    };
    let scale = if cursor.eat_char(',') {
        cursor.number()
    } else {
        None
    };
    cursor.eat_any_keyword(&["CHAR", "BYTE"]);
    if !cursor.eat_char(')') {
        return None;
    }
    Some((length, scale))
}

fn array_brackets(cursor: &mut Cursor<'_>) -> usize {
    let mut dimensions = 0;
    loop {
        let save = cursor.pos();
        if cursor.eat_char('[') {
            cursor.number();
            if cursor.eat_char(']') {
                dimensions += 1;
                continue;
            }
        }
        cursor.reset(save);
        return dimensions;
    }
}
