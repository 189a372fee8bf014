use std::ops::Index;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::Column;
use crate::error::DdlError;
use crate::render;
use crate::types::{BigQueryField, NameCase};

/// Columns in declaration order, looked up case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: IndexMap<String, Column>,
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `column`. A column whose name differs only in case replaces
    /// the earlier one in place and is returned.
    pub fn insert(&mut self, column: Column) -> Option<Column> {
        self.entries.insert(key(column.name()), column)
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.entries.get(&key(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.entries.get_mut(&key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&key(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Column> {
        self.entries.values_mut()
    }

    /// Lower-cased lookup keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn bigquery_fields(&self, case: NameCase) -> Result<Vec<BigQueryField>, DdlError> {
        self.iter().map(|column| column.bigquery_field(case)).collect()
    }

    /// BigQuery JSON schema: a compact array of field objects.
    pub fn to_bigquery_fields(&self, case: NameCase) -> Result<String, DdlError> {
        let fields = self.bigquery_fields(case)?;
        Ok(render::to_json(&fields))
    }
}

impl Index<&str> for ColumnMap {
    type Output = Column;

    fn index(&self, name: &str) -> &Column {
        match self.get(name) {
            Some(column) => column,
            None => panic!("no column named '{name}'"),
        }
    }
}

impl<'a> IntoIterator for &'a ColumnMap {
    type Item = &'a Column;
    type IntoIter = indexmap::map::Values<'a, String, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColumnMap {
        let mut columns = ColumnMap::new();
        columns.insert(Column::new("Col_01", "int"));
        columns.insert(Column::new("Col_02", "text"));
        columns
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let columns = sample();
        for name in ["col_01", "COL_01", "Col_01"] {
            assert_eq!(columns[name].name(), "Col_01");
        }
        assert!(columns.get("col_03").is_none());
        assert!(columns.contains("COL_02"));
    }

    #[test]
    fn keeps_declaration_order() {
        let columns = sample();
        let names: Vec<&str> = columns.iter().map(Column::name).collect();
        assert_eq!(names, vec!["Col_01", "Col_02"]);
        assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["col_01", "col_02"]);
    }

    #[test]
    fn duplicate_name_replaces_in_place() {
        let mut columns = sample();
        let previous = columns.insert(Column::new("COL_01", "bigint"));
        assert_eq!(previous.map(|c| c.data_type().to_string()), Some("INT".to_string()));
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.iter().next().map(Column::data_type), Some("BIGINT"));
    }

    #[test]
    #[should_panic(expected = "no column named 'missing'")]
    fn index_panics_on_missing_column() {
        let _ = &sample()["missing"];
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["name"], "Col_02");
    }
}
