//! Typed CSV ingestion.
//!
//! A [`Table`] maps the raw value of the `SID` column to a [`TypedRecord`]
//! whose cells have each been typed independently as integer, float or text.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{GradeError, Result};

/// Column every score sheet is keyed by.
pub const KEY_COLUMN: &str = "SID";

/// A single typed cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Types a raw cell.
    ///
    /// Empty stays empty text. A value with a `.` is tried as a float,
    /// anything else as an integer; on failure the original text is kept.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return FieldValue::Text(String::new());
        }

        let trimmed = raw.trim();
        let parsed = if raw.contains('.') {
            trimmed.parse::<f64>().ok().map(FieldValue::Float)
        } else {
            trimmed.parse::<i64>().ok().map(FieldValue::Integer)
        };

        parsed.unwrap_or_else(|| FieldValue::Text(raw.to_string()))
    }

    /// Numeric view of the cell. Text is never numeric, even if it looks it.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x:?}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One row of a table, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypedRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl TypedRecord {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for TypedRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TypedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (column, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                FieldValue::Text(s) => write!(f, "{column:?}: {s:?}")?,
                other => write!(f, "{column:?}: {other}")?,
            }
        }
        write!(f, "}}")
    }
}

/// Rows of one CSV file indexed by their `SID` value.
#[derive(Debug, Clone)]
pub struct Table {
    source: PathBuf,
    rows: HashMap<String, TypedRecord>,
}

impl Table {
    /// Loads and types a CSV file.
    ///
    /// # Errors
    ///
    /// [`GradeError::NotFound`] if the file is missing,
    /// [`GradeError::MissingColumn`] if there is no `SID` header and
    /// [`GradeError::Csv`] for malformed content.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GradeError::io(path, e))?;
        let table = Self::from_reader(path, file)?;

        info!(rows = table.len(), "Table loaded");
        Ok(table)
    }

    /// Builds a table from any reader. `source` labels the table in errors.
    pub fn from_reader<R: Read>(source: impl Into<PathBuf>, reader: R) -> Result<Self> {
        let source = source.into();
        let mut rdr = csv::Reader::from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| GradeError::csv(&source, e))?
            .clone();

        let key_idx = headers
            .iter()
            .collect::<Vec<_>>()
            .iter()
            .rposition(|h| *h == KEY_COLUMN)
            .ok_or_else(|| GradeError::MissingColumn {
                path: source.clone(),
                column: KEY_COLUMN.to_string(),
            })?;

        let mut rows = HashMap::new();

        for result in rdr.records() {
            let row = result.map_err(|e| GradeError::csv(&source, e))?;
            let key = row.get(key_idx).unwrap_or_default().to_string();

            let record: TypedRecord = headers
                .iter()
                .zip(row.iter())
                .map(|(column, cell)| (column.to_string(), FieldValue::infer(cell)))
                .collect();

            if rows.insert(key.clone(), record).is_some() {
                debug!(sid = %key, source = %source.display(), "Duplicate SID, keeping last row");
            }
        }

        Ok(Self { source, rows })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn get(&self, key: &str) -> Option<&TypedRecord> {
        self.rows.get(key)
    }

    /// Looks up a key, failing with [`GradeError::MissingKey`] when absent.
    pub fn require(&self, key: &str) -> Result<&TypedRecord> {
        self.rows.get(key).ok_or_else(|| GradeError::MissingKey {
            table: self.source.display().to_string(),
            key: key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedRecord)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn table(csv: &str) -> Result<Table> {
        Table::from_reader("inline.csv", csv.as_bytes())
    }

    #[test]
    fn test_infer_empty_stays_text() {
        assert_eq!(FieldValue::infer(""), FieldValue::Text(String::new()));
        assert!(FieldValue::infer("").is_empty_text());
    }

    #[test]
    fn test_infer_integer() {
        assert_eq!(FieldValue::infer("42"), FieldValue::Integer(42));
        assert_eq!(FieldValue::infer("-7"), FieldValue::Integer(-7));
        assert_eq!(FieldValue::infer(" 12 "), FieldValue::Integer(12));
    }

    #[test]
    fn test_infer_float() {
        assert_eq!(FieldValue::infer("87.5"), FieldValue::Float(87.5));
        assert_eq!(FieldValue::infer("10.0"), FieldValue::Float(10.0));
        assert_eq!(FieldValue::infer(".5"), FieldValue::Float(0.5));
    }

    #[test]
    fn test_infer_text() {
        assert_eq!(FieldValue::infer("abc"), FieldValue::Text("abc".into()));
        assert_eq!(
            FieldValue::infer("abc.def"),
            FieldValue::Text("abc.def".into())
        );
        // exponent without a dot is not an integer
        assert_eq!(FieldValue::infer("1e5"), FieldValue::Text("1e5".into()));
        assert_eq!(FieldValue::infer("   "), FieldValue::Text("   ".into()));
    }

    #[test]
    fn test_text_is_not_numeric() {
        assert_eq!(FieldValue::Text("12".into()).as_f64(), None);
        assert_eq!(FieldValue::Integer(12).as_f64(), Some(12.0));
    }

    #[test]
    fn test_load_indexes_by_sid() {
        let t = table("SID,Grade\nabc,20\nxyz,17.5\n").unwrap();

        assert_eq!(t.len(), 2);
        let abc = t.get("abc").unwrap();
        assert_eq!(abc.get("Grade"), Some(&FieldValue::Integer(20)));
        assert_eq!(abc.get("SID"), Some(&FieldValue::Text("abc".into())));
        assert_eq!(
            t.get("xyz").unwrap().get("Grade"),
            Some(&FieldValue::Float(17.5))
        );
    }

    #[test]
    fn test_numeric_sid_key_is_raw_string() {
        let t = table("SID,Grade\n0042,9\n").unwrap();
        assert!(t.get("0042").is_some());
        assert_eq!(
            t.get("0042").unwrap().get("SID"),
            Some(&FieldValue::Integer(42))
        );
    }

    #[test]
    fn test_empty_cell_preserved() {
        let t = table("SID,Homework 1,Exam\nabc,,80\n").unwrap();
        let rec = t.get("abc").unwrap();
        assert_eq!(rec.get("Homework 1"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn test_missing_sid_column() {
        let err = table("NetID,Grade\nabc,20\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.to_string().contains("SID"));
    }

    #[test]
    fn test_duplicate_sid_keeps_last() {
        let t = table("SID,Grade\nabc,1\nabc,2\n").unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("abc").unwrap().get("Grade"), Some(&FieldValue::Integer(2)));
    }

    #[test]
    fn test_repeated_sid_header_uses_last_column() {
        let t = table("SID,Grade,SID\nfirst,1,last\n").unwrap();

        assert!(t.get("first").is_none());
        let rec = t.get("last").unwrap();
        assert_eq!(rec.get("SID"), Some(&FieldValue::Text("last".into())));
    }

    #[test]
    fn test_require_missing_key() {
        let t = table("SID,Grade\nabc,1\n").unwrap();
        let err = t.require("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let err = table("SID,Grade\nabc,1,extra\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Table::load("definitely/not/here.csv").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_record_display_cites_fields() {
        let t = table("SID,Grade\nabc,20\n").unwrap();
        let shown = t.get("abc").unwrap().to_string();
        assert_eq!(shown, r#"{"Grade": 20, "SID": "abc"}"#);
    }
}
