//! Student roster loading.
//!
//! The roster is a JSON array of objects:
//! ```json
//! [
//!   { "Name": "Ada Lovelace", "ID": 1001, "NetID": "ALove", "Group": 1 }
//! ]
//! ```

use std::fmt;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{GradeError, Result};

/// Value of the roster `ID` field, carried through to reports as-is.
///
/// Reports render booleans as `True`/`False`, floats with at least one
/// decimal or a signed two-digit exponent (`1e+16`), and null as an empty
/// cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StudentId(pub Value);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => Ok(()),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::String(s) => write!(f, "{s}"),
            Value::Number(n) if n.is_f64() => match n.as_f64() {
                Some(x) => f.write_str(&format_float(x)),
                None => write!(f, "{n}"),
            },
            other => write!(f, "{other}"),
        }
    }
}

/// Shortest round-trip float text, positional for exponents in `-4..16`
/// and scientific (`1.5e-05`, `1e+16`) outside it.
fn format_float(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }

    let sci = format!("{x:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..16).contains(&exp) {
        let mut positional = x.to_string();
        if !positional.contains('.') {
            positional.push_str(".0");
        }
        positional
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}

impl From<i64> for StudentId {
    fn from(id: i64) -> Self {
        StudentId(Value::from(id))
    }
}

impl From<i32> for StudentId {
    fn from(id: i32) -> Self {
        StudentId(Value::from(id))
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        StudentId(Value::from(id))
    }
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentIdentity {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: StudentId,
    #[serde(rename = "NetID", skip_serializing_if = "Option::is_none")]
    pub net_id: Option<String>,
    #[serde(rename = "Group", skip_serializing_if = "Option::is_none")]
    pub group: Option<Value>,
}

impl StudentIdentity {
    pub fn new(name: &str, id: impl Into<StudentId>, net_id: &str, group: i64) -> Self {
        Self {
            name: name.to_string(),
            id: id.into(),
            net_id: Some(net_id.to_string()),
            group: Some(Value::from(group)),
        }
    }

    /// Builds an identity from one roster object.
    ///
    /// `Name` must be a string and `ID` must be present. `NetID` may be
    /// absent here (the joiner rejects it) but must be a string if given.
    pub fn from_json(value: &Value) -> Result<Self> {
        let record = value.to_string();
        let obj = value.as_object().ok_or_else(|| GradeError::InvalidField {
            field: "roster entry".to_string(),
            value: record.clone(),
            record: record.clone(),
        })?;

        let name = match require(obj, "Name", &record)? {
            Value::String(s) => s.clone(),
            other => return Err(invalid("Name", other, &record)),
        };
        let id = StudentId(require(obj, "ID", &record)?.clone());

        let net_id = match obj.get("NetID") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => return Err(invalid("NetID", other, &record)),
        };

        Ok(Self {
            name,
            id,
            net_id,
            group: obj.get("Group").cloned(),
        })
    }
}

impl fmt::Display for StudentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

fn require<'a>(obj: &'a Map<String, Value>, field: &str, record: &str) -> Result<&'a Value> {
    obj.get(field).ok_or_else(|| GradeError::MissingField {
        field: field.to_string(),
        record: record.to_string(),
    })
}

fn invalid(field: &str, value: &Value, record: &str) -> GradeError {
    GradeError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
        record: record.to_string(),
    }
}

/// Parses a roster from JSON text. `source` labels parse errors.
pub fn parse_roster(source: &Path, content: &str) -> Result<Vec<StudentIdentity>> {
    let entries: Vec<Value> =
        serde_json::from_str(content).map_err(|e| GradeError::Json {
            path: source.to_path_buf(),
            source: e,
        })?;

    entries.iter().map(StudentIdentity::from_json).collect()
}

/// Reads the roster file wholesale.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<StudentIdentity>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| GradeError::io(path, e))?;
    let students = parse_roster(path, &content)?;

    info!(students = students.len(), "Roster loaded");
    Ok(students)
}
