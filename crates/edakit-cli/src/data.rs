//! Column tables read from JSON.
//!
//! A table file is a JSON object mapping column names to arrays of numbers:
//!
//! ```json
//! { "salario": [2500, 3100.5, 2800], "idade": [31, 45, 28] }
//! ```

use std::collections::BTreeMap;

use edakit_stats::sample::Sample;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("column {column:?}: element {index} is not a number: {value}")]
    NonNumeric {
        column: String,
        index: usize,
        value: String,
    },
    #[display("column {name:?} not found (available: {})", available.join(", "))]
    MissingColumn {
        name: String,
        available: Vec<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<serde_json::Value>>")]
pub struct Table {
    columns: BTreeMap<String, Sample>,
}

impl TryFrom<BTreeMap<String, Vec<serde_json::Value>>> for Table {
    type Error = TableError;

    fn try_from(raw: BTreeMap<String, Vec<serde_json::Value>>) -> Result<Self, Self::Error> {
        let columns = raw
            .into_iter()
            .map(|(column, values)| {
                // JSON numbers print as parseable text; strings, null and
                // nested values keep their JSON spelling and are rejected
                let sample = Sample::parse(values.iter().map(serde_json::Value::to_string))
                    .map_err(|err| TableError::NonNumeric {
                        column: column.clone(),
                        index: err.index,
                        value: err.value,
                    })?;
                Ok((column, sample))
            })
            .collect::<Result<_, TableError>>()?;
        Ok(Self { columns })
    }
}

impl Table {
    pub fn column(&self, name: &str) -> Result<&Sample, TableError> {
        self.columns
            .get(name)
            .ok_or_else(|| TableError::MissingColumn {
                name: name.to_owned(),
                available: self.columns.keys().cloned().collect(),
            })
    }
}
