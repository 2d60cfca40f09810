//! Column-kind discovery.
//!
//! A column is numerical when every non-missing entry reads as a number,
//! categorical when at least one does not, and passthrough when it has no
//! non-missing entries at all or was declared passthrough by the caller.

use crate::core::types::{ColumnKind, Value};
use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// Classify one column from its cells.
pub fn infer_column_kind<'a>(values: impl IntoIterator<Item = &'a Value>) -> ColumnKind {
    let mut seen_any = false;
    for value in values {
        if value.is_missing() {
            continue;
        }
        seen_any = true;
        if value.parse_numeric().is_none() {
            return ColumnKind::Categorical;
        }
    }

    if seen_any {
        ColumnKind::Numerical
    } else {
        ColumnKind::Passthrough
    }
}

/// Kind assignment for every column of a dataset, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<(String, ColumnKind)>,
}

impl Schema {
    /// Discover the schema of `dataset`.
    ///
    /// Columns named in `passthrough` are not inspected.
    pub fn infer(dataset: &Dataset, passthrough: &[String]) -> Self {
        let columns = dataset
            .column_names()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let kind = if passthrough.iter().any(|p| p == name) {
                    ColumnKind::Passthrough
                } else {
                    let kind = infer_column_kind(dataset.column_at(idx));
                    if kind == ColumnKind::Passthrough {
                        log::warn!(
                            "Column '{}' has no non-missing values; passing it through unchanged",
                            name
                        );
                    }
                    kind
                };
                log::debug!("Column '{}' classified as {}", name, kind);
                (name.clone(), kind)
            })
            .collect();

        Schema { columns }
    }

    /// All `(name, kind)` pairs in column order
    pub fn columns(&self) -> &[(String, ColumnKind)] {
        &self.columns
    }

    /// Kind of one column
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kind)| *kind)
    }

    /// Names of all columns of the given kind, in column order
    pub fn names_of(&self, kind: ColumnKind) -> Vec<String> {
        self.columns
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(n, _)| n.clone())
            .collect()
    }
}
