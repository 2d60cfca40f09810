//! One-hot encoding against a fixed vocabulary.

use crate::core::constants::ONE_HOT_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Sorted, de-duplicated category vocabulary of one column.
///
/// Unknown categories encode to an all-zero block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<String>,
}

impl OneHotEncoder {
    /// Learn the vocabulary from the (imputed) training categories
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut categories: Vec<String> = values.into_iter().map(str::to_string).collect();
        categories.sort();
        categories.dedup();
        OneHotEncoder { categories }
    }

    /// Vocabulary in indicator order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Width of the indicator block
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Position of a category in the vocabulary
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(category))
            .ok()
    }

    /// Write the indicator block for `category` into `out`.
    ///
    /// `out` must be exactly [`width`](Self::width) long.
    pub fn encode_into(&self, category: &str, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.width());
        out.fill(0.0);
        if let Some(idx) = self.index_of(category) {
            out[idx] = 1.0;
        }
    }

    /// Output names `<column>_<category>`, in indicator order
    pub fn feature_names(&self, column: &str) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| format!("{}{}{}", column, ONE_HOT_SEPARATOR, c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sorted_and_unique() {
        let enc = OneHotEncoder::fit(["male", "female", "male"]);
        assert_eq!(enc.categories(), &["female", "male"]);
        assert_eq!(enc.width(), 2);
    }

    #[test]
    fn test_encode_known() {
        let enc = OneHotEncoder::fit(["S", "C", "Q"]);
        let mut out = [9.0; 3];
        enc.encode_into("Q", &mut out);
        assert_eq!(out, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_encode_unknown_is_all_zero() {
        let enc = OneHotEncoder::fit(["male", "female"]);
        let mut out = [1.0; 2];
        enc.encode_into("unknown", &mut out);
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn test_feature_names() {
        let enc = OneHotEncoder::fit(["male", "female"]);
        assert_eq!(enc.feature_names("Sex"), vec!["Sex_female", "Sex_male"]);
    }
}
