use std::collections::HashMap;

use serde::Serialize;

use crate::error::UnknownCategoryError;

/// Bidirectional mapping between a column's distinct text values and dense
/// integer codes.
///
/// Classes are sorted, so the codes only change when the set of distinct
/// values in the table changes.
#[derive(Debug, Clone, Serialize)]
pub struct LabelEncoder {
    column: String,
    classes: Vec<String>,
    #[serde(skip)]
    codes: HashMap<String, usize>,
}

impl LabelEncoder {
    pub fn fit<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = values
            .into_iter()
            .map(|value| value.as_ref().to_string())
            .collect();
        classes.sort();
        classes.dedup();

        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, class)| (class.clone(), code))
            .collect();

        Self {
            column: column.into(),
            classes,
            codes,
        }
    }

    /// Fits on `values` and returns the code of every value, in order.
    pub fn fit_transform<I, S>(column: impl Into<String>, values: I) -> (Self, Vec<usize>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(|value| value.as_ref().to_string())
            .collect();
        let encoder = Self::fit(column, &values);
        let codes = values
            .iter()
            .filter_map(|value| encoder.codes.get(value).copied())
            .collect();
        (encoder, codes)
    }

    pub fn transform(&self, value: &str) -> Result<usize, UnknownCategoryError> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| UnknownCategoryError {
                column: self.column.clone(),
                value: value.to_string(),
            })
    }

    pub fn inverse_transform(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn codes_follow_sorted_distinct_values() {
        let encoder = LabelEncoder::fit("music_listened", ["loud", "none", "calm", "loud"]);

        assert_eq!(encoder.classes(), &["calm", "loud", "none"]);
        assert_eq!(encoder.transform("calm"), Ok(0));
        assert_eq!(encoder.transform("none"), Ok(2));
    }

    #[test]
    fn every_class_decodes_to_itself() {
        let encoder = LabelEncoder::fit("music_listened", ["none", "calm", "loud"]);

        for class in encoder.classes() {
            let code = encoder.transform(class).unwrap();
            assert_eq!(encoder.inverse_transform(code), Some(class.as_str()));
        }
    }

    #[test]
    fn fit_transform_codes_every_row() {
        let (encoder, codes) = LabelEncoder::fit_transform("current_state", ["sleepy", "hungry", "sleepy"]);

        assert_eq!(encoder.classes(), &["hungry", "sleepy"]);
        assert_eq!(codes, vec![1, 0, 1]);
    }

    #[test]
    fn unseen_value_is_rejected() {
        let encoder = LabelEncoder::fit("music_listened", ["none", "calm", "loud"]);

        assert_eq!(
            encoder.transform("techno"),
            Err(UnknownCategoryError {
                column: "music_listened".into(),
                value: "techno".into(),
            })
        );
        assert_eq!(encoder.inverse_transform(3), None);
    }
}
