use std::collections::HashMap;
use std::iter::FromIterator;

use serde::{Deserialize, Serialize};

use super::record::Qualifier;

/// Canonical qualifier order per feature type, optionally used when
/// writing records.
///
/// For each feature type, a list of qualifier keys (with or without the
/// leading '/') defines the order. Qualifiers not in the list follow
/// after the listed ones in their original order, as do all qualifiers of
/// feature types without list.
///
/// The table can be deserialized from any `serde` format as a map of
/// lists, e.g. from JSON:
///
/// ```
/// use gbff_io::genbank::QualifierOrder;
///
/// let order: QualifierOrder = serde_json::from_str(
///     r#"{"CDS": ["gene", "locus_tag", "product", "translation"]}"#
/// ).unwrap();
/// assert_eq!(order.rank("CDS", "/product"), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifierOrder {
    by_type: HashMap<String, Vec<String>>,
}

impl QualifierOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key order for a feature type, replacing the previous one.
    pub fn insert<K, I, S>(&mut self, feature_type: K, keys: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_type
            .insert(feature_type.into(), keys.into_iter().map(Into::into).collect());
        self
    }

    /// Position of `key` in the list of `feature_type`, if listed.
    pub fn rank(&self, feature_type: &str, key: &str) -> Option<usize> {
        let key = key.trim_start_matches('/');
        self.by_type
            .get(feature_type)?
            .iter()
            .position(|k| k.trim_start_matches('/') == key)
    }

    /// Returns the qualifiers in canonical order. Sorting is stable, so
    /// duplicate keys keep their relative order.
    pub fn sort(&self, feature_type: &str, qualifiers: &[Qualifier]) -> Vec<Qualifier> {
        let mut sorted = qualifiers.to_vec();
        if self.by_type.contains_key(feature_type) {
            sorted.sort_by_key(|q| self.rank(feature_type, &q.key).unwrap_or(usize::MAX));
        }
        sorted
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl<K, S> FromIterator<(K, Vec<S>)> for QualifierOrder
where
    K: Into<String>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, Vec<S>)>>(iter: T) -> Self {
        let mut order = QualifierOrder::new();
        for (feature_type, keys) in iter {
            order.insert(feature_type, keys);
        }
        order
    }
}
