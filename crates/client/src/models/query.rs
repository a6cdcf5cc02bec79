//! Inline query request body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /queries/run/{format}`.
///
/// Filters are kept in a `BTreeMap` so the serialized form is stable, which
/// makes the JSON usable as a cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteQuery {
    pub model: String,
    pub view: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl WriteQuery {
    pub fn new(model: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            view: view.into(),
            ..Self::default()
        }
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, field: impl Into<String>, expr: impl Into<String>) -> Self {
        self.filters.insert(field.into(), expr.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sorts.push(sort.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_omits_empty_parts() {
        let query = WriteQuery::new("i__looker", "history").fields(["history.query_run_count"]);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "i__looker",
                "view": "history",
                "fields": ["history.query_run_count"]
            })
        );
    }

    #[test]
    fn test_filter_order_does_not_change_serialization() {
        let a = WriteQuery::new("m", "v").filter("b", "1").filter("a", "2");
        let b = WriteQuery::new("m", "v").filter("a", "2").filter("b", "1");
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
