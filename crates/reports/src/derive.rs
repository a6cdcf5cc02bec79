//! Pure metric derivations over resolved values.
//!
//! Nothing here performs I/O; every function is a deterministic transform
//! of its inputs, so calling it twice yields the same result.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use henry_client::models::LookmlModelExploreJoin;
use henry_config::constants::DEFAULT_STATUS_WRAP_WIDTH;
use regex::Regex;
use serde_json::Value;

use crate::error::ReportError;

/// Usage count column of the history view.
pub const RUN_COUNT_FIELD: &str = "history.query_run_count";

static FIELD_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\w+\.\w+)").ok());

pub fn count<T>(items: &[T]) -> usize {
    items.len()
}

pub fn count_matching<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| pred(item)).count()
}

/// True when the text is present and non-empty.
pub fn has_text(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.is_empty())
}

pub fn lookup_or_zero(map: &BTreeMap<String, u64>, key: &str) -> u64 {
    map.get(key).copied().unwrap_or(0)
}

/// Names whose usage is zero, in key order.
pub fn unused(stats: &BTreeMap<String, u64>) -> Vec<String> {
    stats
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(name, _)| name.clone())
        .collect()
}

pub fn join_sorted(names: &[String]) -> String {
    let mut sorted = names.to_vec();
    sorted.sort();
    sorted.join("\n")
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current.is_empty() {
            current.extend(word);
        } else if current_len + 1 + word.len() <= width {
            current.push(' ');
            current.extend(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.extend(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// `"OK"` when nothing failed, otherwise one wrapped bullet per failure.
pub fn collapse_status<T>(
    results: &[T],
    is_error: impl Fn(&T) -> bool,
    message: impl Fn(&T) -> String,
) -> String {
    let failures: Vec<String> = results
        .iter()
        .filter(|r| is_error(r))
        .map(|r| format!("- {}", wrap_text(&message(r), DEFAULT_STATUS_WRAP_WIDTH).join("\n")))
        .collect();

    if failures.is_empty() {
        "OK".to_string()
    } else {
        failures.join("\n")
    }
}

fn run_count(row: &Value) -> Result<u64, ReportError> {
    let value = row
        .get(RUN_COUNT_FIELD)
        .ok_or_else(|| ReportError::Derivation(format!("row is missing '{RUN_COUNT_FIELD}'")))?;
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .ok_or_else(|| ReportError::Derivation(format!("bad run count {n}"))),
        Value::String(s) => s
            .parse()
            .map_err(|_| ReportError::Derivation(format!("bad run count '{s}'"))),
        Value::Null => Ok(0),
        other => Err(ReportError::Derivation(format!("bad run count {other}"))),
    }
}

/// Sum run counts per value of `key_field`.
pub fn parse_usage(rows: &[Value], key_field: &str) -> Result<BTreeMap<String, u64>, ReportError> {
    let mut usage = BTreeMap::new();
    for row in rows {
        let Some(key) = row.get(key_field).and_then(Value::as_str) else {
            continue;
        };
        *usage.entry(key.to_string()).or_insert(0) += run_count(row)?;
    }
    Ok(usage)
}

/// Extract `view.field` tokens from history rows, weighted by run count.
///
/// Each token counts once per row even when it appears in both the
/// formatted fields and the formatted filters.
pub fn field_usage(rows: &[Value]) -> Result<BTreeMap<String, u64>, ReportError> {
    let pattern = FIELD_TOKEN
        .as_ref()
        .ok_or_else(|| ReportError::Derivation("field token pattern failed to compile".into()))?;
    let mut usage = BTreeMap::new();
    for row in rows {
        let weight = run_count(row)?;
        let mut seen = std::collections::BTreeSet::new();
        for column in ["query.formatted_fields", "query.formatted_filters"] {
            let Some(text) = row.get(column).and_then(Value::as_str) else {
                continue;
            };
            for token in pattern.find_iter(text) {
                seen.insert(token.as_str().to_string());
            }
        }
        for token in seen {
            *usage.entry(token).or_insert(0) += weight;
        }
    }
    Ok(usage)
}

/// Usage of every visible field; fields never queried get 0.
pub fn field_stats(fields: &[String], usage: &BTreeMap<String, u64>) -> BTreeMap<String, u64> {
    fields
        .iter()
        .map(|f| (f.clone(), lookup_or_zero(usage, f)))
        .collect()
}

/// Usage of every join, summed from the fields of the joined view.
pub fn join_stats(
    joins: &[LookmlModelExploreJoin],
    base_view: &str,
    field_stats: &BTreeMap<String, u64>,
) -> BTreeMap<String, u64> {
    let mut stats: BTreeMap<String, u64> = joins
        .iter()
        .filter(|j| j.name != base_view)
        .map(|j| (j.name.clone(), 0))
        .collect();

    for (field, count) in field_stats {
        let Some((view, _)) = field.split_once('.') else {
            continue;
        };
        if let Some(total) = stats.get_mut(view) {
            *total += count;
        }
    }
    stats
}

/// Explores of a model that do not appear in its usage map.
pub fn unused_explores(explores: &[String], used: &BTreeMap<String, u64>) -> Vec<String> {
    explores
        .iter()
        .filter(|e| !used.contains_key(e.as_str()))
        .cloned()
        .collect()
}
