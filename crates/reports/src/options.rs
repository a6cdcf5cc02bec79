//! Output post-processing: `--sortkey` and `--limit`.

use std::cmp::Ordering;

use crate::error::ReportError;
use crate::record::{Cell, ResolvedRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

fn compare(a: Option<&Cell>, b: Option<&Cell>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.to_string().cmp(&b.to_string()),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort by `sort` (stable), then keep at most `limit` rows.
///
/// Error cells always sort last, whatever the direction.
pub fn apply_sort_limit(
    mut records: Vec<ResolvedRecord>,
    sort: Option<&SortKey>,
    limit: Option<usize>,
) -> Result<Vec<ResolvedRecord>, ReportError> {
    if let Some(key) = sort {
        if let Some(first) = records.first()
            && first.get(&key.column).is_none()
        {
            return Err(ReportError::InvalidSortKey {
                column: key.column.clone(),
                available: first.columns().collect::<Vec<_>>().join(", "),
            });
        }

        records.sort_by(|a, b| {
            let (a, b) = (a.get(&key.column), b.get(&key.column));
            let a_err = a.is_some_and(Cell::is_error);
            let b_err = b.is_some_and(Cell::is_error);
            match (a_err, b_err) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ if key.descending => compare(b, a),
                _ => compare(a, b),
            }
        });
    }

    if let Some(limit) = limit {
        records.truncate(limit);
    }
    Ok(records)
}
