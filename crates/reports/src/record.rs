//! Semi-resolved and resolved report rows.
//!
//! A [`Record`] is built while work is being fanned out: each column is
//! either a concrete [`Cell`] or a pending task handle paired with the
//! derivation that turns its value into cells. After the batch barrier,
//! [`Record::resolve`] runs one pass in column order and produces a
//! [`ResolvedRecord`], which holds only cells.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::ReportError;
use crate::pool::TaskHandle;

/// A printable scalar in a report row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// The task behind this cell failed; other cells are unaffected.
    Error(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn count(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }

    pub fn uint(n: u64) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Convert a JSON query value into a cell.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Numeric view used for sorting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => Ok(()),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Null => serializer.serialize_none(),
            Self::Error(_) => serializer.collect_str(self),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Turns a resolved task value into the cells of its columns.
type Derivation<T> = Box<dyn FnOnce(T) -> Result<Vec<Cell>, ReportError> + Send>;

/// A pending handle plus the derivation for the columns it fills.
pub trait PendingCells: Send {
    fn columns(&self) -> &[String];
    fn resolve(self: Box<Self>) -> Result<Vec<Cell>, ReportError>;
}

struct Deferred<T> {
    columns: Vec<String>,
    handle: TaskHandle<T>,
    derive: Derivation<T>,
}

impl<T: Send + 'static> PendingCells for Deferred<T> {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn resolve(self: Box<Self>) -> Result<Vec<Cell>, ReportError> {
        let Deferred {
            columns,
            handle,
            derive,
        } = *self;
        match handle.resolve()? {
            Ok(value) => {
                let cells = derive(value)?;
                if cells.len() != columns.len() {
                    return Err(ReportError::Derivation(format!(
                        "{} produced {} cells for {} columns",
                        columns.join(", "),
                        cells.len(),
                        columns.len()
                    )));
                }
                Ok(cells)
            }
            Err(err) => {
                let message = err.to_string();
                Ok(columns.iter().map(|_| Cell::Error(message.clone())).collect())
            }
        }
    }
}

/// One entry of a record under construction.
pub enum Slot {
    Concrete { column: String, cell: Cell },
    Pending(Box<dyn PendingCells>),
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete { column, cell } => f
                .debug_struct("Concrete")
                .field("column", column)
                .field("cell", cell)
                .finish(),
            Self::Pending(p) => f.debug_tuple("Pending").field(&p.columns()).finish(),
        }
    }
}

/// A row under construction.
#[derive(Debug, Default)]
pub struct Record {
    slots: Vec<Slot>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, cell: impl Into<Cell>) -> &mut Self {
        self.slots.push(Slot::Concrete {
            column: column.into(),
            cell: cell.into(),
        });
        self
    }

    /// Fill `column` from `handle` once it resolves.
    pub fn defer<T, F>(&mut self, column: impl Into<String>, handle: TaskHandle<T>, derive: F) -> &mut Self
    where
        T: Send + 'static,
        F: FnOnce(T) -> Result<Cell, ReportError> + Send + 'static,
    {
        self.defer_many(vec![column.into()], handle, move |value| Ok(vec![derive(value)?]))
    }

    /// Fill several adjacent columns from one handle.
    pub fn defer_many<T, F>(&mut self, columns: Vec<String>, handle: TaskHandle<T>, derive: F) -> &mut Self
    where
        T: Send + 'static,
        F: FnOnce(T) -> Result<Vec<Cell>, ReportError> + Send + 'static,
    {
        self.slots.push(Slot::Pending(Box::new(Deferred {
            columns,
            handle,
            derive: Box::new(derive),
        })));
        self
    }

    /// Number of slots still holding a handle.
    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Pending(_)))
            .count()
    }

    /// Replace every handle with its cells, in column order.
    pub fn resolve(self) -> Result<ResolvedRecord, ReportError> {
        let mut cells = Vec::with_capacity(self.slots.len());
        for slot in self.slots {
            match slot {
                Slot::Concrete { column, cell } => cells.push((column, cell)),
                Slot::Pending(pending) => {
                    let columns = pending.columns().to_vec();
                    let resolved = pending.resolve()?;
                    cells.extend(columns.into_iter().zip(resolved));
                }
            }
        }
        Ok(ResolvedRecord { cells })
    }
}

/// Resolve records in enumeration order.
pub fn resolve_all(records: Vec<Record>) -> Result<Vec<ResolvedRecord>, ReportError> {
    records.into_iter().map(Record::resolve).collect()
}

/// A finished row: ordered column to cell pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedRecord {
    cells: Vec<(String, Cell)>,
}

impl ResolvedRecord {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Cell)>,
        K: Into<String>,
    {
        Self {
            cells: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Build a row from a JSON object, keeping its key order.
    pub fn from_json_row(row: &Value) -> Self {
        match row.as_object() {
            Some(map) => Self::from_pairs(map.iter().map(|(k, v)| (k.clone(), Cell::from_json(v)))),
            None => Self::from_pairs([("value", Cell::from_json(row))]),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for ResolvedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, cell) in &self.cells {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}
