//! Rank classification: reading a caller-meaningful rank out of node data.

use serde_json::Value;

/// Extracts a rank from a node datum.
///
/// Any `Fn(&N) -> Option<f64>` is an accessor. Non-finite values are treated like `None` by
/// [`resolve_rank`], so accessors do not need to filter them.
pub trait RankAccessor<N: ?Sized> {
    fn rank(&self, datum: &N) -> Option<f64>;
}

impl<N: ?Sized, F> RankAccessor<N> for F
where
    F: Fn(&N) -> Option<f64>,
{
    fn rank(&self, datum: &N) -> Option<f64> {
        self(datum)
    }
}

/// Extracts a display label from a node datum.
pub trait LabelAccessor<N: ?Sized> {
    fn label(&self, datum: &N) -> Option<String>;
}

impl<N: ?Sized, F> LabelAccessor<N> for F
where
    F: Fn(&N) -> Option<String>,
{
    fn label(&self, datum: &N) -> Option<String> {
        self(datum)
    }
}

pub fn resolve_rank<N: ?Sized>(accessor: &(impl RankAccessor<N> + ?Sized), datum: &N) -> Option<f64> {
    accessor.rank(datum).filter(|r| r.is_finite())
}

/// Reads a property of a JSON object node datum.
///
/// As a rank accessor, numbers and numeric strings resolve; as a label accessor, strings are
/// returned verbatim and numbers are formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonField {
    pub field: String,
}

impl JsonField {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// The conventional `"rank"` property.
    pub fn rank() -> Self {
        Self::new("rank")
    }

    /// The conventional `"label"` property.
    pub fn label() -> Self {
        Self::new("label")
    }
}

impl RankAccessor<Value> for JsonField {
    fn rank(&self, datum: &Value) -> Option<f64> {
        match datum.get(&self.field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl LabelAccessor<Value> for JsonField {
    fn label(&self, datum: &Value) -> Option<String> {
        match datum.get(&self.field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
