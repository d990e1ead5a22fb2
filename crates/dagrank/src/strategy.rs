//! Strategy selection for the pluggable layout stages.
//!
//! A stage is configured either with a named built-in (`Strategy::Named`) or with a caller-built
//! implementation (`Strategy::Custom`), which is used unchanged. Named tags are parsed leniently:
//! an unknown tag falls back to the stage default instead of failing, since tags typically come
//! straight from interactive configuration.

use std::fmt;

/// Enumerated built-in strategies of one stage.
pub trait StrategyTag: Sized + Copy + Default + fmt::Debug {
    /// Stage name used in log records.
    const STAGE: &'static str;

    fn parse(tag: &str) -> Option<Self>;

    fn tag(self) -> &'static str;

    /// Parses `tag`, falling back to the default strategy for unknown tags.
    fn from_tag(tag: &str) -> Self {
        match Self::parse(tag.trim()) {
            Some(kind) => kind,
            None => {
                let fallback = Self::default();
                tracing::warn!(
                    stage = Self::STAGE,
                    tag,
                    fallback = fallback.tag(),
                    "unknown strategy tag, using default"
                );
                fallback
            }
        }
    }
}

pub enum Strategy<K, S: ?Sized> {
    Named(K),
    Custom(Box<S>),
}

impl<K, S: ?Sized> Strategy<K, S> {
    /// The tag of a named strategy; `None` for custom ones.
    pub fn tag(&self) -> Option<&'static str>
    where
        K: StrategyTag,
    {
        match self {
            Self::Named(kind) => Some(kind.tag()),
            Self::Custom(_) => None,
        }
    }
}

impl<K: StrategyTag, S: ?Sized> Strategy<K, S> {
    /// Resolves an optional tag; absent tags select the default.
    pub fn from_optional_tag(tag: Option<&str>) -> Self {
        Self::Named(tag.map(K::from_tag).unwrap_or_default())
    }
}

impl<K: Default, S: ?Sized> Default for Strategy<K, S> {
    fn default() -> Self {
        Self::Named(K::default())
    }
}

impl<K: StrategyTag, S: ?Sized> From<&str> for Strategy<K, S> {
    fn from(tag: &str) -> Self {
        Self::Named(K::from_tag(tag))
    }
}

impl<K: fmt::Debug, S: ?Sized> fmt::Debug for Strategy<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(kind) => f.debug_tuple("Named").field(kind).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
