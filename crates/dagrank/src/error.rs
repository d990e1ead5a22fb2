#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("graph contains a cycle through node {node}")]
    Cycle { node: String },

    #[error("edge {from} -> {to} contradicts the ranks of its endpoints")]
    RankConflict { from: String, to: String },

    #[error("layering placed edge {from} -> {to} on a non-increasing layer")]
    InvalidLayering { from: String, to: String },

    #[error("exact crossing minimization needs {orderings} orderings (limit {limit})")]
    DecrossTooLarge { orderings: u128, limit: u128 },

    #[error("layer {layer} holds more than one real node")]
    NotTopological { layer: usize },

    #[error("Invalid layout config JSON: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
