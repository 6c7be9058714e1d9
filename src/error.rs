use thiserror::Error;

// a solve either returns a complete flow with its ledger or one of these
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("negative capacity on edge {from} -> {to}")]
    InvalidCapacity { from: String, to: String },

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("node {0} is both source and sink")]
    SourceIsSink(String),

    #[error("total capacity does not fit in the flow type")]
    CapacityOverflow,

    #[error("interrupted after {rounds} augmentation rounds")]
    Interrupted { rounds: usize },
}
