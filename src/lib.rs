pub mod error;
pub mod logistics;
pub mod maximum_flow;

pub use error::FlowError;
