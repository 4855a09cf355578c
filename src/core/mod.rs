pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{FeedPayload, InvocationResult, Outcome, StoredObject};
pub use crate::domain::ports::{ConfigProvider, ObjectStore, Pipeline};
pub use crate::utils::error::Result;
