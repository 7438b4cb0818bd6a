pub mod archive;
pub mod etl;
pub mod fetch;
pub mod pack;
pub mod pipeline;

pub use crate::domain::model::{Symbol, TransformSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
