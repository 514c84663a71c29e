pub mod dataset;
pub mod store;

pub use dataset::{Dataset, ImageRecord, SourceType};
pub use store::{MemoryStore, RecordStore};
