pub mod acquire;
pub mod stats;
pub mod storage;

pub use acquire::{acquire_reviews, AcquireOptions, Acquisition, StopReason};
pub use stats::ReviewStats;
pub use storage::{save_reviews, save_split_by_language, SaveFormat};
