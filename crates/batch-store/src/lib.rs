//! # Batch Store
//!
//! 紀錄存放、匯入合併 / 還原與異動追蹤

pub mod bundle;
pub mod dirty_tracking;
pub mod store;

// Re-export 主要類型
pub use bundle::{CollectionReport, DataBundle, ImportMode, ImportReport, SkippedRows};
pub use dirty_tracking::DirtyTracker;
pub use store::{RecordStore, UpsertOutcome};
