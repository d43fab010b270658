//! # Batch Core
//!
//! 批次輪轉核心資料模型與類型定義

pub mod base;
pub mod batch_id;
pub mod calendar;
pub mod config;
pub mod daily;
pub mod overrides;
pub mod snapshot;
pub mod stage;

// Re-export 主要類型
pub use base::BatchBase;
pub use batch_id::BatchId;
pub use calendar::FarrowCalendar;
pub use config::{
    BiologicalProfile, FarmConfig, LifecycleThresholds, RotationProfile, StageRange,
};
pub use daily::{DailyEvent, DailyRecord};
pub use overrides::HousingOverride;
pub use snapshot::BatchSnapshot;
pub use stage::Stage;

/// 批次錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("無效的批次間隔: {0} 天（必須大於 0）")]
    InvalidInterval(i64),

    #[error("階段日齡區間無效: {0}")]
    InvalidStageRanges(String),

    #[error("無效的批次編號: {0}")]
    InvalidBatchId(String),

    #[error("配置錯誤: {0}")]
    InvalidConfig(String),

    #[error("資料包格式錯誤: {0}")]
    InvalidBundle(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BatchError>;
