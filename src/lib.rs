//! # Batchline
//!
//! 批次輪轉管理：依參考日推算前後批次的階段、舍別與在場頭數

pub use batch_calc as calc;
pub use batch_core as model;
pub use batch_store as store;

pub use batch_calc::{compute_snapshot, TimelineCalculator, TimelineSummary};
pub use batch_core::{
    BatchBase, BatchError, BatchId, BatchSnapshot, DailyEvent, DailyRecord, FarmConfig,
    HousingOverride, Result, Stage,
};
pub use batch_store::{DataBundle, ImportReport, RecordStore};
