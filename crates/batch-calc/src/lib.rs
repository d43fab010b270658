//! # Batch Calculation Engine
//!
//! 批次切面推算引擎：批次列舉、階段與頭數、舍別輪轉、切面組合

pub mod calculator;
pub mod enumeration;
pub mod housing;
pub mod inventory;
pub mod stage;
pub mod summary;

// Re-export 主要類型
pub use calculator::TimelineCalculator;
pub use enumeration::{BatchEnumerator, EnumeratedBatch};
pub use housing::{HousingResolver, UNASSIGNED_UNIT};
pub use inventory::{InventoryPosition, InventoryResolver};
pub use stage::StageResolver;
pub use summary::TimelineSummary;

use batch_core::{BatchBase, BatchSnapshot, DailyRecord, FarmConfig, HousingOverride};
use chrono::NaiveDate;

/// 計算參考日的批次切面
///
/// 配置無效時回傳錯誤；配置有效時結果只取決於輸入，重複呼叫結果相同。
/// 需要重複計算時，建議建立一次 [`TimelineCalculator`] 重用。
pub fn compute_snapshot(
    as_of: NaiveDate,
    config: &FarmConfig,
    bases: &[BatchBase],
    records: &[DailyRecord],
    overrides: &[HousingOverride],
) -> batch_core::Result<Vec<BatchSnapshot>> {
    let calculator = TimelineCalculator::new(config.clone())?;
    Ok(calculator.calculate(as_of, bases, records, overrides))
}
