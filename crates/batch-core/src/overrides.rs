//! 舍別覆寫

use serde::{Deserialize, Serialize};

use crate::Stage;

/// 舍別覆寫
///
/// 以 (`batch_id`, `stage`) 為鍵。`affect_following` 為真時，
/// 該階段之後的批次改由此覆寫的舍別接續輪轉。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingOverride {
    /// 批次編號
    pub batch_id: String,

    /// 階段
    pub stage: Stage,

    /// 指定舍別
    pub assigned_unit: String,

    /// 是否影響後續批次的輪轉
    #[serde(default)]
    pub affect_following: bool,
}

impl HousingOverride {
    /// 創建新的覆寫（僅影響本批次）
    pub fn new(batch_id: String, stage: Stage, assigned_unit: String) -> Self {
        Self {
            batch_id,
            stage,
            assigned_unit,
            affect_following: false,
        }
    }

    /// 建構器模式：設置為影響後續批次
    pub fn affecting_following(mut self) -> Self {
        self.affect_following = true;
        self
    }

    /// 是否為同一鍵（批次 + 階段）
    pub fn same_key(&self, batch_id: &str, stage: Stage) -> bool {
        self.batch_id == batch_id && self.stage == stage
    }
}
