//! 批次基本紀錄（實際觀測資料）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Stage;

/// 批次基本紀錄
///
/// 每個真實批次至多一筆，以 `batch_id` 為鍵。沒有基本紀錄的批次
/// 只以日曆推算（理論批次）。各數量欄位在對應里程碑登錄前為 `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchBase {
    /// 批次編號（`YYYY-Gnn`）
    pub batch_id: String,

    /// 配種日
    pub mate_date: NaiveDate,

    /// 分娩日
    pub farrow_date: NaiveDate,

    /// 配種頭數
    #[serde(default)]
    pub breed_qty: Option<i64>,

    /// 預計分娩頭數
    #[serde(default)]
    pub expected_farrow_qty: Option<i64>,

    /// 活產頭數
    #[serde(default)]
    pub liveborn_qty: Option<i64>,

    /// 離乳頭數
    #[serde(default)]
    pub wean_qty: Option<i64>,

    /// 保育舍
    #[serde(default)]
    pub nursery_barn: Option<String>,

    /// 進保育頭數
    #[serde(default)]
    pub nursery_in_qty: Option<i64>,

    /// 小豬舍
    #[serde(default)]
    pub piglet_barn: Option<String>,

    /// 進小豬頭數
    #[serde(default)]
    pub piglet_in_qty: Option<i64>,

    /// 中豬舍
    #[serde(default)]
    pub grower_barn: Option<String>,

    /// 進中豬頭數
    #[serde(default)]
    pub grower_in_qty: Option<i64>,

    /// 大豬舍
    #[serde(default)]
    pub finisher_barn: Option<String>,

    /// 進大豬頭數
    #[serde(default)]
    pub finisher_in_qty: Option<i64>,

    /// 新女留養頭數
    #[serde(default)]
    pub gilt_in_qty: Option<i64>,

    /// 累計出售頭數
    #[serde(default)]
    pub sale_total_qty: Option<i64>,
}

impl BatchBase {
    /// 創建新的基本紀錄（僅日期）
    pub fn new(batch_id: String, mate_date: NaiveDate, farrow_date: NaiveDate) -> Self {
        Self {
            batch_id,
            mate_date,
            farrow_date,
            breed_qty: None,
            expected_farrow_qty: None,
            liveborn_qty: None,
            wean_qty: None,
            nursery_barn: None,
            nursery_in_qty: None,
            piglet_barn: None,
            piglet_in_qty: None,
            grower_barn: None,
            grower_in_qty: None,
            finisher_barn: None,
            finisher_in_qty: None,
            gilt_in_qty: None,
            sale_total_qty: None,
        }
    }

    /// 建構器模式：設置配種頭數
    pub fn with_breed_qty(mut self, qty: i64) -> Self {
        self.breed_qty = Some(qty);
        self
    }

    /// 建構器模式：設置預計分娩頭數
    pub fn with_expected_farrow_qty(mut self, qty: i64) -> Self {
        self.expected_farrow_qty = Some(qty);
        self
    }

    /// 建構器模式：設置活產頭數
    pub fn with_liveborn_qty(mut self, qty: i64) -> Self {
        self.liveborn_qty = Some(qty);
        self
    }

    /// 建構器模式：設置離乳頭數
    pub fn with_wean_qty(mut self, qty: i64) -> Self {
        self.wean_qty = Some(qty);
        self
    }

    /// 建構器模式：設置進保育頭數
    pub fn with_nursery_in_qty(mut self, qty: i64) -> Self {
        self.nursery_in_qty = Some(qty);
        self
    }

    /// 建構器模式：設置進小豬頭數
    pub fn with_piglet_in_qty(mut self, qty: i64) -> Self {
        self.piglet_in_qty = Some(qty);
        self
    }

    /// 建構器模式：設置進中豬頭數
    pub fn with_grower_in_qty(mut self, qty: i64) -> Self {
        self.grower_in_qty = Some(qty);
        self
    }

    /// 建構器模式：設置進大豬頭數
    pub fn with_finisher_in_qty(mut self, qty: i64) -> Self {
        self.finisher_in_qty = Some(qty);
        self
    }

    /// 建構器模式：設置新女留養頭數
    pub fn with_gilt_in_qty(mut self, qty: i64) -> Self {
        self.gilt_in_qty = Some(qty);
        self
    }

    /// 建構器模式：設置累計出售頭數
    pub fn with_sale_total_qty(mut self, qty: i64) -> Self {
        self.sale_total_qty = Some(qty);
        self
    }

    /// 建構器模式：設置某階段的舍別
    ///
    /// 只有保育、小豬、中豬、大豬有實體舍別，其他階段忽略。
    pub fn with_barn(mut self, stage: Stage, barn: String) -> Self {
        match stage {
            Stage::Nursery => self.nursery_barn = Some(barn),
            Stage::Piglet => self.piglet_barn = Some(barn),
            Stage::Grower => self.grower_barn = Some(barn),
            Stage::Finisher => self.finisher_barn = Some(barn),
            _ => {}
        }
        self
    }

    /// 某階段登錄的舍別（空字串視為未登錄）
    pub fn barn_for(&self, stage: Stage) -> Option<&str> {
        let barn = match stage {
            Stage::Nursery => self.nursery_barn.as_deref(),
            Stage::Piglet => self.piglet_barn.as_deref(),
            Stage::Grower => self.grower_barn.as_deref(),
            Stage::Finisher => self.finisher_barn.as_deref(),
            _ => None,
        };
        barn.filter(|b| !b.trim().is_empty())
    }

    /// 是否已登錄新女分群資料（任一分群頭數存在）
    pub fn has_split_data(&self) -> bool {
        self.piglet_in_qty.is_some() || self.gilt_in_qty.is_some()
    }

    /// 是否已登錄離乳（登錄 0 也算）
    pub fn is_weaned(&self) -> bool {
        self.wean_qty.is_some()
    }
}
