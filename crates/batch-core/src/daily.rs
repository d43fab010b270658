//! 每日異動紀錄

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 每日異動紀錄
///
/// 以 (`batch_id`, `record_date`) 為鍵，同一天同一批次只有一筆；
/// 重複登錄同一欄位時覆寫而不是累加。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// 紀錄日期
    pub record_date: NaiveDate,

    /// 批次編號
    pub batch_id: String,

    /// 肉豬死亡頭數
    #[serde(default)]
    pub pig_death_qty: Option<i64>,

    /// 肉豬出售頭數
    #[serde(default)]
    pub pig_sale_qty: Option<i64>,

    /// 出售均重（公斤）
    #[serde(default)]
    pub pig_sale_avg_weight_kg: Option<Decimal>,

    /// 母豬流產頭數
    #[serde(default)]
    pub sow_abortion_qty: Option<i64>,

    /// 母豬淘汰 / 死亡頭數
    #[serde(default)]
    pub sow_loss_qty: Option<i64>,
}

impl DailyRecord {
    /// 創建空白紀錄
    pub fn new(batch_id: String, record_date: NaiveDate) -> Self {
        Self {
            record_date,
            batch_id,
            pig_death_qty: None,
            pig_sale_qty: None,
            pig_sale_avg_weight_kg: None,
            sow_abortion_qty: None,
            sow_loss_qty: None,
        }
    }

    /// 建構器模式：設置死亡頭數
    pub fn with_death_qty(mut self, qty: i64) -> Self {
        self.pig_death_qty = Some(qty);
        self
    }

    /// 建構器模式：設置出售頭數與均重
    pub fn with_sale(mut self, qty: i64, avg_weight_kg: Option<Decimal>) -> Self {
        self.pig_sale_qty = Some(qty);
        self.pig_sale_avg_weight_kg = avg_weight_kg;
        self
    }

    /// 建構器模式：設置母豬流產頭數
    pub fn with_abortion_qty(mut self, qty: i64) -> Self {
        self.sow_abortion_qty = Some(qty);
        self
    }

    /// 建構器模式：設置母豬損失頭數
    pub fn with_sow_loss_qty(mut self, qty: i64) -> Self {
        self.sow_loss_qty = Some(qty);
        self
    }

    /// 是否為同一鍵（批次 + 日期）
    pub fn same_key(&self, batch_id: &str, record_date: NaiveDate) -> bool {
        self.batch_id == batch_id && self.record_date == record_date
    }

    /// 此紀錄造成的肉豬頭數減少（死亡 + 出售）
    pub fn pig_reduction(&self) -> i64 {
        self.pig_death_qty.unwrap_or(0) + self.pig_sale_qty.unwrap_or(0)
    }

    /// 出售總重（頭數 × 均重），缺任一項則為 `None`
    pub fn sale_weight_kg(&self) -> Option<Decimal> {
        match (self.pig_sale_qty, self.pig_sale_avg_weight_kg) {
            (Some(qty), Some(avg)) => Some(Decimal::from(qty) * avg),
            _ => None,
        }
    }

    /// 套用異動：事件帶有的欄位覆寫，其餘保留
    pub fn apply(&mut self, event: &DailyEvent) {
        if let Some(qty) = event.pig_death_qty {
            self.pig_death_qty = Some(qty);
        }
        if let Some(qty) = event.pig_sale_qty {
            self.pig_sale_qty = Some(qty);
        }
        if let Some(avg) = event.pig_sale_avg_weight_kg {
            self.pig_sale_avg_weight_kg = Some(avg);
        }
        if let Some(qty) = event.sow_abortion_qty {
            self.sow_abortion_qty = Some(qty);
        }
        if let Some(qty) = event.sow_loss_qty {
            self.sow_loss_qty = Some(qty);
        }
    }
}

/// 每日異動事件（部分欄位）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEvent {
    #[serde(default)]
    pub pig_death_qty: Option<i64>,
    #[serde(default)]
    pub pig_sale_qty: Option<i64>,
    #[serde(default)]
    pub pig_sale_avg_weight_kg: Option<Decimal>,
    #[serde(default)]
    pub sow_abortion_qty: Option<i64>,
    #[serde(default)]
    pub sow_loss_qty: Option<i64>,
}

impl DailyEvent {
    /// 死亡事件
    pub fn death(qty: i64) -> Self {
        Self {
            pig_death_qty: Some(qty),
            ..Self::default()
        }
    }

    /// 出售事件
    pub fn sale(qty: i64, avg_weight_kg: Option<Decimal>) -> Self {
        Self {
            pig_sale_qty: Some(qty),
            pig_sale_avg_weight_kg: avg_weight_kg,
            ..Self::default()
        }
    }

    /// 母豬流產事件
    pub fn abortion(qty: i64) -> Self {
        Self {
            sow_abortion_qty: Some(qty),
            ..Self::default()
        }
    }

    /// 母豬損失事件
    pub fn sow_loss(qty: i64) -> Self {
        Self {
            sow_loss_qty: Some(qty),
            ..Self::default()
        }
    }

    /// 是否沒有任何欄位
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
