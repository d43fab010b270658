//! 分娩日曆（批次日期推算）

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// 分娩日曆
///
/// 以錨點批次的分娩日為校準點，每隔固定天數一批。
/// 批次索引 0 即錨點批次，負數為較早的批次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarrowCalendar {
    /// 錨點分娩日
    pub anchor_farrow_date: NaiveDate,

    /// 批次間隔（天，必須大於 0）
    pub interval_days: i64,

    /// 懷孕天數
    pub gestation_days: u32,
}

impl FarrowCalendar {
    /// 創建新的分娩日曆
    pub fn new(anchor_farrow_date: NaiveDate, interval_days: i64, gestation_days: u32) -> Self {
        Self {
            anchor_farrow_date,
            interval_days,
            gestation_days,
        }
    }

    /// 某日所屬的批次索引（向負無窮取整）
    ///
    /// 即分娩日不晚於該日的最近一批。
    pub fn batch_index_on(&self, date: NaiveDate) -> i64 {
        let diff = (date - self.anchor_farrow_date).num_days();
        diff.div_euclid(self.interval_days)
    }

    /// 理論分娩日
    ///
    /// 超出日期可表示範圍時停在 `NaiveDate::MIN` / `NaiveDate::MAX`。
    pub fn farrow_date(&self, index: i64) -> NaiveDate {
        let offset = index.saturating_mul(self.interval_days);
        Duration::try_days(offset)
            .and_then(|delta| self.anchor_farrow_date.checked_add_signed(delta))
            .unwrap_or(if offset < 0 {
                NaiveDate::MIN
            } else {
                NaiveDate::MAX
            })
    }

    /// 由分娩日推回配種日
    pub fn mate_date(&self, farrow_date: NaiveDate) -> NaiveDate {
        farrow_date
            .checked_sub_signed(Duration::days(i64::from(self.gestation_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// 日齡（分娩日為第 0 天，分娩前為負數）
    pub fn age_days(farrow_date: NaiveDate, as_of: NaiveDate) -> i64 {
        (as_of - farrow_date).num_days()
    }

    /// 週齡（向負無窮取整）
    pub fn week_index(age_days: i64) -> i64 {
        age_days.div_euclid(7)
    }
}
