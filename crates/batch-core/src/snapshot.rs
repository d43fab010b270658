//! 批次切面（計算結果）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BatchBase, DailyRecord, Stage};

/// 批次切面
///
/// 某參考日下單一批次的推算結果，不持久化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    /// 批次編號
    pub batch_id: String,

    /// 相對錨點的批次索引
    pub index: i64,

    /// 配種日（實際優先，否則理論值）
    pub mate_date: NaiveDate,

    /// 分娩日（實際優先，否則理論值）
    pub farrow_date: NaiveDate,

    /// 日齡
    pub age_days: i64,

    /// 週齡
    pub week_index: i64,

    /// 目前階段
    pub current_stage: Stage,

    /// 目前舍別
    pub current_unit: String,

    /// 在場頭數
    pub inventory: i64,

    /// 新女留養頭數
    pub gilt_inventory: i64,

    /// 已落地（已登錄分娩與離乳）
    pub is_landed: bool,

    /// 半落地（有基本紀錄但尚未離乳）
    pub is_half_landed: bool,

    /// 理論批次（無基本紀錄）
    pub is_theoretical: bool,

    /// 已結案
    pub is_closed: bool,

    /// 基本紀錄
    pub base: Option<BatchBase>,

    /// 參考日（含）以前的每日異動
    pub records: Vec<DailyRecord>,
}

impl BatchSnapshot {
    /// 分娩日是否為指定日期
    pub fn is_farrowing_on(&self, date: NaiveDate) -> bool {
        self.farrow_date == date
    }

    /// 參考日以前的累計死亡頭數
    pub fn total_deaths(&self) -> i64 {
        self.records.iter().filter_map(|r| r.pig_death_qty).sum()
    }

    /// 參考日以前的累計出售頭數
    pub fn total_sales(&self) -> i64 {
        self.records.iter().filter_map(|r| r.pig_sale_qty).sum()
    }
}
