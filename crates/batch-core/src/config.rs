//! 牧場配置模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::FarrowCalendar;
use crate::{BatchError, BatchId, Result, Stage};

/// 預設年度批次數（每年序號上限）
pub const DEFAULT_BATCHES_PER_YEAR: u32 = 17;

/// 批次間隔上限（天）
pub const MAX_INTERVAL_DAYS: i64 = 366;

/// 懷孕天數上限
pub const MAX_GESTATION_DAYS: u32 = 366;

/// 牧場配置
///
/// 一次載入、不可變，每次計算時明確傳入。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmConfig {
    /// 牧場ID
    pub farm_id: String,

    /// 批次間隔（天）
    pub interval_days: i64,

    /// 錨點批次（校準點）
    pub anchor_batch_id: String,

    /// 錨點批次分娩日
    pub anchor_farrow_date: NaiveDate,

    /// 每年批次數（序號超過即進位到下一年）
    #[serde(default = "default_batches_per_year")]
    pub batches_per_year: u32,

    /// 生物參數
    pub biological: BiologicalProfile,

    /// 各階段舍別輪轉
    #[serde(default)]
    pub rotations: BTreeMap<Stage, RotationProfile>,

    /// 結案 / 售罄判定門檻
    #[serde(default)]
    pub thresholds: LifecycleThresholds,

    /// 是否允許負庫存
    /// - true: 照實呈現扣減後的頭數，可能為負（預設，與原始資料一致）
    /// - false: 扣減後低於 0 的頭數顯示為 0
    #[serde(default = "default_allow_negative")]
    pub allow_negative_inventory: bool,
}

fn default_batches_per_year() -> u32 {
    DEFAULT_BATCHES_PER_YEAR
}

fn default_allow_negative() -> bool {
    true
}

impl FarmConfig {
    /// 創建新的牧場配置
    ///
    /// 錨點分娩日格式為 `YYYY-MM-DD`。
    pub fn new(
        farm_id: String,
        interval_days: i64,
        anchor_batch_id: String,
        anchor_farrow_date: &str,
        biological: BiologicalProfile,
    ) -> Result<Self> {
        let anchor_farrow_date = NaiveDate::parse_from_str(anchor_farrow_date.trim(), "%Y-%m-%d")
            .map_err(|e| BatchError::InvalidDate(format!("{anchor_farrow_date}: {e}")))?;

        Ok(Self {
            farm_id,
            interval_days,
            anchor_batch_id,
            anchor_farrow_date,
            batches_per_year: DEFAULT_BATCHES_PER_YEAR,
            biological,
            rotations: BTreeMap::new(),
            thresholds: LifecycleThresholds::default(),
            allow_negative_inventory: true,
        })
    }

    /// 從 JSON 載入並驗證
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FarmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置每年批次數
    pub fn with_batches_per_year(mut self, batches_per_year: u32) -> Self {
        self.batches_per_year = batches_per_year;
        self
    }

    /// 建構器模式：設置某階段的舍別輪轉
    pub fn with_rotation(mut self, stage: Stage, rotation: RotationProfile) -> Self {
        self.rotations.insert(stage, rotation);
        self
    }

    /// 建構器模式：設置判定門檻
    pub fn with_thresholds(mut self, thresholds: LifecycleThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// 建構器模式：設置是否允許負庫存
    pub fn with_allow_negative_inventory(mut self, allow: bool) -> Self {
        self.allow_negative_inventory = allow;
        self
    }

    /// 驗證配置
    ///
    /// 只有會讓推算失去意義的錯誤才拒絕，其餘不完整資料交由計算降級處理。
    pub fn validate(&self) -> Result<()> {
        if self.interval_days <= 0 {
            return Err(BatchError::InvalidInterval(self.interval_days));
        }

        if self.interval_days > MAX_INTERVAL_DAYS {
            return Err(BatchError::InvalidConfig(format!(
                "批次間隔 {} 天超過上限 {} 天",
                self.interval_days, MAX_INTERVAL_DAYS
            )));
        }

        if self.batches_per_year == 0 {
            return Err(BatchError::InvalidConfig("每年批次數必須大於 0".to_string()));
        }

        self.anchor_batch()?;
        self.biological.validate()?;

        for (stage, rotation) in &self.rotations {
            if rotation.units.is_empty() {
                tracing::warn!("階段 {} 的輪轉舍別為空，將顯示為未指定", stage);
            } else if rotation.seed_index().is_none() {
                tracing::warn!(
                    "階段 {} 的起始舍別 {} 不在輪轉清單中，改由第一個舍別起算",
                    stage,
                    rotation.seed_unit
                );
            }
        }

        Ok(())
    }

    /// 解析錨點批次編號
    pub fn anchor_batch(&self) -> Result<BatchId> {
        self.anchor_batch_id.parse()
    }

    /// 獲取某階段的輪轉配置
    pub fn rotation(&self, stage: Stage) -> Option<&RotationProfile> {
        self.rotations.get(&stage)
    }

    /// 以錨點建立分娩日曆
    pub fn calendar(&self) -> FarrowCalendar {
        FarrowCalendar::new(
            self.anchor_farrow_date,
            self.interval_days,
            self.biological.gestation_days,
        )
    }
}

impl Default for FarmConfig {
    fn default() -> Self {
        let round = |prefix: &str| -> RotationProfile {
            RotationProfile::new(
                ["一", "二", "三"]
                    .iter()
                    .map(|n| format!("{prefix}{n}"))
                    .collect(),
                format!("{prefix}一"),
            )
        };

        Self {
            farm_id: "YL".to_string(),
            interval_days: 21,
            anchor_batch_id: "2025-G11".to_string(),
            anchor_farrow_date: NaiveDate::from_ymd_opt(2025, 5, 24).expect("預設錨點日期"),
            batches_per_year: DEFAULT_BATCHES_PER_YEAR,
            biological: BiologicalProfile::default(),
            rotations: BTreeMap::new(),
            thresholds: LifecycleThresholds::default(),
            allow_negative_inventory: true,
        }
        .with_rotation(Stage::Nursery, round("保"))
        .with_rotation(Stage::Piglet, round("小"))
        .with_rotation(
            Stage::Grower,
            RotationProfile::new(vec!["中一".to_string(), "中二".to_string()], "中一".to_string()),
        )
        .with_rotation(
            Stage::Finisher,
            RotationProfile::new(vec!["大一".to_string(), "大二".to_string()], "大一".to_string()),
        )
    }
}

/// 生物參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiologicalProfile {
    /// 懷孕天數
    pub gestation_days: u32,

    /// 哺乳天數
    pub lactation_days: u32,

    /// 新女分群日齡（此日齡起拆分為肉豬與種用留養）
    pub gilt_split_at_day: u32,

    /// 階段日齡區間（依序、不重疊）
    pub stages: Vec<StageRange>,
}

impl BiologicalProfile {
    /// 創建生物參數（不含階段區間）
    pub fn new(gestation_days: u32, lactation_days: u32, gilt_split_at_day: u32) -> Self {
        Self {
            gestation_days,
            lactation_days,
            gilt_split_at_day,
            stages: Vec::new(),
        }
    }

    /// 建構器模式：追加一個階段區間
    pub fn with_stage(mut self, stage: Stage, from_day: u32, to_day: u32) -> Self {
        self.stages.push(StageRange::new(stage, from_day, to_day));
        self
    }

    /// 驗證階段區間：每段 `from < to`，且依序不重疊
    pub fn validate(&self) -> Result<()> {
        if self.gestation_days > MAX_GESTATION_DAYS {
            return Err(BatchError::InvalidConfig(format!(
                "懷孕天數 {} 超過上限 {} 天",
                self.gestation_days, MAX_GESTATION_DAYS
            )));
        }

        let mut previous: Option<&StageRange> = None;

        for range in &self.stages {
            if range.from_day >= range.to_day {
                return Err(BatchError::InvalidStageRanges(format!(
                    "{} 區間 [{}, {}) 為空",
                    range.stage, range.from_day, range.to_day
                )));
            }

            if let Some(prev) = previous {
                if range.from_day < prev.to_day {
                    return Err(BatchError::InvalidStageRanges(format!(
                        "{} [{}, {}) 與前一段 {} [{}, {}) 重疊或未依序排列",
                        range.stage,
                        range.from_day,
                        range.to_day,
                        prev.stage,
                        prev.from_day,
                        prev.to_day
                    )));
                }
            }

            previous = Some(range);
        }

        Ok(())
    }
}

impl Default for BiologicalProfile {
    fn default() -> Self {
        Self::new(115, 28, 77)
            .with_stage(Stage::Lactation, 0, 28)
            .with_stage(Stage::Nursery, 28, 77)
            .with_stage(Stage::Piglet, 77, 133)
            .with_stage(Stage::Grower, 133, 168)
            .with_stage(Stage::Finisher, 168, 9999)
    }
}

/// 階段日齡區間 `[from_day, to_day)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRange {
    pub stage: Stage,
    pub from_day: u32,
    pub to_day: u32,
}

impl StageRange {
    pub fn new(stage: Stage, from_day: u32, to_day: u32) -> Self {
        Self {
            stage,
            from_day,
            to_day,
        }
    }

    /// 日齡是否落在區間內（左閉右開）
    pub fn contains(&self, age_days: i64) -> bool {
        age_days >= i64::from(self.from_day) && age_days < i64::from(self.to_day)
    }
}

/// 舍別輪轉配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationProfile {
    /// 輪轉舍別（依序）
    pub units: Vec<String>,

    /// 起始舍別
    pub seed_unit: String,
}

impl RotationProfile {
    pub fn new(units: Vec<String>, seed_unit: String) -> Self {
        Self { units, seed_unit }
    }

    /// 舍別在輪轉清單中的位置
    pub fn position(&self, unit: &str) -> Option<usize> {
        self.units.iter().position(|u| u == unit)
    }

    /// 起始舍別的位置
    pub fn seed_index(&self) -> Option<usize> {
        self.position(&self.seed_unit)
    }

    /// 取得第 `step` 個舍別（環狀）
    pub fn unit_at(&self, step: usize) -> Option<&str> {
        if self.units.is_empty() {
            return None;
        }
        Some(self.units[step % self.units.len()].as_str())
    }
}

/// 結案 / 售罄判定門檻
///
/// 兩者刻意分開：批次可以先在帳務上結案，之後才在行政上標為售罄。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleThresholds {
    /// 頭數歸零且日齡超過此值即視為結案
    pub closed_after_days: i64,

    /// 頭數歸零且日齡超過此值即強制為售罄階段
    pub sold_after_days: i64,
}

impl Default for LifecycleThresholds {
    fn default() -> Self {
        Self {
            closed_after_days: 100,
            sold_after_days: 150,
        }
    }
}
