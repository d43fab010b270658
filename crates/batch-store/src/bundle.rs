//! 備份資料包與匯入報告

use batch_core::{BatchBase, BatchError, DailyRecord, HousingOverride};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 備份資料包
///
/// 三個紀錄集合的完整內容，用於匯出、合併與還原。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataBundle {
    /// 牧場ID
    #[serde(default)]
    pub farm_id: Option<String>,

    /// 批次基本紀錄
    #[serde(default)]
    pub bases: Vec<BatchBase>,

    /// 每日異動紀錄
    #[serde(default)]
    pub records: Vec<DailyRecord>,

    /// 舍別覆寫
    #[serde(default)]
    pub overrides: Vec<HousingOverride>,
}

impl DataBundle {
    /// 從 JSON 解析
    pub fn from_json_str(json: &str) -> batch_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 逐筆解析 JSON
    ///
    /// 文件本身須為物件、三個集合須為陣列；單筆無法解析時略過並計入
    /// 回傳的略過筆數，其餘照常保留。
    pub fn from_json_str_lenient(json: &str) -> batch_core::Result<(Self, SkippedRows)> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(object) = value else {
            return Err(BatchError::InvalidBundle("頂層必須是物件".to_string()));
        };

        let mut skipped = SkippedRows::default();
        let bundle = Self {
            farm_id: object
                .get("farm_id")
                .and_then(Value::as_str)
                .map(str::to_string),
            bases: parse_rows(&object, "bases", &mut skipped.bases)?,
            records: parse_rows(&object, "records", &mut skipped.records)?,
            overrides: parse_rows(&object, "overrides", &mut skipped.overrides)?,
        };

        Ok((bundle, skipped))
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> batch_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 紀錄總數
    pub fn len(&self) -> usize {
        self.bases.len() + self.records.len() + self.overrides.len()
    }

    /// 是否沒有任何紀錄
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 逐筆解析時各集合略過的筆數
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedRows {
    pub bases: usize,
    pub records: usize,
    pub overrides: usize,
}

fn parse_rows<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &str,
    skipped: &mut usize,
) -> batch_core::Result<Vec<T>> {
    let rows = match object.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(BatchError::InvalidBundle(format!("{key} 必須是陣列"))),
    };

    let mut parsed = Vec::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        match T::deserialize(row) {
            Ok(item) => parsed.push(item),
            Err(e) => {
                tracing::warn!("{} 第 {} 筆無法解析，已略過: {}", key, position + 1, e);
                *skipped += 1;
            }
        }
    }
    Ok(parsed)
}

/// 匯入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportMode {
    /// 合併（逐鍵更新或新增）
    Merge,
    /// 還原（整批取代）
    Restore,
}

/// 單一集合的匯入統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionReport {
    /// 新增筆數
    pub created: usize,
    /// 更新筆數
    pub updated: usize,
    /// 無法解析而略過的筆數
    #[serde(default)]
    pub skipped: usize,
}

impl CollectionReport {
    /// 處理總筆數
    pub fn total(&self) -> usize {
        self.created + self.updated
    }
}

/// 匯入報告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// 匯入批次ID
    pub import_id: Uuid,

    /// 匯入模式
    pub mode: ImportMode,

    /// 基本紀錄
    pub bases: CollectionReport,

    /// 每日異動
    pub records: CollectionReport,

    /// 舍別覆寫
    pub overrides: CollectionReport,
}

impl ImportReport {
    /// 創建空白報告
    pub fn new(mode: ImportMode) -> Self {
        Self {
            import_id: Uuid::new_v4(),
            mode,
            bases: CollectionReport::default(),
            records: CollectionReport::default(),
            overrides: CollectionReport::default(),
        }
    }

    /// 新增總筆數
    pub fn created(&self) -> usize {
        self.bases.created + self.records.created + self.overrides.created
    }

    /// 更新總筆數
    pub fn updated(&self) -> usize {
        self.bases.updated + self.records.updated + self.overrides.updated
    }

    /// 略過總筆數
    pub fn skipped(&self) -> usize {
        self.bases.skipped + self.records.skipped + self.overrides.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_bundle_json() {
        let json = r#"{
            "bases": [
                { "batch_id": "2025-G11", "mate_date": "2025-01-29", "farrow_date": "2025-05-24", "wean_qty": 480 }
            ]
        }"#;

        let bundle = DataBundle::from_json_str(json).unwrap();
        assert_eq!(bundle.bases.len(), 1);
        assert!(bundle.records.is_empty());
        assert!(bundle.overrides.is_empty());
        assert_eq!(bundle.len(), 1);
        assert!(bundle.farm_id.is_none());
    }

    #[test]
    fn test_bundle_json_is_stable() {
        let bundle = DataBundle::from_json_str(
            r#"{ "overrides": [ { "batch_id": "2025-G11", "stage": "nursery", "assigned_unit": "保三" } ] }"#,
        )
        .unwrap();

        let json = bundle.to_json_string().unwrap();
        assert_eq!(DataBundle::from_json_str(&json).unwrap(), bundle);
        assert!(!bundle.overrides[0].affect_following);
    }

    #[test]
    fn test_malformed_bundle_is_error() {
        assert!(DataBundle::from_json_str("{ \"bases\": 3 }").is_err());
    }

    #[test]
    fn test_lenient_parse_keeps_good_rows() {
        let json = r#"{
            "farm_id": "YL",
            "bases": [
                { "batch_id": "2025-G10", "mate_date": "2025-01-08", "farrow_date": "2025-05-03" },
                { "batch_id": "2025-G11", "mate_date": "2025-01-29", "farrow_date": "not-a-date" }
            ],
            "records": [
                { "record_date": "2025-07-01", "batch_id": "2025-G10", "pig_death_qty": 2 },
                42
            ]
        }"#;

        let (bundle, skipped) = DataBundle::from_json_str_lenient(json).unwrap();
        assert_eq!(bundle.farm_id.as_deref(), Some("YL"));
        assert_eq!(bundle.bases.len(), 1);
        assert_eq!(bundle.bases[0].batch_id, "2025-G10");
        assert_eq!(bundle.records.len(), 1);
        assert!(bundle.overrides.is_empty());
        assert_eq!(
            skipped,
            SkippedRows { bases: 1, records: 1, overrides: 0 }
        );

        // 嚴格解析整份拒絕
        assert!(DataBundle::from_json_str(json).is_err());
    }

    #[test]
    fn test_lenient_parse_rejects_bad_structure() {
        assert!(DataBundle::from_json_str_lenient("[1, 2]").is_err());
        assert!(matches!(
            DataBundle::from_json_str_lenient(r#"{ "records": "bad" }"#),
            Err(BatchError::InvalidBundle(_))
        ));
        assert!(DataBundle::from_json_str_lenient("{ not json").is_err());
    }

    #[test]
    fn test_report_totals() {
        let mut report = ImportReport::new(ImportMode::Merge);
        report.bases = CollectionReport { created: 2, updated: 1, skipped: 1 };
        report.records = CollectionReport { created: 5, updated: 0, skipped: 0 };

        assert_eq!(report.created(), 7);
        assert_eq!(report.updated(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.bases.total(), 3);
    }
}
