//! 記憶體紀錄存放

use batch_calc::TimelineCalculator;
use batch_core::{BatchBase, BatchSnapshot, DailyEvent, DailyRecord, HousingOverride, Stage};
use chrono::NaiveDate;

use crate::bundle::{CollectionReport, DataBundle, ImportMode, ImportReport};
use crate::dirty_tracking::DirtyTracker;

/// 更新結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 新增
    Created,
    /// 更新既有紀錄
    Updated,
}

impl UpsertOutcome {
    fn count_into(self, report: &mut CollectionReport) {
        match self {
            UpsertOutcome::Created => report.created += 1,
            UpsertOutcome::Updated => report.updated += 1,
        }
    }
}

/// 紀錄存放
///
/// 保存三個紀錄集合並負責其鍵值語意：
/// - 基本紀錄以批次編號為鍵
/// - 每日異動以（批次, 日期）為鍵
/// - 舍別覆寫以（批次, 階段）為鍵
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    bases: Vec<BatchBase>,
    records: Vec<DailyRecord>,
    overrides: Vec<HousingOverride>,
    dirty: DirtyTracker,
}

impl RecordStore {
    /// 創建空白存放
    pub fn new() -> Self {
        Self::default()
    }

    /// 從資料包建立
    pub fn from_bundle(bundle: DataBundle) -> Self {
        let mut store = Self::new();
        store.restore(bundle);
        store.dirty.clear();
        store
    }

    /// 新增或取代基本紀錄
    pub fn upsert_base(&mut self, base: BatchBase) -> UpsertOutcome {
        self.dirty.mark_dirty(&base.batch_id);
        match self.bases.iter_mut().find(|b| b.batch_id == base.batch_id) {
            Some(existing) => {
                *existing = base;
                UpsertOutcome::Updated
            }
            None => {
                self.bases.push(base);
                UpsertOutcome::Created
            }
        }
    }

    /// 新增或取代整筆每日異動
    pub fn upsert_record(&mut self, record: DailyRecord) -> UpsertOutcome {
        self.dirty.mark_dirty(&record.batch_id);
        match self
            .records
            .iter_mut()
            .find(|r| r.same_key(&record.batch_id, record.record_date))
        {
            Some(existing) => {
                *existing = record;
                UpsertOutcome::Updated
            }
            None => {
                self.records.push(record);
                UpsertOutcome::Created
            }
        }
    }

    /// 登錄當日事件
    ///
    /// 同一批次同一天已有紀錄時，只覆寫事件帶有的欄位。
    pub fn record_event(
        &mut self,
        batch_id: &str,
        record_date: NaiveDate,
        event: &DailyEvent,
    ) -> UpsertOutcome {
        self.dirty.mark_dirty(batch_id);
        match self
            .records
            .iter_mut()
            .find(|r| r.same_key(batch_id, record_date))
        {
            Some(existing) => {
                existing.apply(event);
                UpsertOutcome::Updated
            }
            None => {
                let mut record = DailyRecord::new(batch_id.to_string(), record_date);
                record.apply(event);
                self.records.push(record);
                UpsertOutcome::Created
            }
        }
    }

    /// 刪除某批次某日的異動
    pub fn remove_record(&mut self, batch_id: &str, record_date: NaiveDate) -> bool {
        let before = self.records.len();
        self.records.retain(|r| !r.same_key(batch_id, record_date));
        let removed = self.records.len() != before;
        if removed {
            self.dirty.mark_dirty(batch_id);
        }
        removed
    }

    /// 設定舍別覆寫
    pub fn set_override(&mut self, entry: HousingOverride) -> UpsertOutcome {
        self.dirty.mark_dirty(&entry.batch_id);
        match self
            .overrides
            .iter_mut()
            .find(|o| o.same_key(&entry.batch_id, entry.stage))
        {
            Some(existing) => {
                *existing = entry;
                UpsertOutcome::Updated
            }
            None => {
                self.overrides.push(entry);
                UpsertOutcome::Created
            }
        }
    }

    /// 移除舍別覆寫
    pub fn remove_override(&mut self, batch_id: &str, stage: Stage) -> bool {
        let before = self.overrides.len();
        self.overrides.retain(|o| !o.same_key(batch_id, stage));
        let removed = self.overrides.len() != before;
        if removed {
            self.dirty.mark_dirty(batch_id);
        }
        removed
    }

    /// 合併資料包：三個集合逐鍵更新或新增
    pub fn merge(&mut self, bundle: DataBundle) -> ImportReport {
        let mut report = ImportReport::new(ImportMode::Merge);

        for base in bundle.bases {
            self.upsert_base(base).count_into(&mut report.bases);
        }
        for record in bundle.records {
            self.upsert_record(record).count_into(&mut report.records);
        }
        for entry in bundle.overrides {
            self.set_override(entry).count_into(&mut report.overrides);
        }

        tracing::info!(
            "資料合併完成（{}）：新增 {} 筆，更新 {} 筆",
            report.import_id,
            report.created(),
            report.updated()
        );

        report
    }

    /// 還原資料包：三個集合整批取代
    pub fn restore(&mut self, bundle: DataBundle) -> ImportReport {
        let mut report = ImportReport::new(ImportMode::Restore);
        report.bases.created = bundle.bases.len();
        report.records.created = bundle.records.len();
        report.overrides.created = bundle.overrides.len();

        let previous = std::mem::replace(
            self,
            Self {
                bases: bundle.bases,
                records: bundle.records,
                overrides: bundle.overrides,
                dirty: DirtyTracker::new(),
            },
        );

        let previous_ids = previous.batch_ids();
        self.dirty = previous.dirty;
        for batch_id in previous_ids.into_iter().chain(self.batch_ids()) {
            self.dirty.mark_dirty(&batch_id);
        }

        tracing::info!(
            "資料還原完成（{}）：基本紀錄 {} 筆，異動 {} 筆，覆寫 {} 筆",
            report.import_id,
            report.bases.created,
            report.records.created,
            report.overrides.created
        );

        report
    }

    /// 逐筆解析 JSON 後合併
    ///
    /// 單筆無法解析時略過並記在報告的 `skipped`；文件結構錯誤時存放不變。
    pub fn merge_json(&mut self, json: &str) -> batch_core::Result<ImportReport> {
        let (bundle, skipped) = DataBundle::from_json_str_lenient(json)?;
        let mut report = self.merge(bundle);
        report.bases.skipped = skipped.bases;
        report.records.skipped = skipped.records;
        report.overrides.skipped = skipped.overrides;
        Ok(report)
    }

    /// 解析 JSON 後還原；解析失敗時存放不變
    pub fn restore_json(&mut self, json: &str) -> batch_core::Result<ImportReport> {
        let bundle = DataBundle::from_json_str(json)?;
        Ok(self.restore(bundle))
    }

    /// 匯出目前內容
    pub fn export(&self, farm_id: Option<String>) -> DataBundle {
        DataBundle {
            farm_id,
            bases: self.bases.clone(),
            records: self.records.clone(),
            overrides: self.overrides.clone(),
        }
    }

    /// 以目前內容計算批次切面
    pub fn compute(&self, calculator: &TimelineCalculator, as_of: NaiveDate) -> Vec<BatchSnapshot> {
        calculator.calculate(as_of, &self.bases, &self.records, &self.overrides)
    }

    /// 取出上次取出後有異動的批次
    pub fn take_dirty(&mut self) -> Vec<String> {
        self.dirty.take()
    }

    /// 所有出現過的批次編號
    fn batch_ids(&self) -> Vec<String> {
        self.bases
            .iter()
            .map(|b| b.batch_id.clone())
            .chain(self.records.iter().map(|r| r.batch_id.clone()))
            .chain(self.overrides.iter().map(|o| o.batch_id.clone()))
            .collect()
    }

    pub fn bases(&self) -> &[BatchBase] {
        &self.bases
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn overrides(&self) -> &[HousingOverride] {
        &self.overrides
    }
}
