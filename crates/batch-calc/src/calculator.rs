//! 批次切面主計算器

use batch_core::{
    BatchBase, BatchId, BatchSnapshot, DailyRecord, FarmConfig, FarrowCalendar, HousingOverride,
};
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::enumeration::{BatchEnumerator, EnumeratedBatch};
use crate::housing::HousingResolver;
use crate::inventory::InventoryResolver;
use crate::stage::StageResolver;

/// 批次切面計算器
///
/// 持有已驗證的配置；每次計算都從輸入重新推算，不保留狀態。
#[derive(Debug, Clone)]
pub struct TimelineCalculator {
    /// 牧場配置
    config: FarmConfig,

    /// 錨點批次
    anchor: BatchId,

    /// 分娩日曆
    calendar: FarrowCalendar,
}

impl TimelineCalculator {
    /// 創建新的計算器（驗證配置）
    pub fn new(config: FarmConfig) -> batch_core::Result<Self> {
        config.validate()?;
        let anchor = config.anchor_batch()?;
        let calendar = config.calendar();

        Ok(Self {
            config,
            anchor,
            calendar,
        })
    }

    /// 計算參考日的批次切面
    pub fn calculate(
        &self,
        as_of: NaiveDate,
        bases: &[BatchBase],
        records: &[DailyRecord],
        overrides: &[HousingOverride],
    ) -> Vec<BatchSnapshot> {
        tracing::info!(
            "開始批次切面計算：參考日 {}，基本紀錄 {} 筆，異動 {} 筆，覆寫 {} 筆",
            as_of,
            bases.len(),
            records.len(),
            overrides.len()
        );

        let base_map = self.create_base_map(bases);
        let record_map = self.group_records_by_batch(records, as_of);

        let batches = BatchEnumerator::enumerate(
            &self.calendar,
            self.anchor,
            self.config.batches_per_year,
            as_of,
        );

        let snapshots: Vec<BatchSnapshot> = batches
            .into_iter()
            .map(|batch| {
                let batch_id = batch.batch_id.to_string();
                let base = base_map.get(batch_id.as_str()).copied();
                let batch_records = record_map
                    .get(batch_id.as_str())
                    .map(|list| list.iter().map(|r| (*r).clone()).collect())
                    .unwrap_or_default();

                self.assemble(as_of, batch, batch_id, base, batch_records, overrides)
            })
            .collect();

        tracing::info!(
            "批次切面計算完成：{} ~ {}",
            snapshots.first().map(|s| s.batch_id.as_str()).unwrap_or("-"),
            snapshots.last().map(|s| s.batch_id.as_str()).unwrap_or("-")
        );

        snapshots
    }

    /// 組合單一批次的切面
    fn assemble(
        &self,
        as_of: NaiveDate,
        batch: EnumeratedBatch,
        batch_id: String,
        base: Option<&BatchBase>,
        records: Vec<DailyRecord>,
        overrides: &[HousingOverride],
    ) -> BatchSnapshot {
        let biological = &self.config.biological;

        let farrow_date = base.map(|b| b.farrow_date).unwrap_or(batch.theoretical_farrow);
        let mate_date = base.map(|b| b.mate_date).unwrap_or(batch.theoretical_mate);
        let age_days = FarrowCalendar::age_days(farrow_date, as_of);

        let position = InventoryResolver::resolve(
            age_days,
            base,
            &records,
            biological,
            self.config.allow_negative_inventory,
        );

        let current_stage = StageResolver::resolve(
            age_days,
            position.inventory,
            biological,
            &self.config.thresholds,
        );

        let current_unit = HousingResolver::resolve(
            &batch_id,
            current_stage,
            batch.index,
            base,
            self.config.rotation(current_stage),
            overrides,
        );

        let is_closed = StageResolver::is_closed(
            current_stage,
            position.inventory,
            age_days,
            &self.config.thresholds,
        );

        tracing::debug!(
            "批次 {}: 日齡 {}，階段 {}，舍別 {}，頭數 {}（新女 {}）",
            batch_id,
            age_days,
            current_stage,
            current_unit,
            position.inventory,
            position.gilt_inventory
        );

        BatchSnapshot {
            batch_id,
            index: batch.index,
            mate_date,
            farrow_date,
            age_days,
            week_index: FarrowCalendar::week_index(age_days),
            current_stage,
            current_unit,
            inventory: position.inventory,
            gilt_inventory: position.gilt_inventory,
            is_landed: base.map(BatchBase::is_weaned).unwrap_or(false),
            is_half_landed: base.map(|b| !b.is_weaned()).unwrap_or(false),
            is_theoretical: base.is_none(),
            is_closed,
            base: base.cloned(),
            records,
        }
    }

    /// 建立基本紀錄映射（同一批次重複時取第一筆）
    fn create_base_map<'a>(&self, bases: &'a [BatchBase]) -> HashMap<&'a str, &'a BatchBase> {
        let mut map = HashMap::new();
        for base in bases {
            map.entry(base.batch_id.as_str()).or_insert(base);
        }
        map
    }

    /// 按批次分組參考日（含）以前的異動，依日期排序
    fn group_records_by_batch<'a>(
        &self,
        records: &'a [DailyRecord],
        as_of: NaiveDate,
    ) -> HashMap<&'a str, Vec<&'a DailyRecord>> {
        let mut grouped: HashMap<&str, Vec<&DailyRecord>> = HashMap::new();
        for record in records.iter().filter(|r| r.record_date <= as_of) {
            grouped
                .entry(record.batch_id.as_str())
                .or_default()
                .push(record);
        }
        for list in grouped.values_mut() {
            list.sort_by_key(|r| r.record_date);
        }
        grouped
    }

    /// 獲取配置引用
    pub fn config(&self) -> &FarmConfig {
        &self.config
    }

    /// 獲取分娩日曆
    pub fn calendar(&self) -> &FarrowCalendar {
        &self.calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_core::Stage;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calculator() -> TimelineCalculator {
        TimelineCalculator::new(FarmConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = FarmConfig::default();
        config.interval_days = 0;
        assert!(TimelineCalculator::new(config).is_err());
    }

    #[test]
    fn test_anchor_day_is_lactation_at_index_zero() {
        let snapshots = calculator().calculate(day(2025, 5, 24), &[], &[], &[]);

        assert_eq!(snapshots.len(), 20);
        let anchor = snapshots.iter().find(|s| s.batch_id == "2025-G11").unwrap();
        assert_eq!(anchor.index, 0);
        assert_eq!(anchor.age_days, 0);
        assert_eq!(anchor.current_stage, Stage::Lactation);
        assert!(anchor.is_theoretical);
        assert!(!anchor.is_landed);
        assert!(!anchor.is_half_landed);
        assert_eq!(anchor.inventory, 0);
        // 哺乳階段沒有輪轉
        assert_eq!(anchor.current_unit, crate::housing::UNASSIGNED_UNIT);
    }

    #[test]
    fn test_base_dates_override_theoretical() {
        let base = BatchBase::new("2025-G11".to_string(), day(2025, 1, 30), day(2025, 5, 26))
            .with_liveborn_qty(510);

        let snapshots = calculator().calculate(day(2025, 6, 1), &[base], &[], &[]);
        let anchor = snapshots.iter().find(|s| s.batch_id == "2025-G11").unwrap();

        assert_eq!(anchor.farrow_date, day(2025, 5, 26));
        assert_eq!(anchor.mate_date, day(2025, 1, 30));
        assert_eq!(anchor.age_days, 6);
        assert_eq!(anchor.inventory, 510);
        assert!(anchor.is_half_landed);
        assert!(!anchor.is_theoretical);
    }

    #[test]
    fn test_records_after_reference_date_excluded() {
        let base = BatchBase::new("2025-G11".to_string(), day(2025, 1, 29), day(2025, 5, 24))
            .with_wean_qty(480);
        let records = vec![
            DailyRecord::new("2025-G11".to_string(), day(2025, 7, 10)).with_death_qty(5),
            DailyRecord::new("2025-G11".to_string(), day(2025, 7, 1)).with_death_qty(2),
            DailyRecord::new("2025-G11".to_string(), day(2025, 7, 11)).with_death_qty(9),
            DailyRecord::new("2025-G12".to_string(), day(2025, 7, 1)).with_death_qty(7),
        ];

        let snapshots = calculator().calculate(day(2025, 7, 10), &[base], &records, &[]);
        let anchor = snapshots.iter().find(|s| s.batch_id == "2025-G11").unwrap();

        assert_eq!(anchor.records.len(), 2);
        // 依日期排序
        assert_eq!(anchor.records[0].record_date, day(2025, 7, 1));
        assert_eq!(anchor.inventory, 473);
        assert!(anchor.is_landed);
    }

    #[test]
    fn test_closed_before_sold() {
        // 錨點批次在 120 日齡時售完
        let as_of = day(2025, 9, 21);
        let base = BatchBase::new("2025-G11".to_string(), day(2025, 1, 29), day(2025, 5, 24))
            .with_wean_qty(300);
        let records =
            vec![DailyRecord::new("2025-G11".to_string(), day(2025, 9, 20)).with_sale(300, None)];

        let snapshots = calculator().calculate(as_of, &[base], &records, &[]);
        let anchor = snapshots.iter().find(|s| s.batch_id == "2025-G11").unwrap();

        assert_eq!(anchor.age_days, 120);
        assert_eq!(anchor.inventory, 0);
        assert!(anchor.is_closed);
        assert_eq!(anchor.current_stage, Stage::Piglet);
    }

    #[test]
    fn test_theoretical_old_batch_is_sold() {
        // 理論批次沒有頭數，超過 150 日齡即為售罄
        let snapshots = calculator().calculate(day(2025, 5, 24), &[], &[], &[]);
        let oldest = snapshots.first().unwrap();

        assert_eq!(oldest.age_days, 12 * 21);
        assert_eq!(oldest.current_stage, Stage::Sold);
        assert!(oldest.is_closed);
        assert_eq!(oldest.current_unit, crate::housing::UNASSIGNED_UNIT);
    }
}
