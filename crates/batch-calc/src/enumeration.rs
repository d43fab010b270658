//! 批次列舉

use batch_core::{BatchId, FarrowCalendar};
use chrono::NaiveDate;

/// 參考日所在批次之前列出的批次數
pub const WINDOW_BEFORE: i64 = 12;

/// 參考日所在批次之後列出的批次數
pub const WINDOW_AFTER: i64 = 7;

/// 列舉出的批次（僅日曆推算）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratedBatch {
    /// 相對錨點的索引
    pub index: i64,
    /// 批次編號
    pub batch_id: BatchId,
    /// 理論分娩日
    pub theoretical_farrow: NaiveDate,
    /// 理論配種日
    pub theoretical_mate: NaiveDate,
}

/// 批次列舉器
pub struct BatchEnumerator;

impl BatchEnumerator {
    /// 參考日的批次索引範圍（含頭尾）
    pub fn window(calendar: &FarrowCalendar, as_of: NaiveDate) -> std::ops::RangeInclusive<i64> {
        let center = calendar.batch_index_on(as_of);
        (center - WINDOW_BEFORE)..=(center + WINDOW_AFTER)
    }

    /// 列舉參考日前後的批次
    pub fn enumerate(
        calendar: &FarrowCalendar,
        anchor: BatchId,
        batches_per_year: u32,
        as_of: NaiveDate,
    ) -> Vec<EnumeratedBatch> {
        Self::window(calendar, as_of)
            .map(|index| {
                let theoretical_farrow = calendar.farrow_date(index);
                EnumeratedBatch {
                    index,
                    batch_id: anchor.offset(index, batches_per_year),
                    theoretical_farrow,
                    theoretical_mate: calendar.mate_date(theoretical_farrow),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> FarrowCalendar {
        FarrowCalendar::new(NaiveDate::from_ymd_opt(2025, 5, 24).unwrap(), 21, 115)
    }

    #[test]
    fn test_window_on_anchor_day() {
        let as_of = NaiveDate::from_ymd_opt(2025, 5, 24).unwrap();
        let batches = BatchEnumerator::enumerate(&calendar(), BatchId::new(2025, 11), 17, as_of);

        assert_eq!(batches.len(), 20);
        assert_eq!(batches.first().unwrap().index, -12);
        assert_eq!(batches.last().unwrap().index, 7);

        let anchor = batches.iter().find(|b| b.index == 0).unwrap();
        assert_eq!(anchor.batch_id.to_string(), "2025-G11");
        assert_eq!(anchor.theoretical_farrow, as_of);
        assert_eq!(
            anchor.theoretical_mate,
            NaiveDate::from_ymd_opt(2025, 1, 29).unwrap()
        );
    }

    #[test]
    fn test_batch_ids_wrap_years() {
        let as_of = NaiveDate::from_ymd_opt(2025, 5, 24).unwrap();
        let batches = BatchEnumerator::enumerate(&calendar(), BatchId::new(2025, 11), 17, as_of);

        let ids: Vec<String> = batches.iter().map(|b| b.batch_id.to_string()).collect();
        assert_eq!(ids[0], "2024-G16");
        assert_eq!(ids[1], "2024-G17");
        assert_eq!(ids[2], "2025-G01");
        assert_eq!(ids[19], "2026-G01");
    }

    #[test]
    fn test_window_shifts_one_interval_later() {
        let cal = calendar();
        let day_before = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
        let next_batch_day = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();

        assert_eq!(BatchEnumerator::window(&cal, day_before), -12..=7);
        assert_eq!(BatchEnumerator::window(&cal, next_batch_day), -11..=8);
    }

    #[test]
    fn test_farrow_dates_strictly_increase() {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let batches = BatchEnumerator::enumerate(&calendar(), BatchId::new(2025, 11), 17, as_of);

        for pair in batches.windows(2) {
            assert_eq!(pair[1].index, pair[0].index + 1);
            assert_eq!((pair[1].theoretical_farrow - pair[0].theoretical_farrow).num_days(), 21);
        }
    }
}
