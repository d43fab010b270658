//! 在場頭數計算

use batch_core::{BatchBase, BiologicalProfile, DailyRecord};

/// 頭數計算結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryPosition {
    /// 依日齡取得的基準頭數
    pub base_inventory: i64,
    /// 累計扣減（死亡 + 出售）
    pub reductions: i64,
    /// 扣減後頭數
    pub inventory: i64,
    /// 新女留養頭數
    pub gilt_inventory: i64,
}

/// 頭數計算器
///
/// 每個欄位獨立檢查實際資料是否存在，缺少時才退回預設值。
pub struct InventoryResolver;

impl InventoryResolver {
    /// 計算在場頭數
    pub fn resolve(
        age_days: i64,
        base: Option<&BatchBase>,
        records: &[DailyRecord],
        profile: &BiologicalProfile,
        allow_negative_inventory: bool,
    ) -> InventoryPosition {
        let (base_inventory, gilt_inventory) = Self::base_position(age_days, base, profile);
        let reductions = Self::total_reductions(records);

        let mut inventory = base_inventory - reductions;
        if !allow_negative_inventory && inventory < 0 {
            inventory = 0;
        }

        InventoryPosition {
            base_inventory,
            reductions,
            inventory,
            gilt_inventory,
        }
    }

    /// 依日齡取得基準頭數與新女頭數（尚未扣減）
    pub fn base_position(
        age_days: i64,
        base: Option<&BatchBase>,
        profile: &BiologicalProfile,
    ) -> (i64, i64) {
        if age_days < 0 {
            return (Self::pre_farrow_qty(base), 0);
        }

        if age_days < i64::from(profile.lactation_days) {
            return (Self::suckling_qty(base), 0);
        }

        let weaned = Self::weaned_qty(base);
        if age_days < i64::from(profile.gilt_split_at_day) {
            return (weaned, 0);
        }

        Self::split_qty(base).unwrap_or((weaned, 0))
    }

    /// 分娩前：配種頭數
    fn pre_farrow_qty(base: Option<&BatchBase>) -> i64 {
        base.and_then(|b| b.breed_qty).unwrap_or(0)
    }

    /// 哺乳期：活產頭數
    fn suckling_qty(base: Option<&BatchBase>) -> i64 {
        base.and_then(|b| b.liveborn_qty).unwrap_or(0)
    }

    /// 離乳後：離乳頭數，其次進保育頭數
    ///
    /// 已登錄的 0 視為有值，不會退回進保育頭數。
    fn weaned_qty(base: Option<&BatchBase>) -> i64 {
        base.and_then(|b| b.wean_qty.or(b.nursery_in_qty))
            .unwrap_or(0)
    }

    /// 分群後：已登錄分群資料才拆分，兩個數量各自預設為 0
    fn split_qty(base: Option<&BatchBase>) -> Option<(i64, i64)> {
        base.filter(|b| b.has_split_data())
            .map(|b| (b.piglet_in_qty.unwrap_or(0), b.gilt_in_qty.unwrap_or(0)))
    }

    /// 累計扣減：每筆紀錄的死亡與出售直接相減，與順序無關
    pub fn total_reductions(records: &[DailyRecord]) -> i64 {
        records.iter().map(DailyRecord::pig_reduction).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn base() -> BatchBase {
        BatchBase::new(
            "2025-G11".to_string(),
            NaiveDate::from_ymd_opt(2025, 1, 29).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 24).unwrap(),
        )
    }

    fn record(day: u32, death: Option<i64>, sale: Option<i64>) -> DailyRecord {
        let mut record = DailyRecord::new(
            "2025-G11".to_string(),
            NaiveDate::from_ymd_opt(2025, 8, day).unwrap(),
        );
        record.pig_death_qty = death;
        record.pig_sale_qty = sale;
        record
    }

    #[test]
    fn test_pre_farrow_uses_breed_qty() {
        let profile = BiologicalProfile::default();
        let base = base().with_breed_qty(42);

        assert_eq!(InventoryResolver::base_position(-10, Some(&base), &profile), (42, 0));
        // 理論批次分娩前不預設頭數
        assert_eq!(InventoryResolver::base_position(-10, None, &profile), (0, 0));
    }

    #[test]
    fn test_lactation_uses_liveborn() {
        let profile = BiologicalProfile::default();
        let base = base().with_breed_qty(42).with_liveborn_qty(520);

        assert_eq!(InventoryResolver::base_position(0, Some(&base), &profile), (520, 0));
        assert_eq!(InventoryResolver::base_position(27, Some(&base), &profile), (520, 0));
    }

    #[test]
    fn test_weaned_falls_back_to_nursery_in() {
        let profile = BiologicalProfile::default();

        let weaned = base().with_wean_qty(480).with_nursery_in_qty(470);
        assert_eq!(InventoryResolver::base_position(28, Some(&weaned), &profile), (480, 0));

        let nursery_only = base().with_nursery_in_qty(470);
        assert_eq!(
            InventoryResolver::base_position(50, Some(&nursery_only), &profile),
            (470, 0)
        );

        assert_eq!(InventoryResolver::base_position(50, Some(&base()), &profile), (0, 0));
    }

    #[test]
    fn test_recorded_zero_wean_is_kept() {
        let profile = BiologicalProfile::default();
        let base = base().with_wean_qty(0).with_nursery_in_qty(470);

        assert!(base.is_weaned());
        assert_eq!(InventoryResolver::base_position(50, Some(&base), &profile), (0, 0));
    }

    #[test]
    fn test_gilt_split_with_data() {
        let profile = BiologicalProfile::default();
        let base = base()
            .with_wean_qty(480)
            .with_piglet_in_qty(400)
            .with_gilt_in_qty(50);

        assert_eq!(InventoryResolver::base_position(76, Some(&base), &profile), (480, 0));
        assert_eq!(InventoryResolver::base_position(80, Some(&base), &profile), (400, 50));
    }

    #[test]
    fn test_gilt_split_partial_data_defaults_each_to_zero() {
        let profile = BiologicalProfile::default();

        let gilt_only = base().with_wean_qty(480).with_gilt_in_qty(50);
        assert_eq!(InventoryResolver::base_position(80, Some(&gilt_only), &profile), (0, 50));

        let piglet_only = base().with_wean_qty(480).with_piglet_in_qty(430);
        assert_eq!(
            InventoryResolver::base_position(80, Some(&piglet_only), &profile),
            (430, 0)
        );
    }

    #[test]
    fn test_gilt_split_without_data_keeps_weaned() {
        let profile = BiologicalProfile::default();
        let base = base().with_wean_qty(480);

        assert_eq!(InventoryResolver::base_position(80, Some(&base), &profile), (480, 0));
        assert_eq!(InventoryResolver::base_position(80, None, &profile), (0, 0));
    }

    #[test]
    fn test_records_subtract_deaths_and_sales() {
        let profile = BiologicalProfile::default();
        let base = base().with_wean_qty(480);
        let records = vec![
            record(1, Some(2), None),
            record(2, None, Some(100)),
            record(3, Some(1), Some(50)),
            record(4, None, None),
        ];

        let position = InventoryResolver::resolve(60, Some(&base), &records, &profile, true);
        assert_eq!(position.base_inventory, 480);
        assert_eq!(position.reductions, 153);
        assert_eq!(position.inventory, 327);
        assert_eq!(position.gilt_inventory, 0);
    }

    #[test]
    fn test_negative_inventory_clamped_when_disallowed() {
        let profile = BiologicalProfile::default();
        let records = vec![record(1, Some(3), None)];

        let allowed = InventoryResolver::resolve(60, None, &records, &profile, true);
        assert_eq!(allowed.inventory, -3);

        let clamped = InventoryResolver::resolve(60, None, &records, &profile, false);
        assert_eq!(clamped.inventory, 0);
        assert_eq!(clamped.reductions, 3);
    }

    proptest! {
        #[test]
        fn test_reductions_independent_of_order(
            entries in proptest::collection::vec(
                (proptest::option::of(0i64..50), proptest::option::of(0i64..200)),
                0..30,
            ),
        ) {
            let profile = BiologicalProfile::default();
            let base = base().with_wean_qty(500);

            let records: Vec<DailyRecord> = entries
                .iter()
                .enumerate()
                .map(|(i, (death, sale))| record((i % 28) as u32 + 1, *death, *sale))
                .collect();
            let mut reversed = records.clone();
            reversed.reverse();

            let expected: i64 = entries
                .iter()
                .map(|(d, s)| d.unwrap_or(0) + s.unwrap_or(0))
                .sum();

            let forward = InventoryResolver::resolve(60, Some(&base), &records, &profile, true);
            let backward = InventoryResolver::resolve(60, Some(&base), &reversed, &profile, true);

            prop_assert_eq!(forward.inventory, 500 - expected);
            prop_assert_eq!(forward, backward);
            prop_assert!(forward.inventory <= forward.base_inventory);
        }
    }
}
