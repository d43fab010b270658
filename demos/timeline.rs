//! # 批次時間軸範例
//!
//! 以預設牧場配置展示完整流程：
//! - 登錄基本紀錄與每日異動
//! - 設定舍別覆寫（含接力）
//! - 計算參考日切面並彙總

use anyhow::Result;
use batchline::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("===== 批次時間軸範例 =====\n");

    // 步驟 1: 牧場配置
    let config = FarmConfig::default();
    println!(
        "[1] 牧場 {}：錨點 {} 於 {} 分娩，每 {} 天一批\n",
        config.farm_id, config.anchor_batch_id, config.anchor_farrow_date, config.interval_days
    );
    let calculator = TimelineCalculator::new(config)?;

    // 步驟 2: 登錄紀錄
    let mut store = RecordStore::new();
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| anyhow::anyhow!("無效日期"));

    store.upsert_base(
        BatchBase::new("2025-G09".to_string(), date(2024, 12, 18)?, date(2025, 4, 12)?)
            .with_breed_qty(42)
            .with_liveborn_qty(530)
            .with_wean_qty(490)
            .with_barn(Stage::Nursery, "保二".to_string())
            .with_piglet_in_qty(420)
            .with_gilt_in_qty(55),
    );
    store.upsert_base(
        BatchBase::new("2025-G11".to_string(), date(2025, 1, 29)?, date(2025, 5, 24)?)
            .with_breed_qty(40)
            .with_liveborn_qty(515)
            .with_wean_qty(478),
    );

    store.record_event("2025-G09", date(2025, 6, 20)?, &DailyEvent::death(3));
    store.record_event("2025-G09", date(2025, 7, 2)?, &DailyEvent::death(2));
    store.record_event("2025-G11", date(2025, 7, 2)?, &DailyEvent::death(4));
    store.record_event(
        "2025-G04",
        date(2025, 7, 5)?,
        &DailyEvent::sale(120, Some(Decimal::new(1185, 1))),
    );

    store.set_override(
        HousingOverride::new("2025-G10".to_string(), Stage::Nursery, "保一".to_string())
            .affecting_following(),
    );
    println!("[2] 已登錄 {} 個批次有異動\n", store.take_dirty().len());

    // 步驟 3: 計算切面
    let as_of = date(2025, 7, 10)?;
    let snapshots = store.compute(&calculator, as_of);

    println!("[3] {} 的批次切面", as_of);
    println!(
        "    {:<9} {:>4} {:>6} {:<6} {:<6} {:>6} {:>4}",
        "批次", "索引", "日齡", "階段", "舍別", "頭數", "新女"
    );
    for snapshot in &snapshots {
        let mark = if snapshot.is_theoretical {
            "（理論）"
        } else if snapshot.is_half_landed {
            "（半落地）"
        } else {
            ""
        };
        println!(
            "    {:<9} {:>4} {:>6} {:<6} {:<6} {:>6} {:>4} {}{}",
            snapshot.batch_id,
            snapshot.index,
            snapshot.age_days,
            snapshot.current_stage.label(),
            snapshot.current_unit,
            snapshot.inventory,
            snapshot.gilt_inventory,
            mark,
            if snapshot.is_closed { " 已結案" } else { "" }
        );
    }
    println!();

    // 步驟 4: 彙總
    let summary = TimelineSummary::from_snapshots(&snapshots);
    println!("[4] 彙總");
    println!("    在場頭數: {}", summary.total_inventory);
    println!("    新女頭數: {}", summary.total_gilt_inventory);
    println!(
        "    落地 {} / 半落地 {} / 理論 {}",
        summary.landed, summary.half_landed, summary.theoretical
    );
    println!("    已結案: {}", summary.closed);
    println!("    出售總重: {} kg", summary.sold_weight_kg);
    for (stage, count) in &summary.stage_counts {
        println!("    {}: {} 批", stage.label(), count);
    }

    // 步驟 5: 匯出
    let bundle = store.export(Some(calculator.config().farm_id.clone()));
    println!("\n[5] 匯出 {} 筆紀錄", bundle.len());

    Ok(())
}
