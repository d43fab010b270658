//! 切面彙總

use batch_core::{BatchSnapshot, Stage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 切面彙總
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineSummary {
    /// 總在場頭數
    pub total_inventory: i64,
    /// 新女培育頭數
    pub total_gilt_inventory: i64,
    /// 各階段批次數
    pub stage_counts: BTreeMap<Stage, usize>,
    /// 已落地批次數
    pub landed: usize,
    /// 半落地批次數
    pub half_landed: usize,
    /// 理論批次數
    pub theoretical: usize,
    /// 已結案批次數
    pub closed: usize,
    /// 已出售總重（公斤，僅計有均重的紀錄）
    pub sold_weight_kg: Decimal,
}

impl TimelineSummary {
    /// 從切面彙總
    pub fn from_snapshots(snapshots: &[BatchSnapshot]) -> Self {
        let mut summary = Self::default();

        for snapshot in snapshots {
            summary.total_inventory += snapshot.inventory;
            summary.total_gilt_inventory += snapshot.gilt_inventory;
            *summary
                .stage_counts
                .entry(snapshot.current_stage)
                .or_insert(0) += 1;

            if snapshot.is_landed {
                summary.landed += 1;
            }
            if snapshot.is_half_landed {
                summary.half_landed += 1;
            }
            if snapshot.is_theoretical {
                summary.theoretical += 1;
            }
            if snapshot.is_closed {
                summary.closed += 1;
            }

            summary.sold_weight_kg += snapshot
                .records
                .iter()
                .filter_map(|r| r.sale_weight_kg())
                .sum::<Decimal>();
        }

        summary
    }

    /// 某階段的批次數
    pub fn count(&self, stage: Stage) -> usize {
        self.stage_counts.get(&stage).copied().unwrap_or(0)
    }
}
