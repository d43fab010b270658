//! 階段判定

use batch_core::{BiologicalProfile, LifecycleThresholds, Stage};

/// 超出所有區間時的預設階段
pub const FALLBACK_STAGE: Stage = Stage::Finisher;

/// 階段判定器
pub struct StageResolver;

impl StageResolver {
    /// 純以日齡判定階段
    ///
    /// - 日齡 < 0：配種
    /// - 依序比對區間 `[from, to)`，取第一個符合者
    /// - 全部不符：大豬
    pub fn calendar_stage(age_days: i64, profile: &BiologicalProfile) -> Stage {
        if age_days < 0 {
            return Stage::Mating;
        }

        profile
            .stages
            .iter()
            .find(|range| range.contains(age_days))
            .map(|range| range.stage)
            .unwrap_or(FALLBACK_STAGE)
    }

    /// 判定目前階段
    ///
    /// 頭數歸零且日齡超過售罄門檻時，不論日齡區間一律為售罄。
    pub fn resolve(
        age_days: i64,
        inventory: i64,
        profile: &BiologicalProfile,
        thresholds: &LifecycleThresholds,
    ) -> Stage {
        if inventory <= 0 && age_days > thresholds.sold_after_days {
            return Stage::Sold;
        }
        Self::calendar_stage(age_days, profile)
    }

    /// 是否結案
    ///
    /// 售罄，或頭數歸零且日齡超過結案門檻（低於售罄門檻）。
    pub fn is_closed(
        stage: Stage,
        inventory: i64,
        age_days: i64,
        thresholds: &LifecycleThresholds,
    ) -> bool {
        stage == Stage::Sold || (inventory <= 0 && age_days > thresholds.closed_after_days)
    }
}
