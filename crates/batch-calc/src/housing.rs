//! 舍別判定與輪轉接力

use batch_core::{BatchBase, HousingOverride, RotationProfile, Stage};

/// 階段未配置輪轉時的舍別標記
pub const UNASSIGNED_UNIT: &str = "未指定";

/// 舍別判定器
///
/// 優先順序：本批次覆寫 → 基本紀錄登錄的舍別 → 輪轉推算。
pub struct HousingResolver;

impl HousingResolver {
    /// 判定批次目前所在舍別
    pub fn resolve(
        batch_id: &str,
        stage: Stage,
        index: i64,
        base: Option<&BatchBase>,
        rotation: Option<&RotationProfile>,
        overrides: &[HousingOverride],
    ) -> String {
        if let Some(unit) = Self::explicit_override(batch_id, stage, overrides) {
            return unit.to_string();
        }

        if let Some(unit) = base.and_then(|b| b.barn_for(stage)) {
            return unit.to_string();
        }

        Self::default_unit(batch_id, stage, index, rotation, overrides)
    }

    /// 本批次本階段的覆寫舍別
    fn explicit_override<'a>(
        batch_id: &str,
        stage: Stage,
        overrides: &'a [HousingOverride],
    ) -> Option<&'a str> {
        overrides
            .iter()
            .find(|o| o.same_key(batch_id, stage))
            .map(|o| o.assigned_unit.as_str())
            .filter(|unit| !unit.trim().is_empty())
    }

    /// 輪轉推算的預設舍別
    ///
    /// 有更早的接力覆寫時，取其舍別的下一個；否則由起始舍別加上索引絕對值推算。
    /// 接力只前進一格，不論中間隔了幾批。
    pub fn default_unit(
        batch_id: &str,
        stage: Stage,
        index: i64,
        rotation: Option<&RotationProfile>,
        overrides: &[HousingOverride],
    ) -> String {
        let Some(rotation) = rotation.filter(|r| !r.units.is_empty()) else {
            return UNASSIGNED_UNIT.to_string();
        };

        let step = match Self::nearest_relay(batch_id, stage, overrides) {
            Some(relay) => {
                tracing::debug!(
                    "批次 {} {} 由 {} 的覆寫舍別 {} 接續輪轉",
                    batch_id,
                    stage,
                    relay.batch_id,
                    relay.assigned_unit
                );
                rotation
                    .position(&relay.assigned_unit)
                    .map(|p| p + 1)
                    .unwrap_or(0)
            }
            None => {
                let seed = rotation.seed_index().unwrap_or(0);
                let len = rotation.units.len() as u64;
                seed + (index.unsigned_abs() % len) as usize
            }
        };

        rotation
            .unit_at(step)
            .unwrap_or(UNASSIGNED_UNIT)
            .to_string()
    }

    /// 同階段、影響後續、批次編號（字串順序）小於本批次者中最接近的一筆
    fn nearest_relay<'a>(
        batch_id: &str,
        stage: Stage,
        overrides: &'a [HousingOverride],
    ) -> Option<&'a HousingOverride> {
        overrides
            .iter()
            .filter(|o| o.stage == stage && o.affect_following)
            .filter(|o| o.batch_id.as_str() < batch_id)
            .max_by(|a, b| a.batch_id.cmp(&b.batch_id))
    }
}
