//! 生命週期階段

use serde::{Deserialize, Serialize};
use std::fmt;

/// 生產階段
///
/// 順序即生命週期先後，`Ord` 依此排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// 配種（分娩前）
    Mating,
    /// 哺乳
    Lactation,
    /// 保育
    Nursery,
    /// 小豬
    Piglet,
    /// 中豬
    Grower,
    /// 大豬
    Finisher,
    /// 新女（種用留養）
    Gilt,
    /// 已售罄
    Sold,
}

impl Stage {
    /// 所有階段（依生命週期順序）
    pub const ALL: [Stage; 8] = [
        Stage::Mating,
        Stage::Lactation,
        Stage::Nursery,
        Stage::Piglet,
        Stage::Grower,
        Stage::Finisher,
        Stage::Gilt,
        Stage::Sold,
    ];

    /// 顯示用名稱
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Mating => "配種",
            Stage::Lactation => "哺乳",
            Stage::Nursery => "保育",
            Stage::Piglet => "小豬",
            Stage::Grower => "中豬",
            Stage::Finisher => "大豬",
            Stage::Gilt => "新女",
            Stage::Sold => "已售罄",
        }
    }

    /// 是否為終結階段
    pub fn is_terminal(&self) -> bool {
        *self == Stage::Sold
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
