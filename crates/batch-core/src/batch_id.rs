//! 批次編號（`YYYY-Gnn`）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::BatchError;

/// 批次編號
///
/// 以「年度 + 年內序號」表示，例如 `2025-G11`。序號從 1 起算，
/// 每年的序號上限（年度批次數）由配置決定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId {
    /// 年度
    pub year: i32,
    /// 年內序號（1 起算）
    pub sequence: u32,
}

impl BatchId {
    /// 創建批次編號
    pub fn new(year: i32, sequence: u32) -> Self {
        Self { year, sequence }
    }

    /// 依偏移量推算另一個批次編號
    ///
    /// 序號超出 `1..=bucket_size` 時進位或借位到相鄰年度。
    pub fn offset(self, offset: i64, bucket_size: u32) -> Self {
        let (year, sequence) = offset_sequence(self.year, self.sequence, bucket_size, offset);
        Self { year, sequence }
    }
}

/// 年度序號位移（純函數）
///
/// `bucket_size` 必須大於 0，由配置驗證保證。
pub fn offset_sequence(year: i32, sequence: u32, bucket_size: u32, offset: i64) -> (i32, u32) {
    let bucket = i64::from(bucket_size.max(1));
    let zero_based = i64::from(sequence) - 1 + offset;

    let year = i64::from(year) + zero_based.div_euclid(bucket);
    let sequence = zero_based.rem_euclid(bucket) + 1;

    (year as i32, sequence as u32)
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-G{:02}", self.year, self.sequence)
    }
}

impl FromStr for BatchId {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BatchError::InvalidBatchId(s.to_string());

        let (year_part, seq_part) = s.trim().split_once("-G").ok_or_else(invalid)?;
        let year = year_part.parse::<i32>().map_err(|_| invalid())?;
        let sequence = seq_part.parse::<u32>().map_err(|_| invalid())?;

        if sequence == 0 {
            return Err(invalid());
        }

        Ok(Self { year, sequence })
    }
}
