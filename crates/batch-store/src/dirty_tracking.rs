//! 髒標記追蹤

use std::collections::BTreeSet;

/// 髒標記追蹤器
///
/// 記錄上次取出後有異動的批次編號，供呈現層決定哪些卡片需要重繪。
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_batches: BTreeSet<String>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記批次為髒
    pub fn mark_dirty(&mut self, batch_id: &str) {
        if !self.dirty_batches.contains(batch_id) {
            self.dirty_batches.insert(batch_id.to_string());
        }
    }

    /// 檢查批次是否為髒
    pub fn is_dirty(&self, batch_id: &str) -> bool {
        self.dirty_batches.contains(batch_id)
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_batches.clear();
    }

    /// 取出所有髒批次（依編號排序）並清除標記
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.dirty_batches).into_iter().collect()
    }

    /// 髒批次數量
    pub fn len(&self) -> usize {
        self.dirty_batches.len()
    }

    /// 是否沒有髒批次
    pub fn is_empty(&self) -> bool {
        self.dirty_batches.is_empty()
    }
}
