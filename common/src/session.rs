//! 最新の分類結果の保持
//!
//! 実行ごとに世代番号を発行し、より新しい実行が先に確定していれば
//! 古い実行の結果は破棄する。失敗した実行は commit しないので、
//! 直前の成功結果がそのまま残る。

use crate::pipeline::ClassificationResult;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 実行の世代番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

impl RunTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Latest {
    generation: u64,
    result: Option<Arc<ClassificationResult>>,
}

/// 最新結果のホルダー（スレッド間で共有可能）
#[derive(Debug, Default)]
pub struct Session {
    next_generation: AtomicU64,
    latest: Mutex<Latest>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 実行開始時に世代番号を取得
    pub fn begin_run(&self) -> RunTicket {
        RunTicket(self.next_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// 結果を確定する。より新しい世代が確定済みなら破棄して false
    pub fn commit(&self, ticket: RunTicket, result: ClassificationResult) -> bool {
        let mut latest = self.latest.lock();
        if latest.result.is_some() && ticket.0 < latest.generation {
            tracing::debug!(
                stale = ticket.0,
                current = latest.generation,
                "古い実行の結果を破棄"
            );
            return false;
        }
        latest.generation = ticket.0;
        latest.result = Some(Arc::new(result));
        true
    }

    /// 確定済みの最新結果
    pub fn latest(&self) -> Option<Arc<ClassificationResult>> {
        self.latest.lock().result.clone()
    }

    /// 最新結果の世代番号（未確定なら 0）
    pub fn latest_generation(&self) -> u64 {
        self.latest.lock().generation
    }
}
