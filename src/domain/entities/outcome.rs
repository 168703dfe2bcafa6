use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 単一ミラーに対する操作の結果
///
/// 操作完了時に生成され、集計後すぐに破棄される。詳細はミラーのログに残る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    success: bool,
    error: Option<String>,
}

impl OperationResult {
    /// 成功結果を作成
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// 失敗結果を作成
    pub fn failed(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// fetch/push一回分の集計結果
///
/// 失敗数は並行タスクからアトミックに加算される。
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    attempted: usize,
    failed: AtomicUsize,
}

impl AggregateOutcome {
    /// 対象ミラー数を指定して作成
    pub fn new(attempted: usize) -> Self {
        Self {
            attempted,
            failed: AtomicUsize::new(0),
        }
    }

    /// 結果を記録し、失敗なら失敗数を加算
    pub fn record(&self, result: &OperationResult) {
        if !result.is_success() {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn succeeded(&self) -> usize {
        self.attempted.saturating_sub(self.failed())
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// 現在の値を複製
    pub fn snapshot(&self) -> Self {
        Self {
            attempted: self.attempted,
            failed: AtomicUsize::new(self.failed()),
        }
    }
}
