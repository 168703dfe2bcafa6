use futures::future::join_all;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::application::use_cases::discover_mirrors::DiscoverMirrorsUseCase;
use crate::application::use_cases::run_mirror_operation::RunMirrorOperationUseCase;
use crate::common::result::MirrorResult;
use crate::domain::entities::mirror::Mirror;
use crate::domain::entities::outcome::{AggregateOutcome, OperationResult};
use crate::domain::value_objects::mirror_operation::MirrorOperation;
use crate::infrastructure::scm::MirrorScm;

/// ミラー1件の完了ごとに呼ばれるコールバック（完了順）
pub type ProgressCallback = Arc<dyn Fn(&Mirror, &OperationResult) + Send + Sync>;

/// 一括ミラー操作の設定
#[derive(Debug, Clone)]
pub struct MirrorRepositoriesConfig {
    /// ワークスペースのルート
    pub root: PathBuf,

    /// 同時実行数の上限（Noneの場合は無制限）
    pub jobs: Option<usize>,
}

impl MirrorRepositoriesConfig {
    /// 新しいMirrorRepositoriesConfigインスタンスを作成
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            jobs: None,
        }
    }

    /// 同時実行数の上限を設定
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }
}

/// ワークスペース内の全ミラーに対するfetch/pushのユースケース
///
/// 探索完了後、ミラーごとに1タスクを起動してすべてをjoinする。
/// あるミラーの失敗が他のミラーを中断することはない。
pub struct MirrorRepositoriesUseCase {
    config: MirrorRepositoriesConfig,
    scm: Arc<dyn MirrorScm>,
    progress: Option<ProgressCallback>,
}

impl MirrorRepositoriesUseCase {
    /// 新しいMirrorRepositoriesUseCaseインスタンスを作成
    pub fn new(config: MirrorRepositoriesConfig, scm: Arc<dyn MirrorScm>) -> Self {
        Self {
            config,
            scm,
            progress: None,
        }
    }

    /// 進捗コールバックを設定
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// 一括操作を実行
    ///
    /// ルートを読めない場合のみエラーを返す。個々のミラーの失敗は集計結果に数えられる。
    pub async fn execute(&self, operation: MirrorOperation) -> MirrorResult<AggregateOutcome> {
        // 1. ミラー探索（ブロッキングI/O）
        let discover = DiscoverMirrorsUseCase::new(&self.config.root);
        let mirrors = tokio::task::spawn_blocking(move || discover.execute()).await??;

        if mirrors.is_empty() {
            tracing::debug!(root = %self.config.root.display(), "No mirrors found");
            return Ok(AggregateOutcome::new(0));
        }

        // 2. ミラーごとにタスクを起動
        let outcome = Arc::new(AggregateOutcome::new(mirrors.len()));
        let semaphore = self.config.jobs.map(|jobs| Arc::new(Semaphore::new(jobs)));
        let runner = RunMirrorOperationUseCase::new(Arc::clone(&self.scm));

        let tasks: Vec<_> = mirrors
            .iter()
            .cloned()
            .map(|mirror| {
                let runner = runner.clone();
                let outcome = Arc::clone(&outcome);
                let semaphore = semaphore.clone();
                let progress = self.progress.clone();

                tokio::spawn(async move {
                    // セマフォは閉じないので取得は失敗しない
                    let _permit = match semaphore {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };
                    tracing::debug!(mirror = %mirror, operation = %operation, "Starting");
                    let result = runner.execute(&mirror, operation).await;
                    tracing::debug!(
                        mirror = %mirror,
                        operation = %operation,
                        success = result.is_success(),
                        "Finished"
                    );

                    outcome.record(&result);
                    report(progress.as_ref(), &mirror, &result);
                })
            })
            .collect();

        // 3. すべてのタスクの完了を待つ
        let results = join_all(tasks).await;

        for (mirror, join_result) in mirrors.iter().zip(results) {
            if let Err(join_err) = join_result {
                tracing::warn!(mirror = %mirror, operation = %operation, error = %join_err, "Mirror task panicked");
                let result = OperationResult::failed(format!("Task join error: {}", join_err));
                outcome.record(&result);
                report(self.progress.as_ref(), mirror, &result);
            }
        }

        Ok(Arc::try_unwrap(outcome).unwrap_or_else(|shared| shared.snapshot()))
    }
}

/// 進捗を通知する。コールバック内のpanicは集計に影響させない
fn report(progress: Option<&ProgressCallback>, mirror: &Mirror, result: &OperationResult) {
    if let Some(progress) = progress {
        if catch_unwind(AssertUnwindSafe(|| progress(mirror, result))).is_err() {
            tracing::warn!(mirror = %mirror, "Progress callback panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::MirrorError;
    use crate::infrastructure::filesystem::operation_log::OperationLog;
    use crate::infrastructure::scm::{MockMirrorScm, ScmError};
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn create_mirrors(root: &Path, names: &[&str]) {
        for name in names {
            std::fs::create_dir_all(root.join(name)).unwrap();
        }
    }

    #[test]
    fn test_config_creation() {
        let config = MirrorRepositoriesConfig::new("/srv/mirrors").with_jobs(Some(4));
        assert_eq!(config.root, PathBuf::from("/srv/mirrors"));
        assert_eq!(config.jobs, Some(4));
    }

    #[tokio::test]
    async fn test_empty_workspace_invokes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut scm = MockMirrorScm::new();
        scm.expect_fetch_prune().times(0);
        scm.expect_get_push_target().times(0);
        scm.expect_push_mirror().times(0);

        let use_case = MirrorRepositoriesUseCase::new(
            MirrorRepositoriesConfig::new(temp_dir.path()),
            Arc::new(scm),
        );

        for operation in [MirrorOperation::Fetch, MirrorOperation::Push] {
            let outcome = use_case.execute(operation).await.unwrap();
            assert_eq!(outcome.attempted(), 0);
            assert_eq!(outcome.failed(), 0);
        }
    }

    #[tokio::test]
    async fn test_failure_count_matches_failed_mirrors() {
        let temp_dir = TempDir::new().unwrap();
        create_mirrors(
            temp_dir.path(),
            &["a.git", "bad-1.git", "nested/b.git", "nested/bad-2.git", "c.git"],
        );

        let mut scm = MockMirrorScm::new();
        scm.expect_fetch_prune()
            .times(5)
            .returning(|path: &Path, _log: &OperationLog| {
                let name = path.file_name().unwrap().to_string_lossy();
                if name.starts_with("bad") {
                    Err(ScmError::command_exited("git fetch -p origin", 1))
                } else {
                    Ok(())
                }
            });

        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reported);
        let use_case = MirrorRepositoriesUseCase::new(
            MirrorRepositoriesConfig::new(temp_dir.path()),
            Arc::new(scm),
        )
        .with_progress(Arc::new(move |mirror: &Mirror, result: &OperationResult| {
            sink.lock()
                .unwrap()
                .push((mirror.to_string(), result.is_success()));
        }));

        let outcome = use_case.execute(MirrorOperation::Fetch).await.unwrap();
        assert_eq!(outcome.attempted(), 5);
        assert_eq!(outcome.failed(), 2);
        assert_eq!(outcome.succeeded(), 3);

        let reported = reported.lock().unwrap();
        assert_eq!(reported.len(), 5);
        assert_eq!(reported.iter().filter(|(_, ok)| !ok).count(), 2);
    }

    #[tokio::test]
    async fn test_jobs_limit_still_counts_every_mirror() {
        let temp_dir = TempDir::new().unwrap();
        create_mirrors(temp_dir.path(), &["a.git", "b.git", "c.git"]);

        let mut scm = MockMirrorScm::new();
        scm.expect_fetch_prune().times(3).returning(|_, _| Ok(()));

        let use_case = MirrorRepositoriesUseCase::new(
            MirrorRepositoriesConfig::new(temp_dir.path()).with_jobs(Some(1)),
            Arc::new(scm),
        );

        let outcome = use_case.execute(MirrorOperation::Fetch).await.unwrap();
        assert_eq!(outcome.attempted(), 3);
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_panicking_progress_callback_keeps_exact_count() {
        let temp_dir = TempDir::new().unwrap();
        create_mirrors(temp_dir.path(), &["a.git", "bad.git", "c.git"]);

        let mut scm = MockMirrorScm::new();
        scm.expect_fetch_prune()
            .times(3)
            .returning(|path: &Path, _log: &OperationLog| {
                if path.ends_with("bad.git") {
                    Err(ScmError::command_exited("git fetch -p origin", 1))
                } else {
                    Ok(())
                }
            });

        let use_case = MirrorRepositoriesUseCase::new(
            MirrorRepositoriesConfig::new(temp_dir.path()),
            Arc::new(scm),
        )
        .with_progress(Arc::new(|_: &Mirror, _: &OperationResult| {
            panic!("failed printing to stdout: Broken pipe");
        }));

        let outcome = use_case.execute(MirrorOperation::Fetch).await.unwrap();
        assert_eq!(outcome.attempted(), 3);
        assert_eq!(outcome.failed(), 1);
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let scm = MockMirrorScm::new();

        let use_case = MirrorRepositoriesUseCase::new(
            MirrorRepositoriesConfig::new(temp_dir.path().join("missing")),
            Arc::new(scm),
        );

        let result = use_case.execute(MirrorOperation::Push).await;
        assert!(matches!(result, Err(MirrorError::Discovery { .. })));
    }
}
