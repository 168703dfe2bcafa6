use std::sync::Arc;

use crate::application::services::destination_provisioner::DestinationProvisioner;
use crate::common::error::MirrorError;
use crate::common::result::MirrorResult;
use crate::domain::entities::mirror::Mirror;
use crate::domain::entities::outcome::OperationResult;
use crate::domain::value_objects::mirror_operation::MirrorOperation;
use crate::infrastructure::filesystem::operation_log::{LogSink, OperationLog};
use crate::infrastructure::scm::MirrorScm;

/// 単一ミラーに対するfetch/pushのユースケース
///
/// 1ミラー内の処理は厳密に逐次実行され、失敗してもリトライしない。
/// 経過とエラーはすべてミラー専用のログに記録される。
#[derive(Clone)]
pub struct RunMirrorOperationUseCase {
    scm: Arc<dyn MirrorScm>,
    log_sink: LogSink,
}

impl RunMirrorOperationUseCase {
    /// 新しいRunMirrorOperationUseCaseインスタンスを作成
    pub fn new(scm: Arc<dyn MirrorScm>) -> Self {
        Self {
            scm,
            log_sink: LogSink::new(),
        }
    }

    /// 操作を最後まで実行し、結果を返す
    pub async fn execute(&self, mirror: &Mirror, operation: MirrorOperation) -> OperationResult {
        let log = match self.log_sink.open(mirror, operation) {
            Ok(log) => log,
            Err(e) => {
                let error = MirrorError::log_unavailable(mirror.log_path(), e);
                tracing::warn!(mirror = %mirror, operation = %operation, error = %error, "Log sink unavailable");
                return OperationResult::failed(error);
            }
        };

        log.record("Start");
        let result = match operation {
            MirrorOperation::Fetch => self.fetch(mirror, &log).await,
            MirrorOperation::Push => self.push(mirror, &log).await,
        };

        let result = match result {
            Ok(()) => OperationResult::succeeded(),
            Err(e) => {
                log.record(format_args!("{} failed: {}", operation, e));
                OperationResult::failed(e)
            }
        };
        log.record(format_args!("Done, success:{}", result.is_success()));

        result
    }

    async fn fetch(&self, mirror: &Mirror, log: &OperationLog) -> MirrorResult<()> {
        self.scm
            .fetch_prune(mirror.path(), log)
            .await
            .map_err(|e| MirrorError::primitive("fetch", mirror.path(), e))
    }

    async fn push(&self, mirror: &Mirror, log: &OperationLog) -> MirrorResult<()> {
        let provisioner = DestinationProvisioner::new(Arc::clone(&self.scm));
        let target = provisioner.prepare(mirror, log).await?;

        self.scm
            .push_mirror(mirror.path(), log)
            .await
            .map_err(|e| MirrorError::primitive("push", mirror.path(), e))?;

        provisioner.finalize(mirror, &target, log).await
    }
}
