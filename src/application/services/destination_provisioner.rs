use std::path::PathBuf;
use std::sync::Arc;

use crate::common::error::MirrorError;
use crate::common::result::MirrorResult;
use crate::domain::entities::mirror::Mirror;
use crate::domain::value_objects::push_target::PushTarget;
use crate::infrastructure::filesystem::operation_log::OperationLog;
use crate::infrastructure::scm::MirrorScm;

/// プッシュ先の解決と準備を行うサービス
///
/// ファイルベースのプッシュ先が存在しなければ空のベアリポジトリを作成し、
/// プッシュ後にはダム転送用のインデックスを再生成する。
/// ネットワーク越しのプッシュ先には一切手を加えない。
pub struct DestinationProvisioner {
    scm: Arc<dyn MirrorScm>,
}

impl DestinationProvisioner {
    /// 新しいDestinationProvisionerインスタンスを作成
    pub fn new(scm: Arc<dyn MirrorScm>) -> Self {
        Self { scm }
    }

    /// プッシュ前の準備
    ///
    /// 1. ミラーのプッシュ先URLを取得
    /// 2. ファイルベースかネットワークかを判定
    /// 3. ファイルベースで存在しない場合のみ `init_bare`
    pub async fn prepare(&self, mirror: &Mirror, log: &OperationLog) -> MirrorResult<PushTarget> {
        let target = self
            .scm
            .get_push_target(mirror.path())
            .await
            .map_err(|e| MirrorError::resolution(mirror.path(), e))?;

        let Some(dest) = Self::destination_path(mirror, &target) else {
            tracing::debug!(mirror = %mirror, target = %target, "Network push target, nothing to provision");
            return Ok(target);
        };

        match tokio::fs::metadata(&dest).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(mirror = %mirror, dest = %dest.display(), "Initializing bare destination");
                log.record(format_args!("Initializing bare repository at {}", dest.display()));
                self.scm
                    .init_bare(&dest, log)
                    .await
                    .map_err(|e| MirrorError::provision(&dest, e))?;
            }
            // 既存のパス（リポジトリでなくても）はそのままpushに進む
            _ => {}
        }

        Ok(target)
    }

    /// プッシュ成功後の後処理（ファイルベースのみ）
    pub async fn finalize(
        &self,
        mirror: &Mirror,
        target: &PushTarget,
        log: &OperationLog,
    ) -> MirrorResult<()> {
        let Some(dest) = Self::destination_path(mirror, target) else {
            return Ok(());
        };

        self.scm
            .refresh_dumb_transport_index(&dest, log)
            .await
            .map_err(|e| MirrorError::primitive("update-server-info", &dest, e))
    }

    /// ファイルベースのプッシュ先のパス
    ///
    /// 相対パスはgitと同じくミラーディレクトリを基準に解決する。
    fn destination_path(mirror: &Mirror, target: &PushTarget) -> Option<PathBuf> {
        target.local_path().map(|path| {
            if path.is_absolute() {
                path
            } else {
                mirror.path().join(path)
            }
        })
    }
}
