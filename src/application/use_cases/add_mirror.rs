use std::path::PathBuf;
use std::sync::Arc;

use crate::common::error::MirrorError;
use crate::common::result::{MirrorResult, OptionExt};
use crate::domain::entities::mirror::{ensure_mirror_suffix, Mirror};
use crate::domain::value_objects::local_dest::derive_local_dest;
use crate::infrastructure::scm::MirrorScm;

/// ミラー追加の設定
#[derive(Debug, Clone)]
pub struct AddMirrorConfig {
    /// ワークスペースのルート
    pub root: PathBuf,

    /// 取得元のURL
    pub fetch_url: String,

    /// プッシュ先のURL
    pub push_url: String,

    /// ワークスペース内の保存先（Noneの場合はフェッチURLから生成）
    pub local_dest: Option<String>,
}

impl AddMirrorConfig {
    /// 新しいAddMirrorConfigインスタンスを作成
    pub fn new(
        root: impl Into<PathBuf>,
        fetch_url: impl Into<String>,
        push_url: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            fetch_url: fetch_url.into(),
            push_url: push_url.into(),
            local_dest: None,
        }
    }

    /// 保存先を明示
    pub fn with_local_dest(mut self, local_dest: impl Into<String>) -> Self {
        self.local_dest = Some(local_dest.into());
        self
    }

    /// 保存先の相対パス（`.git` サフィックス付き）
    pub fn resolve_local_dest(&self) -> MirrorResult<String> {
        let dest = match &self.local_dest {
            Some(dest) if !dest.trim().is_empty() => dest.trim().to_string(),
            _ => derive_local_dest(&self.fetch_url).ok_or_invalid_source(
                &self.fetch_url,
                "the URL has neither a host nor a path",
            )?,
        };

        Ok(ensure_mirror_suffix(&dest))
    }
}

/// 新しいミラーをワークスペースに追加するユースケース
///
/// `git clone --mirror` の後、originのプッシュ先を設定する。
pub struct AddMirrorUseCase {
    config: AddMirrorConfig,
    scm: Arc<dyn MirrorScm>,
}

impl AddMirrorUseCase {
    /// 新しいAddMirrorUseCaseインスタンスを作成
    pub fn new(config: AddMirrorConfig, scm: Arc<dyn MirrorScm>) -> Self {
        Self { config, scm }
    }

    /// ミラー追加を実行
    pub async fn execute(&self) -> MirrorResult<Mirror> {
        let dest = self.config.resolve_local_dest()?;
        let mirror = Mirror::new(&self.config.root, self.config.root.join(&dest));

        tracing::debug!(
            fetch_url = %self.config.fetch_url,
            push_url = %self.config.push_url,
            dest = %mirror.path().display(),
            "Adding mirror"
        );

        self.scm
            .clone_mirror(&self.config.fetch_url, mirror.path())
            .await
            .map_err(|e| MirrorError::primitive("clone", mirror.path(), e))?;

        self.scm
            .set_push_target(mirror.path(), &self.config.push_url)
            .await
            .map_err(|e| MirrorError::primitive("set-url", mirror.path(), e))?;

        Ok(mirror)
    }
}
