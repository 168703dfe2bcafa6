use std::path::PathBuf;
use walkdir::WalkDir;

use crate::common::error::MirrorError;
use crate::common::result::MirrorResult;
use crate::domain::entities::mirror::{is_mirror_dir_name, Mirror};

/// ミラーディレクトリ探索のユースケース
///
/// ルート以下を再帰的に走査し、`.git` で終わるディレクトリ（`.git` そのものを除く）を
/// ミラーとして返す。ミラーと判定したディレクトリの中には降りない。
#[derive(Debug, Clone)]
pub struct DiscoverMirrorsUseCase {
    root: PathBuf,
}

impl DiscoverMirrorsUseCase {
    /// 新しいDiscoverMirrorsUseCaseインスタンスを作成
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// ミラー探索を実行
    ///
    /// ルートを開けない場合のみエラー。個々のエントリの読み取り失敗は読み飛ばす。
    /// ブロッキングI/Oなので非同期コンテキストからは `spawn_blocking` 経由で呼ぶこと。
    pub fn execute(&self) -> MirrorResult<Vec<Mirror>> {
        std::fs::read_dir(&self.root).map_err(|e| MirrorError::discovery(&self.root, e))?;

        let mut mirrors = Vec::new();
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_dir() || !is_mirror_dir_name(entry.file_name()) {
                continue;
            }

            mirrors.push(Mirror::new(&self.root, entry.path()));
            walker.skip_current_dir();
        }

        tracing::debug!(root = %self.root.display(), count = mirrors.len(), "Discovered mirrors");
        Ok(mirrors)
    }
}
