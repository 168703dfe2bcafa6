use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// ミラーディレクトリの規約サフィックス
pub const MIRROR_SUFFIX: &str = ".git";

/// ログファイルの拡張子（ミラーのパスに付加される）
pub const LOG_EXTENSION: &str = ".log";

/// ディレクトリ名がミラーの規約に従っているか
///
/// 名前が（大文字小文字を区別せず）`.git` で終わり、かつ `.git` そのものではないこと。
/// `.git` そのものは作業コピー内部のメタデータディレクトリなので対象外。
pub fn is_mirror_dir_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy().to_lowercase();
    name.ends_with(MIRROR_SUFFIX) && name != MIRROR_SUFFIX
}

/// パス文字列の末尾に `.git` を保証する
pub fn ensure_mirror_suffix(dest: &str) -> String {
    let trimmed = dest.trim_end_matches(['/', '\\']);
    if trimmed.to_lowercase().ends_with(MIRROR_SUFFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, MIRROR_SUFFIX)
    }
}

/// ローカルのベアミラー
///
/// ファイルシステム自体がレジストリであり、ミラーは探索時にのみ生成される。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mirror {
    /// ミラーディレクトリのパス
    path: PathBuf,

    /// 探索を開始したワークスペースのルート
    root: PathBuf,
}

impl Mirror {
    /// 新しいMirrorインスタンスを作成
    pub fn new(root: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: root.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// ワークスペースルートからの相対パス
    pub fn relative_path(&self) -> &Path {
        self.path.strip_prefix(&self.root).unwrap_or(&self.path)
    }

    /// ミラー専用のログファイルのパス（`<mirror>.git.log`）
    pub fn log_path(&self) -> PathBuf {
        let mut log_path = self.path.clone().into_os_string();
        log_path.push(LOG_EXTENSION);
        PathBuf::from(log_path)
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative_path().display())
    }
}
