use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// PushTarget関連のエラー
#[derive(Debug, Error, PartialEq)]
pub enum PushTargetError {
    #[error("Empty push URL")]
    Empty,

    #[error("Invalid push URL format: {0}")]
    InvalidFormat(String),
}

/// プッシュ先の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// ファイルシステム上のパス（スキームなし、または `file`）
    FileBased,
    /// ssh/http 等のネットワーク越しのエンドポイント
    NetworkBased,
}

/// ミラーのoriginに記録されたプッシュ先
///
/// 毎回のpushで新たに解決され、実行をまたいでキャッシュされることはない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PushTarget {
    /// 元のURL文字列
    raw: String,

    /// スキーム（ファイルパスの場合は空文字列）
    scheme: String,

    /// パスまたはアドレス
    location: String,

    kind: TargetKind,
}

fn scp_like_regex() -> &'static Regex {
    static SCP_LIKE: OnceLock<Regex> = OnceLock::new();
    SCP_LIKE.get_or_init(|| {
        Regex::new(r"^[^@/\s]+@[^:/\s]+:.+$").expect("scp-like address pattern is valid")
    })
}

impl PushTarget {
    /// URL文字列を解析して種別を判定
    pub fn parse(raw: &str) -> Result<Self, PushTargetError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PushTargetError::Empty);
        }

        match Url::parse(trimmed) {
            // Windowsのドライブレター（C:\repos\x）は1文字のスキームとして解析される
            Ok(url) if url.scheme().len() == 1 => Ok(Self::file(trimmed, "", trimmed)),
            Ok(url) if url.scheme() == "file" => {
                let location = url
                    .to_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| url.path().to_string());
                if location.is_empty() {
                    return Err(PushTargetError::InvalidFormat(trimmed.to_string()));
                }
                Ok(Self::file(trimmed, "file", &location))
            }
            Ok(url) => Ok(Self {
                raw: trimmed.to_string(),
                scheme: url.scheme().to_string(),
                location: trimmed.to_string(),
                kind: TargetKind::NetworkBased,
            }),
            Err(_) if scp_like_regex().is_match(trimmed) => Ok(Self {
                raw: trimmed.to_string(),
                scheme: "ssh".to_string(),
                location: trimmed.to_string(),
                kind: TargetKind::NetworkBased,
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self::file(trimmed, "", trimmed)),
            Err(_) => Err(PushTargetError::InvalidFormat(trimmed.to_string())),
        }
    }

    fn file(raw: &str, scheme: &str, location: &str) -> Self {
        Self {
            raw: raw.to_string(),
            scheme: scheme.to_string(),
            location: location.to_string(),
            kind: TargetKind::FileBased,
        }
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn is_file_based(&self) -> bool {
        self.kind == TargetKind::FileBased
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// ファイルベースの場合のみローカルパスを返す
    pub fn local_path(&self) -> Option<PathBuf> {
        match self.kind {
            TargetKind::FileBased => Some(Path::new(&self.location).to_path_buf()),
            TargetKind::NetworkBased => None,
        }
    }
}

impl fmt::Display for PushTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
