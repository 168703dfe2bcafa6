use std::fmt;

/// ミラーに対して実行する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorOperation {
    /// ソースからの取得（prune付き）
    Fetch,
    /// 宛先へのミラープッシュ
    Push,
}

impl MirrorOperation {
    /// 小文字の操作名
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Push => "push",
        }
    }

    /// ログ行の接頭辞に使うラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fetch => "FETCH",
            Self::Push => "PUSH",
        }
    }

    /// 集計結果の表示用タイトル
    pub fn title(&self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Push => "Push",
        }
    }
}

impl fmt::Display for MirrorOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
