use crate::common::error::MirrorError;

/// gitmir全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use gitmir::common::result::MirrorResult;
/// use gitmir::common::error::MirrorError;
///
/// fn example_with_error() -> MirrorResult<()> {
///     Err(MirrorError::internal_error("Something went wrong"))
/// }
///
/// assert!(example_with_error().is_err());
/// ```
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// Noneの場合にInvalidSourceエラーへ変換する
    fn ok_or_invalid_source(self, url: &str, message: &str) -> MirrorResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_invalid_source(self, url: &str, message: &str) -> MirrorResult<T> {
        self.ok_or_else(|| MirrorError::invalid_source(url, message))
    }
}
