use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn scp_like_regex() -> &'static Regex {
    static SCP_LIKE: OnceLock<Regex> = OnceLock::new();
    SCP_LIKE.get_or_init(|| {
        Regex::new(r"^(?:[^@/\s]+@)?(?P<host>[^:/\s]{2,}):(?P<path>.+)$")
            .expect("scp-like address pattern is valid")
    })
}

/// フェッチURLからワークスペース内のローカル保存先を生成する
///
/// `https://github.com/pkg/errors.git` は `github.com/pkg/errors.git` になる。
/// 生成できない場合（空のURLやパスを持たないURL）は `None` を返す。
/// 戻り値には `.git` サフィックスがまだ付与されていない場合がある。
pub fn derive_local_dest(fetch_url: &str) -> Option<String> {
    let trimmed = fetch_url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let dest = match Url::parse(trimmed) {
        Ok(url) if url.scheme().len() > 1 => match url.host_str().filter(|h| !h.is_empty()) {
            Some(host) => {
                let host = match url.port() {
                    Some(port) => format!("{}:{}", host, port),
                    None => host.to_string(),
                };
                format!("{}{}", host, url.path())
            }
            None => url.path().to_string(),
        },
        // Windowsのドライブレター付きローカルパス
        Ok(_) => trimmed
            .get(2..)
            .map(|rest| rest.replace('\\', "/"))
            .unwrap_or_default(),
        Err(_) => match scp_like_regex().captures(trimmed) {
            Some(captures) => format!(
                "{}/{}",
                &captures["host"],
                captures["path"].trim_start_matches('/')
            ),
            None => trimmed.replace('\\', "/"),
        },
    };

    let dest = dest
        .trim_start_matches(|c| c == '/' || c == '.')
        .trim_end_matches('/')
        .to_string();

    if dest.is_empty() {
        None
    } else {
        Some(dest)
    }
}
