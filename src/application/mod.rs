//! アプリケーション層
//!
//! ミラーの探索、単一ミラーの操作、全ミラーの並行実行、ミラーの追加を
//! ユースケースとして提供する。
pub mod services;
pub mod use_cases;
