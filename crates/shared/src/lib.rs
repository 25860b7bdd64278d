//! # makelink 共有ユーティリティ
//!
//! クライアントライブラリと CLI で共通して使うユーティリティを提供する。
//!
//! - `observability`: トレーシング初期化とログ出力形式

pub mod observability;
