//! # Make クライアント設定
//!
//! 環境変数から Make API クライアントの設定を読み込む。
//!
//! 設定は起動時に一度だけ構築し、[`MakeClientImpl::new`](crate::MakeClientImpl::new)
//! に渡す。以降は不変であり、トークンのローテーションは行わない。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `MAKE_BASE_URL` | **Yes** | - | API ホスト（例: `https://eu1.make.com/api`） |
//! | `MAKE_API_VERSION` | **Yes** | - | API バージョン（例: `v2`） |
//! | `MAKE_API_KEY` | **Yes** | - | API トークン |
//! | `APPLICATION_URL` | No | `localhost` | フローコールバックのホスト |
//! | `PORT` | No | `3000` | フローコールバックのポート |
//! | `MASTER_MAKE_TEAM` | No | - | テンプレート取得時に常に使用するチーム ID |
//! | `ENVIRONMENT` | No | `development` | `production` のときボディのログ出力を無効化 |

use std::{collections::HashMap, env, fmt};

use thiserror::Error;
use url::Url;

/// 本番環境を示す `ENVIRONMENT` の値
const PRODUCTION: &str = "production";

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("{var} の値が不正です: {reason}")]
    Invalid { var: &'static str, reason: String },

    /// HTTP クライアントの構築に失敗
    #[error("HTTP クライアントの構築に失敗しました: {0}")]
    HttpClient(String),
}

/// Make API クライアントの設定
#[derive(Clone)]
pub struct MakeConfig {
    /// API のベース URL（ホスト + バージョン、末尾スラッシュなし）
    pub base_url:       String,
    /// API トークン（`Authorization: Token <key>` として送信する）
    pub api_key:        String,
    /// フロー完了時のコールバック URL
    pub redirect_uri:   String,
    /// テンプレート取得時にチーム ID を上書きするマスターチーム
    pub master_team_id: Option<u64>,
    /// 実行環境（`development`, `staging`, `production`）
    pub environment:    String,
}

// API トークンをログに出さない
impl fmt::Debug for MakeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MakeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("master_team_id", &self.master_team_id)
            .field("environment", &self.environment)
            .finish()
    }
}

impl MakeConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の変数ソースから設定を読み込む
    ///
    /// テストではプロセスの環境変数を汚さないよう、`HashMap` などを渡す。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = required(&lookup, "MAKE_BASE_URL")?;
        let version = required(&lookup, "MAKE_API_VERSION")?;
        let api_key = required(&lookup, "MAKE_API_KEY")?;

        let base_url = join_base_url(&host, &version);
        Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            var:    "MAKE_BASE_URL",
            reason: e.to_string(),
        })?;

        let application_url =
            lookup("APPLICATION_URL").unwrap_or_else(|| "localhost".to_string());
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var:    "PORT",
                reason: format!("有効なポート番号ではありません: {raw}"),
            })?,
            None => 3000,
        };

        let master_team_id = match lookup("MASTER_MAKE_TEAM").filter(|v| !v.is_empty()) {
            Some(raw) => Some(raw.parse().map_err(|_| ConfigError::Invalid {
                var:    "MASTER_MAKE_TEAM",
                reason: format!("チーム ID は数値である必要があります: {raw}"),
            })?),
            None => None,
        };

        Ok(Self {
            base_url,
            api_key,
            redirect_uri: build_redirect_uri(&application_url, port),
            master_team_id,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    /// `HashMap` から設定を読み込む
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// リクエスト・レスポンスボディをログに出すかどうか
    ///
    /// 本番環境以外でのみ有効。
    pub fn log_bodies(&self) -> bool {
        self.environment != PRODUCTION
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

/// ホストとバージョンからベース URL を組み立てる
fn join_base_url(host: &str, version: &str) -> String {
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        version.trim_matches('/')
    )
}

/// フローコールバック URL を組み立てる
fn build_redirect_uri(application_url: &str, port: u16) -> String {
    format!("http://{application_url}:{port}/api/flow/callback")
}
