//! MakeClient スーパートレイトとクライアント実装の構造体

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use super::{
    error::MakeApiError,
    flow_client::MakeFlowClient,
    hook_client::MakeHookClient,
    scenario_client::MakeScenarioClient,
    team_client::MakeTeamClient,
};
use crate::config::{ConfigError, MakeConfig};

/// Make API クライアントトレイト（スーパートレイト）
///
/// Team / Flow / Hook / Scenario の各サブトレイトを束ねるスーパートレイト。
/// テスト時にはサブトレイト単位でスタブを使用できる。
pub trait MakeClient: MakeTeamClient + MakeFlowClient + MakeHookClient + MakeScenarioClient {}

/// ブランケット impl: 4 つのサブトレイトをすべて実装する型は
/// 自動的に `MakeClient` を実装する。
impl<T> MakeClient for T where
    T: MakeTeamClient + MakeFlowClient + MakeHookClient + MakeScenarioClient
{
}

/// Make API クライアント実装
///
/// ベース URL と認証ヘッダーは構築時に固定され、以降は変更されない。
#[derive(Clone)]
pub struct MakeClientImpl {
    pub(super) base_url:       String,
    pub(super) client:         reqwest::Client,
    pub(super) redirect_uri:   String,
    pub(super) master_team_id: Option<u64>,
    pub(super) log_bodies:     bool,
}

impl MakeClientImpl {
    /// 新しい MakeClient を作成する
    ///
    /// すべてのリクエストに `Authorization: Token <api_key>` を付与する。
    pub fn new(config: &MakeConfig) -> Result<Self, ConfigError> {
        let mut token = HeaderValue::from_str(&format!("Token {}", config.api_key))
            .map_err(|e| ConfigError::Invalid {
                var:    "MAKE_API_KEY",
                reason: e.to_string(),
            })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, token);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            redirect_uri: config.redirect_uri.clone(),
            master_team_id: config.master_team_id,
            log_bodies: config.log_bodies(),
        })
    }

    /// API パスから URL を組み立てる
    ///
    /// `http://` / `https://` で始まる場合は絶対 URL としてそのまま使う。
    pub(super) fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// リクエストを送信する
    ///
    /// レスポンスを受信できなかった場合は `Network` エラーを返す。
    pub(super) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, MakeApiError> {
        match builder.send().await {
            Ok(response) => Ok(response),
            Err(e) => {
                if self.log_bodies {
                    tracing::error!(error = %e, "Make API へのリクエストに失敗しました");
                }
                Err(MakeApiError::Network(e.to_string()))
            }
        }
    }
}
