//! Webhook 関連の Make API クライアント

use async_trait::async_trait;

use super::{
    client_impl::MakeClientImpl,
    error::MakeApiError,
    response::{handle_response, handle_text_response, log_request_body},
    types::{CreateHookRequest, HookResponse, TriggerWebhookRequest},
};

/// Webhook 関連の Make API クライアントトレイト
#[async_trait]
pub trait MakeHookClient: Send + Sync {
    /// Webhook を起動する
    ///
    /// `url` に `{ "action": ... }` を POST する。絶対 URL はそのまま、
    /// それ以外は API のベース URL からの相対パスとして扱う。
    ///
    /// # 戻り値
    ///
    /// レスポンスボディ（Make の Webhook は通常 `Accepted` を返す）
    async fn trigger_webhook(&self, url: &str, action: &str) -> Result<String, MakeApiError>;

    /// Webhook を作成する
    ///
    /// Make API の `POST /hooks` を呼び出す。
    async fn create_webhook(&self, req: &CreateHookRequest) -> Result<HookResponse, MakeApiError>;

    /// Webhook を取得する
    ///
    /// Make API の `GET /hooks/{hook_id}` を呼び出す。
    async fn get_webhook(&self, hook_id: u64) -> Result<HookResponse, MakeApiError>;
}

#[async_trait]
impl MakeHookClient for MakeClientImpl {
    #[tracing::instrument(skip_all, level = "debug", fields(%action))]
    async fn trigger_webhook(&self, url: &str, action: &str) -> Result<String, MakeApiError> {
        let url = self.url(url);
        let req = TriggerWebhookRequest { action };
        log_request_body(&req, self.log_bodies);

        let response = self.send(self.client.post(&url).json(&req)).await?;
        handle_text_response(response, None, self.log_bodies).await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(team_id = req.team_id))]
    async fn create_webhook(&self, req: &CreateHookRequest) -> Result<HookResponse, MakeApiError> {
        let url = self.url("/hooks");
        log_request_body(req, self.log_bodies);

        let response = self.send(self.client.post(&url).json(req)).await?;
        handle_response(response, None, self.log_bodies).await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%hook_id))]
    async fn get_webhook(&self, hook_id: u64) -> Result<HookResponse, MakeApiError> {
        let url = self.url(&format!("/hooks/{hook_id}"));

        let response = self.send(self.client.get(&url)).await?;
        handle_response(response, Some(MakeApiError::HookNotFound), self.log_bodies).await
    }
}
