//! フロー関連の Make API クライアント

use async_trait::async_trait;
use serde_json::Value;

use super::{
    client_impl::MakeClientImpl,
    error::MakeApiError,
    response::{handle_response, log_request_body},
    types::{FlowScenarioOptions, InitiateFlowRequest, InitiateFlowResponse},
};

/// フロー関連の Make API クライアントトレイト
#[async_trait]
pub trait MakeFlowClient: Send + Sync {
    /// テンプレートからフローを開始する
    ///
    /// Make API の `POST /instances/flow/init/template` を呼び出す。
    /// 作成されるシナリオは有効化・自動アクティベートされ、
    /// 完了後は設定済みのコールバック URL にリダイレクトされる。
    ///
    /// # 引数
    ///
    /// - `template_id`: テンプレート ID
    /// - `team_id`: シナリオを作成するチーム ID
    /// - `prefill`: テンプレートの事前入力値
    async fn initiate_flow(
        &self,
        template_id: u64,
        team_id: u64,
        prefill: &Value,
    ) -> Result<InitiateFlowResponse, MakeApiError>;

    /// フローの状態を取得する
    ///
    /// Make API の `GET /instances/flow/{flow_id}` を呼び出し、ボディをそのまま返す。
    async fn process_flow(&self, flow_id: &str) -> Result<Value, MakeApiError>;
}

#[async_trait]
impl MakeFlowClient for MakeClientImpl {
    #[tracing::instrument(skip_all, level = "debug", fields(%template_id, %team_id))]
    async fn initiate_flow(
        &self,
        template_id: u64,
        team_id: u64,
        prefill: &Value,
    ) -> Result<InitiateFlowResponse, MakeApiError> {
        let url = self.url("/instances/flow/init/template");
        let req = InitiateFlowRequest {
            template_id,
            team_id,
            redirect_uri: &self.redirect_uri,
            prefill,
            scenario: FlowScenarioOptions { enable: true },
            auto_activate: true,
            auto_finalize: true,
            allow_reusing_components: false,
            allow_creating_components: true,
        };
        log_request_body(&req, self.log_bodies);

        let response = self.send(self.client.post(&url).json(&req)).await?;
        handle_response(response, None, self.log_bodies).await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%flow_id))]
    async fn process_flow(&self, flow_id: &str) -> Result<Value, MakeApiError> {
        let url = self.url(&format!("/instances/flow/{flow_id}"));

        let response = self.send(self.client.get(&url)).await?;
        handle_response(response, Some(MakeApiError::FlowNotFound), self.log_bodies).await
    }
}
