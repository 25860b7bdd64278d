//! チーム関連の Make API クライアント

use async_trait::async_trait;

use super::{
    client_impl::MakeClientImpl,
    error::MakeApiError,
    response::{handle_response, log_request_body},
    types::{CreateTeamRequest, TeamResponse, Template, TemplatesResponse},
};

/// チーム関連の Make API クライアントトレイト
#[async_trait]
pub trait MakeTeamClient: Send + Sync {
    /// チームを作成する
    ///
    /// Make API の `POST /teams` を呼び出す。
    ///
    /// # 引数
    ///
    /// - `name`: チーム名
    /// - `organization_id`: 所属する組織 ID
    async fn create_team(
        &self,
        name: &str,
        organization_id: u64,
    ) -> Result<TeamResponse, MakeApiError>;

    /// インスタンス化可能なテンプレート一覧を取得する
    ///
    /// Make API の `GET /templates/v2/instanceable` を呼び出す。
    /// マスターチームが設定されている場合は `team_id` の代わりにそれを使う。
    async fn get_team_templates(&self, team_id: u64) -> Result<Vec<Template>, MakeApiError>;
}

#[async_trait]
impl MakeTeamClient for MakeClientImpl {
    #[tracing::instrument(skip_all, level = "debug", fields(%organization_id))]
    async fn create_team(
        &self,
        name: &str,
        organization_id: u64,
    ) -> Result<TeamResponse, MakeApiError> {
        let url = self.url("/teams");
        let req = CreateTeamRequest {
            name: name.to_string(),
            organization_id,
        };
        log_request_body(&req, self.log_bodies);

        let response = self.send(self.client.post(&url).json(&req)).await?;
        handle_response(response, None, self.log_bodies).await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%team_id))]
    async fn get_team_templates(&self, team_id: u64) -> Result<Vec<Template>, MakeApiError> {
        let team_id = self.master_team_id.unwrap_or(team_id);
        let url = self.url("/templates/v2/instanceable");

        let response = self
            .send(self.client.get(&url).query(&[("teamId", team_id)]))
            .await
            .inspect_err(|e| log_templates_error(team_id, e))?;
        let body: TemplatesResponse = handle_response(response, None, self.log_bodies)
            .await
            .inspect_err(|e| log_templates_error(team_id, e))?;

        Ok(body.templates)
    }
}

fn log_templates_error(team_id: u64, err: &MakeApiError) {
    tracing::error!(
        error.category = "external_api",
        error.kind = "templates",
        team_id,
        "テンプレート一覧の取得に失敗しました: {}",
        err
    );
}
