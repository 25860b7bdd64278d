//! シナリオ関連の Make API クライアント

use async_trait::async_trait;

use super::{
    client_impl::MakeClientImpl,
    error::MakeApiError,
    response::handle_response,
    types::{Scenario, ScenarioResponse},
};
use crate::{
    pagination::{Pagination, ScenarioPage},
    scenario_collector::{CollectOptions, collect_org_scenarios},
};

/// シナリオ関連の Make API クライアントトレイト
#[async_trait]
pub trait MakeScenarioClient: Send + Sync {
    /// シナリオを取得する
    ///
    /// Make API の `GET /scenarios/{scenario_id}` を呼び出す。
    ///
    /// # 戻り値
    ///
    /// シナリオが存在すれば `ScenarioResponse`、なければ `MakeApiError::ScenarioNotFound`
    async fn get_scenario(&self, scenario_id: u64) -> Result<ScenarioResponse, MakeApiError>;

    /// 組織のシナリオ一覧を 1 ページ分取得する
    ///
    /// Make API の `GET /scenarios?organizationId=...&pg[...]=...` を呼び出す。
    async fn list_scenarios(
        &self,
        organization_id: u64,
        pagination: &Pagination,
    ) -> Result<ScenarioPage, MakeApiError>;

    /// 組織のシナリオをすべて取得する
    ///
    /// 1 ページ 50 件で先頭から順に取得し、`id` 昇順で連結した結果を返す。
    /// 途中のページで失敗した場合は取得済みの分も含めて破棄し、エラーを返す。
    async fn get_org_scenarios(&self, organization_id: u64) -> Result<Vec<Scenario>, MakeApiError> {
        collect_org_scenarios(self, organization_id, &CollectOptions::default()).await
    }
}

#[async_trait]
impl MakeScenarioClient for MakeClientImpl {
    #[tracing::instrument(skip_all, level = "debug", fields(%scenario_id))]
    async fn get_scenario(&self, scenario_id: u64) -> Result<ScenarioResponse, MakeApiError> {
        let url = self.url(&format!("/scenarios/{scenario_id}"));

        let response = self.send(self.client.get(&url)).await?;
        handle_response(
            response,
            Some(MakeApiError::ScenarioNotFound),
            self.log_bodies,
        )
        .await
    }

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(%organization_id, offset = pagination.offset, limit = pagination.limit)
    )]
    async fn list_scenarios(
        &self,
        organization_id: u64,
        pagination: &Pagination,
    ) -> Result<ScenarioPage, MakeApiError> {
        let url = self.url("/scenarios");

        let builder = self
            .client
            .get(&url)
            .query(&[("organizationId", organization_id.to_string())])
            .query(&pagination.to_query());

        let response = self.send(builder).await?;
        handle_response(response, None, self.log_bodies).await
    }
}
