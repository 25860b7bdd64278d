//! # makelink クライアントライブラリ
//!
//! ワークフロー自動化プラットフォーム Make の REST API を呼び出す薄いクライアント。
//!
//! ## モジュール構成
//!
//! - `client`: API クライアント（チーム・フロー・Webhook・シナリオ）
//! - `config`: 環境変数からのクライアント設定
//! - `pagination`: オフセットベースのページ指定とページ型
//! - `scenario_collector`: 組織シナリオの全件取得
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use makelink_client::{MakeClientImpl, MakeConfig, MakeScenarioClient};
//!
//! let config = MakeConfig::from_env()?;
//! let client = MakeClientImpl::new(&config)?;
//!
//! let scenarios = client.get_org_scenarios(organization_id).await?;
//! ```

pub mod client;
pub mod config;
pub mod pagination;
pub mod scenario_collector;

pub use client::{
    CreateHookRequest,
    CreateTeamRequest,
    FlowInit,
    Hook,
    HookResponse,
    InitiateFlowResponse,
    MakeApiError,
    MakeClient,
    MakeClientImpl,
    MakeFlowClient,
    MakeHookClient,
    MakeScenarioClient,
    MakeTeamClient,
    Scenario,
    ScenarioResponse,
    Team,
    TeamResponse,
    Template,
};
pub use config::{ConfigError, MakeConfig};
pub use pagination::{PageInfo, Pagination, ScenarioPage, SortDir};
pub use scenario_collector::{CollectOptions, collect_org_scenarios};
