//! # Make API クライアント
//!
//! Make の REST API との通信を担当する。
//!
//! ## エンドポイント
//!
//! - `POST /teams` - チーム作成
//! - `GET /templates/v2/instanceable` - テンプレート一覧
//! - `POST /instances/flow/init/template` - フロー開始
//! - `GET /instances/flow/{flow_id}` - フロー状態の取得
//! - `POST /hooks` / `GET /hooks/{hook_id}` - Webhook の作成・取得
//! - `GET /scenarios/{scenario_id}` - シナリオ取得
//! - `GET /scenarios` - 組織のシナリオ一覧（ページ単位）

mod client_impl;
mod error;
mod flow_client;
mod hook_client;
mod response;
mod scenario_client;
mod team_client;
mod types;

pub use client_impl::{MakeClient, MakeClientImpl};
pub use error::MakeApiError;
pub use flow_client::MakeFlowClient;
pub use hook_client::MakeHookClient;
pub use scenario_client::MakeScenarioClient;
pub use team_client::MakeTeamClient;
pub use types::{
    CreateHookRequest,
    CreateTeamRequest,
    FlowInit,
    Hook,
    HookResponse,
    InitiateFlowResponse,
    Scenario,
    ScenarioResponse,
    Team,
    TeamResponse,
    Template,
};
