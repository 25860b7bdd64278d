//! Make API クライアントの DTO / リクエスト型
//!
//! Make のレスポンスは camelCase。ここで列挙していないフィールドは
//! `extra` にそのまま保持する。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// --- チーム関連の型 ---

/// チーム作成リクエスト
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name:            String,
    pub organization_id: u64,
}

/// チーム DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// チーム作成レスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct TeamResponse {
    pub team: Team,
}

/// インスタンス化可能なテンプレート DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// テンプレート一覧レスポンス
#[derive(Debug, Clone, Deserialize)]
pub(super) struct TemplatesResponse {
    pub templates: Vec<Template>,
}

// --- フロー関連の型 ---

/// フロー開始時に作成するシナリオの設定
#[derive(Debug, Clone, Serialize)]
pub(super) struct FlowScenarioOptions {
    pub enable: bool,
}

/// テンプレートからのフロー開始リクエスト
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InitiateFlowRequest<'a> {
    pub template_id:               u64,
    pub team_id:                   u64,
    pub redirect_uri:              &'a str,
    pub prefill:                   &'a Value,
    pub scenario:                  FlowScenarioOptions,
    pub auto_activate:             bool,
    pub auto_finalize:             bool,
    pub allow_reusing_components:  bool,
    pub allow_creating_components: bool,
}

/// 開始されたフロー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInit {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// フロー開始レスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct InitiateFlowResponse {
    pub flow: FlowInit,
}

// --- Webhook 関連の型 ---

/// Webhook 作成リクエスト
///
/// `typeName` ごとに異なる追加項目は `options` に入れる。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHookRequest {
    pub name:      String,
    pub team_id:   u64,
    pub type_name: String,
    #[serde(flatten)]
    pub options:   Map<String, Value>,
}

/// Webhook DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Webhook レスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct HookResponse {
    pub hook: Hook,
}

/// Webhook 起動リクエスト
#[derive(Debug, Clone, Serialize)]
pub(super) struct TriggerWebhookRequest<'a> {
    pub action: &'a str,
}

// --- シナリオ関連の型 ---

/// シナリオ DTO
///
/// Make における自動化ワークフロー定義。`id` 以外は不透明なレコードとして扱う。
/// 型付きのフィールドも省略や `null` を受け付け、再シリアライズ時に
/// サーバーが返さなかったフィールドを追加しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// シナリオ詳細レスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioResponse {
    pub scenario: Scenario,
}
