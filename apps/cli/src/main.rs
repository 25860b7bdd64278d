//! # makelink CLI
//!
//! Make REST API を呼び出し、結果を JSON で stdout に出力する。
//! ログは stderr に出力される。
//!
//! ## 環境変数
//!
//! `.env` ファイルがあれば読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `MAKE_BASE_URL` | **Yes** | API ホスト |
//! | `MAKE_API_VERSION` | **Yes** | API バージョン |
//! | `MAKE_API_KEY` | **Yes** | API トークン |
//! | `APPLICATION_URL` / `PORT` | No | フローコールバック URL の組み立て |
//! | `MASTER_MAKE_TEAM` | No | テンプレート取得時に使うチーム |
//! | `ENVIRONMENT` | No | `production` でボディのログ出力を無効化 |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//!
//! ## 使用例
//!
//! ```bash
//! makelink scenarios 12345
//! makelink -v scenario 925
//! makelink init-flow 11 3 --prefill '{"hooks":{}}'
//! ```

mod cli;

use anyhow::Context as _;
use clap::Parser;
use cli::{Cli, Command};
use makelink_client::{
    CollectOptions,
    CreateHookRequest,
    MakeClientImpl,
    MakeConfig,
    MakeFlowClient,
    MakeHookClient,
    MakeScenarioClient,
    MakeTeamClient,
    collect_org_scenarios,
};
use makelink_shared::observability::{TracingConfig, init_tracing};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&TracingConfig::from_env().with_verbosity(cli.verbose));

    let config = MakeConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::debug!(?config, "設定を読み込みました");

    let client = MakeClientImpl::new(&config).context("クライアントの構築に失敗しました")?;

    let output = run(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// サブコマンドを実行し、出力する JSON を返す
async fn run(client: &MakeClientImpl, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Scenarios {
            organization_id,
            page_size,
            max_pages,
        } => {
            let options = CollectOptions {
                page_size,
                max_pages,
            };
            let scenarios = collect_org_scenarios(client, organization_id, &options).await?;
            tracing::info!(organization_id, count = scenarios.len(), "シナリオを取得しました");
            serde_json::to_value(scenarios)?
        }
        Command::Scenario { scenario_id } => {
            serde_json::to_value(client.get_scenario(scenario_id).await?.scenario)?
        }
        Command::Hook { hook_id } => serde_json::to_value(client.get_webhook(hook_id).await?.hook)?,
        Command::CreateHook {
            name,
            team_id,
            type_name,
        } => {
            let req = CreateHookRequest {
                name,
                team_id,
                type_name,
                options: serde_json::Map::new(),
            };
            serde_json::to_value(client.create_webhook(&req).await?.hook)?
        }
        Command::Trigger { url, action } => Value::String(client.trigger_webhook(&url, &action).await?),
        Command::CreateTeam {
            name,
            organization_id,
        } => serde_json::to_value(client.create_team(&name, organization_id).await?.team)?,
        Command::Templates { team_id } => {
            serde_json::to_value(client.get_team_templates(team_id).await?)?
        }
        Command::InitFlow {
            template_id,
            team_id,
            prefill,
        } => {
            let prefill: Value =
                serde_json::from_str(&prefill).context("--prefill は JSON である必要があります")?;
            serde_json::to_value(client.initiate_flow(template_id, team_id, &prefill).await?.flow)?
        }
        Command::Flow { flow_id } => client.process_flow(&flow_id).await?,
    };

    Ok(output)
}
