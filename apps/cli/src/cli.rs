//! # コマンドライン引数

use clap::{Parser, Subcommand};
use makelink_client::scenario_collector::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};

/// Make REST API クライアント
#[derive(Debug, Parser)]
#[command(name = "makelink", version)]
pub struct Cli {
    /// ログを詳細にする（`-v`: debug, `-vv`: trace）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 組織のシナリオをすべて取得する
    Scenarios {
        organization_id: u64,
        /// 1 ページあたりの取得件数
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size:       u32,
        /// 取得するページ数の上限
        #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages:       u32,
    },
    /// シナリオを取得する
    Scenario { scenario_id: u64 },
    /// Webhook を取得する
    Hook { hook_id: u64 },
    /// Webhook を作成する
    CreateHook {
        #[arg(long)]
        name:      String,
        #[arg(long)]
        team_id:   u64,
        #[arg(long, default_value = "gateway-webhook")]
        type_name: String,
    },
    /// Webhook を起動する
    Trigger { url: String, action: String },
    /// チームを作成する
    CreateTeam { name: String, organization_id: u64 },
    /// チームのテンプレート一覧を取得する
    Templates { team_id: u64 },
    /// テンプレートからフローを開始する
    InitFlow {
        template_id: u64,
        team_id:     u64,
        /// 事前入力値（JSON）
        #[arg(long, default_value = "{}")]
        prefill:     String,
    },
    /// フローの状態を取得する
    Flow { flow_id: String },
}
