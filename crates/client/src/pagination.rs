//! # オフセットベースのページネーション
//!
//! Make の一覧 API は `pg[limit]` / `pg[offset]` / `pg[sortBy]` / `pg[sortDir]`
//! クエリでページを指定し、レスポンスの `pg` でサーバーが採用した `limit` を返す。
//!
//! ## JSON 形式
//!
//! ```json
//! {
//!   "scenarios": [...],
//!   "pg": { "limit": 50, "offset": 0, "sortBy": "id", "sortDir": "asc" }
//! }
//! ```
//!
//! 「次のページがあるか」を示すフラグや総件数は返らない。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::Scenario;

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// ページ指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub limit:    u32,
    pub offset:   u32,
    pub sort_by:  String,
    pub sort_dir: SortDir,
}

impl Pagination {
    /// `id` 昇順で先頭ページを指定する
    pub fn first_page(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            sort_by: "id".to_string(),
            sort_dir: SortDir::Asc,
        }
    }

    /// オフセットを `limit` だけ進めた次のページ
    ///
    /// オフセットが `u32` に収まらない場合は `None`。
    pub fn next_page(&self) -> Option<Self> {
        let offset = self.offset.checked_add(self.limit)?;

        Some(Self {
            offset,
            ..self.clone()
        })
    }

    /// クエリパラメータに変換する
    pub fn to_query(&self) -> [(&'static str, String); 4] {
        [
            ("pg[limit]", self.limit.to_string()),
            ("pg[offset]", self.offset.to_string()),
            ("pg[sortBy]", self.sort_by.clone()),
            ("pg[sortDir]", self.sort_dir.as_str().to_string()),
        ]
    }
}

/// サーバーが返すページ情報
///
/// 終端判定に使うのは `limit` のみ。`offset` や `sortDir` などのエコーは
/// 値を検証せず `extra` にそのまま保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub limit: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageInfo {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            extra: Map::new(),
        }
    }
}

/// シナリオ一覧の 1 ページ
///
/// `scenarios` と `pg` はどちらも必須。欠けている場合はデシリアライズに失敗する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPage {
    pub scenarios: Vec<Scenario>,
    pub pg:        PageInfo,
}

impl ScenarioPage {
    /// 最終ページかどうか
    ///
    /// サーバーが返した `limit` より件数が少なければ最終ページとみなす。
    /// 件数がちょうど `limit` の場合は次のページを取得して空であることを確認する必要がある。
    pub fn is_last(&self) -> bool {
        self.pg.limit as usize > self.scenarios.len()
    }
}
