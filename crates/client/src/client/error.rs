//! Make API クライアントのエラー型

use reqwest::StatusCode;
use thiserror::Error;

/// Make API クライアントエラー
#[derive(Debug, Clone, Error)]
pub enum MakeApiError {
    /// シナリオが見つからない（404）
    #[error("シナリオが見つかりません")]
    ScenarioNotFound,

    /// Webhook が見つからない（404）
    #[error("Webhook が見つかりません")]
    HookNotFound,

    /// フローが見つからない（404）
    #[error("フローが見つかりません")]
    FlowNotFound,

    /// バリデーションエラー（400）
    #[error("バリデーションエラー: {0}")]
    ValidationError(String),

    /// 認証エラー（401）
    #[error("認証に失敗しました: {0}")]
    Unauthorized(String),

    /// 権限不足（403）
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// ネットワークエラー（レスポンスを受信できなかった）
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 成功ステータスだがボディが期待した形式でない
    #[error("不正なレスポンス: {0}")]
    MalformedResponse(String),

    /// ページ数の上限に達した
    #[error("ページ数の上限 {max_pages} に達しました")]
    PageLimitExceeded { max_pages: u32 },

    /// 次のページのオフセットが表現できる範囲を超えた
    #[error("オフセット {offset} に {limit} を加えると上限を超えます")]
    OffsetOverflow { offset: u32, limit: u32 },

    /// 呼び出し側の引数が不正
    #[error("引数が不正です: {0}")]
    InvalidArgument(String),

    /// 上記以外のエラーステータス
    #[error("予期しないステータス {status}: {body}")]
    Unexpected { status: StatusCode, body: String },
}

impl MakeApiError {
    /// サーバーから受け取った HTTP ステータス
    ///
    /// レスポンスを受信していないエラーでは `None` を返す。
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ScenarioNotFound | Self::HookNotFound | Self::FlowNotFound => {
                Some(StatusCode::NOT_FOUND)
            }
            Self::ValidationError(_) => Some(StatusCode::BAD_REQUEST),
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            Self::Unexpected { status, .. } => Some(*status),
            Self::Network(_)
            | Self::MalformedResponse(_)
            | Self::PageLimitExceeded { .. }
            | Self::OffsetOverflow { .. }
            | Self::InvalidArgument(_) => None,
        }
    }
}

/// ボディの読み取りを含め、reqwest のエラーはすべて通信失敗として扱う
///
/// JSON のパースは `response.rs` で行い、失敗は `MalformedResponse` になる。
impl From<reqwest::Error> for MakeApiError {
    fn from(err: reqwest::Error) -> Self {
        MakeApiError::Network(err.to_string())
    }
}
