//! Make API レスポンスの共通ハンドリング
//!
//! 本番環境以外ではリクエスト・レスポンスのボディを `debug` レベルで出力する。

use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};

use super::error::MakeApiError;

/// Make API レスポンスの共通ハンドリング
///
/// 成功時はレスポンスボディを `T` にデシリアライズし、
/// エラー時はステータスコードに応じた `MakeApiError` を返す。
///
/// # 引数
///
/// - `response`: Make API からの HTTP レスポンス
/// - `not_found_error`: 404 レスポンス時に返すエラー。`None` の場合は
///   `Unexpected` にフォールスルー
/// - `log_bodies`: ボディをログに出力するかどうか
pub(super) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    not_found_error: Option<MakeApiError>,
    log_bodies: bool,
) -> Result<T, MakeApiError> {
    let body = handle_text_response(response, not_found_error, log_bodies).await?;

    serde_json::from_str(&body).map_err(|e| MakeApiError::MalformedResponse(e.to_string()))
}

/// Make API レスポンスをテキストのまま返す
///
/// Webhook のように JSON 以外（`Accepted` など）を返すエンドポイント用。
pub(super) async fn handle_text_response(
    response: reqwest::Response,
    not_found_error: Option<MakeApiError>,
    log_bodies: bool,
) -> Result<String, MakeApiError> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        if log_bodies {
            tracing::debug!(%status, body = %body, "Make API レスポンスボディ");
        }
        return Ok(body);
    }

    let body = response.text().await.unwrap_or_default();
    if log_bodies {
        tracing::error!(%status, body = %body, "Make API エラーレスポンスボディ");
    }

    if status == StatusCode::NOT_FOUND
        && let Some(err) = not_found_error
    {
        return Err(err);
    }

    let error = match status {
        StatusCode::BAD_REQUEST => MakeApiError::ValidationError(body),
        StatusCode::UNAUTHORIZED => MakeApiError::Unauthorized(body),
        StatusCode::FORBIDDEN => MakeApiError::Forbidden(body),
        _ => MakeApiError::Unexpected { status, body },
    };

    Err(error)
}

/// リクエストボディをログに出力する
pub(super) fn log_request_body<B: Serialize + ?Sized>(body: &B, log_bodies: bool) {
    if !log_bodies {
        return;
    }
    match serde_json::to_string(body) {
        Ok(json) => tracing::debug!(body = %json, "Make API リクエストボディ"),
        Err(e) => tracing::debug!(error = %e, "リクエストボディをシリアライズできません"),
    }
}
