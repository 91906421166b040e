//! Shared HTTP response helpers for the Ollama client.

use crate::error::OracleError;

/// Return the response unchanged on success, or [`OracleError::Api`].
///
/// Ollama reports failures as `{"error": "..."}`; that message is preferred
/// over the raw body when present.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, OracleError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(OracleError::Api {
        status,
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_uses_ollama_error_field() {
        let resp = mock_response(404, r#"{"error":"model 'nope' not found"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            OracleError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model 'nope' not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_falls_back_to_raw_body() {
        let resp = mock_response(502, "bad gateway\n");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            OracleError::Api { status: 502, ref message } if message == "bad gateway"
        ));
    }
}
