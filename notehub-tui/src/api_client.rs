//! REST client for the notes service.

use crate::config::TuiConfig;
use async_trait::async_trait;
use notehub_core::{
    ApiError, CreateNotePayload, FetchNotesParams, Note, NoteHubResult, NotesApi, NotesPage,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;

pub const NOTES_PATH: &str = "/notes";

/// Errors raised while building the client. Request failures are reported
/// through [`ApiError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Config error: {0}")]
    Config(String),
}

/// Error body the notes service sends alongside a failed status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let auth_header = build_auth_headers(&config.auth.token)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;
        self.parse_response(path, response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(url)
            .headers(self.auth_header.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;
        self.parse_response(path, response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| ApiError::InvalidResponse {
                endpoint: path.to_string(),
                reason: e.to_string(),
            });
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.message,
            Err(_) if text.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            Err(_) => text,
        };
        Err(ApiError::RequestFailed {
            endpoint: path.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl NotesApi for RestClient {
    async fn fetch_notes(&self, params: &FetchNotesParams) -> NoteHubResult<NotesPage> {
        let page = self.get_json(NOTES_PATH, params).await?;
        Ok(page)
    }

    async fn create_note(&self, payload: &CreateNotePayload) -> NoteHubResult<Note> {
        let note = self.post_json(NOTES_PATH, payload).await?;
        Ok(note)
    }
}

fn transport_error(path: &str, err: reqwest::Error) -> ApiError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    ApiError::Transport {
        endpoint: path.to_string(),
        reason,
    }
}

fn build_auth_headers(token: &str) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();
    let value = format!("Bearer {}", token.trim());
    let mut value =
        HeaderValue::from_str(&value).map_err(|e| ApiClientError::Config(e.to_string()))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_is_bearer() {
        let headers = build_auth_headers(" abc ").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_auth_header_rejects_control_chars() {
        assert!(matches!(
            build_auth_headers("bad\ntoken"),
            Err(ApiClientError::Config(_))
        ));
    }
}
