use crate::config::Settings;
use crate::error::{Error, Result};
use crate::storage::{FileTokenStorage, TokenStorage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

const ACCEPT: &str = "application/vnd.github+json";

/// Page size requested from the collection endpoints
pub const PER_PAGE: usize = 100;

/// Status code and decoded JSON body of a GitHub response.
///
/// `body` is `None` when the response had no content, a JSON `null`, or
/// content that is not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserializes the body. A missing body yields `Ok(None)`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.body {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }

    /// Error message reported by GitHub, if any.
    pub fn message(&self) -> String {
        self.body
            .as_ref()
            .and_then(|b| b["message"].as_str())
            .unwrap_or("no details")
            .to_string()
    }
}

/// GitHub REST gateway.
///
/// The token is resolved from storage for every request; without one the
/// request is sent unauthenticated.
pub struct GitHub {
    http: reqwest::Client,
    settings: Settings,
    tokens: Arc<dyn TokenStorage>,
}

impl GitHub {
    pub fn new(settings: Settings, tokens: Arc<dyn TokenStorage>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(GitHub {
            http,
            settings,
            tokens,
        })
    }

    /// Gateway using the token file named in the settings.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let tokens = Arc::new(FileTokenStorage::new(settings.config_path.clone()));
        Self::new(settings, tokens)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tokens(&self) -> &dyn TokenStorage {
        self.tokens.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.api_base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let request = request.header("Accept", ACCEPT);
        Ok(match self.tokens.get_token()? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let response = self.authorize(request)?.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(serde_json::Value::Null) => None,
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(status, "Response body is not JSON: {err}");
                    None
                }
            }
        };
        debug!(status, has_body = body.is_some(), "GitHub responded");
        Ok(ApiResponse { status, body })
    }

    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        debug!(path, "GET");
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    /// Fetches every page of a collection, in page order.
    ///
    /// `query` is sent with each page next to `per_page` and `page`. Stops
    /// after an empty or short page; a page without a body counts as empty.
    /// Any non-2xx page aborts the listing with `Error::Api`.
    pub(crate) async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let mut page_query = query.to_vec();
            page_query.push(("per_page", PER_PAGE.to_string()));
            page_query.push(("page", page.to_string()));

            let response = self.get(path, &page_query).await?;
            if !response.is_success() {
                return Err(Error::Api {
                    status: response.status,
                    message: response.message(),
                });
            }

            let page_items: Vec<T> = response.parse()?.unwrap_or_default();
            let fetched = page_items.len();
            debug!(path, page, fetched, "Fetched page");
            items.extend(page_items);

            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        debug!(path, "PUT");
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        debug!(path, "POST");
        self.send(self.http.post(self.url(path)).json(body)).await
    }
}
