use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::models::{
    ApiResponse, Match, MatchEvent, MatchSnapshot, PostGoalRequest, PostMessageRequest,
    UpdateClockRequest,
};
use crate::transport::{MatchCommandService, TransportError};

/// reqwest-backed client for the `/matches` command endpoint.
///
/// No timeout or retry policy is applied here; configure it on the `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpCommandClient {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpCommandClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, TransportError> {
        // A trailing slash keeps `join` from dropping the last path segment.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, TransportError> {
        let url = self.base_url.join(path)?;
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, TransportError> {
        let response = builder.send().await?;
        let status = response.status();
        let body: ApiResponse<T> = match response.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(TransportError::Http(e)),
            Err(_) => {
                return Err(TransportError::Rejected {
                    status,
                    message: status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string(),
                })
            }
        };

        if !status.is_success() || !body.success {
            return Err(TransportError::Rejected {
                status,
                message: body.error.unwrap_or_else(|| "request failed".to_string()),
            });
        }
        Ok(body.data)
    }

    async fn send_expecting<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, TransportError> {
        self.send(builder).await?.ok_or(TransportError::MissingPayload)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send_expecting(builder).await
    }
}

#[async_trait]
impl MatchCommandService for HttpCommandClient {
    async fn fetch_initial(&self, match_id: i64) -> Result<MatchSnapshot, TransportError> {
        let builder = self.request(Method::GET, &format!("matches/{}", match_id))?;
        self.send_expecting(builder).await
    }

    async fn update_clock(
        &self,
        match_id: i64,
        request: &UpdateClockRequest,
    ) -> Result<Match, TransportError> {
        self.post_json(&format!("matches/{}/clock", match_id), request)
            .await
    }

    async fn post_goal(
        &self,
        match_id: i64,
        request: &PostGoalRequest,
    ) -> Result<Match, TransportError> {
        self.post_json(&format!("matches/{}/goals", match_id), request)
            .await
    }

    async fn post_message(
        &self,
        match_id: i64,
        request: &PostMessageRequest,
    ) -> Result<MatchEvent, TransportError> {
        self.post_json(&format!("matches/{}/messages", match_id), request)
            .await
    }

    async fn delete_event(&self, match_id: i64, event_id: i64) -> Result<(), TransportError> {
        let builder = self.request(
            Method::DELETE,
            &format!("matches/{}/events/{}", match_id, event_id),
        )?;
        self.send::<serde_json::Value>(builder).await?;
        Ok(())
    }

    async fn load_events_before(
        &self,
        match_id: i64,
        before_id: i64,
        limit: i64,
    ) -> Result<Vec<MatchEvent>, TransportError> {
        let builder = self
            .request(Method::GET, &format!("matches/{}/events", match_id))?
            .query(&[("before_id", before_id), ("limit", limit)]);
        self.send_expecting(builder).await
    }
}
