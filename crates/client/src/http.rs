//! HTTP transport for the AssetDesk API.

use std::sync::{PoisonError, RwLock};

use assetdesk_core::Resource;
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::resources::Collection;

/// Client for the AssetDesk REST API.
///
/// Cheap to share behind an `Arc`; the bearer token can be swapped at runtime
/// (sign-in / sign-out) without rebuilding the client.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Url::parse(&config.api_url).map_err(|e| ClientError::InvalidUrl {
            url: config.api_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: RwLock::new(config.token),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// CRUD wrapper for one collection.
    pub fn resource(&self, resource: Resource) -> Collection<'_> {
        Collection::new(self, resource)
    }

    pub fn assets(&self) -> Collection<'_> {
        self.resource(Resource::Assets)
    }

    pub fn asset_types(&self) -> Collection<'_> {
        self.resource(Resource::AssetTypes)
    }

    pub fn categories(&self) -> Collection<'_> {
        self.resource(Resource::Categories)
    }

    pub fn departments(&self) -> Collection<'_> {
        self.resource(Resource::Departments)
    }

    pub fn depreciation_methods(&self) -> Collection<'_> {
        self.resource(Resource::DepreciationMethods)
    }

    pub fn licenses(&self) -> Collection<'_> {
        self.resource(Resource::Licenses)
    }

    pub fn locations(&self) -> Collection<'_> {
        self.resource(Resource::Locations)
    }

    pub fn maintenance(&self) -> Collection<'_> {
        self.resource(Resource::Maintenance)
    }

    pub fn notification_schedules(&self) -> Collection<'_> {
        self.resource(Resource::NotificationSchedules)
    }

    pub fn users(&self) -> Collection<'_> {
        self.resource(Resource::Users)
    }

    pub fn audit_logs(&self) -> Collection<'_> {
        self.resource(Resource::AuditLogs)
    }

    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.send::<()>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<Value, ClientError> {
        self.send(Method::POST, path, body).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(reqwest::header::ACCEPT, "application/json");

        let token = self.token.read().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, %url, "request failed: {e}");
            ClientError::Network(e.to_string())
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "API returned an error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!(%method, %url, status = status.as_u16(), "API call succeeded");

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))
    }
}
