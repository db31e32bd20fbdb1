//! Per-collection CRUD wrappers.

use assetdesk_core::{Operation, Resource, ResourceId};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::ApiClient;

/// One REST collection, e.g. `/assets`.
///
/// Operations the backend does not offer on this collection fail with
/// [`ClientError::Unsupported`] before any request is sent.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    client: &'a ApiClient,
    resource: Resource,
}

impl<'a> Collection<'a> {
    pub fn new(client: &'a ApiClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// `GET /{collection}`
    pub async fn list(&self) -> Result<Value, ClientError> {
        self.require(Operation::List)?;
        self.client.get(self.resource.path()).await
    }

    /// `POST /{collection}`
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ClientError> {
        self.require(Operation::Create)?;
        self.client.post(self.resource.path(), Some(body)).await
    }

    /// `GET /{collection}/{id}`
    pub async fn get(&self, id: ResourceId) -> Result<Value, ClientError> {
        self.require(Operation::Read)?;
        self.client.get(&self.item_path(id)).await
    }

    /// `PUT /{collection}/{id}`
    pub async fn update<B: Serialize + ?Sized>(&self, id: ResourceId, body: &B) -> Result<Value, ClientError> {
        self.require(Operation::Update)?;
        self.client.put(&self.item_path(id), body).await
    }

    /// `DELETE /{collection}/{id}`
    pub async fn delete(&self, id: ResourceId) -> Result<Value, ClientError> {
        self.require(Operation::Delete)?;
        self.client.delete(&self.item_path(id)).await
    }

    /// `POST /assets/{id}/restore`
    pub async fn restore(&self, id: ResourceId) -> Result<Value, ClientError> {
        self.require(Operation::Restore)?;
        self.client
            .post::<()>(&format!("{}/restore", self.item_path(id)), None)
            .await
    }

    /// `GET /assets/{id}/deprec`
    pub async fn depreciation(&self, id: ResourceId) -> Result<Value, ClientError> {
        self.require(Operation::Depreciation)?;
        self.client.get(&format!("{}/deprec", self.item_path(id))).await
    }

    /// `POST /licenses/{id}/renew`
    pub async fn renew<B: Serialize + ?Sized>(&self, id: ResourceId, body: &B) -> Result<Value, ClientError> {
        self.require(Operation::Renew)?;
        self.client
            .post(&format!("{}/renew", self.item_path(id)), Some(body))
            .await
    }

    fn item_path(&self, id: ResourceId) -> String {
        format!("{}/{}", self.resource.path(), id)
    }

    fn require(&self, operation: Operation) -> Result<(), ClientError> {
        if self.resource.supports(operation) {
            Ok(())
        } else {
            Err(ClientError::Unsupported {
                resource: self.resource,
                operation,
            })
        }
    }
}
