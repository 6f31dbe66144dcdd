//! Generic resource client.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;

/// A backend-held record type with a server-assigned identity.
pub trait Resource: Serialize + DeserializeOwned {
    /// Collection segment under `/api/v1/`, e.g. `patients`.
    const COLLECTION: &'static str;

    /// The record's id; `None` for a not-yet-persisted draft.
    fn id(&self) -> Option<&str>;
}

/// Asynchronous CRUD gateway for one record type against one base URL.
///
/// Single-shot request/response per call; no automatic retry anywhere —
/// retry policy belongs to the caller. Within one client no ordering is
/// guaranteed between two in-flight calls; view-state applies responses
/// by request identity (see `listing`).
pub struct ResourceClient<T: Resource> {
    http: reqwest::Client,
    base_url: String,
    _record: PhantomData<T>,
}

impl<T: Resource> ResourceClient<T> {
    /// Client for `{base_url}/api/v1/{collection}`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/v1/{}", self.base_url, T::COLLECTION)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{id}", self.collection_url())
    }

    /// Fetch the whole collection. Every list view is a snapshot that may
    /// be stale until re-fetched.
    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        decode(ensure_success(response)?).await
    }

    /// Fetch one record by id.
    pub async fn get(&self, id: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.item_url(id))
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        decode(ensure_success(response)?).await
    }

    /// Persist a draft. The server assigns `id` and audit timestamps; the
    /// returned record carries them.
    pub async fn create(&self, draft: &T) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        let created: T = decode(ensure_success(response)?).await?;
        tracing::debug!(
            collection = T::COLLECTION,
            id = created.id(),
            "Record created"
        );
        Ok(created)
    }

    /// Replace the record with this id. Last write wins; there is no
    /// concurrency token on this wire.
    pub async fn update(&self, id: &str, record: &T) -> Result<T, ApiError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(record)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        decode(ensure_success(response)?).await
    }

    /// Delete by id. Whether deleting an already-deleted id succeeds
    /// silently or yields `NotFound` is the backend's choice; both are
    /// passed through unchanged and the caller must not assume either.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        ensure_success(response)?;
        tracing::debug!(collection = T::COLLECTION, id, "Record deleted");
        Ok(())
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(status))
    }
}

async fn decode<B: DeserializeOwned>(response: reqwest::Response) -> Result<B, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

// ═══════════════════════════════════════════════════════════
// Tests — in-process stub backend
// ═══════════════════════════════════════════════════════════
