//! Generic resource store.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::state::{LoadState, LoadingGuard, StoreState};
use super::{InsertAt, Payload, Resource};
use crate::api::{ApiClient, Body, Method, endpoints};
use crate::error::{AppError, Result};
use crate::models::RecordId;

/// In-memory collection of one entity type plus CRUD against its endpoint.
///
/// Each operation is a single request. On success the collection is updated
/// to match; on failure it is left untouched and the message is kept in
/// [`StoreState::error`] until the next operation or [`clear_error`].
///
/// [`clear_error`]: ResourceStore::clear_error
pub struct ResourceStore<R: Resource> {
    client: Arc<ApiClient>,
    state: RwLock<StoreState<R>>,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    // --- Reads ---

    /// A copy of the whole state for rendering.
    pub fn snapshot(&self) -> StoreState<R> {
        self.read().clone()
    }

    pub fn items(&self) -> Vec<R> {
        self.read().items.clone()
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<R> {
        self.read().items.iter().find(|r| r.id() == id).cloned()
    }

    /// First record matching a predicate.
    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> Option<R> {
        self.read().items.iter().find(|r| predicate(r)).cloned()
    }

    pub fn selected(&self) -> Option<R> {
        self.read().selected.clone()
    }

    pub fn select(&self, record: Option<R>) {
        self.write().selected = record;
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn is_loaded(&self) -> bool {
        self.read().load_state == LoadState::Loaded
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn clear_error(&self) {
        self.write().error = None;
    }

    // --- Operations ---

    /// Explicit load action for the hosting view.
    pub async fn load(&self) -> Result<()> {
        self.fetch_all().await.map(|_| ())
    }

    /// Replace the collection with the backend's full set.
    pub async fn fetch_all(&self) -> Result<Vec<R>> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.client.get::<Vec<R>>(R::COLLECTION).await {
            Ok(records) => {
                let mut items: Vec<R> = records.into_iter().map(R::normalize).collect();
                R::arrange(&mut items);
                log::debug!("Loaded {} {} record(s)", items.len(), R::NAME);
                let mut state = self.write();
                state.items = items.clone();
                state.load_state = LoadState::Loaded;
                Ok(items)
            }
            Err(e) => Err(self.fail("load", e)),
        }
    }

    /// Fetch one record, make it the selection, and refresh its copy in the
    /// collection if present.
    pub async fn fetch_one(&self, id: &RecordId) -> Result<R> {
        self.fetch_selected(&endpoints::item(R::COLLECTION, id))
            .await
    }

    /// Fetch a single record from an alternate path and select it.
    pub(crate) async fn fetch_selected(&self, path: &str) -> Result<R> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.client.get::<R>(path).await {
            Ok(record) => {
                let record = record.normalize();
                let mut state = self.write();
                if let Some(slot) = state.items.iter_mut().find(|r| r.id() == record.id()) {
                    *slot = record.clone();
                }
                state.selected = Some(record.clone());
                Ok(record)
            }
            Err(e) => Err(self.fail("fetch", e)),
        }
    }

    /// Fetch a filtered listing without replacing the held collection.
    pub(crate) async fn fetch_list(&self, path: &str) -> Result<Vec<R>> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.client.get::<Vec<R>>(path).await {
            Ok(records) => Ok(records.into_iter().map(R::normalize).collect()),
            Err(e) => Err(self.fail("list", e)),
        }
    }

    /// POST a new record; the returned record joins the collection once.
    pub async fn create<P: Payload>(&self, payload: P) -> Result<R> {
        let body = self.prepare("create", payload)?;
        let _loading = LoadingGuard::begin(&self.state);
        match self
            .client
            .request::<R>(Method::POST, R::COLLECTION, body)
            .await
        {
            Ok(record) => {
                let record = record.normalize();
                self.apply_created(record.clone());
                log::info!("Created {} {}", R::NAME, record.id());
                Ok(record)
            }
            Err(e) => Err(self.fail("create", e)),
        }
    }

    /// PUT new field values for `id`.
    pub async fn update<P: Payload>(&self, id: &RecordId, payload: P) -> Result<R> {
        self.update_with(Method::PUT, id, payload).await
    }

    /// Update with an explicit method (some endpoints take PATCH).
    pub async fn update_with<P: Payload>(
        &self,
        method: Method,
        id: &RecordId,
        payload: P,
    ) -> Result<R> {
        let body = self.prepare("update", payload)?;
        let _loading = LoadingGuard::begin(&self.state);
        let path = endpoints::item(R::COLLECTION, id);
        match self.client.request::<R>(method, &path, body).await {
            Ok(record) => {
                let record = record.normalize();
                self.apply_updated(id, record.clone());
                log::info!("Updated {} {}", R::NAME, id);
                Ok(record)
            }
            Err(e) => Err(self.fail("update", e)),
        }
    }

    /// DELETE `id` and drop it from the collection.
    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        let _loading = LoadingGuard::begin(&self.state);
        let path = endpoints::item(R::COLLECTION, id);
        match self.client.execute(Method::DELETE, &path, Body::Empty).await {
            Ok(()) => {
                self.apply_deleted(id);
                log::info!("Deleted {} {}", R::NAME, id);
                Ok(())
            }
            Err(e) => Err(self.fail("delete", e)),
        }
    }

    // --- State transitions ---

    pub(crate) fn apply_created(&self, record: R) {
        let mut state = self.write();
        state.items.retain(|r| r.id() != record.id());
        match R::INSERT_AT {
            InsertAt::Front => state.items.insert(0, record),
            InsertAt::Back => state.items.push(record),
        }
    }

    pub(crate) fn apply_updated(&self, id: &RecordId, record: R) {
        let mut state = self.write();
        for slot in state.items.iter_mut().filter(|r| r.id() == id) {
            *slot = record.clone();
        }
        if state.selected.as_ref().is_some_and(|s| s.id() == id) {
            state.selected = Some(record);
        }
    }

    pub(crate) fn apply_deleted(&self, id: &RecordId) {
        let mut state = self.write();
        state.items.retain(|r| r.id() != id);
        if state.selected.as_ref().is_some_and(|s| s.id() == id) {
            state.selected = None;
        }
    }

    /// Raise the loading flag for a multi-request operation.
    pub(crate) fn begin(&self) -> LoadingGuard<'_, StoreState<R>> {
        LoadingGuard::begin(&self.state)
    }

    /// Replace the collection wholesale (after a local reorder).
    pub(crate) fn replace_items(&self, items: Vec<R>) {
        self.write().items = items;
    }

    /// Validate and encode a payload, recording validation failures.
    fn prepare<P: Payload>(&self, action: &str, payload: P) -> Result<Body> {
        payload
            .validate()
            .and_then(|()| payload.into_body())
            .map_err(|e| self.fail(action, e))
    }

    /// Record a failure for display and hand the error back.
    pub(crate) fn fail(&self, action: &str, err: AppError) -> AppError {
        let message = format!("Failed to {} {}: {}", action, R::NAME, err);
        if err.is_validation() {
            log::warn!("{}", message);
        } else {
            log::error!("{}", message);
        }
        self.write().error = Some(message);
        err
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState<R>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState<R>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
