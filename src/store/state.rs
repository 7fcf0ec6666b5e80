//! Observable store state.

use std::sync::{PoisonError, RwLock};

/// Whether a store has ever loaded successfully.
///
/// A successful response with no records is `Loaded` with an empty
/// collection; `Idle` only ever means "not fetched yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loaded,
}

/// What views read from a resource store.
#[derive(Debug, Clone)]
pub struct StoreState<R> {
    pub items: Vec<R>,
    pub selected: Option<R>,
    pub loading: bool,
    pub error: Option<String>,
    pub load_state: LoadState,
    pub(crate) in_flight: usize,
}

impl<R> Default for StoreState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            loading: false,
            error: None,
            load_state: LoadState::Idle,
            in_flight: 0,
        }
    }
}

impl<R> StoreState<R> {
    pub fn is_loaded(&self) -> bool {
        self.load_state == LoadState::Loaded
    }

    /// Loaded and holding no records.
    pub fn is_empty_result(&self) -> bool {
        self.is_loaded() && self.items.is_empty()
    }
}

/// State that carries a loading flag and an error message.
///
/// `in_flight` counts open [`LoadingGuard`]s so that overlapping requests
/// keep the flag raised until the last one finishes.
pub(crate) trait Busy {
    fn in_flight(&mut self) -> &mut usize;
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
}

impl<R> Busy for StoreState<R> {
    fn in_flight(&mut self) -> &mut usize {
        &mut self.in_flight
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// Raises the loading flag and clears the error. The flag is lowered when
/// the last overlapping guard drops, including when the owning future is
/// dropped mid-request.
pub(crate) struct LoadingGuard<'a, S: Busy> {
    state: &'a RwLock<S>,
}

impl<'a, S: Busy> LoadingGuard<'a, S> {
    pub(crate) fn begin(state: &'a RwLock<S>) -> Self {
        {
            let mut s = state.write().unwrap_or_else(PoisonError::into_inner);
            *s.in_flight() += 1;
            s.set_loading(true);
            s.set_error(None);
        }
        Self { state }
    }
}

impl<S: Busy> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        let mut s = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let in_flight = s.in_flight();
        *in_flight = in_flight.saturating_sub(1);
        let busy = *in_flight > 0;
        s.set_loading(busy);
    }
}
