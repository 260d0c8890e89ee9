//! Request lifecycle tracking for UI consumption.
//!
//! [`RequestTracker`] drives calls through the client facade and records
//! one request's lifecycle (`idle → loading → success/error`) in an
//! explicit state struct with no UI-framework dependency. A binding layer
//! polls or snapshots the tracker; clones share the same tracked state.
//!
//! The tracker follows exactly one request at a time. When two calls race
//! on one tracker, each mutates the shared state as it completes and the
//! completion that lands last determines the final state, regardless of
//! issuance order.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{ApiClient, RequestOptions};
use crate::decode::Payload;
use crate::error::{ApiError, Result};

// =============================================================================
// Lifecycle
// =============================================================================

/// Enumerated phase of the tracked request. Exactly one value is in force
/// at any instant; `Idle` is the initial state and there is no terminal
/// state — the tracker is reusable indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// No request has been issued since construction or the last reset.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last completed request decoded successfully.
    Success,
    /// The last completed request failed.
    Error,
}

impl Lifecycle {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the last completed request succeeded.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether the last completed request failed.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

// =============================================================================
// Tracked State
// =============================================================================

/// Point-in-time view of the tracked request.
///
/// Invariants: `data` and `error` are never both present; `Success`
/// implies data present, `Error` implies error present, `Idle` implies
/// both absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSnapshot<T> {
    pub data: Option<Payload<T>>,
    pub error: Option<ApiError>,
    pub lifecycle: Lifecycle,
}

#[derive(Debug)]
struct TrackedState<T> {
    data: Option<Payload<T>>,
    error: Option<ApiError>,
    lifecycle: Lifecycle,
}

impl<T> Default for TrackedState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            lifecycle: Lifecycle::Idle,
        }
    }
}

// =============================================================================
// Tracker
// =============================================================================

/// Per-consumer reactive state driven by calls into the client facade.
///
/// Mutations happen only between await points, so reads always observe a
/// consistent snapshot; there is no parallel mutation, only interleaved
/// completion ordering across racing calls.
#[derive(Debug)]
pub struct RequestTracker<T> {
    client: ApiClient,
    state: Arc<Mutex<TrackedState<T>>>,
}

// Manual impl: clones must share state, and `T` itself need not be Clone.
impl<T> Clone for RequestTracker<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> RequestTracker<T> {
    /// Create an idle tracker driving requests through `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(TrackedState::default())),
        }
    }

    /// The client this tracker issues requests through.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lock().lifecycle
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lifecycle().is_loading()
    }

    /// Whether the last completed request succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.lifecycle().is_success()
    }

    /// Whether the last completed request failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.lifecycle().is_error()
    }

    /// The stored error, if the tracker is in the error state.
    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        self.lock().error.clone()
    }

    /// Clear data and error and return to `Idle`.
    ///
    /// A call already in flight is unaffected: it will still store its
    /// outcome when it completes (the race rule above applies).
    pub fn reset(&self) {
        let mut state = self.lock();
        *state = TrackedState::default();
        tracing::debug!("tracker reset to idle");
    }

    fn lock(&self) -> MutexGuard<'_, TrackedState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> RequestTracker<T> {
    /// The stored payload, if the tracker is in the success state.
    #[must_use]
    pub fn data(&self) -> Option<Payload<T>> {
        self.lock().data.clone()
    }

    /// Point-in-time copy of the full tracked state.
    #[must_use]
    pub fn snapshot(&self) -> RequestSnapshot<T> {
        let state = self.lock();
        RequestSnapshot {
            data: state.data.clone(),
            error: state.error.clone(),
            lifecycle: state.lifecycle,
        }
    }
}

impl<T: DeserializeOwned + Clone> RequestTracker<T> {
    /// Tracked GET: transitions through `loading` to `success`/`error`.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ApiError`] after storing it, so the caller can react
    /// beyond what the tracked state exposes.
    pub async fn get(&self, path: &str, opts: RequestOptions) -> Result<Payload<T>> {
        self.track(self.client.get(path, opts)).await
    }

    /// Tracked POST with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ApiError`] after storing it.
    pub async fn post<B>(
        &self,
        path: &str,
        body: Option<&B>,
        opts: RequestOptions,
    ) -> Result<Payload<T>>
    where
        B: Serialize + ?Sized,
    {
        self.track(self.client.post(path, body, opts)).await
    }

    /// Tracked PUT with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ApiError`] after storing it.
    pub async fn put<B>(
        &self,
        path: &str,
        body: Option<&B>,
        opts: RequestOptions,
    ) -> Result<Payload<T>>
    where
        B: Serialize + ?Sized,
    {
        self.track(self.client.put(path, body, opts)).await
    }

    /// Tracked PATCH with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ApiError`] after storing it.
    pub async fn patch<B>(
        &self,
        path: &str,
        body: Option<&B>,
        opts: RequestOptions,
    ) -> Result<Payload<T>>
    where
        B: Serialize + ?Sized,
    {
        self.track(self.client.patch(path, body, opts)).await
    }

    /// Tracked DELETE.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ApiError`] after storing it.
    pub async fn delete(&self, path: &str, opts: RequestOptions) -> Result<Payload<T>> {
        self.track(self.client.delete(path, opts)).await
    }

    /// Run one facade call under lifecycle tracking.
    ///
    /// The lock is never held across an await: `loading` is recorded before
    /// the call starts, and the terminal state is recorded after it
    /// completes.
    async fn track(&self, call: impl Future<Output = Result<Payload<T>>>) -> Result<Payload<T>> {
        {
            let mut state = self.lock();
            state.lifecycle = Lifecycle::Loading;
            // Prior data is kept until the new call resolves.
            state.error = None;
        }
        tracing::debug!("request tracking: loading");

        match call.await {
            Ok(payload) => {
                let mut state = self.lock();
                state.data = Some(payload.clone());
                state.error = None;
                state.lifecycle = Lifecycle::Success;
                drop(state);
                tracing::debug!("request tracking: success");
                Ok(payload)
            }
            Err(error) => {
                let mut state = self.lock();
                state.data = None;
                state.error = Some(error.clone());
                state.lifecycle = Lifecycle::Error;
                drop(state);
                tracing::debug!(error = %error, "request tracking: error");
                Err(error)
            }
        }
    }
}
