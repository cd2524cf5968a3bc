//! Memoized handles for side-effecting calls.

use crate::{Error, Result};
use futures::future::{BoxFuture, FutureExt, Shared, TryFutureExt};
use std::future::{Future, IntoFuture};
use std::sync::Arc;

/// A call that runs at most once.
///
/// The wrapped future starts on the first await. Every later await, on this
/// handle or any clone of it, replays the first outcome without running the
/// call again. Failures are replayed as [`Error::Shared`].
pub struct SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Shared<BoxFuture<'static, std::result::Result<T, Arc<Error>>>>,
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F>(call: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            inner: call.map_err(Arc::new).boxed().shared(),
        }
    }

    /// Wait for the outcome, running the call if nobody has yet.
    pub async fn get(&self) -> Result<T> {
        self.inner.clone().await.map_err(Error::Shared)
    }

    /// The outcome, if the call has already finished.
    pub fn peek(&self) -> Option<Result<T>> {
        self.inner
            .peek()
            .map(|r| r.clone().map_err(Error::Shared))
    }

    pub fn is_done(&self) -> bool {
        self.inner.peek().is_some()
    }
}

impl<T> Clone for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> IntoFuture for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Result<T>;
    type IntoFuture = BoxFuture<'static, Result<T>>;

    fn into_future(self) -> Self::IntoFuture {
        async move { self.get().await }.boxed()
    }
}

impl<T> std::fmt::Debug for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("done", &self.is_done())
            .finish()
    }
}
