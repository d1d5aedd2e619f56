//! One-shot asynchronous work returned by update handlers.
//!
//! Update handlers stay synchronous: anything that has to wait (decoding a
//! preview, calling the backend) is described as a [`Task`] whose output is
//! the next message to feed back into the handler.

use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;

/// A deferred computation producing a single message
pub struct Task<M> {
    future: Option<BoxFuture<'static, M>>,
}

impl<M: Send + 'static> Task<M> {
    /// A task that does nothing
    pub fn none() -> Self {
        Self { future: None }
    }

    /// Run `future` and map its output into a message
    pub fn perform<T, F, Map>(future: F, map: Map) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Map: FnOnce(T) -> M + Send + 'static,
    {
        Self {
            future: Some(future.map(map).boxed()),
        }
    }

    pub fn is_none(&self) -> bool {
        self.future.is_none()
    }

    pub fn into_future(self) -> Option<BoxFuture<'static, M>> {
        self.future
    }
}

impl<M> fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("pending", &self.future.is_some())
            .finish()
    }
}
