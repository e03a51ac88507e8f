use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::PlatformError;

/// The eventual result of an asynchronous platform call.
///
/// The lifecycle manager never blocks on one of these: it checks [`Pending::poll_ready`] once per
/// tick. Dropping a `Pending` is how a request is cancelled; whatever the platform sends afterwards
/// goes nowhere.
///
/// It is also a [`Future`], for hosts that would rather `.await` it.
#[derive(Debug)]
pub struct Pending<T> {
    receiver: oneshot::Receiver<Result<T, PlatformError>>,
}

/// The platform's half of a [`Pending`].
#[derive(Debug)]
pub struct Resolver<T> {
    sender: oneshot::Sender<Result<T, PlatformError>>,
}

/// Create a linked [`Resolver`] / [`Pending`] pair.
pub fn pending<T>() -> (Resolver<T>, Pending<T>) {
    let (sender, receiver) = oneshot::channel();
    (Resolver { sender }, Pending { receiver })
}

impl<T> Pending<T> {
    /// A `Pending` that has already settled with `value`.
    pub fn ready(value: T) -> Self {
        let (resolver, pending) = pending();
        resolver.resolve(value);
        pending
    }

    /// A `Pending` that has already failed with `error`.
    pub fn failed(error: PlatformError) -> Self {
        let (resolver, pending) = pending();
        resolver.reject(error);
        pending
    }

    /// Returns the result if the platform has settled the request, without waiting.
    ///
    /// A resolver dropped without settling reads as [`PlatformError::Cancelled`].
    pub fn poll_ready(&mut self) -> Option<Result<T, PlatformError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(PlatformError::Cancelled)),
        }
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, PlatformError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or(Err(PlatformError::Cancelled)))
    }
}

impl<T> Resolver<T> {
    /// Settle the request successfully. Returns `false` if nobody is listening any more.
    pub fn resolve(self, value: T) -> bool {
        self.sender.send(Ok(value)).is_ok()
    }

    /// Settle the request with an error. Returns `false` if nobody is listening any more.
    pub fn reject(self, error: PlatformError) -> bool {
        self.sender.send(Err(error)).is_ok()
    }

    /// Whether the [`Pending`] side has been dropped
    pub fn is_cancelled(&self) -> bool {
        self.sender.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_poll_ready() {
        let (resolver, mut pending) = pending::<bool>();
        assert_eq!(pending.poll_ready(), None);
        assert!(resolver.resolve(true));
        assert_eq!(pending.poll_ready(), Some(Ok(true)));
    }

    #[test]
    pub fn test_dropped_resolver_reads_as_cancelled() {
        let (resolver, mut pending) = pending::<bool>();
        drop(resolver);
        assert_eq!(pending.poll_ready(), Some(Err(PlatformError::Cancelled)));
    }

    #[test]
    pub fn test_dropped_pending_cancels() {
        let (resolver, pending) = pending::<bool>();
        drop(pending);
        assert!(resolver.is_cancelled());
        assert!(!resolver.resolve(true));
    }

    #[tokio::test]
    async fn test_await() {
        assert_eq!(Pending::ready(3).await, Ok(3));
        assert_eq!(
            Pending::<u8>::failed(PlatformError::Denied("no".into())).await,
            Err(PlatformError::Denied("no".into()))
        );
    }
}
