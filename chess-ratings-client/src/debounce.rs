use std::{future::Future, time::Duration};

use tokio_util::sync::CancellationToken;

/// Cancels a scheduled callback that has not fired yet.
///
/// Cancelling after the callback started has no effect on the callback.
#[derive(Clone, Debug)]
pub struct DebounceHandle {
    token: CancellationToken,
}

impl DebounceHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Runs `callback` after `delay` unless the returned handle is cancelled first.
pub fn schedule<F, Fut>(delay: Duration, callback: F) -> DebounceHandle
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let token = CancellationToken::new();
    let task_token = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = task_token.cancelled() => {}
            _ = tokio::time::sleep(delay) => callback().await,
        }
    });
    DebounceHandle { token }
}

/// Keeps at most one pending callback: arming cancels the previous one.
pub struct Debouncer {
    delay: Duration,
    pending: Option<DebounceHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn arm<F, Fut>(&mut self, callback: F) -> DebounceHandle
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let handle = schedule(self.delay, callback);
        self.pending = Some(handle.clone());
        handle
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
