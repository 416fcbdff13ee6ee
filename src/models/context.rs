use std::future::{pending, Future};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
  #[error("context canceled")]
  Cancelled,
  #[error("context deadline exceeded")]
  DeadlineExceeded,
}

/// Per-request context handed down from the transport layer. Carries the request
/// id used in log fields plus the caller's cancellation signal and optional deadline.
#[derive(Debug, Clone, Default)]
pub struct Context {
  pub request_id: String,
  done: Option<watch::Receiver<bool>>,
  deadline: Option<Instant>,
}

/// Cancels every context derived through [`Context::with_cancel`].
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
  pub fn cancel(&self) {
    self.0.send_replace(true);
  }
}

impl Context {
  pub fn new(request_id: impl Into<String>) -> Self {
    Self { request_id: request_id.into(), ..Default::default() }
  }

  pub fn with_cancel(mut self) -> (Self, CancelHandle) {
    let (tx, rx) = watch::channel(false);
    self.done = Some(rx);
    (self, CancelHandle(tx))
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    let deadline = Instant::now() + timeout;
    self.deadline = Some(match self.deadline {
      Some(current) if current < deadline => current,
      _ => deadline,
    });
    self
  }

  /// `None` while the context is live, otherwise the reason it is done.
  pub fn err(&self) -> Option<ContextError> {
    if let Some(ref rx) = self.done {
      if *rx.borrow() {
        return Some(ContextError::Cancelled);
      }
    }

    match self.deadline {
      Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
      _ => None,
    }
  }

  /// Resolves once the context is cancelled or its deadline passes. Never resolves
  /// for a background context.
  pub async fn done(&self) -> ContextError {
    let cancelled = async {
      if let Some(ref rx) = self.done {
        let mut rx = rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
          return;
        }
      }
      pending::<()>().await
    };

    let expired = async {
      match self.deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending::<()>().await,
      }
    };

    tokio::select! {
      _ = cancelled => ContextError::Cancelled,
      _ = expired => ContextError::DeadlineExceeded,
    }
  }

  /// Drives `fut` until it completes or the context is done, whichever is first.
  pub async fn run<F, T>(&self, fut: F) -> Result<T, ContextError>
  where
    F: Future<Output = T>,
  {
    if let Some(err) = self.err() {
      return Err(err);
    }

    tokio::select! {
      biased;
      res = fut => Ok(res),
      err = self.done() => Err(err),
    }
  }
}
