use std::future::pending;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::SqlFacadeError;

/// Deadline and cancellation signal threaded through every facade operation.
///
/// A context carries an optional deadline, an optional [`CancellationToken`],
/// or both. When either fires while a statement is running, the connection's
/// interrupt handle aborts the statement server-side and the call returns
/// [`SqlFacadeError::Cancelled`].
///
/// ```rust
/// use std::time::Duration;
/// use sql_facade::OpContext;
///
/// let ctx = OpContext::with_timeout(Duration::from_secs(5));
/// # let _ = ctx;
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    deadline: Option<Instant>,
    token: Option<CancellationToken>,
}

impl OpContext {
    /// A context that never cancels.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            token: None,
        }
    }

    /// A context driven by an externally owned cancellation token.
    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            deadline: None,
            token: Some(token),
        }
    }

    /// Attach a deadline of `timeout` from now, keeping any token.
    #[must_use]
    pub fn and_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Whether the signal has already fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return true;
        }
        self.token.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Fail fast before starting a driver call.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::Cancelled` if the signal already fired.
    pub(crate) fn check(&self) -> Result<(), SqlFacadeError> {
        if self.is_cancelled() {
            Err(SqlFacadeError::Cancelled(
                "context cancelled before operation started".into(),
            ))
        } else {
            Ok(())
        }
    }

    /// Resolve when the deadline passes or the token fires; pend forever when
    /// the context carries neither.
    pub(crate) async fn cancelled(&self) {
        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => pending().await,
            }
        };
        let token = async {
            match &self.token {
                Some(t) => t.cancelled().await,
                None => pending().await,
            }
        };
        tokio::select! {
            () = deadline => {}
            () = token => {}
        }
    }
}
