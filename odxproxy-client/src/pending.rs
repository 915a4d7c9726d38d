use crate::error::OdxError;
use odxproxy_core::{RequestId, Response};
use odxproxy_transport::TransportError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type CallResult<T> = Result<Response<T>, OdxError>;

/// Handle for an in-flight call. Await it to get the decoded response.
///
/// The call runs on the Tokio runtime whether or not the handle is polled.
/// Dropping the handle detaches the call: its result is discarded but the
/// request is not interrupted. Use [`PendingCall::cancel`] to abort it.
///
/// # Panics
///
/// Every call failure resolves as an `Err`. A panic raised while the call
/// runs (for example from a caller's `Deserialize` impl or transport) is a
/// bug rather than a failure and is resumed in the task awaiting the handle.
#[derive(Debug)]
pub struct PendingCall<T> {
    id: Option<RequestId>,
    state: State<T>,
}

#[derive(Debug)]
enum State<T> {
    Running(JoinHandle<CallResult<T>>),
    Failed(Option<OdxError>),
}

impl<T: Send + 'static> PendingCall<T> {
    pub(crate) fn spawn<F>(runtime: &Handle, id: RequestId, call: F) -> Self
    where
        F: Future<Output = CallResult<T>> + Send + 'static,
    {
        PendingCall {
            id: Some(id),
            state: State::Running(runtime.spawn(call)),
        }
    }
}

impl<T> PendingCall<T> {
    /// A call that failed before it could be dispatched.
    pub(crate) fn failed(error: OdxError) -> Self {
        PendingCall {
            id: None,
            state: State::Failed(Some(error)),
        }
    }

    /// Correlation id of the dispatched request.
    pub fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Running(handle) => handle.is_finished(),
            State::Failed(_) => true,
        }
    }

    /// Abort the call. An HTTP exchange still in progress is dropped, which
    /// closes its connection; a request the gateway already received may
    /// still be executed by the backend.
    pub fn cancel(self) {
        if let State::Running(handle) = self.state {
            handle.abort();
        }
    }
}

impl<T> Future for PendingCall<T> {
    type Output = CallResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            State::Running(handle) => match Pin::new(handle).poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(join_err)) => {
                    if join_err.is_panic() {
                        std::panic::resume_unwind(join_err.into_panic());
                    }
                    // Runtime shut down underneath the call
                    Poll::Ready(Err(OdxError::Transport(TransportError::Cancelled)))
                }
            },
            State::Failed(error) => Poll::Ready(Err(error
                .take()
                .unwrap_or_else(|| OdxError::config("pending call polled after completion")))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_spawned_call_resolves() {
        let pending = PendingCall::spawn(&Handle::current(), RequestId::from("a"), async {
            Ok(Response::success(Some(RequestId::from("a")), 5))
        });
        assert_eq!(pending.id().map(RequestId::as_str), Some("a"));
        let response = pending.await.unwrap();
        assert_eq!(response.result, Some(5));
    }

    #[tokio::test]
    async fn test_failed_call_resolves_with_error() {
        let pending: PendingCall<i64> = PendingCall::failed(OdxError::EmptyResponse);
        assert!(pending.is_finished());
        assert!(pending.id().is_none());
        assert!(matches!(pending.await, Err(OdxError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_cancel_aborts_the_task() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let runtime = Handle::current();
        let pending: PendingCall<i64> = PendingCall::spawn(&runtime, RequestId::from("slow"), async move {
            let _guard = tx;
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Response::success(None, 1))
        });
        pending.cancel();
        // The sender is dropped once the aborted task is torn down
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    #[should_panic(expected = "decoder bug")]
    async fn test_task_panic_is_resumed_in_awaiter() {
        let pending: PendingCall<i64> =
            PendingCall::spawn(&Handle::current(), RequestId::from("p"), async {
                if RequestId::from("p").as_str() == "p" {
                    panic!("decoder bug");
                }
                Ok(Response::success(None, 1))
            });
        let _ = pending.await;
    }

    #[tokio::test]
    async fn test_dropping_the_handle_detaches() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let runtime = Handle::current();
        let pending: PendingCall<i64> = PendingCall::spawn(&runtime, RequestId::from("bg"), async move {
            let _ = tx.send(());
            Ok(Response::success(None, 1))
        });
        drop(pending);
        assert!(rx.await.is_ok());
    }
}
