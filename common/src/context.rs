use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};

struct RawContext {
    // Dropped when the last context clone goes away, which resolves
    // `Handler::done`.
    _sender: oneshot::Sender<()>,
    cancel_receiver: broadcast::Receiver<()>,
}

/// A cancellation context. Clones share the same lifetime: the paired
/// [`Handler`] observes when every clone has been dropped, and cancelling
/// the handler resolves `done()` on every clone.
#[derive(Clone)]
pub struct Context(Arc<RawContext>);

impl Context {
    #[must_use]
    pub fn new() -> (Self, Handler) {
        let (sender, recv) = oneshot::channel();
        let (cancel_sender, cancel_receiver) = broadcast::channel(1);

        (
            Self(Arc::new(RawContext {
                _sender: sender,
                cancel_receiver,
            })),
            Handler {
                recv,
                cancel_sender,
            },
        )
    }

    /// Resolves once the context has been cancelled.
    pub fn done(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut recv = self.0.cancel_receiver.resubscribe();
        async move {
            let _ = recv.recv().await;
        }
    }
}

pub struct Handler {
    recv: oneshot::Receiver<()>,
    cancel_sender: broadcast::Sender<()>,
}

impl Handler {
    /// Waits for every context clone to be dropped.
    pub async fn done(&mut self) {
        let _ = (&mut self.recv).await;
    }

    /// Cancels the context and waits for every clone to be dropped.
    pub async fn cancel(self) {
        drop(self.cancel_sender);

        let _ = self.recv.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel() {
        let (ctx, handler) = Context::new();

        let task = tokio::spawn(async move {
            ctx.done().await;
        });

        handler.cancel().await;

        task.await.expect("task panicked");
    }

    #[tokio::test]
    async fn test_done_on_drop() {
        let (ctx, mut handler) = Context::new();

        drop(ctx);

        handler.done().await;
    }
}
