//! Subscription lifecycle.
//!
//! [`SubscriptionController`] owns the `subscribed` flag for the wrong-way
//! stream and the background tasks that run both subscriptions.
//!
//! The flag is set before the background task is spawned and cleared only by
//! that task once its session is done, so it is true exactly while a
//! wrong-way session is running or about to run.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::console::{Console, EventHandler, GoalReachedPresenter, WrongWayPresenter};
use super::dispatcher::CallDispatcher;
use super::subscription::SubscriptionSession;
use super::transport::{EventStream, MazeTransport};
use crate::errors::Result;
use crate::types::{StreamStatus, SubscriptionKind};

/// Result of a `subscribe` request.
#[derive(Debug)]
pub enum SubscribeOutcome {
    /// A wrong-way session was launched; the handle resolves when it ends.
    Started(JoinHandle<StreamStatus>),
    /// A session was already active; nothing was done.
    AlreadySubscribed,
}

/// Result of an `unsubscribe` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    /// The cancellation call succeeded; the session will end shortly.
    Requested,
    /// The cancellation call failed (already reported).
    Failed,
    /// No session was active; no call was made.
    AlreadyUnsubscribed,
}

/// Starts and stops the background subscriptions.
pub struct SubscriptionController {
    transport: Arc<dyn MazeTransport>,
    dispatcher: Arc<CallDispatcher>,
    console: Arc<dyn Console>,
    subscribed: Arc<AtomicBool>,
}

impl SubscriptionController {
    /// Create a controller.
    pub fn new(
        transport: Arc<dyn MazeTransport>,
        dispatcher: Arc<CallDispatcher>,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            transport,
            dispatcher,
            console,
            subscribed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a wrong-way session is running or about to run.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::SeqCst)
    }

    /// Launch the wrong-way subscription unless one is already active.
    pub fn subscribe(&self) -> SubscribeOutcome {
        if self
            .subscribed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.console.line("You are already subscribed!");
            return SubscribeOutcome::AlreadySubscribed;
        }

        let transport = Arc::clone(&self.transport);
        let console = Arc::clone(&self.console);
        let subscribed = Arc::clone(&self.subscribed);

        let handle = tokio::spawn(async move {
            let handler = Arc::new(WrongWayPresenter::new(Arc::clone(&console)));
            let status = run_session(
                SubscriptionKind::WrongWay,
                async move { transport.subscribe_wrong_way().await },
                handler,
                console.as_ref(),
            )
            .await;
            subscribed.store(false, Ordering::SeqCst);
            debug!("wrong-way subscription cleared");
            status
        });

        info!("wrong-way subscription launched");
        SubscribeOutcome::Started(handle)
    }

    /// Cancel the wrong-way subscription.
    ///
    /// Does not touch the flag; the background task clears it when the
    /// server closes the stream.
    pub async fn unsubscribe(&self) -> UnsubscribeOutcome {
        if !self.is_subscribed() {
            self.console.line("You are already unsubscribed!");
            return UnsubscribeOutcome::AlreadyUnsubscribed;
        }

        match self.dispatcher.unsubscribe_wrong_way().await {
            Ok(()) => UnsubscribeOutcome::Requested,
            Err(_) => UnsubscribeOutcome::Failed,
        }
    }

    /// Launch the goal-reached subscription.
    ///
    /// There is no guard and no way to stop it; the task lives until the
    /// server closes the stream or the runtime shuts down.
    pub fn start_goal_reached(&self) -> JoinHandle<StreamStatus> {
        let transport = Arc::clone(&self.transport);
        let console = Arc::clone(&self.console);

        tokio::spawn(async move {
            let handler = Arc::new(GoalReachedPresenter::new(Arc::clone(&console)));
            run_session(
                SubscriptionKind::GoalReached,
                async move { transport.subscribe_goal_reached().await },
                handler,
                console.as_ref(),
            )
            .await
        })
    }
}

/// Run one session to completion and report a failed ending.
async fn run_session<T, F, H>(
    kind: SubscriptionKind,
    open: F,
    handler: Arc<H>,
    console: &dyn Console,
) -> StreamStatus
where
    T: Clone + Send + Sync + 'static,
    F: Future<Output = Result<EventStream<T>>> + Send + 'static,
    H: EventHandler<T> + 'static,
{
    let session = SubscriptionSession::<T>::start(kind, open, handler);
    let status = session.await_completion().await;
    if !status.is_ok() {
        console.line(&kind.failure_message());
    }
    debug!(session = %session.id(), rpc = kind.rpc_name(), ?status, "subscription ended");
    status
}
