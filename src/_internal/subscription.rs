//! Streaming subscription sessions.
//!
//! A [`SubscriptionSession`] owns one server-streaming call. A reader task
//! issues the subscription request, then reads events one at a time and hands
//! each to an [`EventHandler`] before arming the next read. When the stream
//! ends (server close, error, or a request that never opened) the session
//! records the terminal status and moves to [`SessionState::Done`] exactly
//! once, waking anything blocked in [`SubscriptionSession::await_completion`].

use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use super::console::EventHandler;
use super::transport::EventStream;
use crate::errors::Result;
use crate::types::{SessionState, StreamStatus, SubscriptionKind};

/// One active server-streaming subscription.
pub struct SubscriptionSession<T> {
    /// Identifier used in log events.
    id: Uuid,
    /// Which stream this session reads.
    kind: SubscriptionKind,
    /// Last event delivered on the stream.
    last_event: Arc<Mutex<Option<T>>>,
    /// Observes the state published by the reader task.
    state_rx: watch::Receiver<SessionState>,
}

impl<T> SubscriptionSession<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Start a session.
    ///
    /// `open` issues the subscription request; the reader task awaits it and
    /// immediately arms the first read. Must be called from within a Tokio
    /// runtime.
    pub fn start<F>(kind: SubscriptionKind, open: F, handler: Arc<dyn EventHandler<T>>) -> Self
    where
        F: Future<Output = Result<EventStream<T>>> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let (state_tx, state_rx) = watch::channel(SessionState::Created);
        let last_event = Arc::new(Mutex::new(None));

        let task_last_event = Arc::clone(&last_event);
        tokio::spawn(async move {
            Self::read_events(id, kind, open, handler, task_last_event, state_tx).await;
        });

        debug!(session = %id, rpc = kind.rpc_name(), "subscription session started");

        Self {
            id,
            kind,
            last_event,
            state_rx,
        }
    }

    /// Background task driving the stream.
    async fn read_events<F>(
        id: Uuid,
        kind: SubscriptionKind,
        open: F,
        handler: Arc<dyn EventHandler<T>>,
        last_event: Arc<Mutex<Option<T>>>,
        state_tx: watch::Sender<SessionState>,
    ) where
        F: Future<Output = Result<EventStream<T>>> + Send + 'static,
    {
        let mut stream = match open.await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(session = %id, rpc = kind.rpc_name(), "subscription request failed: {}", e);
                finish(&state_tx, StreamStatus::from(&e));
                return;
            }
        };

        state_tx.send_if_modified(|state| {
            if *state == SessionState::Created {
                *state = SessionState::Reading;
                true
            } else {
                false
            }
        });
        trace!(session = %id, "reading events");

        // One read outstanding at a time; the next is armed only after the
        // handler returns.
        let status = loop {
            match stream.next().await {
                Some(Ok(event)) => {
                    trace!(session = %id, "event received");
                    handler.on_event(&event);
                    match last_event.lock() {
                        Ok(mut slot) => *slot = Some(event),
                        Err(poisoned) => *poisoned.into_inner() = Some(event),
                    }
                }
                Some(Err(e)) => {
                    debug!(session = %id, "stream terminated: {}", e);
                    break StreamStatus::from(&e);
                }
                None => {
                    debug!(session = %id, "stream closed by server");
                    break StreamStatus::Ok;
                }
            }
        };

        finish(&state_tx, status);
    }

    /// Wait until the stream reaches [`SessionState::Done`] and return its
    /// terminal status.
    ///
    /// There is no timeout: a stream the server never closes keeps this
    /// pending for as long as the session lives.
    pub async fn await_completion(&self) -> StreamStatus {
        let mut rx = self.state_rx.clone();
        let state = rx.wait_for(SessionState::is_done).await.map(|s| (*s).clone());
        match state {
            Ok(SessionState::Done(status)) => status,
            _ => StreamStatus::Failed {
                code: tonic::Code::Internal,
                message: "subscription reader stopped without a status".to_string(),
            },
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    /// Whether the session reached its terminal state.
    pub fn is_done(&self) -> bool {
        self.state_rx.borrow().is_done()
    }

    /// The most recent event, if any arrived.
    pub fn last_event(&self) -> Option<T> {
        match self.last_event.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Which stream this session reads.
    pub fn kind(&self) -> SubscriptionKind {
        self.kind
    }
}

/// Move to `Done`; later calls are ignored.
fn finish(state_tx: &watch::Sender<SessionState>, status: StreamStatus) {
    let changed = state_tx.send_if_modified(|state| {
        if state.is_done() {
            false
        } else {
            *state = SessionState::Done(status);
            true
        }
    });
    if !changed {
        warn!("subscription session finished twice; keeping the first status");
    }
}
