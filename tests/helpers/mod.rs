//! Common test helpers: a channel-backed fake transport and polling utilities.

#![allow(dead_code)]

use async_trait::async_trait;
use maze_walker_client::{
    Direction, EventStream, GoalReachedNotice, MazeClientError, MazeTransport, Result,
    WrongWayNotice,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// How long tests wait for background tasks to catch up.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

type Sender<T> = mpsc::UnboundedSender<Result<T>>;

/// In-memory maze service.
///
/// Each subscription gets its own channel; the test pushes events into it.
/// `unsubscribe_wrong_way` drops the wrong-way senders, which ends those
/// streams cleanly the way a server closing the call would.
#[derive(Default)]
pub struct FakeTransport {
    steps: Mutex<i32>,
    moves: Mutex<Vec<Direction>>,
    adjustments: Mutex<Vec<i32>>,
    wrong_way: Mutex<Vec<Sender<WrongWayNotice>>>,
    goal_reached: Mutex<Vec<Sender<GoalReachedNotice>>>,
    unary_failure: Mutex<Option<(tonic::Code, String)>>,
    subscribe_failure: Mutex<Option<(tonic::Code, String)>>,
    wrong_way_subscriptions: AtomicUsize,
    goal_reached_subscriptions: AtomicUsize,
    unsubscribe_calls: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every unary call fail with this status.
    pub fn fail_unary_calls(&self, code: tonic::Code, message: &str) {
        *self.unary_failure.lock().unwrap() = Some((code, message.to_string()));
    }

    /// Make subscription requests fail with this status.
    pub fn reject_subscriptions(&self, code: tonic::Code, message: &str) {
        *self.subscribe_failure.lock().unwrap() = Some((code, message.to_string()));
    }

    /// Deliver a wrong-way notice to every open wrong-way stream.
    pub fn push_wrong_way(&self, message: &str) -> usize {
        let senders = self.wrong_way.lock().unwrap();
        senders
            .iter()
            .filter(|tx| {
                tx.send(Ok(WrongWayNotice {
                    message: message.to_string(),
                }))
                .is_ok()
            })
            .count()
    }

    /// Deliver a goal-reached notice to every open goal-reached stream.
    pub fn push_goal_reached(&self, count: i32) -> usize {
        let senders = self.goal_reached.lock().unwrap();
        senders
            .iter()
            .filter(|tx| tx.send(Ok(GoalReachedNotice { count })).is_ok())
            .count()
    }

    /// Terminate every wrong-way stream with an error status.
    pub fn break_wrong_way(&self, code: tonic::Code, message: &str) {
        let senders: Vec<_> = self.wrong_way.lock().unwrap().drain(..).collect();
        for tx in senders {
            let _ = tx.send(Err(MazeClientError::rpc(code, message)));
        }
    }

    pub fn moves(&self) -> Vec<Direction> {
        self.moves.lock().unwrap().clone()
    }

    pub fn adjustments(&self) -> Vec<i32> {
        self.adjustments.lock().unwrap().clone()
    }

    pub fn wrong_way_subscriptions(&self) -> usize {
        self.wrong_way_subscriptions.load(Ordering::SeqCst)
    }

    pub fn goal_reached_subscriptions(&self) -> usize {
        self.goal_reached_subscriptions.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls.load(Ordering::SeqCst)
    }

    fn check_unary(&self) -> Result<()> {
        match &*self.unary_failure.lock().unwrap() {
            Some((code, message)) => Err(MazeClientError::rpc(*code, message.clone())),
            None => Ok(()),
        }
    }

    fn check_subscribe(&self) -> Result<()> {
        match &*self.subscribe_failure.lock().unwrap() {
            Some((code, message)) => Err(MazeClientError::rpc(*code, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MazeTransport for FakeTransport {
    async fn go(&self, direction: Direction) -> Result<()> {
        self.check_unary()?;
        self.moves.lock().unwrap().push(direction);
        *self.steps.lock().unwrap() += 1;
        Ok(())
    }

    async fn step_count(&self) -> Result<i32> {
        self.check_unary()?;
        Ok(*self.steps.lock().unwrap())
    }

    async fn adjust_step_count(&self, adjustment: i32) -> Result<()> {
        self.check_unary()?;
        self.adjustments.lock().unwrap().push(adjustment);
        *self.steps.lock().unwrap() += adjustment;
        Ok(())
    }

    async fn subscribe_wrong_way(&self) -> Result<EventStream<WrongWayNotice>> {
        // counted only once the stream can receive events
        let opened = self.check_subscribe().map(|()| {
            let (tx, rx) = mpsc::unbounded_channel();
            self.wrong_way.lock().unwrap().push(tx);
            rx
        });
        self.wrong_way_subscriptions.fetch_add(1, Ordering::SeqCst);
        let rx = opened?;
        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }

    async fn subscribe_goal_reached(&self) -> Result<EventStream<GoalReachedNotice>> {
        // counted only once the stream can receive events
        let opened = self.check_subscribe().map(|()| {
            let (tx, rx) = mpsc::unbounded_channel();
            self.goal_reached.lock().unwrap().push(tx);
            rx
        });
        self.goal_reached_subscriptions.fetch_add(1, Ordering::SeqCst);
        let rx = opened?;
        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }

    async fn unsubscribe_wrong_way(&self) -> Result<()> {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.check_unary()?;
        self.wrong_way.lock().unwrap().clear();
        Ok(())
    }
}

/// Poll `condition` until it holds or [`WAIT_TIMEOUT`] passes.
pub async fn wait_until<F>(condition: F) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
    while !condition() {
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    true
}
