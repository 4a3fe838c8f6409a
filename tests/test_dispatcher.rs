//! Tests for unary call dispatch: one remote call per command, failures
//! printed once.

use async_trait::async_trait;
use maze_walker_client::_internal::CallDispatcher;
use maze_walker_client::{
    BufferConsole, Command, Direction, EventStream, Flow, GoalReachedNotice, MazeClient,
    MazeClientError, MazeTransport, UnsubscribeOutcome, WrongWayNotice,
};
use mockall::mock;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use std::sync::Arc;

type CallResult<T> = std::result::Result<T, MazeClientError>;

mock! {
    pub Transport {}

    #[async_trait]
    impl MazeTransport for Transport {
        async fn go(&self, direction: Direction) -> CallResult<()>;
        async fn step_count(&self) -> CallResult<i32>;
        async fn adjust_step_count(&self, adjustment: i32) -> CallResult<()>;
        async fn subscribe_wrong_way(&self) -> CallResult<EventStream<WrongWayNotice>>;
        async fn subscribe_goal_reached(&self) -> CallResult<EventStream<GoalReachedNotice>>;
        async fn unsubscribe_wrong_way(&self) -> CallResult<()>;
    }
}

fn dispatcher(mock: MockTransport) -> (CallDispatcher, BufferConsole) {
    let console = BufferConsole::new();
    let dispatcher = CallDispatcher::new(Arc::new(mock), Arc::new(console.clone()));
    (dispatcher, console)
}

fn client(mock: MockTransport) -> (MazeClient, BufferConsole) {
    let console = BufferConsole::new();
    let client = MazeClient::with_transport(Arc::new(mock), Arc::new(console.clone()));
    (client, console)
}

#[tokio::test]
async fn test_each_direction_issues_one_call() {
    for direction in Direction::ALL {
        let mut mock = MockTransport::new();
        mock.expect_go()
            .with(eq(direction))
            .times(1)
            .returning(|_| Ok(()));

        let (dispatcher, console) = dispatcher(mock);
        dispatcher.go(direction).await.unwrap();
        assert!(console.lines().is_empty());
    }
}

#[tokio::test]
async fn test_move_failure_printed_once() {
    for direction in Direction::ALL {
        let mut mock = MockTransport::new();
        mock.expect_go()
            .with(eq(direction))
            .times(1)
            .returning(|_| Err(MazeClientError::rpc(tonic::Code::FailedPrecondition, "wall")));

        let (client, console) = client(mock);
        let flow = client.execute(&Command::Move(direction)).await;

        assert_eq!(flow, Flow::Continue);
        assert_eq!(console.lines(), vec!["9: wall".to_string()]);
    }
}

#[tokio::test]
async fn test_steps_prints_count() {
    let mut mock = MockTransport::new();
    mock.expect_step_count().times(1).returning(|| Ok(12));

    let (client, console) = client(mock);
    client.execute(&Command::Steps).await;

    assert_eq!(console.lines(), vec!["Step count: 12".to_string()]);
}

#[tokio::test]
async fn test_steps_failure_uses_sentinel() {
    let mut mock = MockTransport::new();
    mock.expect_step_count()
        .times(1)
        .returning(|| Err(MazeClientError::rpc(tonic::Code::Unavailable, "server down")));

    let (client, console) = client(mock);
    client.execute(&Command::Steps).await;

    assert_eq!(
        console.lines(),
        vec!["14: server down".to_string(), "Step count: -1".to_string()]
    );
}

#[tokio::test]
async fn test_try_step_count_reports_error_without_printing() {
    let mut mock = MockTransport::new();
    mock.expect_step_count()
        .times(1)
        .returning(|| Err(MazeClientError::rpc(tonic::Code::Internal, "oops")));

    let (dispatcher, console) = dispatcher(mock);
    let err = dispatcher.try_step_count().await.unwrap_err();

    assert_eq!(err.rpc_code(), Some(tonic::Code::Internal));
    assert!(console.lines().is_empty());
}

#[tokio::test]
async fn test_adjust_sends_exact_delta() {
    for delta in [5, -3, 0, i32::MAX, i32::MIN] {
        let mut mock = MockTransport::new();
        mock.expect_adjust_step_count()
            .with(eq(delta))
            .times(1)
            .returning(|_| Ok(()));

        let (client, console) = client(mock);
        client.execute(&Command::Adjust(delta)).await;
        assert!(console.lines().is_empty());
    }
}

#[tokio::test]
async fn test_adjust_parsed_from_input() {
    let mut mock = MockTransport::new();
    mock.expect_adjust_step_count()
        .with(eq(-3))
        .times(1)
        .returning(|_| Ok(()));

    let (client, _console) = client(mock);
    let command = Command::parse("adjust -3").unwrap();
    client.execute(&command).await;
}

#[tokio::test]
async fn test_unsubscribe_when_not_subscribed_makes_no_call() {
    let mut mock = MockTransport::new();
    mock.expect_unsubscribe_wrong_way().times(0);

    let (client, console) = client(mock);
    let outcome = client.unsubscribe().await;

    assert_eq!(outcome, UnsubscribeOutcome::AlreadyUnsubscribed);
    assert_eq!(
        console.lines(),
        vec!["You are already unsubscribed!".to_string()]
    );
}

#[tokio::test]
async fn test_exit_makes_no_call() {
    let mock = MockTransport::new();
    let (client, console) = client(mock);

    assert_eq!(client.execute(&Command::Exit).await, Flow::Exit);
    assert!(console.lines().is_empty());
}

#[tokio::test]
async fn test_unknown_command_reported() {
    let mock = MockTransport::new();
    let (client, console) = client(mock);

    let flow = client
        .execute(&Command::Unknown("dance".to_string()))
        .await;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(console.lines(), vec!["Unknown command 'dance'".to_string()]);
}
