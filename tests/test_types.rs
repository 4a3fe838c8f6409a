//! Tests for type definitions.

use maze_walker_client::*;
use pretty_assertions::assert_eq;

#[test]
fn test_command_keywords() {
    let cases = [
        ("east", Command::Move(Direction::East)),
        ("west", Command::Move(Direction::West)),
        ("north", Command::Move(Direction::North)),
        ("south", Command::Move(Direction::South)),
        ("steps", Command::Steps),
        ("subscribe", Command::Subscribe),
        ("unsubscribe", Command::Unsubscribe),
        ("exit", Command::Exit),
    ];
    for (line, command) in cases {
        assert_eq!(Command::parse(line).unwrap(), command);
    }
}

#[test]
fn test_command_from_str() {
    let command: Command = "adjust 12".parse().unwrap();
    assert_eq!(command, Command::Adjust(12));
}

#[test]
fn test_adjust_bounds() {
    assert_eq!(
        Command::parse("adjust 2147483647").unwrap(),
        Command::Adjust(i32::MAX)
    );
    assert_eq!(
        Command::parse("adjust -2147483648").unwrap(),
        Command::Adjust(i32::MIN)
    );
    assert!(Command::parse("adjust 2147483648").is_err());
}

#[test]
fn test_adjust_errors() {
    let err = Command::parse("adjust five").unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: 'five' for adjust");

    let err = Command::parse("adjust").unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: missing amount for adjust");
}

#[test]
fn test_unknown_commands() {
    for line in ["", "East", "eastward", "steps 3", "hello world"] {
        assert_eq!(
            Command::parse(line).unwrap(),
            Command::Unknown(line.to_string())
        );
    }
}

#[test]
fn test_direction_display() {
    assert_eq!(Direction::North.to_string(), "north");
    assert_eq!(Direction::ALL.len(), 4);
}

#[test]
fn test_subscription_kind_names() {
    assert_eq!(SubscriptionKind::WrongWay.rpc_name(), "Subscribe_WrongWay");
    assert_eq!(
        SubscriptionKind::GoalReached.rpc_name(),
        "Subscribe_GoalReached"
    );
}

#[test]
fn test_session_state() {
    assert!(!SessionState::Created.is_done());
    assert!(!SessionState::Reading.is_done());
    assert!(SessionState::Done(StreamStatus::Ok).is_done());
    assert!(StreamStatus::Ok.is_ok());
}

#[test]
fn test_options_default() {
    let options = MazeClientOptions::default();
    assert_eq!(options.target, DEFAULT_TARGET);
    assert_eq!(options.target, "localhost:50051");
    assert_eq!(options.connect_timeout_secs, None);
}

#[test]
fn test_options_builder() {
    let options = MazeClientOptions::new()
        .with_target("maze.local:6000")
        .with_connect_timeout_secs(3);
    assert_eq!(options.target, "maze.local:6000");
    assert_eq!(options.connect_timeout_secs, Some(3));
    assert_eq!(options.endpoint_uri().unwrap(), "http://maze.local:6000");
}

#[test]
fn test_empty_target_rejected() {
    let err = MazeClientOptions::new().with_target("").endpoint_uri().unwrap_err();
    assert!(matches!(err, MazeClientError::Configuration { .. }));
}

#[test]
fn test_help_banner() {
    assert_eq!(HELP[0], "Walk the maze. Commands: ");
    assert_eq!(HELP[HELP.len() - 1], "exit : Exit");
}

mod properties {
    use maze_walker_client::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn adjust_accepts_any_i32(amount in any::<i32>()) {
            let line = format!("adjust {}", amount);
            prop_assert_eq!(Command::parse(&line).unwrap(), Command::Adjust(amount));
        }

        #[test]
        fn parse_never_panics(line in "\\PC*") {
            let _ = Command::parse(&line);
        }

        #[test]
        fn non_keywords_are_unknown(word in "[a-z]{1,12}") {
            prop_assume!(![
                "east", "west", "north", "south", "steps", "adjust",
                "subscribe", "unsubscribe", "exit",
            ]
            .contains(&word.as_str()));
            prop_assert_eq!(Command::parse(&word).unwrap(), Command::Unknown(word.clone()));
        }
    }
}
