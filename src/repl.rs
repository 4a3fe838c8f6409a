//! Interactive command loop.
//!
//! Reads one line at a time, classifies it into a [`Command`] and runs it
//! against a [`MazeClient`]. Subscription events are printed by background
//! tasks while the loop waits for input, so their output may interleave with
//! the operator's typing.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::client::MazeClient;
use crate::errors::Result;
use crate::types::{Command, Flow};

/// Help text printed when the loop starts.
pub const HELP: [&str; 7] = [
    "Walk the maze. Commands: ",
    "east, west, north, south : Take a step in a direction",
    "steps : Report number of steps taken",
    "adjust : Adjust step count by specified number",
    "subscribe : Subscribe to be notified when wrong way taken",
    "unsubscribe : Unsubscribe to be notified when wrong way taken",
    "exit : Exit",
];

/// Run the command loop until `exit` or end of input.
///
/// Starts the client's goal-reached listener before printing the help text.
///
/// # Errors
///
/// Returns an error if reading from `input` fails.
pub async fn run_repl<R>(client: &mut MazeClient, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    client.start();

    let console = std::sync::Arc::clone(client.console());
    for line in HELP {
        console.line(line);
    }

    let mut lines = input.lines();
    loop {
        console.prompt();

        let Some(line) = lines.next_line().await? else {
            debug!("end of input");
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                console.line(&e.to_string());
                continue;
            }
        };

        if client.execute(&command).await == Flow::Exit {
            debug!("exit requested");
            break;
        }
    }

    Ok(())
}
