//! Message types, client stub and server trait for the `maze.MazeWalker`
//! service, generated from `proto/maze.proto` by the build script.
//!
//! `google.protobuf.Empty` maps to `()`.

include!("../../.generated/maze.rs");
