//! Interactive press conference in the terminal.
//!
//! Streams each model turn to stdout as it arrives, reads the human's answer
//! with an async readline prompt, and prints a closing line. Entry point:
//! `loop_runner::run_conference`.

pub mod banner;
pub mod input;
pub mod loop_runner;
pub mod renderer;
