//! Serve the command vocabulary on stdin/stdout against a simulated board.
//!
//! Point the host library at this process (driving it over a pty or a pipe)
//! to develop against the protocol without hardware. Logs go to stderr so
//! they never mix with protocol traffic.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use remotebit_device::{Dispatcher, SimBoard};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "remotebit-sim", about = "Simulated remotebit board on stdio")]
struct Args {
    /// Do not echo received lines back before replying.
    #[arg(long)]
    no_echo: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut dispatcher = Dispatcher::new(SimBoard::new()).echo(!args.no_echo);
    match dispatcher.serve(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("remotebit-sim: {e}");
            ExitCode::FAILURE
        }
    }
}
