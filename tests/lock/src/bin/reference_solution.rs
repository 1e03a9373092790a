//! The reference submission packaged as a stdio plugin executable.

use coursegrade_harness::protocol::serve_stdio;
use coursegrade_harness::submissions::reference::Reference;

fn main() -> std::process::ExitCode {
    serve_stdio(&Reference)
}
