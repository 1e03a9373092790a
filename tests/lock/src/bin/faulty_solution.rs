//! The faulty submission packaged as a stdio plugin executable.
//!
//! Its merge panics inside the child process, which the parent sees as a
//! failed call.

use coursegrade_harness::protocol::serve_stdio;
use coursegrade_harness::submissions::faulty::Faulty;

fn main() -> std::process::ExitCode {
    serve_stdio(&Faulty)
}
