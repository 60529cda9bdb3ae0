//! errsift CLI
//!
//! Reports unchecked `error` results in type-checked Go programs.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    siftc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    let stderr = io::stderr();
    siftc::run(&args, &mut stdout.lock(), &mut stderr.lock()).into()
}
