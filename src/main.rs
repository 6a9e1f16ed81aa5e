//! hospdb entry point
//!
//! Everything happens in `cli::run`; this only reports its error and sets
//! the exit status.

use hospdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
