//! cleric-drv - CLI and driver
//!
//! The external-collaboration layer: argument parsing, the `gcc -E`/`gcc`
//! subprocess orchestration, and the `.c`/`.i`/`.s` intermediate-file
//! bookkeeping that sits around the in-process `cleric-pipe::compile` call.
//! Nothing in here touches a token, an AST node, or a TAC instruction
//! directly.

mod args;
mod driver;
mod error;

pub use args::{parse as parse_args, Args, UsageError};
pub use driver::{compile_file, run_assembler_linker, run_preprocessor, DriverOutcome};
pub use error::DriverError;

/// Entry point shared by `main` and the integration tests: parse arguments,
/// run the driver, and print whatever a stop-phase flag produced. Returns
/// the process exit code (0 success, 1 any error) rather than calling
/// `std::process::exit` itself, so tests can assert on it without forking.
pub fn run(raw_args: &[String]) -> i32 {
    let args = match parse_args(raw_args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };

    match compile_file(&args.input, args.flags) {
        Ok(DriverOutcome::Stopped(artifact)) => {
            print!("{artifact}");
            0
        }
        Ok(DriverOutcome::Compiled { .. }) => 0,
        Err(e) => {
            eprintln!("{e}");
            1
        }
    }
}
