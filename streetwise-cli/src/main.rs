//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the final error is reported to the user on stderr"
)]
fn main() {
    streetwise_cli::init_logging();
    if let Err(err) = streetwise_cli::run() {
        eprintln!("streetwise: {err}");
        std::process::exit(1);
    }
}
