use std::process;

use clap::Parser;

use fixit::cli::Args;

fn main() {
    let args = Args::parse();
    match fixit::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(3);
        }
    }
}
