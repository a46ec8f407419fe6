use clap::Parser;
use mixchord_cli::{run_cli, MixChordCli};

fn main() {
    if let Err(e) = run_cli(MixChordCli::parse()) {
        eprintln!("mixchord: {e}");
        std::process::exit(1);
    }
}
