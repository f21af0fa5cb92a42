use anyhow::Result;
use clap::Parser;
use hashbench::{run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    run(args)
}
