//! serverless-merge: resolve `${file(...)}` fragments into a single JSON config

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
