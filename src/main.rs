#[macro_use]
extern crate log;

mod cli;
mod config;
mod nessus;
mod report;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run()
}
