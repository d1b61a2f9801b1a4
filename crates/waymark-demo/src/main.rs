mod config;
mod data;
mod host;
mod layouts;
mod pages;
mod routes;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn, Level};

use crate::config::Config;
use crate::host::{parse_steps, Session, Step};

#[derive(Parser)]
#[command(name = "waymark", version, about = "Walk the Waymark demo shell from the terminal")]
struct Cli {
    /// Navigation steps: hrefs such as /users/2, or :back, :forward, ":go -2"
    #[arg(allow_hyphen_values = true)]
    steps: Vec<String>,

    /// Initial location
    #[arg(long, default_value = "/")]
    start: String,

    /// Config file (default: ./waymark.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read further steps from stdin, one per line
    #[arg(short, long)]
    interactive: bool,

    /// Log matching details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_required(path)?,
        None => Config::load_default()?,
    };
    let steps = parse_steps(&cli.steps)?;

    let tree = Arc::new(routes::build(&config)?);
    info!("Registered {} routes", tree.len());

    let mut session = Session::new(tree, routes::renderer(&config), &cli.start);
    emit(&mut session);

    for step in &steps {
        run_step(&mut session, step);
    }

    if cli.interactive {
        for line in io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Step>() {
                Ok(step) => run_step(&mut session, &step),
                Err(err) => warn!("{:#}", err),
            }
        }
    }

    info!("Session ended at {}", session.controller().location());
    Ok(())
}

fn run_step(session: &mut Session, step: &Step) {
    if !session.apply(step) {
        debug!("Step {:?} changed nothing", step);
    }
    emit(session);
}

fn emit(session: &mut Session) {
    for frame in session.drain() {
        println!("{}", frame);
    }
}
