//! Interactive multi-stop route planner in the terminal.
//!
//! Run: cargo run --bin route-planner -- --rows 20 --delay-ms 10

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event;

use routegrid_demos::{Planner, close_terminal, init_terminal};
use routegrid_route::SessionConfig;

#[derive(Parser, Debug)]
#[command(name = "route-planner", about = "Plan a route through start, waypoints and end")]
struct Args {
    /// Board side length in cells.
    #[arg(long, default_value_t = 30)]
    rows: i32,

    /// Pause after each search step, in milliseconds.
    #[arg(long, default_value_t = 5)]
    delay_ms: u64,

    /// Seed for random barrier scatter.
    #[arg(long, default_value_t = 1122)]
    seed: u64,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut planner = Planner::new(
        SessionConfig { rows: args.rows },
        Duration::from_millis(args.delay_ms),
        args.seed,
    );
    let mut stdout = io::stdout();
    planner.draw(&mut stdout)?;
    while planner.handle(event::read()?, &mut stdout)? {}
    Ok(())
}

fn main() {
    let args = Args::parse();
    if args.rows < 2 {
        eprintln!("Error: --rows must be at least 2");
        std::process::exit(2);
    }

    if let Err(e) = init_terminal() {
        close_terminal();
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    let result = run(&args);
    close_terminal();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
