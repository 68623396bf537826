//! Console frontend for the Thornwood story engine.

mod console;

use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tw_engine::{Frontend, MemoryProgress};
use tw_story::{CycleConfig, CycleReport, CycleRunner};

use console::ConsoleFrontend;

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Thornwood — a branching story of a cabin, a blade, and her",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play cycles until you stop
    Play {
        /// Truncate each cycle after a fixed chapter depth
        #[arg(long)]
        demo: bool,

        /// Truncate after a single chapter (implies --demo)
        #[arg(long)]
        true_demo: bool,

        /// Chapter depth for --demo (minimum 1)
        #[arg(long, default_value = "2")]
        depth: u32,

        /// Print each cycle report as JSON instead of prose
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            demo,
            true_demo,
            depth,
            json,
        } => play(demo, true_demo, depth, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn play(demo: bool, true_demo: bool, depth: u32, json: bool) -> Result<(), String> {
    let mut io = ConsoleFrontend::new();
    let mut store = MemoryProgress::new()
        .with_demo(demo)
        .with_true_demo(true_demo);
    let config = CycleConfig::from_store(&store).with_demo_depth(depth);

    loop {
        let report = CycleRunner::new(&mut io, &mut store)
            .with_config(config.clone())
            .run()
            .map_err(|e| e.to_string())?;

        if json {
            let rendered = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
            println!("{rendered}");
        } else {
            print_report(&report);
        }

        if !another_cycle(&mut io) {
            break;
        }
    }

    Ok(())
}

fn print_report(report: &CycleReport) {
    println!();
    if report.aborted {
        println!("{}", "The cycle breaks off.".bold());
    } else if report.truncated {
        println!("{}", "The cycle closes early.".bold());
    } else {
        println!("{}", "The cycle closes.".bold());
    }
    println!("  route:  {}", report.route.join(" -> "));
    println!("  ending: {}", report.ending);
    println!("  voices: {}", report.voices.join(", "));
    if let Some(vessel) = &report.vessel {
        println!("  vessel: {vessel}");
    }
}

fn another_cycle(io: &mut ConsoleFrontend) -> bool {
    io.print_line("Another cycle? [y/N]");
    match io.read_input() {
        Ok(answer) => {
            let answer = answer.trim().to_ascii_lowercase();
            answer == "y" || answer == "yes"
        }
        // Stdin closed: stop gracefully.
        Err(_) => false,
    }
}
