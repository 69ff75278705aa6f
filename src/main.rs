//! CPU Scheduling Simulator - Command Line Interface
//!
//! Usage:
//!   sched-sim simulate [OPTIONS]    Run one policy over a workload
//!   sched-sim compare [OPTIONS]     Run every policy over the same workload

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;

use cpu_sched_sim::prelude::*;
use cpu_sched_sim::workloads;

#[derive(Parser)]
#[command(name = "sched-sim")]
#[command(about = "Discrete-time CPU scheduling simulator with pluggable policies")]
#[command(version)]
struct Cli {
    /// Output results in JSON format (for machine parsing)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Fcfs,
    Sjf,
    Stcf,
    Rr,
    Priority,
}

impl PolicyArg {
    fn to_config(self, time_quantum: u64) -> PolicyConfig {
        match self {
            PolicyArg::Fcfs => PolicyConfig::Fcfs,
            PolicyArg::Sjf => PolicyConfig::Sjf,
            PolicyArg::Stcf => PolicyConfig::Stcf,
            PolicyArg::Rr => PolicyConfig::RoundRobin { time_quantum },
            PolicyArg::Priority => PolicyConfig::Priority,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scheduling policy over a workload
    Simulate {
        /// Scheduling policy
        #[arg(short, long, value_enum, default_value = "fcfs")]
        policy: PolicyArg,

        /// Time quantum for round robin
        #[arg(short = 'q', long, default_value = "2")]
        quantum: u64,

        /// Context-switch overhead in ticks
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        latency: i64,

        /// Number of simulated cores
        #[arg(short, long, default_value = "1")]
        cores: usize,

        /// JSON file with the process list (array of {pid, burst_time, ...})
        #[arg(short = 'f', long)]
        processes: Option<String>,

        /// Generate a random workload of this many processes instead
        #[arg(short, long)]
        random: Option<usize>,

        /// Seed for the random workload
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Print the tick-by-tick trace log
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run every policy over the same workload and tabulate the metrics
    Compare {
        /// Time quantum for the round-robin entry
        #[arg(short = 'q', long, default_value = "2")]
        quantum: u64,

        /// Context-switch overhead in ticks
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        latency: i64,

        /// Number of simulated cores
        #[arg(short, long, default_value = "1")]
        cores: usize,

        /// JSON file with the process list
        #[arg(short = 'f', long)]
        processes: Option<String>,

        /// Generate a random workload of this many processes instead
        #[arg(short, long)]
        random: Option<usize>,

        /// Seed for the random workload
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            policy,
            quantum,
            latency,
            cores,
            processes,
            random,
            seed,
            verbose,
        } => {
            let workload = load_workload(processes.as_deref(), random, seed, cli.json);
            run_simulation(
                policy.to_config(quantum),
                latency,
                cores,
                &workload,
                verbose,
                cli.json,
            );
        }
        Commands::Compare {
            quantum,
            latency,
            cores,
            processes,
            random,
            seed,
        } => {
            let workload = load_workload(processes.as_deref(), random, seed, cli.json);
            run_comparison(&workload, latency, quantum, cores, cli.json);
        }
    }
}

/// Resolve the workload from a file, a random request, or the built-in
/// textbook set, in that order of preference.
fn load_workload(
    path: Option<&str>,
    random: Option<usize>,
    seed: u64,
    json_output: bool,
) -> Vec<Process> {
    if let Some(path) = path {
        match workloads::load_processes(path) {
            Ok(procs) => return procs,
            Err(e) => {
                if json_output {
                    eprintln!("{{\"error\": \"failed to load {}: {}\"}}", path, e);
                } else {
                    eprintln!("{}: failed to load {}: {}", "Error".red(), path, e);
                }
                std::process::exit(1);
            }
        }
    }

    if let Some(count) = random {
        let config = WorkloadConfig {
            num_processes: count,
            seed,
            ..Default::default()
        };
        return RandomWorkload::new(config).generate();
    }

    workloads::textbook()
}

fn run_simulation(
    policy: PolicyConfig,
    latency: i64,
    cores: usize,
    processes: &[Process],
    verbose: bool,
    json_output: bool,
) {
    let config = SimulationConfig {
        dispatch_latency: latency,
        num_cores: cores,
        policy,
    };

    if !json_output {
        println!("{}", "CPU Scheduling Simulator".cyan().bold());
        println!("  • Policy: {}", config.policy.build().name());
        println!("  • Cores: {}", config.num_cores);
        println!("  • Dispatch latency: {}", config.dispatch_latency);
        println!("  • Processes: {}", processes.len());
        println!();
    }

    let mut sim = SimulationEngine::new(config);
    let report = sim.run(processes);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
        return;
    }

    println!("{}", report);

    if verbose {
        println!("{}", "Trace log:".yellow());
        for line in sim.tracer.log_lines() {
            println!("  {}", line);
        }
    }
}

fn run_comparison(
    processes: &[Process],
    latency: i64,
    quantum: u64,
    cores: usize,
    json_output: bool,
) {
    let comparison = PolicyComparison::run(processes, latency, quantum, cores);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&comparison).unwrap());
        return;
    }

    println!("{}", "Policy comparison".cyan().bold());
    println!(
        "  • {} processes, {} core(s), dispatch latency {}",
        processes.len(),
        cores,
        latency
    );
    println!();
    print!("{}", comparison);

    if let Some(best) = comparison.best_by_waiting_time() {
        println!(
            "Lowest average waiting time: {} ({:.2})",
            best.policy.green(),
            best.avg_waiting_time
        );
    }
}
