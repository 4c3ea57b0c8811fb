use clap::{CommandFactory, Parser};
use ising_partition_rs::error::{EXIT_INPUT_ERROR, EXIT_NO_SOLUTIONS, EXIT_UNKNOWN_ERROR};
use ising_partition_rs::{
    coefficient_output_path, load_graph, parse_results, save_assignments_csv, save_coefficients,
    write_report, Result,
};
use std::path::{Path, PathBuf};

/// Converts graph edge lists into Ising coefficients and reads back the solver's bipartitions
#[derive(Parser)]
#[command(name = "ising-partition")]
#[command(about = "Graph bipartitioning through an Ising solver", long_about = None)]
struct Cli {
    /// Edge list file, one pair of node indices per line
    #[arg(conflicts_with = "result")]
    input: Option<PathBuf>,

    /// Parse solver output from standard input instead of converting a graph
    #[arg(short, long)]
    result: bool,

    /// Coefficient file path (default: <INPUT>.isakov), or with -r a CSV of group assignments
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn convert(input: &Path, output: Option<PathBuf>) -> Result<i32> {
    let graph = load_graph(input)?;
    println!("✅ Loaded graph with {} nodes", graph.node_count());

    let output_path = output.unwrap_or_else(|| coefficient_output_path(input));
    let written = save_coefficients(&graph, &output_path)?;
    println!("📄 {} coefficients saved to: {:?}", written, output_path);
    Ok(0)
}

fn parse_result(output: Option<PathBuf>) -> Result<i32> {
    let solutions = parse_results(std::io::stdin().lock())?;

    if solutions.is_empty() {
        println!("No solutions found");
        return Ok(EXIT_NO_SOLUTIONS);
    }

    write_report(&solutions, std::io::stdout().lock())?;
    if let Some(output_path) = output {
        save_assignments_csv(&solutions, &output_path)?;
    }
    Ok(0)
}

fn run(cli: Cli) -> Result<i32> {
    if cli.result {
        return parse_result(cli.output);
    }

    match cli.input {
        Some(input) => convert(&input, cli.output),
        None => {
            Cli::command().print_help()?;
            Ok(0)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_INPUT_ERROR);
        }
    };

    let code = match std::panic::catch_unwind(|| run(cli)) {
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
        Err(_) => {
            eprintln!("Unknown error");
            EXIT_UNKNOWN_ERROR
        }
    };

    std::process::exit(code);
}
