use std::env;

use projectile_search::core::TrajectoryModel;
use projectile_search::core::dataset::{
    DEFAULT_ROW_COUNT, DEFAULT_SEED, generate_rows, write_csv_file,
};
use projectile_search::core::error::{SimError, SimResult};
use projectile_search::logging;

const DEFAULT_OUTPUT: &str = "projectile_data.csv";

#[derive(Debug, PartialEq)]
struct DatasetArgs {
    rows: usize,
    output: String,
    seed: u64,
}

fn parse_args(args: &[String]) -> SimResult<DatasetArgs> {
    if args.len() > 4 {
        return Err(SimError::Usage(
            "Expected at most 3 arguments: [rows] [output.csv] [seed].".to_string(),
        ));
    }

    let rows = match args.get(1) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| SimError::Usage(format!("Invalid rows: '{raw}'. Expected a count.")))?,
        None => DEFAULT_ROW_COUNT,
    };
    let output = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let seed = match args.get(3) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| SimError::Usage(format!("Invalid seed: '{raw}'. Expected an integer.")))?,
        None => DEFAULT_SEED,
    };

    Ok(DatasetArgs { rows, output, seed })
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} [rows] [output.csv] [seed]");
    println!();
    println!("Examples:");
    println!("  {program}");
    println!("  {program} 1000 landings.csv 7");
}

fn run() -> SimResult<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(&args[0]);
        return Ok(());
    }

    let DatasetArgs { rows, output, seed } = parse_args(&args)?;
    let model = TrajectoryModel::earth();
    let samples = generate_rows(&model, rows, seed)?;
    write_csv_file(&output, &samples)?;

    logging::info(&format!("Wrote {} landing samples to {output} (seed {seed})", samples.len()));
    println!("Data generated and saved as {output}");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        logging::error(&err.to_string());
        print_usage("generate_dataset");
        std::process::exit(1);
    }
}
