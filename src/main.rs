mod atm;
mod money;
mod ops;

use std::path::PathBuf;

use clap::Parser;

/// Batch banking-terminal simulator: applies a CSV file of account
/// operations and prints a CSV account summary to stdout.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// CSV file of operations to apply.
    input: PathBuf,

    /// Directory ledger files are written into.
    #[clap(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() {
    let args = Args::parse();
    let file = std::fs::File::open(&args.input).expect("Failed to read input file.");

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All) // input files may contain space padding
        .from_reader(file);

    let mut atm = crate::atm::Atm::new();

    for op in rdr.deserialize::<crate::ops::Op>() {
        op.expect("Failed to parse operation.")
            .apply_to(&mut atm, &args.out_dir)
            .expect("Failed to apply operation.");
    }

    let mut wtr = csv::WriterBuilder::new().from_writer(std::io::stdout());

    for row in crate::ops::account_rows(&atm) {
        wtr.serialize(row).expect("Failed to serialize account.");
    }

    wtr.flush().expect("Failed to write to stdout.");
}
