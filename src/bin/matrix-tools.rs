use anyhow::{bail, Error};
use clap::{Parser, Subcommand};
use log::info;
use matrix_tools::harness::run_suite;
use matrix_tools::io::fixture::{format_fixture, read_matrices};
use matrix_tools::random::{random_matrix, seeded};
use matrix_tools::{add, cofactor, determinant, multiply, transpose, Element};
use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[clap(about = "Exact integer matrix operations on fixture files")]
struct Args {
    /// Use arbitrary precision integers instead of i64
    #[clap(long, global = true)]
    bigint: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transpose every matrix of the file
    Transpose { file: PathBuf },
    /// Sum all the matrices of the file
    Add { file: PathBuf },
    /// Multiply the matrices of the file pairwise
    Multiply { file: PathBuf },
    /// Determinant of every matrix of the file
    Det { file: PathBuf },
    /// Cofactor matrix of every matrix of the file
    Cofactor { file: PathBuf },
    /// Print a random square matrix in fixture format
    Random {
        /// Matrix size
        #[clap(short, long)]
        size: usize,
        /// Seed for a reproducible matrix
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Check every operation against the expected fixtures
    Check {
        #[clap(long, default_value = "fixtures")]
        fixtures_dir: PathBuf,
    },
}

fn print_all<T: Display>(items: impl IntoIterator<Item = T>) {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{item}");
    }
}

fn run<T>(command: Command) -> Result<(), Error>
where
    T: Element + FromStr,
    T::Err: Display,
{
    match command {
        Command::Transpose { file } => {
            print_all(read_matrices::<T>(file)?.iter().map(transpose));
        }
        Command::Add { file } => {
            print!("{}", add(&read_matrices::<T>(file)?)?);
        }
        Command::Multiply { file } => {
            let matrices = read_matrices::<T>(file)?;
            if matrices.len() % 2 != 0 {
                bail!("expected pairs of matrices, found {}", matrices.len());
            }
            let products = matrices
                .chunks(2)
                .map(|pair| multiply(&pair[0], &pair[1]))
                .collect::<Result<Vec<_>, _>>()?;
            print_all(products);
        }
        Command::Det { file } => {
            for m in read_matrices::<T>(file)? {
                println!("{}", determinant(&m)?);
            }
        }
        Command::Cofactor { file } => {
            let cofactors = read_matrices::<T>(file)?
                .iter()
                .map(cofactor)
                .collect::<Result<Vec<_>, _>>()?;
            print_all(cofactors);
        }
        Command::Random { size, seed } => {
            let mut rng = match seed {
                Some(seed) => seeded(seed),
                None => StdRng::from_entropy(),
            };
            print!("{}", format_fixture(&random_matrix(&mut rng, size)));
        }
        Command::Check { fixtures_dir } => {
            let report = run_suite::<T>(&fixtures_dir)?;
            for failure in &report.failures {
                println!("{failure}");
            }
            if !report.passed() {
                bail!(
                    "{} of {} checks failed",
                    report.failures.len(),
                    report.checks
                );
            }
            info!("all {} checks passed", report.checks);
            println!("You passed all the tests!");
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let Args { bigint, command } = Args::parse();

    if bigint {
        run::<BigInt>(command)
    } else {
        run::<i64>(command)
    }
}
