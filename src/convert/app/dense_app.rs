use super::DenseOperation;
use clap::Parser;

/// command line tool for converting GTFS archives into dense binary feeds
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct DenseApp {
    #[command(subcommand)]
    pub op: DenseOperation,
}
