use crate::convert::convert_ops;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Clone, Subcommand)]
pub enum DenseOperation {
    /// convert a GTFS zip archive into a dense binary feed
    Convert {
        /// path to the input GTFS .zip archive
        #[arg(long)]
        input: PathBuf,
        /// path for the output .gtfsd file
        #[arg(long)]
        output: PathBuf,
        /// replace the output file if it already exists
        #[arg(long, default_value_t = false)]
        overwrite: bool,
        /// optional path for a JSON copy of the conversion summary
        #[arg(long)]
        summary_file: Option<PathBuf>,
    },
    /// print the header and section counts of an existing dense feed
    Inspect {
        /// path to a .gtfsd file
        #[arg(long)]
        input: PathBuf,
    },
}

impl DenseOperation {
    pub fn run(&self) {
        match self {
            DenseOperation::Convert {
                input,
                output,
                overwrite,
                summary_file,
            } => {
                let summary =
                    convert_ops::convert_feed(input, output, *overwrite, summary_file.as_deref())
                        .unwrap_or_else(|e| {
                            panic!("failed converting {}: {e}", input.display())
                        });
                println!("{summary}");
            }
            DenseOperation::Inspect { input } => {
                convert_ops::inspect_feed(input)
                    .unwrap_or_else(|e| panic!("failed inspecting {}: {e}", input.display()))
            }
        }
    }
}
