//! converts a standard GTFS zip archive into a single compact binary
//! document with integer-indexed cross references and delta-compressed
//! shape polylines.
use clap::Parser;
use gtfs_dense::convert::app::DenseApp;

fn main() {
    env_logger::init();
    let args = DenseApp::parse();
    args.op.run()
}
