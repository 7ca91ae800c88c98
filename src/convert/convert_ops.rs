//! orchestration for the convert and inspect operations: open the
//! archive, read every table, run the assembly fold, write the output
//! document, and report.

use std::path::Path;

use chrono::Utc;

use super::archive::FeedArchive;
use super::assemble::{assemble, FeedTables};
use super::convert_error::ConvertError;
use super::dense::{load_dense_feed, write_dense_feed};
use super::rows::{
    AgencyRow, CalendarDateRow, CalendarRow, RouteRow, ShapeRow, StopRow, StopTimeRow, TripRow,
};
use super::summary::ConvertSummary;

/// converts a GTFS zip archive at `input` into a dense feed at `output`.
/// tables are read in dependency order; trips must fully precede
/// stop-times so the nesting pass has an arena to append into.
pub fn convert_feed(
    input: &Path,
    output: &Path,
    overwrite: bool,
    summary_file: Option<&Path>,
) -> Result<ConvertSummary, ConvertError> {
    if output.exists() && !overwrite {
        return Err(ConvertError::OutputExistsError(output.to_path_buf()));
    }

    let mut archive = FeedArchive::open(input)?;
    let mut summary = ConvertSummary::default();

    let tables = FeedTables {
        agency: archive.read_required::<AgencyRow>("agency.txt", &mut summary)?,
        routes: archive.read_required::<RouteRow>("routes.txt", &mut summary)?,
        stops: archive.read_required::<StopRow>("stops.txt", &mut summary)?,
        calendar: archive.read_optional::<CalendarRow>("calendar.txt", &mut summary)?,
        calendar_dates: archive
            .read_optional::<CalendarDateRow>("calendar_dates.txt", &mut summary)?,
        shapes: archive.read_optional::<ShapeRow>("shapes.txt", &mut summary)?,
        trips: archive.read_required::<TripRow>("trips.txt", &mut summary)?,
        stop_times: archive.read_required::<StopTimeRow>("stop_times.txt", &mut summary)?,
    };

    let feed = assemble(tables, Utc::now().timestamp(), &mut summary);
    write_dense_feed(&feed, output)?;
    log::info!(
        "wrote {} with {} trips and {} nested stop times",
        output.display(),
        summary.trips,
        summary.stop_times
    );
    if summary.dropped_stop_times > 0 {
        log::warn!(
            "{} stop-time rows referenced unknown trips and were dropped",
            summary.dropped_stop_times
        );
    }

    if let Some(path) = summary_file {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| ConvertError::SerializeError(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| ConvertError::OutputWriteError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    Ok(summary)
}

/// loads an existing dense feed and prints its header and section counts,
/// a quick smoke test that a file is intact and indexed as expected.
pub fn inspect_feed(input: &Path) -> Result<(), ConvertError> {
    let feed = load_dense_feed(input)?;
    let nested_stop_times: usize = feed.trips.iter().map(|trip| trip.stop_times.len()).sum();

    println!("agency:         {}", feed.header.agency_name);
    println!("timezone:       {}", feed.header.agency_timezone);
    println!("format version: {}", feed.header.format_version);
    println!("generated at:   {}", feed.header.timestamp);
    println!("routes:         {}", feed.routes.len());
    println!("stops:          {}", feed.stops.len());
    println!("calendars:      {}", feed.calendars.len());
    println!("calendar dates: {}", feed.calendar_dates.len());
    println!("shapes:         {}", feed.shapes.len());
    println!("trips:          {}", feed.trips.len());
    println!("stop times:     {nested_stop_times}");
    Ok(())
}
