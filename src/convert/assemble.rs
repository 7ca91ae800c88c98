//! the top-level fold turning parsed feed tables into the dense document.
//! strictly sequential: routes and stops are emitted first (their emission
//! order is the index order every later foreign key resolves against),
//! services and shapes next, then trips, and finally stop-times are nested
//! into the trip arena by position.

use std::collections::HashMap;

use super::dense::{
    DenseFeed, DenseRoute, DenseStop, DenseStopTime, DenseTrip, FeedHeader, DENSE_FORMAT_VERSION,
    UNRESOLVED_INDEX,
};
use super::index::EntityIndexTable;
use super::normalize::scale_e5;
use super::rows::{
    AgencyRow, CalendarDateRow, CalendarRow, RouteRow, ShapeRow, StopRow, StopTimeRow, TripRow,
};
use super::service::reconcile_services;
use super::shapes::encode_shapes;
use super::summary::ConvertSummary;

/// the complete parsed input, one entry per table. optional tables are
/// None when absent from the archive.
pub struct FeedTables {
    pub agency: Vec<AgencyRow>,
    pub routes: Vec<RouteRow>,
    pub stops: Vec<StopRow>,
    pub calendar: Option<Vec<CalendarRow>>,
    pub calendar_dates: Option<Vec<CalendarDateRow>>,
    pub shapes: Option<Vec<ShapeRow>>,
    pub trips: Vec<TripRow>,
    pub stop_times: Vec<StopTimeRow>,
}

/// builds the dense document. all index tables live only for this call;
/// `timestamp` is the generation time recorded in the header.
pub fn assemble(tables: FeedTables, timestamp: i64, summary: &mut ConvertSummary) -> DenseFeed {
    let header = match tables.agency.first() {
        Some(agency) => FeedHeader {
            agency_name: agency.agency_name.clone(),
            agency_url: agency.agency_url.clone(),
            agency_timezone: agency.agency_timezone.clone(),
            format_version: DENSE_FORMAT_VERSION.to_string(),
            timestamp,
        },
        None => FeedHeader {
            agency_name: String::new(),
            agency_url: String::new(),
            agency_timezone: String::new(),
            format_version: DENSE_FORMAT_VERSION.to_string(),
            timestamp,
        },
    };

    // routes and stops: index == emission order
    let mut route_index = EntityIndexTable::new();
    let routes = tables
        .routes
        .iter()
        .map(|row| {
            route_index.assign(&row.route_id);
            DenseRoute {
                route_id: row.route_id.clone(),
                short_name: row.route_short_name.clone(),
                long_name: row.route_long_name.clone(),
                route_type: row.route_type,
                color: row.route_color.clone(),
                text_color: row.route_text_color.clone(),
            }
        })
        .collect::<Vec<_>>();

    let mut stop_index = EntityIndexTable::new();
    let stops = tables
        .stops
        .iter()
        .map(|row| {
            stop_index.assign(&row.stop_id);
            DenseStop {
                stop_id: row.stop_id.clone(),
                name: row.stop_name.clone(),
                lat_e5: scale_e5(row.stop_lat),
                lon_e5: scale_e5(row.stop_lon),
            }
        })
        .collect::<Vec<_>>();

    let mut service_index = EntityIndexTable::new();
    let schedule = reconcile_services(
        tables.calendar.as_deref().unwrap_or(&[]),
        tables.calendar_dates.as_deref().unwrap_or(&[]),
        &mut service_index,
    );

    let mut shape_index = EntityIndexTable::new();
    let shapes = match &tables.shapes {
        Some(rows) => encode_shapes(rows, &mut shape_index, summary),
        None => Vec::new(),
    };

    // trip arena plus a key -> arena position lookup; stop-times append by
    // position instead of holding references into the growing vector
    let mut trips: Vec<DenseTrip> = Vec::with_capacity(tables.trips.len());
    let mut trip_positions: HashMap<&str, usize> = HashMap::with_capacity(tables.trips.len());
    for row in &tables.trips {
        let resolved_route = match route_index.lookup(&row.route_id) {
            Some(index) => index,
            None => {
                log::warn!(
                    "trip {} references unknown route {}; marking unresolved",
                    row.trip_id,
                    row.route_id
                );
                summary.unresolved_route_refs += 1;
                UNRESOLVED_INDEX
            }
        };
        let resolved_shape = row
            .shape_id
            .as_deref()
            .and_then(|shape_id| shape_index.lookup(shape_id));
        let resolved_service = row
            .service_id
            .as_deref()
            .and_then(|service_id| service_index.lookup(service_id));

        trip_positions.insert(row.trip_id.as_str(), trips.len());
        trips.push(DenseTrip {
            trip_id: row.trip_id.clone(),
            headsign: row.trip_headsign.clone(),
            route_index: resolved_route,
            shape_index: resolved_shape,
            service_index: resolved_service,
            stop_times: Vec::new(),
        });
    }

    for row in &tables.stop_times {
        let position = match trip_positions.get(row.trip_id.as_str()) {
            Some(&position) => position,
            None => {
                summary.dropped_stop_times += 1;
                continue;
            }
        };
        let resolved_stop = match stop_index.lookup(&row.stop_id) {
            Some(index) => index,
            None => {
                summary.unresolved_stop_refs += 1;
                UNRESOLVED_INDEX
            }
        };
        trips[position].stop_times.push(DenseStopTime {
            stop_index: resolved_stop,
            arrival_seconds: row.arrival_time,
            departure_seconds: row.departure_time,
        });
    }

    summary.routes = routes.len();
    summary.stops = stops.len();
    summary.calendars = schedule.calendars.len();
    summary.calendar_dates = schedule.calendar_dates.len();
    summary.shapes = shapes.len();
    summary.trips = trips.len();
    summary.stop_times = trips.iter().map(|trip| trip.stop_times.len()).sum();

    DenseFeed {
        header,
        routes,
        stops,
        calendars: schedule.calendars,
        calendar_dates: schedule.calendar_dates,
        shapes,
        trips,
    }
}
