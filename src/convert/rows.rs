//! typed rows for the GTFS tables this converter consumes, deserialized
//! straight from each table's CSV text. scalar fields use lenient
//! deserializers so a malformed cell collapses to 0 instead of failing
//! the row; key columns are required, and a row missing one is skipped by
//! the archive reader.

use serde::{Deserialize, Deserializer};

use super::normalize;

/// a single row from `agency.txt`
#[derive(Debug, Deserialize)]
pub struct AgencyRow {
    #[serde(default)]
    pub agency_name: String,
    #[serde(default)]
    pub agency_url: String,
    #[serde(default)]
    pub agency_timezone: String,
}

/// a single row from `routes.txt`
#[derive(Debug, Deserialize)]
pub struct RouteRow {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: String,
    #[serde(default)]
    pub route_long_name: String,
    /// numeric route-type code (0 tram, 1 subway, 2 rail, 3 bus, ...)
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub route_type: u32,
    #[serde(default)]
    pub route_color: String,
    #[serde(default)]
    pub route_text_color: String,
}

/// a single row from `stops.txt`
#[derive(Debug, Deserialize)]
pub struct StopRow {
    pub stop_id: String,
    #[serde(default)]
    pub stop_name: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub stop_lat: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub stop_lon: f64,
}

/// a single row from `calendar.txt`: a weekly service pattern with a
/// validity date range
#[derive(Debug, Deserialize)]
pub struct CalendarRow {
    pub service_id: String,

    /// service availability by day (0 or 1)
    #[serde(default, deserialize_with = "u8_or_zero")]
    pub monday: u8,
    #[serde(default, deserialize_with = "u8_or_zero")]
    pub tuesday: u8,
    #[serde(default, deserialize_with = "u8_or_zero")]
    pub wednesday: u8,
    #[serde(default, deserialize_with = "u8_or_zero")]
    pub thursday: u8,
    #[serde(default, deserialize_with = "u8_or_zero")]
    pub friday: u8,
    #[serde(default, deserialize_with = "u8_or_zero")]
    pub saturday: u8,
    #[serde(default, deserialize_with = "u8_or_zero")]
    pub sunday: u8,

    /// service start date (YYYYMMDD, kept as a comparable integer)
    #[serde(default, deserialize_with = "date_int")]
    pub start_date: u32,
    /// service end date (YYYYMMDD, kept as a comparable integer)
    #[serde(default, deserialize_with = "date_int")]
    pub end_date: u32,
}

/// a single row from `calendar_dates.txt`: a specific-date exception to a
/// weekly pattern (1 = service added, 2 = service removed)
#[derive(Debug, Deserialize)]
pub struct CalendarDateRow {
    pub service_id: String,
    #[serde(default, deserialize_with = "date_int")]
    pub date: u32,
    #[serde(default, deserialize_with = "u8_or_zero")]
    pub exception_type: u8,
}

/// a single row from `shapes.txt`: one point of a shape's polyline
#[derive(Debug, Deserialize)]
pub struct ShapeRow {
    pub shape_id: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub shape_pt_lat: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub shape_pt_lon: f64,
    /// ordering key within a shape; not assumed contiguous or zero-based
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub shape_pt_sequence: u32,
}

/// a single row from `trips.txt`
#[derive(Debug, Deserialize)]
pub struct TripRow {
    pub trip_id: String,
    #[serde(default)]
    pub route_id: String,
    #[serde(default)]
    pub trip_headsign: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub shape_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub service_id: Option<String>,
}

/// a single row from `stop_times.txt`; file order within one trip is the
/// intended chronological order
#[derive(Debug, Deserialize)]
pub struct StopTimeRow {
    pub trip_id: String,
    #[serde(default)]
    pub stop_id: String,
    #[serde(default, deserialize_with = "time_seconds")]
    pub arrival_time: u32,
    #[serde(default, deserialize_with = "time_seconds")]
    pub departure_time: u32,
}

fn u32_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(text.trim().parse().unwrap_or(0))
}

fn u8_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(text.trim().parse().unwrap_or(0))
}

fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(text.trim().parse().unwrap_or(0.0))
}

fn date_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(normalize::date_to_int(&text))
}

fn time_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(normalize::time_to_seconds(&text))
}

/// empty CSV cells mean "absent" for optional foreign keys
fn optional_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let text = String::deserialize(deserializer)?;
    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}
