//! the dense binary document: an index-based, physically nested record tree
//! serialized with rkyv. all cross-references between sections are small
//! integer indices into sibling vectors rather than repeated string keys.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::convert_error::ConvertError;

/// format version carried in the header of every emitted document
pub const DENSE_FORMAT_VERSION: &str = "1.0.0";

/// marks a required foreign key that did not resolve. a reserved invalid
/// index keeps "no match" distinguishable from a reference to entity 0.
pub const UNRESOLVED_INDEX: u32 = u32::MAX;

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct DenseFeed {
    pub header: FeedHeader,
    pub routes: Vec<DenseRoute>,
    pub stops: Vec<DenseStop>,
    pub calendars: Vec<DenseCalendar>,
    pub calendar_dates: Vec<DenseCalendarDate>,
    pub shapes: Vec<DenseShape>,
    pub trips: Vec<DenseTrip>,
}

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct FeedHeader {
    pub agency_name: String,
    pub agency_url: String,
    pub agency_timezone: String,
    pub format_version: String,
    /// generation time, seconds since epoch
    pub timestamp: i64,
}

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct DenseRoute {
    pub route_id: String,
    pub short_name: String,
    pub long_name: String,
    pub route_type: u32,
    pub color: String,
    pub text_color: String,
}

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct DenseStop {
    pub stop_id: String,
    pub name: String,
    /// latitude scaled by 1e5 to fixed-point integer degrees
    pub lat_e5: i32,
    /// longitude scaled by 1e5 to fixed-point integer degrees
    pub lon_e5: i32,
}

/// one entry per service index. a service introduced only by date
/// exceptions holds a zero ("never runs") mask and zero dates so the
/// service index space stays contiguous.
#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct DenseCalendar {
    pub service_id: String,
    /// weekly repetition, Monday = bit 0 through Sunday = bit 6
    pub days_mask: u8,
    pub start_date: u32,
    pub end_date: u32,
}

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct DenseCalendarDate {
    pub service_id: String,
    pub date: u32,
    /// 1 = service added on this date, 2 = service removed
    pub exception_type: u8,
}

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct DenseShape {
    pub shape_id: String,
    /// precision-5 delta-coded polyline
    pub encoded_polyline: String,
}

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct DenseTrip {
    pub trip_id: String,
    pub headsign: String,
    /// index into `DenseFeed::routes`, or [UNRESOLVED_INDEX]
    pub route_index: u32,
    /// index into `DenseFeed::shapes`; absent when the trip has no shape
    pub shape_index: Option<u32>,
    /// index into `DenseFeed::calendars`; absent when the trip has no service
    pub service_index: Option<u32>,
    /// owned, ordered stop-time children
    pub stop_times: Vec<DenseStopTime>,
}

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug)]
#[rkyv(derive(Debug))]
pub struct DenseStopTime {
    /// index into `DenseFeed::stops`, or [UNRESOLVED_INDEX]
    pub stop_index: u32,
    /// seconds since midnight; may exceed 86400
    pub arrival_seconds: u32,
    pub departure_seconds: u32,
}

/// serializes the document tree and writes it to `path`.
pub fn write_dense_feed(feed: &DenseFeed, path: &Path) -> Result<(), ConvertError> {
    let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(feed)
        .map_err(|e| ConvertError::SerializeError(e.to_string()))?;
    let mut file = File::create(path).map_err(|e| ConvertError::OutputWriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    file.write_all(&bytes)
        .map_err(|e| ConvertError::OutputWriteError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// loads a dense feed document back into owned records, validating the
/// archived bytes.
pub fn load_dense_feed(path: &Path) -> Result<DenseFeed, ConvertError> {
    let raw = std::fs::read(path).map_err(|e| ConvertError::DenseReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    // re-align the bytes; rkyv validation rejects unaligned buffers
    let mut aligned = rkyv::util::AlignedVec::<16>::new();
    aligned.extend_from_slice(&raw);
    rkyv::from_bytes::<DenseFeed, rkyv::rancor::Error>(&aligned).map_err(|e| {
        ConvertError::DenseReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })
}
