use serde::Serialize;
use std::fmt::Display;

/// emitted-record counts and anomaly counters for one conversion run.
/// anomalies are never fatal; they surface here and through `log::warn!`.
#[derive(Debug, Default, Serialize)]
pub struct ConvertSummary {
    pub routes: usize,
    pub stops: usize,
    pub calendars: usize,
    pub calendar_dates: usize,
    pub shapes: usize,
    pub trips: usize,
    pub stop_times: usize,

    /// rows that failed structural CSV deserialization and were skipped
    pub skipped_rows: usize,
    /// stop-time rows referencing an unknown trip, dropped entirely
    pub dropped_stop_times: usize,
    /// trips whose route key did not resolve (marked with the invalid index)
    pub unresolved_route_refs: usize,
    /// stop-times whose stop key did not resolve (marked with the invalid index)
    pub unresolved_stop_refs: usize,
    /// shape keys that grouped to zero points and were not emitted
    pub empty_shapes: usize,
}

impl ConvertSummary {
    pub fn anomalies(&self) -> usize {
        self.skipped_rows
            + self.dropped_stop_times
            + self.unresolved_route_refs
            + self.unresolved_stop_refs
            + self.empty_shapes
    }
}

impl Display for ConvertSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "routes:         {}", self.routes)?;
        writeln!(f, "stops:          {}", self.stops)?;
        writeln!(f, "calendars:      {}", self.calendars)?;
        writeln!(f, "calendar dates: {}", self.calendar_dates)?;
        writeln!(f, "shapes:         {}", self.shapes)?;
        writeln!(f, "trips:          {}", self.trips)?;
        writeln!(f, "stop times:     {}", self.stop_times)?;
        if self.anomalies() == 0 {
            write!(f, "no anomalies")
        } else {
            writeln!(f, "skipped rows:            {}", self.skipped_rows)?;
            writeln!(f, "dropped stop times:      {}", self.dropped_stop_times)?;
            writeln!(f, "unresolved route refs:   {}", self.unresolved_route_refs)?;
            writeln!(f, "unresolved stop refs:    {}", self.unresolved_stop_refs)?;
            write!(f, "empty shapes:            {}", self.empty_shapes)
        }
    }
}
