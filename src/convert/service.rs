//! reconciles the two independent sources of service identity — weekly
//! patterns from calendar.txt and per-date exceptions from
//! calendar_dates.txt — into one service index space. whichever source
//! names a service key first fixes its index permanently; the merge is an
//! upsert (lookup-or-create then mutate in place), never a plain insert,
//! so a key seen by both sources yields exactly one record.

use super::dense::{DenseCalendar, DenseCalendarDate};
use super::index::EntityIndexTable;
use super::rows::{CalendarDateRow, CalendarRow};

pub struct ServiceSchedule {
    /// indexed by service index; contiguous with the index table
    pub calendars: Vec<DenseCalendar>,
    pub calendar_dates: Vec<DenseCalendarDate>,
}

/// merges weekly-pattern rows and exception rows, allocating service
/// indices through `services` as keys are first encountered. rows are
/// consumed in file order so index assignment is deterministic for a
/// fixed input.
pub fn reconcile_services(
    calendar_rows: &[CalendarRow],
    exception_rows: &[CalendarDateRow],
    services: &mut EntityIndexTable,
) -> ServiceSchedule {
    let mut calendars: Vec<DenseCalendar> = Vec::new();

    for row in calendar_rows {
        let index = upsert_calendar(&mut calendars, services, &row.service_id);
        let calendar = &mut calendars[index];
        calendar.days_mask = weekly_mask(row);
        calendar.start_date = row.start_date;
        calendar.end_date = row.end_date;
    }

    let mut calendar_dates = Vec::with_capacity(exception_rows.len());
    for row in exception_rows {
        upsert_calendar(&mut calendars, services, &row.service_id);
        calendar_dates.push(DenseCalendarDate {
            service_id: row.service_id.clone(),
            date: row.date,
            exception_type: row.exception_type,
        });
    }

    ServiceSchedule {
        calendars,
        calendar_dates,
    }
}

/// lookup-or-create: returns the service's fixed index, appending a
/// "never runs" placeholder record when the key is new. placeholders keep
/// the calendars vector contiguous with the index table so exception-only
/// services are still addressable by trips.
fn upsert_calendar(
    calendars: &mut Vec<DenseCalendar>,
    services: &mut EntityIndexTable,
    service_id: &str,
) -> usize {
    let index = services.assign(service_id) as usize;
    // holds as long as this table is only ever grown through this function
    debug_assert!(index <= calendars.len());
    if index == calendars.len() {
        calendars.push(DenseCalendar {
            service_id: service_id.to_string(),
            days_mask: 0,
            start_date: 0,
            end_date: 0,
        });
    }
    index
}

/// packs the seven day columns into a weekly mask, Monday = bit 0 through
/// Sunday = bit 6
fn weekly_mask(row: &CalendarRow) -> u8 {
    (day_bit(row.monday))
        | (day_bit(row.tuesday) << 1)
        | (day_bit(row.wednesday) << 2)
        | (day_bit(row.thursday) << 3)
        | (day_bit(row.friday) << 4)
        | (day_bit(row.saturday) << 5)
        | (day_bit(row.sunday) << 6)
}

fn day_bit(value: u8) -> u8 {
    (value != 0) as u8
}

#[cfg(test)]
mod test {
    use super::*;

    fn weekday_row(service_id: &str) -> CalendarRow {
        CalendarRow {
            service_id: service_id.to_string(),
            monday: 1,
            tuesday: 1,
            wednesday: 1,
            thursday: 1,
            friday: 1,
            saturday: 0,
            sunday: 0,
            start_date: 20240101,
            end_date: 20241231,
        }
    }

    fn exception_row(service_id: &str, date: u32, exception_type: u8) -> CalendarDateRow {
        CalendarDateRow {
            service_id: service_id.to_string(),
            date,
            exception_type,
        }
    }

    #[test]
    fn test_weekly_mask_bit_order() {
        let row = weekday_row("WEEKDAY");
        assert_eq!(weekly_mask(&row), 0b0011111);
        let mut sunday_only = weekday_row("SUN");
        sunday_only.monday = 0;
        sunday_only.tuesday = 0;
        sunday_only.wednesday = 0;
        sunday_only.thursday = 0;
        sunday_only.friday = 0;
        sunday_only.sunday = 1;
        assert_eq!(weekly_mask(&sunday_only), 0b1000000);
    }

    #[test]
    fn test_key_in_both_sources_gets_one_index() {
        let mut services = EntityIndexTable::new();
        let schedule = reconcile_services(
            &[weekday_row("WEEKDAY")],
            &[exception_row("WEEKDAY", 20240704, 2)],
            &mut services,
        );
        assert_eq!(services.len(), 1);
        assert_eq!(schedule.calendars.len(), 1);
        assert_eq!(schedule.calendars[0].days_mask, 0b0011111);
        assert_eq!(schedule.calendar_dates.len(), 1);
        assert_eq!(schedule.calendar_dates[0].service_id, "WEEKDAY");
    }

    #[test]
    fn test_exception_only_service_never_runs_weekly() {
        let mut services = EntityIndexTable::new();
        let schedule = reconcile_services(
            &[weekday_row("WEEKDAY")],
            &[exception_row("GAMEDAY", 20240914, 1)],
            &mut services,
        );
        assert_eq!(services.len(), 2);
        assert_eq!(services.lookup("GAMEDAY"), Some(1));
        // placeholder record: no weekly pattern, but the index is addressable
        assert_eq!(schedule.calendars.len(), 2);
        assert_eq!(schedule.calendars[1].service_id, "GAMEDAY");
        assert_eq!(schedule.calendars[1].days_mask, 0);
        assert_eq!(schedule.calendars[1].start_date, 0);
        assert_eq!(schedule.calendar_dates.len(), 1);
    }

    #[test]
    fn test_index_is_fixed_by_first_allocation() {
        // the exception source introduces the key before the weekly source
        // touches the table; the weekly row must mutate in place, not
        // duplicate
        let mut services = EntityIndexTable::new();
        services.assign("HOLIDAY");
        let schedule = reconcile_services(
            &[weekday_row("HOLIDAY")],
            &[exception_row("HOLIDAY", 20241225, 2)],
            &mut services,
        );
        assert_eq!(services.len(), 1);
        assert_eq!(services.lookup("HOLIDAY"), Some(0));
        assert_eq!(schedule.calendars.len(), 1);
        assert_eq!(schedule.calendars[0].days_mask, 0b0011111);
        assert_eq!(schedule.calendars[0].start_date, 20240101);
    }
}
