/// Pilot duty cycle model
/// A fixed, repeating sequence of westward flights and rest periods, plus the
/// anchor instant the pilot left Moscow.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::error::{SolveError, SolveResult};

/// Hours the pilot's clock moves per flight (negative = westward)
pub const WESTWARD_SHIFT_HOURS: i64 = -3;
pub const FLIGHT_HOURS: i64 = 2;
pub const REST_HOURS: i64 = 6;

/// Anchor: noon Moscow time (UTC+3) on 2020-01-01
pub const ANCHOR_YEAR: i32 = 2020;
pub const ANCHOR_UTC_HOUR: u32 = 9;
pub const ANCHOR_OFFSET_HOURS: i32 = 3;

/// One phase of the duty cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleEvent {
    /// Universal-time hours the phase takes
    pub duration_hours: i64,
    /// Change of the pilot's UTC offset caused by the phase (0 when resting)
    pub timezone_shift: i64,
}

impl ScheduleEvent {
    pub const fn flight(duration_hours: i64, timezone_shift: i64) -> Self {
        Self { duration_hours, timezone_shift }
    }

    pub const fn rest(duration_hours: i64) -> Self {
        Self { duration_hours, timezone_shift: 0 }
    }

    /// Hours the pilot's own clock shows passing during this phase.
    /// Flying west for 2h across 3 zones reads as 5h on the pilot's watch.
    /// Saturates on extreme values; `Schedule::new` rejects those.
    pub const fn local_hours(&self) -> i64 {
        self.duration_hours.saturating_sub(self.timezone_shift)
    }

    pub const fn checked_local_hours(&self) -> Option<i64> {
        self.duration_hours.checked_sub(self.timezone_shift)
    }

    /// Flights change the offset; rests do not
    pub const fn is_moving(&self) -> bool {
        self.timezone_shift != 0
    }
}

/// Fly west, rest, fly west, rest
pub const PILOT_SCHEDULE: [ScheduleEvent; 4] = [
    ScheduleEvent::flight(FLIGHT_HOURS, WESTWARD_SHIFT_HOURS),
    ScheduleEvent::rest(REST_HOURS),
    ScheduleEvent::flight(FLIGHT_HOURS, WESTWARD_SHIFT_HOURS),
    ScheduleEvent::rest(REST_HOURS),
];

/// Cyclic schedule. After the last event the first one repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    events: Vec<ScheduleEvent>,
    cycle_universal_hours: i64,
    cycle_local_hours: i64,
}

impl Schedule {
    /// Build a schedule, rejecting ones whose phases do not all move the
    /// pilot's clock forward.
    pub fn new(events: Vec<ScheduleEvent>) -> SolveResult<Self> {
        if events.is_empty() {
            return Err(SolveError::Configuration("schedule has no events".to_string()));
        }

        let mut cycle_universal_hours: i64 = 0;
        let mut cycle_local_hours: i64 = 0;

        for (index, event) in events.iter().enumerate() {
            if event.duration_hours <= 0 {
                return Err(SolveError::Configuration(format!(
                    "event {} has non-positive duration {}h",
                    index, event.duration_hours
                )));
            }

            // The watch must strictly advance in every phase, otherwise it
            // could pass midnight mid-cycle and fall back before the cycle ends
            let local_hours = event.checked_local_hours().ok_or_else(|| {
                SolveError::Configuration(format!("event {} local hours overflow", index))
            })?;
            if local_hours <= 0 {
                return Err(SolveError::Configuration(format!(
                    "event {} moves the local clock by {}h; it must be positive",
                    index, local_hours
                )));
            }

            cycle_universal_hours = cycle_universal_hours
                .checked_add(event.duration_hours)
                .ok_or_else(|| {
                    SolveError::Configuration("cycle universal hours overflow".to_string())
                })?;
            cycle_local_hours = cycle_local_hours.checked_add(local_hours).ok_or_else(|| {
                SolveError::Configuration("cycle local hours overflow".to_string())
            })?;
        }

        Ok(Self {
            events,
            cycle_universal_hours,
            cycle_local_hours,
        })
    }

    pub fn pilot() -> SolveResult<Self> {
        Self::new(PILOT_SCHEDULE.to_vec())
    }

    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Never true for a constructed schedule
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event at a position in the endless cycle
    pub fn event_at(&self, step: usize) -> &ScheduleEvent {
        &self.events[step % self.events.len()]
    }

    pub fn cycle_universal_hours(&self) -> i64 {
        self.cycle_universal_hours
    }

    pub fn cycle_local_hours(&self) -> i64 {
        self.cycle_local_hours
    }
}

/// Origin of the simulation: where and when the pilot started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    universal: DateTime<Utc>,
    offset: FixedOffset,
}

impl Anchor {
    /// The instant must sit on a whole hour since the solver works in hours.
    pub fn new(universal: DateTime<Utc>, offset_hours: i32) -> SolveResult<Self> {
        if universal.minute() != 0 || universal.second() != 0 || universal.nanosecond() != 0 {
            return Err(SolveError::Configuration(format!(
                "anchor {} is not on a whole hour",
                universal
            )));
        }

        let offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                SolveError::Configuration(format!("invalid anchor offset {}h", offset_hours))
            })?;

        Ok(Self { universal, offset })
    }

    pub fn pilot() -> SolveResult<Self> {
        let universal = NaiveDate::from_ymd_opt(ANCHOR_YEAR, 1, 1)
            .and_then(|d| d.and_hms_opt(ANCHOR_UTC_HOUR, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| SolveError::Configuration("anchor date is not a calendar date".to_string()))?;
        Self::new(universal, ANCHOR_OFFSET_HOURS)
    }

    pub fn universal(&self) -> DateTime<Utc> {
        self.universal
    }

    /// What the pilot's watch read at the anchor
    pub fn local_time(&self) -> NaiveDateTime {
        self.universal.with_timezone(&self.offset).naive_local()
    }

    /// Year on the pilot's watch at the anchor
    pub fn local_year(&self) -> i32 {
        self.local_time().year()
    }
}
