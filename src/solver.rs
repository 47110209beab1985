//! Celebration-time solver
//!
//! Finds the Moscow wall-clock time at which the pilot's own watch first
//! reads `January 1, <year>, 00:00:00` and the pilot is on the ground to see it.
//!
//! The search runs in two steps:
//!
//! 1. **Bulk jump**: whole duty cycles are skipped with one division, since
//!    every cycle moves universal time and the pilot's clock by fixed amounts.
//! 2. **Exact replay**: the last partial cycle is walked phase by phase.
//!    The number of steps is fixed before the loop starts.
//!
//! New year during a flight is celebrated on landing (the phase end).
//! During a rest it is celebrated at the exact hour.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{SolveError, SolveResult};
use crate::schedule::{Anchor, Schedule, ScheduleEvent};

/// Zone the answer is reported in
pub const REPORT_ZONE: Tz = chrono_tz::Europe::Moscow;

/// `YYYY-MM-DD HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of skipping whole cycles from the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub full_cycles: i64,
    /// Universal time at the start of the first replayed phase
    pub universal_start: DateTime<Utc>,
    /// Local hours still to live after the jump, in `1..=cycle_local_hours`
    pub remaining_local_hours: i64,
}

/// Split a local-hour budget into skipped cycles and a remainder.
///
/// Exact only because every phase moves the watch forward, so the target is
/// never reached inside a skipped cycle. The remainder is never 0: a target
/// sitting exactly on a cycle boundary is left for the replay to find at the
/// end of the last phase.
pub(crate) fn split_cycles(total_local_hours: i64, cycle_local_hours: i64) -> (i64, i64) {
    let mut full_cycles = total_local_hours.div_euclid(cycle_local_hours).max(0);
    if full_cycles > 0 && total_local_hours - full_cycles * cycle_local_hours == 0 {
        full_cycles -= 1;
    }
    (full_cycles, total_local_hours - full_cycles * cycle_local_hours)
}

fn add_hours(instant: DateTime<Utc>, hours: i64) -> SolveResult<DateTime<Utc>> {
    TimeDelta::try_hours(hours)
        .and_then(|delta| instant.checked_add_signed(delta))
        .ok_or_else(|| {
            SolveError::Domain(format!(
                "{} + {}h is outside the supported calendar",
                instant, hours
            ))
        })
}

/// Render an instant as Moscow civil time
pub fn format_moscow(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&REPORT_ZONE).format(TIMESTAMP_FORMAT).to_string()
}

/// Scratch state of one replay
struct SimulationState {
    current_universal_time: DateTime<Utc>,
    local_hours_passed: i64,
}

impl SimulationState {
    fn advance(&mut self, event: &ScheduleEvent) -> SolveResult<()> {
        self.current_universal_time = add_hours(self.current_universal_time, event.duration_hours)?;
        self.local_hours_passed = self
            .local_hours_passed
            .checked_add(event.local_hours())
            .ok_or_else(|| SolveError::Domain("local hour count overflow".to_string()))?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Solver {
    schedule: Schedule,
    anchor: Anchor,
}

impl Solver {
    pub fn new(schedule: Schedule, anchor: Anchor) -> Self {
        Self { schedule, anchor }
    }

    /// The pilot who left Moscow at noon on 2020-01-01
    pub fn pilot() -> SolveResult<Self> {
        Ok(Self::new(Schedule::pilot()?, Anchor::pilot()?))
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Hours the pilot's watch must run from the anchor until new year.
    /// The target is a naive reading of the pilot's own clock.
    pub fn local_hours_to_live(&self, year: i32) -> SolveResult<i64> {
        let target = NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| {
                SolveError::Domain(format!("year {} is outside the supported calendar", year))
            })?;

        let start = self.anchor.local_time();
        let hours = (target - start).num_hours();
        if hours <= 0 {
            return Err(SolveError::Domain(format!(
                "new year {} is not after the anchor ({} on the pilot's clock)",
                year, start
            )));
        }
        Ok(hours)
    }

    /// Skip every whole cycle that ends strictly before the target
    pub fn bulk_jump(&self, total_local_hours: i64) -> SolveResult<Jump> {
        let (full_cycles, remaining_local_hours) =
            split_cycles(total_local_hours, self.schedule.cycle_local_hours());

        let universal_hours = full_cycles
            .checked_mul(self.schedule.cycle_universal_hours())
            .ok_or_else(|| {
                SolveError::Domain(format!("{} cycles overflow the calendar", full_cycles))
            })?;
        let universal_start = add_hours(self.anchor.universal(), universal_hours)?;

        debug!(
            "Jumped {} cycles to {}, {}h left to replay",
            full_cycles, universal_start, remaining_local_hours
        );

        Ok(Jump {
            full_cycles,
            universal_start,
            remaining_local_hours,
        })
    }

    /// Walk the schedule from `start` (the beginning of its first event)
    /// until the pilot's watch has run `remaining_local_hours`.
    pub fn replay(
        &self,
        start: DateTime<Utc>,
        remaining_local_hours: i64,
    ) -> SolveResult<DateTime<Utc>> {
        if remaining_local_hours <= 0 {
            return Err(SolveError::Domain(format!(
                "nothing left to replay ({}h)",
                remaining_local_hours
            )));
        }

        // Every full wrap moves the watch by exactly cycle_local_hours,
        // so this many wraps always cover the remainder.
        let cycle_local_hours = self.schedule.cycle_local_hours();
        let wraps = remaining_local_hours / cycle_local_hours
            + i64::from(remaining_local_hours % cycle_local_hours != 0);
        let phase_budget = usize::try_from(wraps)
            .ok()
            .and_then(|w| w.checked_mul(self.schedule.len()))
            .ok_or_else(|| {
                SolveError::Domain(format!("{}h is too long to replay", remaining_local_hours))
            })?;

        let mut state = SimulationState {
            current_universal_time: start,
            local_hours_passed: 0,
        };

        for step in 0..phase_budget {
            let event = self.schedule.event_at(step);
            let passed = state.local_hours_passed;
            let after = passed.checked_add(event.local_hours()).ok_or_else(|| {
                SolveError::Domain(format!("{}h is too long to replay", remaining_local_hours))
            })?;

            if passed < remaining_local_hours && remaining_local_hours <= after {
                let celebration = if event.is_moving() {
                    // Celebrated after landing
                    add_hours(state.current_universal_time, event.duration_hours)?
                } else {
                    add_hours(state.current_universal_time, remaining_local_hours - passed)?
                };

                debug!(
                    "Target found in phase {} (step {}, moving={}): {}",
                    step % self.schedule.len(),
                    step,
                    event.is_moving(),
                    celebration
                );
                return Ok(celebration);
            }

            state.advance(event)?;
        }

        Err(SolveError::Internal(format!(
            "no phase contains {}h within {} steps",
            remaining_local_hours, phase_budget
        )))
    }

    /// Universal instant of the celebration
    pub fn celebration_instant(&self, year: i32) -> SolveResult<DateTime<Utc>> {
        let total = self.local_hours_to_live(year)?;
        let jump = self.bulk_jump(total)?;
        self.replay(jump.universal_start, jump.remaining_local_hours)
    }

    /// Moscow time of the celebration as `YYYY-MM-DD HH:mm:ss`
    pub fn solve(&self, year: i32) -> SolveResult<String> {
        self.celebration_instant(year).map(format_moscow)
    }
}

/// Moscow time at which the pilot celebrates the start of `year`
pub fn solve(year: i32) -> SolveResult<String> {
    Solver::pilot()?.solve(year)
}



/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn split_cycles_remainder_bounded() {
        let total: i64 = kani::any();
        let cycle: i64 = kani::any();
        kani::assume(total > 0 && total < 1_000_000_000);
        kani::assume(cycle > 0 && cycle < 1_000);

        let (full, remaining) = split_cycles(total, cycle);
        kani::assert(full >= 0, "never jumps backwards");
        kani::assert(remaining > 0, "remainder must be containable");
        kani::assert(remaining <= cycle, "at most one cycle to replay");
        kani::assert(full * cycle + remaining == total, "jump loses no hours");
    }
}
