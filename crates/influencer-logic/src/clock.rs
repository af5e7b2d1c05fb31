//! Day/hour arithmetic for the simulated clock.
//!
//! One tick is one in-game hour. The clock never stops; days only count up.

use crate::constants::limits::HOURS_PER_DAY;

/// Result of advancing the clock by one hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStep {
    pub day: u32,
    pub hour: u8,
    /// The hour wrapped past midnight.
    pub new_day: bool,
}

pub fn advance_hour(day: u32, hour: u8) -> ClockStep {
    let next = (hour % HOURS_PER_DAY + 1) % HOURS_PER_DAY;
    let new_day = next == 0;
    ClockStep {
        day: if new_day { day.saturating_add(1) } else { day },
        hour: next,
        new_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_hour() {
        let step = advance_hour(1, 8);
        assert_eq!(step, ClockStep { day: 1, hour: 9, new_day: false });
    }

    #[test]
    fn test_midnight_rollover() {
        let step = advance_hour(3, 23);
        assert_eq!(step, ClockStep { day: 4, hour: 0, new_day: true });
    }

    #[test]
    fn test_full_day_cycle() {
        let (mut day, mut hour) = (1, 8);
        let mut rollovers = 0;
        for _ in 0..24 {
            let step = advance_hour(day, hour);
            day = step.day;
            hour = step.hour;
            rollovers += step.new_day as u32;
        }
        assert_eq!((day, hour, rollovers), (2, 8, 1));
    }
}
