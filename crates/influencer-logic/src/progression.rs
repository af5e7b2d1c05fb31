//! Experience thresholds and level-ups.
//!
//! Experience is cumulative. Reaching `level × 100 + 50` total experience
//! moves the player from `level` to `level + 1`.

/// Total experience needed to leave `level`.
pub fn experience_required(level: u32) -> u64 {
    u64::from(level) * 100 + 50
}

pub fn can_level_up(experience: u64, level: u32) -> bool {
    experience >= experience_required(level)
}

/// Level reached after applying every level-up `experience` allows.
pub fn level_for_experience(experience: u64, level: u32) -> u32 {
    let mut level = level.max(1);
    while can_level_up(experience, level) {
        level += 1;
    }
    level
}

/// Experience still missing before the next level-up.
pub fn experience_to_next(experience: u64, level: u32) -> u64 {
    experience_required(level).saturating_sub(experience)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(experience_required(1), 150);
        assert_eq!(experience_required(2), 250);
        assert_eq!(experience_required(10), 1050);
    }

    #[test]
    fn test_can_level_up_boundary() {
        assert!(!can_level_up(149, 1));
        assert!(can_level_up(150, 1));
    }

    #[test]
    fn test_level_for_experience() {
        assert_eq!(level_for_experience(0, 1), 1);
        assert_eq!(level_for_experience(150, 1), 2);
        assert_eq!(level_for_experience(249, 2), 2);
        assert_eq!(level_for_experience(250, 2), 3);
        // 550 clears 150, 250, 350, 450 and 550 in one go
        assert_eq!(level_for_experience(550, 1), 6);
        // never drops below the starting level
        assert_eq!(level_for_experience(0, 4), 4);
    }

    #[test]
    fn test_experience_to_next() {
        assert_eq!(experience_to_next(100, 1), 50);
        assert_eq!(experience_to_next(400, 1), 0);
    }
}
