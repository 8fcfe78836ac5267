use crate::models::MAX_PROFICIENCY;

/// Calculate the match percentage (0-100) of a fully qualified person
///
/// Scoring formula:
/// percentage = round(100 * total_level / (requirement_count * 5))
///
/// The denominator is tied to the fixed top of the proficiency scale, so a
/// person only reaches 100 by holding every required skill at Expert level.
/// Halves round up, computed in integer arithmetic to stay exact. Any total
/// short of all-Expert is capped at 99, which rounding alone would not
/// guarantee once there are more than 40 requirements.
///
/// # Arguments
/// * `total_level` - Sum of the person's actual levels over the required skills
/// * `requirement_count` - Number of requirements the person was checked against
#[inline]
pub fn match_percentage(total_level: u32, requirement_count: usize) -> u8 {
    if requirement_count == 0 {
        return 0;
    }

    let max_total = requirement_count as u64 * u64::from(MAX_PROFICIENCY);
    let scaled = 100 * u64::from(total_level);

    // round(a / b) == floor((2a + b) / 2b) for non-negative a and positive b
    let rounded = (2 * scaled + max_total) / (2 * max_total);

    let ceiling = if u64::from(total_level) >= max_total { 100 } else { 99 };

    rounded.min(ceiling) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_skill_example() {
        // Levels 5 and 4 against two requirements
        assert_eq!(match_percentage(9, 2), 90);
    }

    #[test]
    fn test_all_expert_is_full_score() {
        for n in 1..=10 {
            assert_eq!(match_percentage(5 * n as u32, n), 100);
        }
    }

    #[test]
    fn test_all_lowest_is_twenty() {
        for n in 1..=10 {
            assert_eq!(match_percentage(n as u32, n), 20);
        }
    }

    #[test]
    fn test_rounds_half_up() {
        // 100 * 9 / 40 = 22.5
        assert_eq!(match_percentage(9, 8), 23);
        // 100 * 7 / 15 = 46.67
        assert_eq!(match_percentage(7, 3), 47);
        // 100 * 4 / 15 = 26.67
        assert_eq!(match_percentage(4, 3), 27);
        // 100 * 11 / 40 = 27.5
        assert_eq!(match_percentage(11, 8), 28);
    }

    #[test]
    fn test_one_level_short_never_reaches_hundred() {
        // 100 * 204 / 205 = 99.51 would round to 100
        assert_eq!(match_percentage(204, 41), 99);
        for n in 1..=200usize {
            let all_expert = 5 * n as u32;
            assert_eq!(match_percentage(all_expert, n), 100);
            assert!(match_percentage(all_expert - 1, n) < 100, "n = {}", n);
        }
    }

    #[test]
    fn test_no_requirements_scores_zero() {
        assert_eq!(match_percentage(0, 0), 0);
    }
}
