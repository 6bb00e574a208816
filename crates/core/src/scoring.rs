//! Scoring module - line-clear points, combos, levels and gravity
//!
//! Rules:
//! - A clear of N rows scores `LINE_SCORES[N]` times the level that was
//!   current when the piece locked; N > 4 scores no base points.
//! - The second and later consecutive clearing locks add `(combo - 1) * 50`.
//! - Hard drops score 2 points per row travelled.
//! - Level is `lines / 10 + 1`; gravity is `max(50, 800 - (level - 1) * 50)` ms.

use crate::types::{
    BASE_DROP_MS, COMBO_BONUS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_SCORES, MIN_DROP_MS, START_LEVEL,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Tiered base points times level
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`
    pub combo_bonus: u32,
    pub total: u32,
}

/// Base points for clearing `lines` rows at once
pub fn line_clear_base(lines: u32) -> u32 {
    LINE_SCORES.get(lines as usize).copied().unwrap_or(0)
}

/// Bonus for the `combo`-th consecutive clearing lock (1-based)
pub fn combo_bonus(combo: u32) -> u32 {
    if combo > 1 {
        (combo - 1).saturating_mul(COMBO_BONUS)
    } else {
        0
    }
}

/// Points for a clearing lock.
///
/// `combo` is the counter after it was incremented for this lock.
pub fn calculate_score(lines: u32, level: u32, combo: u32) -> ScoreResult {
    let line_clear_score = line_clear_base(lines).saturating_mul(level);
    let combo_bonus = combo_bonus(combo);
    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
    }
}

pub fn hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level for a cumulative cleared-line count
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + START_LEVEL
}

/// Gravity interval for a level, in milliseconds
pub fn drop_interval_ms(level: u32) -> u32 {
    let speed_up = level.saturating_sub(START_LEVEL).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(speed_up).max(MIN_DROP_MS)
}
