//! Scoring module - chain scoring with nonlinear bonus tables
//!
//! A pass that clears `n` tokens at chain index `c` scores
//! `10 * n * (chain_power(c) + color_bonus(k) + Σ group_bonus(size))`, where `k` is the number
//! of distinct colors cleared in the pass. A pass whose bonus sum is zero still awards
//! [`MIN_CLEAR_SCORE`]. An all-clear is paid out once, on the next scored pass.

use crate::types::{
    ClearedGroup, ALL_CLEAR_BONUS, CHAIN_POWER, COLOR_BONUS, GROUP_BONUS, GROUP_BONUS_MAX,
    MIN_CLEAR_SCORE,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the pass itself.
    pub chain_score: u32,
    /// All-clear bonus paid out with this pass (0 or [`ALL_CLEAR_BONUS`]).
    pub all_clear_bonus: u32,
    /// Running total after this pass.
    pub total: u32,
}

impl ScoreResult {
    /// Everything this pass added to the total
    pub fn delta(&self) -> u32 {
        self.chain_score.saturating_add(self.all_clear_bonus)
    }
}

/// Chain power for chain index `chain`
pub fn chain_power(chain: u32) -> u32 {
    match CHAIN_POWER.get(chain as usize) {
        Some(&power) => power,
        None => 32u32.saturating_mul(chain - 3),
    }
}

/// Bonus for clearing `colors` distinct colors in one pass
pub fn color_bonus(colors: usize) -> u32 {
    match COLOR_BONUS.get(colors) {
        Some(&bonus) => bonus,
        None => 3u32.saturating_mul(1u32.checked_shl(colors as u32 - 2).unwrap_or(u32::MAX)),
    }
}

/// Bonus for a single group of `size` tokens
pub fn group_bonus(size: usize) -> u32 {
    GROUP_BONUS.get(size).copied().unwrap_or(GROUP_BONUS_MAX)
}

/// Points for one resolution pass, without the all-clear bonus
pub fn calculate_chain_score(groups: &[ClearedGroup], chain: u32) -> u32 {
    let mut tokens: u32 = 0;
    let mut size_bonus: u32 = 0;
    let mut colors: Vec<_> = Vec::with_capacity(groups.len());

    for group in groups {
        tokens = tokens.saturating_add(group.count as u32);
        size_bonus = size_bonus.saturating_add(group_bonus(group.count));
        if !colors.contains(&group.color) {
            colors.push(group.color);
        }
    }

    let multiplier = chain_power(chain)
        .saturating_add(color_bonus(colors.len()))
        .saturating_add(size_bonus);
    let score = 10u32.saturating_mul(tokens).saturating_mul(multiplier);

    if score == 0 && tokens > 0 {
        MIN_CLEAR_SCORE
    } else {
        score
    }
}

/// Running score with the pending all-clear flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreEngine {
    total: u32,
    all_clear_pending: bool,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn all_clear_pending(&self) -> bool {
        self.all_clear_pending
    }

    /// Arm the all-clear bonus for the next scored pass
    pub fn flag_all_clear(&mut self) {
        self.all_clear_pending = true;
    }

    /// Score one pass and add it to the total, paying out a pending all-clear bonus.
    pub fn score(&mut self, groups: &[ClearedGroup], chain: u32) -> ScoreResult {
        let chain_score = calculate_chain_score(groups, chain);
        self.total = self.total.saturating_add(chain_score);

        let all_clear_bonus = if self.all_clear_pending {
            self.all_clear_pending = false;
            ALL_CLEAR_BONUS
        } else {
            0
        };
        self.total = self.total.saturating_add(all_clear_bonus);

        ScoreResult {
            chain_score,
            all_clear_bonus,
            total: self.total,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(color: u8, count: usize) -> ClearedGroup {
        ClearedGroup { color, count }
    }

    #[test]
    fn test_chain_power_table_and_extrapolation() {
        assert_eq!(chain_power(1), 0);
        assert_eq!(chain_power(2), 8);
        assert_eq!(chain_power(5), 64);
        assert_eq!(chain_power(19), 512);
        assert_eq!(chain_power(20), 544);
        assert_eq!(chain_power(25), 704);
    }

    #[test]
    fn test_color_bonus_table_and_extrapolation() {
        assert_eq!(color_bonus(1), 0);
        assert_eq!(color_bonus(2), 3);
        assert_eq!(color_bonus(5), 24);
        assert_eq!(color_bonus(6), 48);
        assert_eq!(color_bonus(7), 96);
    }

    #[test]
    fn test_group_bonus_saturates() {
        assert_eq!(group_bonus(4), 0);
        assert_eq!(group_bonus(5), 2);
        assert_eq!(group_bonus(11), 10);
        assert_eq!(group_bonus(12), 10);
        assert_eq!(group_bonus(30), 10);
    }

    #[test]
    fn test_single_four_at_chain_one_is_floored() {
        assert_eq!(calculate_chain_score(&[group(1, 4)], 1), 40);
    }

    #[test]
    fn test_empty_pass_scores_nothing() {
        assert_eq!(calculate_chain_score(&[], 1), 0);
    }

    #[test]
    fn test_chain_two_four() {
        // 10 * 4 * 8
        assert_eq!(calculate_chain_score(&[group(1, 4)], 2), 320);
    }

    #[test]
    fn test_two_colors_beat_one() {
        let one = calculate_chain_score(&[group(1, 4)], 1);
        let two = calculate_chain_score(&[group(1, 4), group(2, 4)], 1);
        // 10 * 8 * 3
        assert_eq!(two, 240);
        assert!(two > one);
    }

    #[test]
    fn test_same_color_groups_share_color_bonus() {
        // Two separate red groups: no color bonus, sizes 5 and 6 add 2 + 3.
        assert_eq!(calculate_chain_score(&[group(1, 5), group(1, 6)], 1), 10 * 11 * 5);
    }

    #[test]
    fn test_all_clear_paid_once() {
        let mut engine = ScoreEngine::new();
        engine.flag_all_clear();
        assert!(engine.all_clear_pending());

        let first = engine.score(&[group(1, 4)], 1);
        assert_eq!(first.chain_score, 40);
        assert_eq!(first.all_clear_bonus, ALL_CLEAR_BONUS);
        assert_eq!(first.total, 40 + ALL_CLEAR_BONUS);
        assert_eq!(first.delta(), 40 + ALL_CLEAR_BONUS);

        let second = engine.score(&[group(1, 4)], 1);
        assert_eq!(second.all_clear_bonus, 0);
        assert_eq!(engine.total(), 80 + ALL_CLEAR_BONUS);
        assert!(!engine.all_clear_pending());
    }

    #[test]
    fn test_reset() {
        let mut engine = ScoreEngine::new();
        engine.score(&[group(1, 4)], 3);
        engine.flag_all_clear();
        engine.reset();
        assert_eq!(engine.total(), 0);
        assert!(!engine.all_clear_pending());
    }
}
