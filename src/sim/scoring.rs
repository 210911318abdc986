//! Scoring and power engine
//!
//! Applies a resolved click to score, combo and power. Every mutation clamps
//! to the documented bounds rather than trusting the incoming state.

use glam::Vec2;

use super::state::{Feedback, GameState, Shape};
use crate::config::GameConfig;
use crate::consts::{FEEDBACK_COLOR_CORRECT, FEEDBACK_COLOR_WRONG, FEEDBACK_OFFSET_Y};

/// Result of applying one click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Correct { points: u64 },
    Incorrect { penalty: u64 },
}

/// Points for a correct click at the given combo (1 = first in a row)
///
/// `floor(correct_shape_points * combo_multiplier^(combo - 1))`
pub fn points_for_combo(config: &GameConfig, combo: u32) -> u64 {
    let exponent = combo.saturating_sub(1).min(i32::MAX as u32) as i32;
    let points = config.correct_shape_points as f64 * config.combo_multiplier.powi(exponent);
    // Float-to-int casts saturate, so runaway combos cap at u64::MAX
    points.floor() as u64
}

/// Apply a clicked shape to the round
pub fn apply_click(
    state: &mut GameState,
    config: &GameConfig,
    shape: &Shape,
) -> (ClickOutcome, Feedback) {
    let feedback_pos = shape.pos - Vec2::new(0.0, FEEDBACK_OFFSET_Y);

    if shape.kind == state.target {
        state.combo = state.combo.saturating_add(1);
        let points = points_for_combo(config, state.combo);
        state.score = state.score.saturating_add(points);
        state.power = (state.power + config.correct_shape_power).clamp(0.0, config.max_power);

        log::debug!(
            "Correct {}: +{} (combo {}, score {})",
            shape.kind.as_str(),
            points,
            state.combo,
            state.score
        );
        (
            ClickOutcome::Correct { points },
            Feedback {
                text: format!("+ {}", points),
                color: FEEDBACK_COLOR_CORRECT,
                pos: feedback_pos,
            },
        )
    } else {
        let penalty = config.wrong_shape_penalty as u64;
        state.combo = 0;
        state.score = state.score.saturating_sub(penalty);
        state.power = (state.power - config.wrong_shape_power_loss).clamp(0.0, config.max_power);

        log::debug!(
            "Wrong {} (target {}): -{} (score {})",
            shape.kind.as_str(),
            state.target.as_str(),
            penalty,
            state.score
        );
        (
            ClickOutcome::Incorrect { penalty },
            Feedback {
                text: format!("- {}", penalty),
                color: FEEDBACK_COLOR_WRONG,
                pos: feedback_pos,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Playfield, ShapeKind};
    use proptest::prelude::*;

    fn setup(target: ShapeKind) -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let state = GameState::new(&config, Playfield::default(), target);
        (state, config)
    }

    fn shape(kind: ShapeKind) -> Shape {
        Shape {
            id: 1,
            pos: Vec2::new(200.0, 150.0),
            kind,
            size: 50.0,
            speed: 3.0,
            alpha: 1.0,
        }
    }

    #[test]
    fn test_combo_point_curve() {
        let config = GameConfig::default();
        assert_eq!(points_for_combo(&config, 1), 10);
        assert_eq!(points_for_combo(&config, 2), 15);
        assert_eq!(points_for_combo(&config, 3), 22);
        assert_eq!(points_for_combo(&config, 4), 33);
    }

    #[test]
    fn test_consecutive_correct_clicks_build_combo() {
        let (mut state, config) = setup(ShapeKind::Circle);
        for _ in 0..4 {
            apply_click(&mut state, &config, &shape(ShapeKind::Circle));
        }
        assert_eq!(state.combo, 4);
        assert_eq!(state.score, 10 + 15 + 22 + 33);
        assert_eq!(state.power, 40.0);
    }

    #[test]
    fn test_wrong_click_resets_combo() {
        let (mut state, config) = setup(ShapeKind::Circle);
        apply_click(&mut state, &config, &shape(ShapeKind::Circle));
        apply_click(&mut state, &config, &shape(ShapeKind::Circle));
        let (outcome, feedback) = apply_click(&mut state, &config, &shape(ShapeKind::Square));

        assert_eq!(outcome, ClickOutcome::Incorrect { penalty: 5 });
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 25 - 5);
        assert_eq!(feedback.text, "- 5");
        assert_eq!(feedback.color, FEEDBACK_COLOR_WRONG);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let (mut state, config) = setup(ShapeKind::Circle);
        state.score = 3;
        apply_click(&mut state, &config, &shape(ShapeKind::Triangle));
        assert_eq!(state.score, 0);
        apply_click(&mut state, &config, &shape(ShapeKind::Triangle));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_power_caps_at_max() {
        let (mut state, config) = setup(ShapeKind::Circle);
        state.power = 95.0;
        apply_click(&mut state, &config, &shape(ShapeKind::Circle));
        assert_eq!(state.power, config.max_power);
    }

    #[test]
    fn test_feedback_above_shape() {
        let (mut state, config) = setup(ShapeKind::Circle);
        let (outcome, feedback) = apply_click(&mut state, &config, &shape(ShapeKind::Circle));
        assert_eq!(outcome, ClickOutcome::Correct { points: 10 });
        assert_eq!(feedback.text, "+ 10");
        assert_eq!(feedback.color, FEEDBACK_COLOR_CORRECT);
        assert_eq!(feedback.pos, Vec2::new(200.0, 120.0));
    }

    proptest! {
        #[test]
        fn prop_state_stays_in_bounds(
            clicks in proptest::collection::vec(any::<bool>(), 0..200),
            start_score in 0u64..50,
            start_power in -50.0f32..200.0,
        ) {
            let (mut state, config) = setup(ShapeKind::Square);
            state.score = start_score;
            state.power = start_power;

            for correct in clicks {
                let kind = if correct { ShapeKind::Square } else { ShapeKind::Circle };
                apply_click(&mut state, &config, &shape(kind));
                prop_assert!(state.power >= 0.0 && state.power <= config.max_power);
                if !correct {
                    prop_assert_eq!(state.combo, 0);
                }
            }
        }

        #[test]
        fn prop_points_match_formula(combo in 1u32..20) {
            let config = GameConfig::default();
            let expected = (10.0 * 1.5f64.powi(combo as i32 - 1)).floor() as u64;
            prop_assert_eq!(points_for_combo(&config, combo), expected);
        }
    }
}
