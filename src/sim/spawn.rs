//! Probabilistic shape spawning
//!
//! Best effort: a tick may roll no spawn, or roll one and reject it for
//! crowding. Neither is an error.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Shape};
use crate::config::GameConfig;

/// Roll for a new shape at the right edge of the playfield
///
/// Returns the new shape's ID if one was appended.
pub fn try_spawn<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> Option<u32> {
    if !rng.random_bool(config.shape_spawn_rate) {
        return None;
    }

    let size = config.shape_size;
    let candidate = Vec2::new(
        state.playfield.width + size,
        rng.random::<f32>() * (state.playfield.height - size * 2.0) + size,
    );

    if let Some(blocker) = state
        .shapes
        .iter()
        .find(|s| s.pos.distance(candidate) < config.min_shape_distance)
    {
        log::debug!(
            "Spawn at ({:.1}, {:.1}) rejected, too close to shape {}",
            candidate.x,
            candidate.y,
            blocker.id
        );
        return None;
    }

    let kind = config.shape_types[rng.random_range(0..config.shape_types.len())];
    let id = state.next_entity_id();
    state.shapes.push(Shape {
        id,
        pos: candidate,
        kind,
        size,
        speed: config.shape_speed,
        alpha: 1.0,
    });
    log::debug!("Spawned {} #{} at y={:.1}", kind.as_str(), id, candidate.y);

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Playfield, ShapeKind};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn always_spawn() -> GameConfig {
        GameConfig {
            shape_spawn_rate: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_rate_never_spawns() {
        let config = GameConfig {
            shape_spawn_rate: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(&config, Playfield::default(), ShapeKind::Circle);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(try_spawn(&mut state, &config, &mut rng).is_none());
        }
        assert!(state.shapes.is_empty());
    }

    #[test]
    fn test_spawns_at_right_edge_within_bounds() {
        let config = always_spawn();
        let playfield = Playfield::new(800.0, 400.0);
        let mut state = GameState::new(&config, playfield, ShapeKind::Circle);
        let mut rng = Pcg32::seed_from_u64(7);

        let id = try_spawn(&mut state, &config, &mut rng);
        assert!(id.is_some());
        let shape = &state.shapes[0];
        assert_eq!(shape.pos.x, 850.0);
        assert!(shape.pos.y >= 50.0 && shape.pos.y < 350.0);
        assert_eq!(shape.alpha, 1.0);
        assert_eq!(shape.speed, config.shape_speed);
    }

    #[test]
    fn test_rejects_crowded_spawn() {
        // Column too short for two shapes 100 px apart
        let config = always_spawn();
        let playfield = Playfield::new(800.0, 150.0);
        let mut state = GameState::new(&config, playfield, ShapeKind::Circle);
        let mut rng = Pcg32::seed_from_u64(3);

        assert!(try_spawn(&mut state, &config, &mut rng).is_some());
        for _ in 0..100 {
            assert!(try_spawn(&mut state, &config, &mut rng).is_none());
        }
        assert_eq!(state.shapes.len(), 1);
    }

    #[test]
    fn test_uses_configured_shape_types() {
        let config = GameConfig {
            shape_spawn_rate: 1.0,
            min_shape_distance: 0.0,
            shape_types: vec![ShapeKind::Rectangle],
            ..Default::default()
        };
        let mut state = GameState::new(&config, Playfield::default(), ShapeKind::Rectangle);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..20 {
            try_spawn(&mut state, &config, &mut rng);
        }
        assert_eq!(state.shapes.len(), 20);
        assert!(state.shapes.iter().all(|s| s.kind == ShapeKind::Rectangle));
        // Appended in spawn order
        assert!(state.shapes.windows(2).all(|w| w[0].id < w[1].id));
    }

    proptest! {
        #[test]
        fn prop_new_shape_respects_spacing(seed in any::<u64>(), attempts in 1usize..200) {
            let config = always_spawn();
            let mut state = GameState::new(&config, Playfield::new(800.0, 600.0), ShapeKind::Circle);
            let mut rng = Pcg32::seed_from_u64(seed);

            for _ in 0..attempts {
                let before = state.shapes.len();
                if try_spawn(&mut state, &config, &mut rng).is_some() {
                    let newest = &state.shapes[before];
                    for older in &state.shapes[..before] {
                        prop_assert!(older.pos.distance(newest.pos) >= config.min_shape_distance);
                    }
                }
            }
        }
    }
}
