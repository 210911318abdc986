//! Game state and core simulation types
//!
//! Everything a round mutates lives in [`GameState`]; renderers only ever see
//! a [`Snapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;

/// Collectible shape types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
    Rectangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Rectangle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Square => "square",
            ShapeKind::Rectangle => "rectangle",
        }
    }

    /// Objective text shown to the player, e.g. "Collect Triangles"
    pub fn task_banner(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("Collect {}s", capitalized)
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// No round active (never started, or stopped externally)
    #[default]
    Idle,
    /// Simulation and countdown are live
    Running,
    /// Timer ran out
    Ended,
}

/// Bounded region the character and shapes move in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAYFIELD_WIDTH,
            height: DEFAULT_PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }

    /// True for finite points within the bounds, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        point.is_finite()
            && (0.0..=self.width).contains(&point.x)
            && (0.0..=self.height).contains(&point.y)
    }
}

/// The character walking across the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame, rightward
    pub speed: f32,
}

impl Character {
    pub fn new(config: &GameConfig, playfield: &Playfield) -> Self {
        Self {
            pos: Vec2::new(config.character_start_x, playfield.center_y()),
            size: config.character_size,
            speed: config.character_speed,
        }
    }

    /// Move right, wrap past the right edge, stay vertically centered
    pub fn advance(&mut self, playfield: &Playfield) {
        self.pos.x += self.speed;
        if self.pos.x > playfield.width + self.size {
            self.pos.x = -self.size;
        }
        self.pos.y = playfield.center_y();
    }
}

/// A drifting shape entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: u32,
    /// Center of the shape
    pub pos: Vec2,
    pub kind: ShapeKind,
    pub size: f32,
    /// Pixels per frame, leftward
    pub speed: f32,
    /// Always 1.0 for now, reserved for fades
    pub alpha: f32,
}

impl Shape {
    /// True once the trailing edge has passed the left boundary
    #[inline]
    pub fn is_past_left_edge(&self) -> bool {
        self.pos.x + self.size < 0.0
    }
}

/// Transient click feedback; renderers may drop it freely
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub text: String,
    pub color: &'static str,
    pub pos: Vec2,
}

/// Values shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudUpdate {
    pub score: u64,
    pub time_left: u32,
    pub combo: u32,
    /// 0-100
    pub power_percent: f32,
}

/// Notifications for display collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    TargetAssigned { target: ShapeKind, banner: String },
    Hud(HudUpdate),
    Feedback(Feedback),
    RoundEnded { final_score: u64, final_combo: u32 },
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    /// Consecutive correct clicks
    pub combo: u32,
    /// Seconds remaining
    pub time_left: u32,
    /// Power meter, clamped to [0, max_power]
    pub power: f32,
    /// The shape type that scores this round
    pub target: ShapeKind,
    /// Spawn order; last is newest
    pub shapes: Vec<Shape>,
    pub character: Character,
    pub playfield: Playfield,
    /// Simulation frames since round start
    pub frames: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state for a round about to start
    pub fn new(config: &GameConfig, playfield: Playfield, target: ShapeKind) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            combo: 0,
            time_left: config.initial_time,
            power: 0.0,
            target,
            shapes: Vec::new(),
            character: Character::new(config, &playfield),
            playfield,
            frames: 0,
            next_id: 1,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn power_percent(&self, max_power: f32) -> f32 {
        if max_power > 0.0 {
            (self.power / max_power * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn hud(&self, max_power: f32) -> HudUpdate {
        HudUpdate {
            score: self.score,
            time_left: self.time_left,
            combo: self.combo,
            power_percent: self.power_percent(max_power),
        }
    }
}

/// A shape as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeView {
    pub pos: Vec2,
    pub kind: ShapeKind,
    pub size: f32,
    pub alpha: f32,
    /// Collectible this round (drawn highlighted)
    pub is_target: bool,
}

/// Read-only per-frame view for rendering and HUD binding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub playfield: Playfield,
    pub character: Character,
    pub shapes: Vec<ShapeView>,
    pub target: ShapeKind,
    pub score: u64,
    pub combo: u32,
    /// e.g. "3x"
    pub combo_label: String,
    pub time_left: u32,
    pub power_percent: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState, max_power: f32) -> Self {
        Self {
            phase: state.phase,
            playfield: state.playfield,
            character: state.character.clone(),
            shapes: state
                .shapes
                .iter()
                .map(|s| ShapeView {
                    pos: s.pos,
                    kind: s.kind,
                    size: s.size,
                    alpha: s.alpha,
                    is_target: s.kind == state.target,
                })
                .collect(),
            target: state.target,
            score: state.score,
            combo: state.combo,
            combo_label: format!("{}x", state.combo),
            time_left: state.time_left,
            power_percent: state.power_percent(max_power),
        }
    }
}
