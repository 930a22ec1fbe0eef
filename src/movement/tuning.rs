//! Movement data tables and shaping tuning
//!
//! Two layers of configuration: per-template stat records (JSON, keyed by
//! template id) and shared shaping tuning (TOML, one table per role). Both
//! load with a warn-and-default fallback so a broken file never takes the
//! game down.

use bevy::log::{info, warn};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::constants::*;

fn default_max_hp() -> f32 {
    MAX_HP
}
fn default_max_speed() -> f32 {
    MAX_SPEED
}
fn default_jump_force() -> f32 {
    JUMP_FORCE
}
fn default_jump_to_mid() -> f32 {
    JUMP_TO_MID_SPEED_THRESHOLD
}
fn default_mid_to_fall() -> f32 {
    MID_TO_FALL_SPEED_THRESHOLD
}
fn default_coyote_time() -> f32 {
    COYOTE_TIME_DURATION
}
fn default_dash_speed() -> f32 {
    DASH_SPEED
}
fn default_dash_duration() -> f32 {
    DASH_DURATION
}
fn default_dash_cool_time() -> f32 {
    DASH_COOL_TIME
}
fn default_path_update_interval() -> f32 {
    PATH_UPDATE_INTERVAL
}

/// Per-template movement and stat record, copied onto each spawned actor
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct MovementStats {
    pub template_id: u32,
    #[serde(default = "default_max_hp")]
    pub max_hp: f32,
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    #[serde(default = "default_jump_force")]
    pub jump_force: f32,
    /// Rising faster than this shows the jump-rise clip
    #[serde(default = "default_jump_to_mid")]
    pub jump_to_mid_speed_threshold: f32,
    /// Falling below this leaves Jump for Fall
    #[serde(default = "default_mid_to_fall")]
    pub mid_to_fall_speed_threshold: f32,
    #[serde(default = "default_coyote_time")]
    pub coyote_time_duration: f32,
    #[serde(default = "default_dash_speed")]
    pub dash_speed: f32,
    #[serde(default = "default_dash_duration")]
    pub dash_duration: f32,
    #[serde(default = "default_dash_cool_time")]
    pub dash_cool_time: f32,
    #[serde(default = "default_path_update_interval")]
    pub path_update_interval: f32,
}

impl Default for MovementStats {
    fn default() -> Self {
        Self {
            template_id: 0,
            max_hp: MAX_HP,
            max_speed: MAX_SPEED,
            jump_force: JUMP_FORCE,
            jump_to_mid_speed_threshold: JUMP_TO_MID_SPEED_THRESHOLD,
            mid_to_fall_speed_threshold: MID_TO_FALL_SPEED_THRESHOLD,
            coyote_time_duration: COYOTE_TIME_DURATION,
            dash_speed: DASH_SPEED,
            dash_duration: DASH_DURATION,
            dash_cool_time: DASH_COOL_TIME,
            path_update_interval: PATH_UPDATE_INTERVAL,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MovementDataFile {
    templates: Vec<MovementStats>,
}

/// Movement stat records keyed by template id
#[derive(Resource, Debug, Default)]
pub struct MovementDatabase {
    templates: HashMap<u32, MovementStats>,
}

impl MovementDatabase {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let file: MovementDataFile = serde_json::from_str(text)?;
        let mut templates = HashMap::new();
        for record in file.templates {
            templates.insert(record.template_id, record);
        }
        Ok(Self { templates })
    }

    /// Load from file, or return an empty database if missing or malformed
    pub fn load_from_file(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("No movement data file at {}, using defaults", path);
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_json(&content) {
                Ok(db) => {
                    info!("Loaded {} movement templates from {}", db.templates.len(), path);
                    db
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn get(&self, template_id: u32) -> Option<&MovementStats> {
        self.templates.get(&template_id)
    }

    /// Template record by id, falling back to defaults for unknown ids
    pub fn get_or_default(&self, template_id: u32) -> MovementStats {
        self.get(template_id).cloned().unwrap_or_default()
    }
}

fn default_ground_accel_time() -> f32 {
    GROUND_ACCEL_TIME
}
fn default_air_accel_time() -> f32 {
    AIR_ACCEL_TIME
}
fn default_ground_friction() -> f32 {
    GROUND_FRICTION
}
fn default_fall_multiplier() -> f32 {
    FALL_MULTIPLIER
}
fn default_low_jump_multiplier() -> f32 {
    LOW_JUMP_MULTIPLIER
}
fn default_left_line_offset() -> [f32; 2] {
    [-0.5, 0.5]
}
fn default_right_line_offset() -> [f32; 2] {
    [0.5, 0.5]
}
fn default_wall_slide_max_speed() -> f32 {
    WALL_SLIDE_MAX_SPEED
}

/// Shared shaping parameters for one actor role
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct MovementTuning {
    /// Smooth-damp time toward target speed while grounded
    #[serde(default = "default_ground_accel_time")]
    pub ground_accel_time: f32,
    /// Smooth-damp time toward target speed while airborne
    #[serde(default = "default_air_accel_time")]
    pub air_accel_time: f32,
    /// Per-tick horizontal velocity factor when grounded with no intent
    #[serde(default = "default_ground_friction")]
    pub ground_friction: f32,
    /// Extra gravity factor while falling
    #[serde(default = "default_fall_multiplier")]
    pub fall_multiplier: f32,
    /// Extra gravity factor while rising without the jump key held
    #[serde(default = "default_low_jump_multiplier")]
    pub low_jump_multiplier: f32,
    /// Wall probe origin offset on the left side
    #[serde(default = "default_left_line_offset")]
    pub left_line_offset: [f32; 2],
    /// Wall probe origin offset on the right side
    #[serde(default = "default_right_line_offset")]
    pub right_line_offset: [f32; 2],
    #[serde(default = "default_wall_slide_max_speed")]
    pub wall_slide_max_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            ground_accel_time: GROUND_ACCEL_TIME,
            air_accel_time: AIR_ACCEL_TIME,
            ground_friction: GROUND_FRICTION,
            fall_multiplier: FALL_MULTIPLIER,
            low_jump_multiplier: LOW_JUMP_MULTIPLIER,
            left_line_offset: default_left_line_offset(),
            right_line_offset: default_right_line_offset(),
            wall_slide_max_speed: WALL_SLIDE_MAX_SPEED,
        }
    }
}

impl MovementTuning {
    pub fn left_offset(&self) -> Vec2 {
        Vec2::from(self.left_line_offset)
    }

    pub fn right_offset(&self) -> Vec2 {
        Vec2::from(self.right_line_offset)
    }
}

/// Tuning tables per role, loaded from the movement tuning TOML
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementTuningSet {
    #[serde(default)]
    pub player: MovementTuning,
    #[serde(default)]
    pub creature: MovementTuning,
}

impl MovementTuningSet {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from file, or return defaults if missing or malformed
    pub fn load_from_file(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("No tuning file at {}, using defaults", path);
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(set) => {
                    info!("Loaded movement tuning from {}", path);
                    set
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}
