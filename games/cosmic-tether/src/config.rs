//! Tuning for Cosmic Tether, loadable from JSON.
//!
//! Every field has a default, so a host may send a partial document
//! (e.g. `{"energy": {"grab_cost": 20}}`) and keep the rest.

use serde::Deserialize;
use tether_engine::VectorColor;

use crate::error::TetherError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TetherConfig {
    pub gravity: GravityConfig,
    pub energy: EnergyConfig,
    pub spawn: SpawnConfig,
    pub visual: VisualConfig,
    pub categories: Vec<IdealCategory>,
}

/// Attraction toward the black hole and the shrink sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub base_speed: f32,
    pub accel: f32,
    pub max_speed: f32,
    /// Distance floor for falling ideals.
    pub min_dist: f32,
    /// Share of an ideal's radius that may overlap the zone before it is caught.
    pub collision_multiplier: f32,
    /// Shrinking ideals closer than this to the center are destroyed.
    pub remove_epsilon: f32,
    /// Zone radius as a fraction of surface width.
    pub zone_radius_fraction: f32,
    /// Multipliers applied to `accel` and `max_speed` while shrinking.
    pub shrink_accel_factor: f32,
    pub shrink_max_speed_factor: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub max: f32,
    pub grab_cost: f32,
    /// Added every tick.
    pub regen: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Milliseconds between spawns while running.
    pub interval_ms: f32,
    /// Distance outside the visible bounds where ideals appear.
    pub margin: f32,
}

/// Black-hole visual generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub disc_count: usize,
    /// Phase advance per tick.
    pub disc_speed: f32,
    /// Draw every n-th disc outline.
    pub disc_stride: usize,
    pub line_count: usize,
    pub line_opacity: f32,
    pub stroke_width: f32,
    pub stroke_color: String,
    pub particle_count: usize,
}

/// One kind of ideal: what the host shows and how big it is.
#[derive(Debug, Clone, Deserialize)]
pub struct IdealCategory {
    pub label: String,
    pub icon: String,
    pub color: String,
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_radius() -> f32 {
    40.0
}

impl IdealCategory {
    pub fn new(label: &str, icon: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            radius: default_radius(),
        }
    }

    /// Tint for layout instances; unparseable colors fall back to white.
    pub fn tint(&self) -> VectorColor {
        VectorColor::from_hex(&self.color).unwrap_or(VectorColor::WHITE)
    }
}

impl Default for TetherConfig {
    fn default() -> Self {
        Self {
            gravity: GravityConfig::default(),
            energy: EnergyConfig::default(),
            spawn: SpawnConfig::default(),
            visual: VisualConfig::default(),
            categories: default_categories(),
        }
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.3,
            accel: 90.0,
            max_speed: 4.0,
            min_dist: 10.0,
            collision_multiplier: 0.5,
            remove_epsilon: 2.0,
            zone_radius_fraction: 0.15,
            shrink_accel_factor: 0.5,
            shrink_max_speed_factor: 0.8,
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max: 100.0,
            grab_cost: 12.0,
            regen: 0.16,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1400.0,
            margin: 80.0,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            disc_count: 100,
            disc_speed: 0.0005,
            disc_stride: 6,
            line_count: 100,
            line_opacity: 0.5,
            stroke_width: 1.0,
            stroke_color: "#444444".to_string(),
            particle_count: 150,
        }
    }
}

impl VisualConfig {
    pub fn stroke(&self) -> VectorColor {
        VectorColor::from_hex(&self.stroke_color).unwrap_or(VectorColor::rgb8(0x44, 0x44, 0x44))
    }
}

pub fn default_categories() -> Vec<IdealCategory> {
    vec![
        IdealCategory::new("Education", "🎓", "#87cefa"),
        IdealCategory::new("Wealth", "💰", "#ffd700"),
        IdealCategory::new("Freedom", "🕊️", "#f0f8ff"),
        IdealCategory::new("Health", "❤️", "#ffb6c1"),
        IdealCategory::new("Art", "🎨", "#dda0dd"),
        IdealCategory::new("Justice", "⚖️", "#e6e6fa"),
        IdealCategory::new("Love", "💖", "#ffefd5"),
        IdealCategory::new("Knowledge", "💡", "#f5f5dc"),
        IdealCategory::new("Nature", "🌳", "#98fb98"),
        IdealCategory::new("Community", "🤝", "#ffdab9"),
    ]
}

impl TetherConfig {
    /// Parse and validate a JSON tuning document.
    pub fn from_json(json: &str) -> Result<Self, TetherError> {
        let config: TetherConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TetherError> {
        if self.categories.is_empty() {
            return Err(TetherError::InvalidConfig("no ideal categories".into()));
        }
        if let Some(c) = self.categories.iter().find(|c| !(c.radius > 0.0)) {
            return Err(TetherError::InvalidConfig(format!(
                "category {} has radius {}",
                c.label, c.radius
            )));
        }
        if self.energy.max <= 0.0 || self.energy.grab_cost < 0.0 || self.energy.regen < 0.0 {
            return Err(TetherError::InvalidConfig("energy values out of range".into()));
        }
        if self.spawn.interval_ms <= 0.0 {
            return Err(TetherError::InvalidConfig("spawn interval must be positive".into()));
        }
        if self.gravity.min_dist <= 0.0 || self.gravity.max_speed <= 0.0 {
            return Err(TetherError::InvalidConfig("gravity values out of range".into()));
        }
        if self.visual.disc_stride == 0 {
            return Err(TetherError::InvalidConfig("disc stride must be at least 1".into()));
        }
        Ok(())
    }

    /// Spawn period in seconds.
    pub fn spawn_period(&self) -> f32 {
        self.spawn.interval_ms / 1000.0
    }
}
