//! Deck configuration.
//!
//! Pure data. Values are either built in code from [`DeckConfig::default`]
//! or loaded once at startup from a TOML file:
//!
//! ```toml
//! [deck]
//! direction = "down"
//! item_display_count = 5
//!
//! [shuffle]
//! max_degrees = 8.0
//! step_delay_ms = 150
//! ```
//!
//! Every field is optional. Anything that consumes a config validates it,
//! so a non-positive offset or an empty display count never reaches the
//! controller.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, DeckResult};

/// Visual growth direction of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Cards further down the stack peek out above the top card.
    Up,
    /// Cards further down the stack peek out below the top card.
    #[default]
    Down,
}

impl Direction {
    /// Sign applied to the stacking offset.
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Up => -1.0,
            Self::Down => 1.0,
        }
    }
}

/// Stacking and drag parameters for a deck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Visual direction of the stack.
    pub direction: Direction,
    /// Max number of cards rendered with stacking offsets.
    pub item_display_count: usize,
    /// Whether the last card is always part of the visible subset.
    pub always_show_last_item: bool,
    /// Shrink factor applied per stack depth step.
    pub scale_offset: f32,
    /// Vertical displacement applied per stack depth step.
    pub vertical_offset: f32,
    /// Degrees of rotation per point of horizontal drag.
    pub drag_rotation_factor: f32,
    /// Horizontal drag distance beyond which a swipe commits.
    pub horizontal_drag_threshold: f32,
    /// Vertical drag distance beyond which a swipe commits.
    pub vertical_drag_threshold: f32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            item_display_count: 10,
            always_show_last_item: true,
            scale_offset: 0.02,
            vertical_offset: 10.0,
            drag_rotation_factor: 0.01,
            horizontal_drag_threshold: 100.0,
            vertical_drag_threshold: 250.0,
        }
    }
}

impl DeckConfig {
    /// Sets the stack direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the max number of displayed cards.
    #[must_use]
    pub const fn with_item_display_count(mut self, count: usize) -> Self {
        self.item_display_count = count;
        self
    }

    /// Sets whether the last card is always shown.
    #[must_use]
    pub const fn with_always_show_last_item(mut self, show: bool) -> Self {
        self.always_show_last_item = show;
        self
    }

    /// Sets both drag thresholds.
    #[must_use]
    pub const fn with_drag_thresholds(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_drag_threshold = horizontal;
        self.vertical_drag_threshold = vertical;
        self
    }

    /// Returns a modified copy of this configuration.
    #[must_use]
    pub fn modified(mut self, modification: impl FnOnce(&mut Self)) -> Self {
        modification(&mut self);
        self
    }

    /// Picks the explicit configuration if there is one, else the ambient one.
    #[must_use]
    pub fn resolve(explicit: Option<Self>, ambient: &Self) -> Self {
        explicit.unwrap_or(*ambient)
    }

    /// Checks every invariant and returns the config unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidConfig`] for a zero display count, a
    /// non-positive scale or vertical offset, or a non-positive threshold.
    pub fn validated(self) -> DeckResult<Self> {
        if self.item_display_count == 0 {
            return Err(invalid("item_display_count", "must be greater than zero"));
        }
        ensure_positive("scale_offset", self.scale_offset)?;
        ensure_positive("vertical_offset", self.vertical_offset)?;
        ensure_positive("horizontal_drag_threshold", self.horizontal_drag_threshold)?;
        ensure_positive("vertical_drag_threshold", self.vertical_drag_threshold)?;
        if !self.drag_rotation_factor.is_finite() {
            return Err(invalid("drag_rotation_factor", "must be finite"));
        }
        Ok(self)
    }
}

/// Shuffle animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleConfig {
    /// Max rotation applied to a card per step, in degrees.
    pub max_degrees: f32,
    /// Max horizontal offset applied to a card per step.
    pub max_offset_x: f32,
    /// Max vertical offset applied to a card per step.
    pub max_offset_y: f32,
    /// Delay between two animation steps, in milliseconds.
    pub step_delay_ms: u64,
    /// Number of shuffles used when the caller does not pick one.
    pub default_times: usize,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            max_degrees: 6.0,
            max_offset_x: 6.0,
            max_offset_y: 6.0,
            step_delay_ms: 200,
            default_times: 3,
        }
    }
}

impl ShuffleConfig {
    /// Delay between two animation steps.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Checks every invariant and returns the config unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidConfig`] if a max value is negative or
    /// not finite.
    pub fn validated(self) -> DeckResult<Self> {
        ensure_non_negative("max_degrees", self.max_degrees)?;
        ensure_non_negative("max_offset_x", self.max_offset_x)?;
        ensure_non_negative("max_offset_y", self.max_offset_y)?;
        Ok(self)
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckKitConfig {
    /// Stack layout and drag thresholds.
    pub deck: DeckConfig,
    /// Shuffle animation.
    pub shuffle: ShuffleConfig,
}

impl DeckKitConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::ConfigParse`] for malformed TOML and
    /// [`DeckError::InvalidConfig`] for values that break an invariant.
    pub fn from_toml_str(source: &str) -> DeckResult<Self> {
        let config: Self = toml::from_str(source)?;
        Ok(Self {
            deck: config.deck.validated()?,
            shuffle: config.shuffle.validated()?,
        })
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::ConfigIo`] if the file cannot be read, plus
    /// everything [`DeckKitConfig::from_toml_str`] can return.
    pub fn load(path: impl AsRef<Path>) -> DeckResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded deck configuration from {}", path.display());
        Ok(config)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> DeckError {
    DeckError::InvalidConfig { field, reason }
}

fn ensure_positive(field: &'static str, value: f32) -> DeckResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, "must be a positive finite number"));
    }
    Ok(())
}

fn ensure_non_negative(field: &'static str, value: f32) -> DeckResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, "must be a non-negative finite number"));
    }
    Ok(())
}
