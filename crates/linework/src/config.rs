//! Configuration types for the Linework engine.
//!
//! This module provides configuration structures that control how edges are
//! routed and how pointer interaction is interpreted. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field is
//! optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining routing and interaction settings.
//! - [`RoutingConfig`] - Parameters of the edge path engine and the render optimizer.
//! - [`InteractionConfig`] - Hit-test tolerances, multi-selection and grid snapping.
//!
//! # Example
//!
//! ```
//! # use linework::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.routing().min_segment_length(), 20.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use linework_core::geometry::{self, Point};

use crate::{error::LineworkError, optimizer::RoutingStrategy};

/// Top-level configuration combining routing and interaction settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Routing configuration section.
    #[serde(default)]
    routing: RoutingConfig,

    /// Interaction configuration section.
    #[serde(default)]
    interaction: InteractionConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `routing` - Edge routing parameters.
    /// * `interaction` - Pointer interaction parameters.
    pub fn new(routing: RoutingConfig, interaction: InteractionConfig) -> Self {
        Self {
            routing,
            interaction,
        }
    }

    /// Returns the routing configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Returns the interaction configuration.
    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }

    /// Checks that every numeric parameter is within its usable range.
    ///
    /// # Errors
    ///
    /// Returns [`LineworkError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), LineworkError> {
        self.routing.validate()?;
        self.interaction.validate()
    }
}

/// Parameters of the edge path engine and the render optimizer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Strategy used by the render optimizer.
    strategy: RoutingStrategy,

    /// Perpendicular offset above which an orthogonal path gets corners.
    min_segment_length: f32,

    /// Clearance kept around nodes by orthogonal detours.
    min_distance: f32,

    /// Control point offset of curved paths, as a fraction of the chord length.
    smoothness: f32,

    /// Both deltas below this distance select a straight path in auto mode.
    straight_threshold: f32,

    /// One delta exceeding the other by this factor selects an orthogonal path in auto mode.
    dominance_ratio: f32,

    /// Distance between a path and its label anchor.
    label_offset: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strategy: RoutingStrategy::Auto,
            min_segment_length: 20.0,
            min_distance: 20.0,
            smoothness: 0.25,
            straight_threshold: 50.0,
            dominance_ratio: 2.0,
            label_offset: 10.0,
        }
    }
}

impl RoutingConfig {
    pub fn strategy(&self) -> RoutingStrategy {
        self.strategy
    }

    pub fn min_segment_length(&self) -> f32 {
        self.min_segment_length
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn smoothness(&self) -> f32 {
        self.smoothness
    }

    pub fn straight_threshold(&self) -> f32 {
        self.straight_threshold
    }

    pub fn dominance_ratio(&self) -> f32 {
        self.dominance_ratio
    }

    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    pub fn with_strategy(mut self, strategy: RoutingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_min_segment_length(mut self, length: f32) -> Self {
        self.min_segment_length = length;
        self
    }

    pub fn with_min_distance(mut self, distance: f32) -> Self {
        self.min_distance = distance;
        self
    }

    pub fn with_smoothness(mut self, smoothness: f32) -> Self {
        self.smoothness = smoothness;
        self
    }

    fn validate(&self) -> Result<(), LineworkError> {
        non_negative("routing.min_segment_length", self.min_segment_length)?;
        non_negative("routing.min_distance", self.min_distance)?;
        non_negative("routing.smoothness", self.smoothness)?;
        non_negative("routing.straight_threshold", self.straight_threshold)?;
        non_negative("routing.label_offset", self.label_offset)?;
        if self.dominance_ratio < 1.0 {
            return Err(LineworkError::Config(format!(
                "routing.dominance_ratio must be at least 1, got {}",
                self.dominance_ratio
            )));
        }
        Ok(())
    }
}

/// Pointer interaction parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Distance within which a click still hits a shape or line.
    hit_tolerance: f32,

    /// Distance within which a click grabs an edge waypoint.
    waypoint_tolerance: f32,

    /// Whether more than one item may be selected at once.
    multi_select: bool,

    /// Whether dragged positions snap to the grid.
    snap_to_grid: bool,

    /// Grid spacing used when snapping.
    grid_size: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: 5.0,
            waypoint_tolerance: 8.0,
            multi_select: true,
            snap_to_grid: false,
            grid_size: 10.0,
        }
    }
}

impl InteractionConfig {
    pub fn hit_tolerance(&self) -> f32 {
        self.hit_tolerance
    }

    pub fn waypoint_tolerance(&self) -> f32 {
        self.waypoint_tolerance
    }

    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn with_hit_tolerance(mut self, tolerance: f32) -> Self {
        self.hit_tolerance = tolerance;
        self
    }

    pub fn with_multi_select(mut self, enabled: bool) -> Self {
        self.multi_select = enabled;
        self
    }

    pub fn with_snap_to_grid(mut self, enabled: bool, grid_size: f32) -> Self {
        self.snap_to_grid = enabled;
        self.grid_size = grid_size;
        self
    }

    /// Rounds `point` to the nearest grid intersection when snapping is enabled.
    pub fn snap_point(&self, point: Point) -> Point {
        if self.snap_to_grid {
            geometry::snap_to_grid(point, self.grid_size)
        } else {
            point
        }
    }

    fn validate(&self) -> Result<(), LineworkError> {
        non_negative("interaction.hit_tolerance", self.hit_tolerance)?;
        non_negative("interaction.waypoint_tolerance", self.waypoint_tolerance)?;
        if self.snap_to_grid && self.grid_size <= 0.0 {
            return Err(LineworkError::Config(format!(
                "interaction.grid_size must be positive when snapping is enabled, got {}",
                self.grid_size
            )));
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), LineworkError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LineworkError::Config(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        let routing = config.routing();
        assert_eq!(routing.strategy(), RoutingStrategy::Auto);
        assert_eq!(routing.min_segment_length(), 20.0);
        assert_eq!(routing.min_distance(), 20.0);
        assert_eq!(routing.smoothness(), 0.25);
        assert_eq!(routing.straight_threshold(), 50.0);
        assert_eq!(routing.dominance_ratio(), 2.0);
        assert_eq!(routing.label_offset(), 10.0);

        let interaction = config.interaction();
        assert_eq!(interaction.hit_tolerance(), 5.0);
        assert_eq!(interaction.waypoint_tolerance(), 8.0);
        assert!(interaction.multi_select());
        assert!(!interaction.snap_to_grid());
        assert_eq!(interaction.grid_size(), 10.0);
    }

    #[test]
    fn test_snap_point() {
        let snapping = InteractionConfig::default().with_snap_to_grid(true, 10.0);
        assert_eq!(snapping.snap_point(Point::new(12.0, 17.0)), Point::new(10.0, 20.0));

        let free = InteractionConfig::default();
        assert_eq!(free.snap_point(Point::new(12.0, 17.0)), Point::new(12.0, 17.0));
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let config = AppConfig::new(
            RoutingConfig::default().with_min_segment_length(-1.0),
            InteractionConfig::default(),
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("routing.min_segment_length"));
    }

    #[test]
    fn test_validate_rejects_zero_grid_when_snapping() {
        let config = AppConfig::new(
            RoutingConfig::default(),
            InteractionConfig::default().with_snap_to_grid(true, 0.0),
        );
        assert!(matches!(config.validate(), Err(LineworkError::Config(_))));

        let config = AppConfig::new(
            RoutingConfig::default(),
            InteractionConfig::default().with_snap_to_grid(false, 0.0),
        );
        assert!(config.validate().is_ok());
    }
}
