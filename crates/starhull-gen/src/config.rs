//! Generation parameters.

use serde::{Deserialize, Serialize};
use starhull_math::{Dir3, Vec3};

/// Axis used when hull segments get their small lateral twist.
///
/// Cube-based hulls read best twisting about Z; a generator variant with
/// a different forward convention can pick another axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAxis {
    /// World X.
    X,
    /// World Y.
    Y,
    /// World Z.
    Z,
}

impl RotationAxis {
    /// The corresponding unit axis.
    pub fn axis(self) -> Dir3 {
        match self {
            RotationAxis::X => Vec3::x_axis(),
            RotationAxis::Y => Vec3::y_axis(),
            RotationAxis::Z => Vec3::z_axis(),
        }
    }
}

/// Tunable generation parameters.
///
/// The defaults are the tuned values the generator ships with; all
/// ranges are half-open, `[min, max)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Share export index slots between faces meeting at a corner
    /// (soft shading) instead of hard per-face seams.
    pub smooth_shading: bool,
    /// Minimum hull segments grown per side face.
    pub hull_segments_min: i32,
    /// Maximum (exclusive) hull segments grown per side face.
    pub hull_segments_max: i32,
    /// Grow irregular outcroppings after the main hull.
    pub create_asymmetry_segments: bool,
    /// Minimum protrusion chain length.
    pub asymmetry_segments_min: i32,
    /// Maximum (exclusive) protrusion chain length.
    pub asymmetry_segments_max: i32,
    /// Classify and decorate faces after the hull is grown.
    pub create_face_detail: bool,
    /// Allow the horizontal mirroring pass (draw-only for now).
    pub allow_horizontal_symmetry: bool,
    /// Allow the vertical mirroring pass (draw-only for now).
    pub allow_vertical_symmetry: bool,
    /// Reserved: run a bevel pass over hard edges.
    pub apply_bevel_modifier: bool,
    /// Axis for the hull segments' lateral twist.
    pub hull_rotation_axis: RotationAxis,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            smooth_shading: false,
            hull_segments_min: 3,
            hull_segments_max: 6,
            create_asymmetry_segments: true,
            asymmetry_segments_min: 1,
            asymmetry_segments_max: 5,
            create_face_detail: true,
            allow_horizontal_symmetry: true,
            allow_vertical_symmetry: true,
            apply_bevel_modifier: true,
            hull_rotation_axis: RotationAxis::Z,
        }
    }
}
