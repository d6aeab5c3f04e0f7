//! Parameter sets for every builder, with defaults, validation, and JSON
//! round trips.
//!
//! Field names serialize in camelCase (`widthSegments`, `capSegments`) and
//! missing fields take their defaults. Segment counts accept fractional
//! numbers and are truncated toward zero.

use serde::{Deserialize, Deserializer, Serialize};
use shapegen_core::{MeshError, Result, Validate};
use shapegen_math::Point2;

use crate::mesh_data::MeshData;

/// Truncate a numeric segment count toward zero.
///
/// Negative and NaN inputs saturate to 0 and infinite inputs to `u32::MAX`;
/// validation then rejects whatever falls below the field's minimum.
pub fn truncate_count(value: f64) -> u32 {
    value as u32
}

fn truncated_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(truncate_count)
}

fn check_extent(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MeshError::invalid(field, format!("must be finite, got {}", value)));
    }
    if value < 0.0 {
        return Err(MeshError::invalid(field, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

fn check_count(field: &'static str, value: u32, min: u32) -> Result<()> {
    if value < min {
        return Err(MeshError::invalid(
            field,
            format!("must be >= {}, got {}", min, value),
        ));
    }
    Ok(())
}

/// Axis-aligned box centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoxParameters {
    /// Extent along X.
    pub width: f64,
    /// Extent along Y.
    pub height: f64,
    /// Extent along Z.
    pub depth: f64,
    #[serde(deserialize_with = "truncated_count")]
    pub width_segments: u32,
    #[serde(deserialize_with = "truncated_count")]
    pub height_segments: u32,
    #[serde(deserialize_with = "truncated_count")]
    pub depth_segments: u32,
}

impl BoxParameters {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            ..Self::default()
        }
    }

    pub fn with_segments(mut self, width: u32, height: u32, depth: u32) -> Self {
        self.width_segments = width;
        self.height_segments = height;
        self.depth_segments = depth;
        self
    }

    /// Set segment counts from fractional input, truncating toward zero.
    pub fn with_fractional_segments(self, width: f64, height: f64, depth: f64) -> Self {
        self.with_segments(
            truncate_count(width),
            truncate_count(height),
            truncate_count(depth),
        )
    }
}

impl Default for BoxParameters {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }
}

impl Validate for BoxParameters {
    fn validate(&self) -> Result<()> {
        check_extent("width", self.width)?;
        check_extent("height", self.height)?;
        check_extent("depth", self.depth)?;
        check_count("widthSegments", self.width_segments, 1)?;
        check_count("heightSegments", self.height_segments, 1)?;
        check_count("depthSegments", self.depth_segments, 1)
    }
}

/// Capsule along the Y axis: two hemispheres joined by a cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CapsuleParameters {
    pub radius: f64,
    /// Straight span between the hemisphere centers.
    pub length: f64,
    /// Arc resolution of each hemisphere.
    #[serde(deserialize_with = "truncated_count")]
    pub cap_segments: u32,
    /// Number of sides around the axis.
    #[serde(deserialize_with = "truncated_count")]
    pub radial_segments: u32,
}

impl CapsuleParameters {
    pub const MIN_CAP_SEGMENTS: u32 = 1;
    pub const MIN_RADIAL_SEGMENTS: u32 = 3;

    pub fn new(radius: f64, length: f64, cap_segments: u32, radial_segments: u32) -> Self {
        Self {
            radius,
            length,
            cap_segments,
            radial_segments,
        }
    }
}

impl Default for CapsuleParameters {
    fn default() -> Self {
        Self::new(1.0, 1.0, 4, 8)
    }
}

impl Validate for CapsuleParameters {
    fn validate(&self) -> Result<()> {
        check_extent("radius", self.radius)?;
        check_extent("length", self.length)?;
        check_count("capSegments", self.cap_segments, Self::MIN_CAP_SEGMENTS)?;
        check_count(
            "radialSegments",
            self.radial_segments,
            Self::MIN_RADIAL_SEGMENTS,
        )
    }
}

/// Arbitrary profile revolved about the Y axis.
///
/// Points are `(distance from axis, height)` and should run from the bottom of
/// the solid to the top so that normals face outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatheParameters {
    pub points: Vec<Point2>,
    #[serde(deserialize_with = "truncated_count")]
    pub segments: u32,
}

impl LatheParameters {
    pub const MIN_SEGMENTS: u32 = 3;

    pub fn new(points: Vec<Point2>, segments: u32) -> Self {
        Self { points, segments }
    }
}

impl Default for LatheParameters {
    /// A diamond: one point on the axis at each end and one at radius 0.5.
    fn default() -> Self {
        Self::new(
            vec![
                Point2::new(0.0, -0.5),
                Point2::new(0.5, 0.0),
                Point2::new(0.0, 0.5),
            ],
            12,
        )
    }
}

impl Validate for LatheParameters {
    fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(MeshError::invalid(
                "points",
                format!("need at least 2 profile points, got {}", self.points.len()),
            ));
        }
        if let Some(p) = self.points.iter().find(|p| !p.is_finite()) {
            return Err(MeshError::invalid(
                "points",
                format!("profile point {} is not finite", p),
            ));
        }
        if let Some(p) = self.points.iter().find(|p| p.x < 0.0) {
            return Err(MeshError::invalid(
                "points",
                format!("profile point {} lies behind the axis", p),
            ));
        }
        check_count("segments", self.segments, Self::MIN_SEGMENTS)
    }
}

/// Parameters of any supported shape, tagged by geometry type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeParameters {
    #[serde(rename = "BoxGeometry")]
    Box(BoxParameters),
    #[serde(rename = "CapsuleGeometry")]
    Capsule(CapsuleParameters),
    #[serde(rename = "LatheGeometry")]
    Lathe(LatheParameters),
}

impl ShapeParameters {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MeshError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| MeshError::Parse(e.to_string()))
    }

    /// Generate the mesh these parameters describe.
    pub fn build(&self) -> Result<MeshData> {
        match self {
            Self::Box(p) => crate::box_mesh::build_box(p),
            Self::Capsule(p) => crate::capsule::build_capsule(p),
            Self::Lathe(p) => crate::lathe::build_lathe(p),
        }
    }
}

impl Validate for ShapeParameters {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Box(p) => p.validate(),
            Self::Capsule(p) => p.validate(),
            Self::Lathe(p) => p.validate(),
        }
    }
}

impl From<BoxParameters> for ShapeParameters {
    fn from(p: BoxParameters) -> Self {
        Self::Box(p)
    }
}

impl From<CapsuleParameters> for ShapeParameters {
    fn from(p: CapsuleParameters) -> Self {
        Self::Capsule(p)
    }
}

impl From<LatheParameters> for ShapeParameters {
    fn from(p: LatheParameters) -> Self {
        Self::Lathe(p)
    }
}
