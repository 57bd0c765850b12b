//! Layout policy constants and their tunable configuration
//!
//! Every number the layout uses lives here. `LayoutConfig::default()` is the
//! stock city; a JSON file may override any subset of fields.

use super::Vec3;
use crate::error::{CityError, Result};
use serde::{Deserialize, Serialize};

// Buildings
pub const RECORD_SPACING: f64 = 15.0;
pub const WIDTH_BASE: f64 = 8.0;
pub const WIDTH_PER_ATTRIBUTE: f64 = 4.0;
pub const WIDTH_BOUNDS: Bounds = Bounds::new(5.0, 25.0);
pub const HEIGHT_PER_LINE: f64 = 2.0;
pub const HEIGHT_PER_METHOD: f64 = 5.0;
pub const HEIGHT_BOUNDS: Bounds = Bounds::new(8.0, 120.0);
pub const DEPTH_BASE: f64 = 10.0;
pub const DEPTH_PER_LINE: f64 = 0.8;
pub const DEPTH_BOUNDS: Bounds = Bounds::new(5.0, 30.0);
pub const BUILDING_LIFT: f64 = 2.0;

// Districts
pub const DISTRICT_SPACING_MIN: f64 = 150.0;
pub const DISTRICT_SPACING_BASE: f64 = 50.0;
pub const DISTRICT_SPACING_PER_LEVEL: f64 = 50.0;
pub const PLATFORM_SIZE_BASE: f64 = 30.0;
pub const PLATFORM_SIZE_PER_RECORD: f64 = 10.0;
pub const PLATFORM_SIZE_BOUNDS: Bounds = Bounds::new(80.0, 400.0);
pub const PLATFORM_HEIGHT_BASE: f64 = 2.0;
pub const PLATFORM_HEIGHT_PER_TIER: f64 = 1.0;
pub const PLATFORM_HEIGHT_BOUNDS: Bounds = Bounds::new(2.0, 10.0);
pub const PLATFORM_SHADES: [u32; 4] = [0x666666, 0x777777, 0x888888, 0x999999];

// Camera
pub const CITY_SIZE_MIN: f64 = 400.0;
pub const CITY_SIZE_PER_BREADTH: f64 = 150.0;
pub const CITY_SIZE_PER_DEPTH: f64 = 100.0;
pub const CAMERA_DISTANCE_FACTOR: f64 = 1.5;
pub const CAMERA_DISTANCE_MIN: f64 = 1000.0;
pub const CAMERA_DIRECTION: Vec3 = Vec3::new(0.7, 0.4, 0.7);

// Building colors
pub const INTERFACE_COLOR: u32 = 0x5C7CFA;
pub const TRAIT_COLOR: u32 = 0x845EC2;
pub const ABSTRACT_COLOR: u32 = 0xFF8E53;
pub const CLASS_COLOR: u32 = 0x4ECDC4;

/// Inclusive clamp range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into `[min, max]`
    ///
    /// Unlike `f64::clamp` this never panics; `validate` rejects inverted bounds.
    pub fn apply(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    fn validate(&self, what: &str, positive: bool) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CityError::InvalidConfig(format!("{} bounds must be finite", what)));
        }
        if self.min > self.max {
            return Err(CityError::InvalidConfig(format!(
                "{} bounds are inverted (min {} > max {})",
                what, self.min, self.max
            )));
        }
        if positive && self.min <= 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "{} minimum must be positive, got {}",
                what, self.min
            )));
        }
        Ok(())
    }
}

fn check_factor(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CityError::InvalidConfig(format!(
            "{} must be a non-negative number, got {}",
            what, value
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    /// Distance between neighbouring building centers
    pub spacing: f64,
    pub width_base: f64,
    pub width_per_attribute: f64,
    pub width: Bounds,
    pub height_per_line: f64,
    pub height_per_method: f64,
    pub height: Bounds,
    pub depth_base: f64,
    pub depth_per_line: f64,
    pub depth: Bounds,
    /// Gap between the ground and the bottom of a building
    pub lift: f64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            spacing: RECORD_SPACING,
            width_base: WIDTH_BASE,
            width_per_attribute: WIDTH_PER_ATTRIBUTE,
            width: WIDTH_BOUNDS,
            height_per_line: HEIGHT_PER_LINE,
            height_per_method: HEIGHT_PER_METHOD,
            height: HEIGHT_BOUNDS,
            depth_base: DEPTH_BASE,
            depth_per_line: DEPTH_PER_LINE,
            depth: DEPTH_BOUNDS,
            lift: BUILDING_LIFT,
        }
    }
}

impl BuildingConfig {
    fn validate(&self) -> Result<()> {
        check_factor("building.spacing", self.spacing)?;
        check_factor("building.width_base", self.width_base)?;
        check_factor("building.width_per_attribute", self.width_per_attribute)?;
        check_factor("building.height_per_line", self.height_per_line)?;
        check_factor("building.height_per_method", self.height_per_method)?;
        check_factor("building.depth_base", self.depth_base)?;
        check_factor("building.depth_per_line", self.depth_per_line)?;
        check_factor("building.lift", self.lift)?;
        self.width.validate("building.width", true)?;
        self.height.validate("building.height", true)?;
        self.depth.validate("building.depth", true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictConfig {
    /// Floor for the distance between sibling platform centers
    pub spacing_min: f64,
    pub spacing_base: f64,
    pub spacing_per_level: f64,
    pub size_base: f64,
    pub size_per_record: f64,
    pub size: Bounds,
    pub height_base: f64,
    pub height_per_tier: f64,
    pub height: Bounds,
    /// Platform colors by tier; deeper tiers reuse the last entry
    pub shades: Vec<u32>,
}

impl Default for DistrictConfig {
    fn default() -> Self {
        Self {
            spacing_min: DISTRICT_SPACING_MIN,
            spacing_base: DISTRICT_SPACING_BASE,
            spacing_per_level: DISTRICT_SPACING_PER_LEVEL,
            size_base: PLATFORM_SIZE_BASE,
            size_per_record: PLATFORM_SIZE_PER_RECORD,
            size: PLATFORM_SIZE_BOUNDS,
            height_base: PLATFORM_HEIGHT_BASE,
            height_per_tier: PLATFORM_HEIGHT_PER_TIER,
            height: PLATFORM_HEIGHT_BOUNDS,
            shades: PLATFORM_SHADES.to_vec(),
        }
    }
}

impl DistrictConfig {
    fn validate(&self) -> Result<()> {
        check_factor("district.spacing_min", self.spacing_min)?;
        check_factor("district.spacing_base", self.spacing_base)?;
        check_factor("district.spacing_per_level", self.spacing_per_level)?;
        check_factor("district.size_base", self.size_base)?;
        check_factor("district.size_per_record", self.size_per_record)?;
        check_factor("district.height_base", self.height_base)?;
        check_factor("district.height_per_tier", self.height_per_tier)?;
        self.size.validate("district.size", true)?;
        self.height.validate("district.height", true)?;
        if self.shades.is_empty() {
            return Err(CityError::InvalidConfig(
                "district.shades needs at least one color".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub city_size_min: f64,
    pub city_size_per_breadth: f64,
    pub city_size_per_depth: f64,
    pub distance_factor: f64,
    pub distance_min: f64,
    /// Scaled by the distance to get the camera position
    pub direction: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            city_size_min: CITY_SIZE_MIN,
            city_size_per_breadth: CITY_SIZE_PER_BREADTH,
            city_size_per_depth: CITY_SIZE_PER_DEPTH,
            distance_factor: CAMERA_DISTANCE_FACTOR,
            distance_min: CAMERA_DISTANCE_MIN,
            direction: CAMERA_DIRECTION,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<()> {
        check_factor("camera.city_size_min", self.city_size_min)?;
        check_factor("camera.city_size_per_breadth", self.city_size_per_breadth)?;
        check_factor("camera.city_size_per_depth", self.city_size_per_depth)?;
        check_factor("camera.distance_factor", self.distance_factor)?;
        check_factor("camera.distance_min", self.distance_min)?;
        let Vec3 { x, y, z } = self.direction;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(CityError::InvalidConfig(
                "camera.direction must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Building colors by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub interfaces: u32,
    pub traits: u32,
    pub abstracts: u32,
    pub classes: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            interfaces: INTERFACE_COLOR,
            traits: TRAIT_COLOR,
            abstracts: ABSTRACT_COLOR,
            classes: CLASS_COLOR,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub building: BuildingConfig,
    pub district: DistrictConfig,
    pub camera: CameraConfig,
    pub palette: Palette,
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce degenerate or unbounded geometry
    pub fn validate(&self) -> Result<()> {
        self.building.validate()?;
        self.district.validate()?;
        self.camera.validate()
    }
}
