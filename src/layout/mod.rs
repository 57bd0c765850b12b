//! Code-city layout
//!
//! Turns a `NamespaceNode` tree into boxes: one building per record, one
//! platform per namespace district, plus a camera framing the whole city.
//!
//! # Architecture
//!
//! - `config` - policy constants and the tunable `LayoutConfig`
//! - `engine` - recursive grid placement (`LayoutEngine`)
//! - `camera` - city size and camera distance from tree depth/breadth
//!
//! Coordinates: `x`/`z` span the ground plane, `y` points up. Positions are
//! box centers.

pub mod camera;
pub mod config;
pub mod engine;

use crate::extractors::TypeMetrics;
use serde::{Deserialize, Serialize};

pub use camera::{camera_distance, city_size, frame_camera};
pub use config::{Bounds, BuildingConfig, CameraConfig, DistrictConfig, LayoutConfig, Palette};
pub use engine::{layout_records, LayoutEngine};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Box extents along x (width), y (height) and z (depth)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Visual category of a building, decides its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    Interface,
    Trait,
    Abstract,
    Class,
}

impl BuildingKind {
    /// Interface wins over trait, trait over abstract
    pub fn of(record: &TypeMetrics) -> Self {
        if record.is_interface() {
            BuildingKind::Interface
        } else if record.is_trait {
            BuildingKind::Trait
        } else if record.is_abstract {
            BuildingKind::Abstract
        } else {
            BuildingKind::Class
        }
    }

    pub fn color(self, palette: &Palette) -> u32 {
        match self {
            BuildingKind::Interface => palette.interfaces,
            BuildingKind::Trait => palette.traits,
            BuildingKind::Abstract => palette.abstracts,
            BuildingKind::Class => palette.classes,
        }
    }
}

/// One record placed in the city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    pub record: TypeMetrics,
    /// Full path of the district the building stands in
    pub namespace_path: String,
    pub kind: BuildingKind,
    pub color: u32,
    pub position: Vec3,
    pub size: Dimensions,
}

/// Ground slab of one namespace district
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Platform {
    pub name: String,
    pub full_path: String,
    /// Recursion level the platform was placed at (0 for top-level districts)
    pub tier: usize,
    /// Records directly in this namespace
    pub record_count: usize,
    pub position: Vec3,
    pub size: Dimensions,
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraFraming {
    pub max_depth: usize,
    pub max_breadth: usize,
    pub city_size: f64,
    pub distance: f64,
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Everything the renderer needs to draw a city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub buildings: Vec<Building>,
    pub platforms: Vec<Platform>,
    pub camera: CameraFraming,
}

impl LayoutResult {
    /// Nothing to draw
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.platforms.is_empty()
    }
}
