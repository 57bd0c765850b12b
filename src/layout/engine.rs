//! Recursive grid placement of buildings and district platforms
//!
//! Each node lays its records out in a square grid around its base point,
//! then its child districts in a wider grid, and recurses into each child
//! with the child's center as the new base. The walk returns the geometry of
//! every subtree to its parent; nothing is shared between siblings.

use super::camera::frame_camera;
use super::config::{BuildingConfig, DistrictConfig, LayoutConfig};
use super::{Building, BuildingKind, Dimensions, LayoutResult, Platform, Vec3};
use crate::error::Result;
use crate::extractors::TypeMetrics;
use crate::hierarchy::{build_hierarchy, NamespaceNode};
use tracing::debug;

/// Smallest square grid side holding `count` cells
fn grid_side(count: usize) -> usize {
    let mut side = (count as f64).sqrt().ceil() as usize;
    // guard against sqrt rounding for large perfect squares
    while side * side < count {
        side += 1;
    }
    side
}

/// Offset of cell `index` from the grid's base point, `(dx, dz)`
///
/// The grid starts half a side before the base point: cell (0, 0) of a
/// 1x1 grid sits at `-spacing / 2`.
fn grid_offset(index: usize, side: usize, spacing: f64) -> (f64, f64) {
    let row = index / side;
    let col = index % side;
    let half = side as f64 / 2.0;
    (
        (col as f64 - half) * spacing,
        (row as f64 - half) * spacing,
    )
}

/// Geometry produced by one subtree
#[derive(Default)]
struct SubtreeLayout {
    buildings: Vec<Building>,
    platforms: Vec<Platform>,
}

impl SubtreeLayout {
    fn merge(&mut self, other: SubtreeLayout) {
        self.buildings.extend(other.buildings);
        self.platforms.extend(other.platforms);
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Engine with a validated configuration
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Place every record and district of `root`
    ///
    /// Pure: the same tree always yields the same result. The root itself
    /// never gets a platform.
    pub fn layout(&self, root: &NamespaceNode) -> LayoutResult {
        let placed = self.place_node(root, 0.0, 0.0, 0);
        let camera = frame_camera(root, &self.config.camera);

        debug!(
            "Laid out {} buildings on {} platforms, camera distance {}",
            placed.buildings.len(),
            placed.platforms.len(),
            camera.distance
        );

        LayoutResult {
            buildings: placed.buildings,
            platforms: placed.platforms,
            camera,
        }
    }

    fn place_node(
        &self,
        node: &NamespaceNode,
        base_x: f64,
        base_z: f64,
        level: usize,
    ) -> SubtreeLayout {
        let mut placed = SubtreeLayout::default();
        let building_config = &self.config.building;

        if !node.records.is_empty() {
            let side = grid_side(node.records.len());
            for (index, record) in node.records.iter().enumerate() {
                let (dx, dz) = grid_offset(index, side, building_config.spacing);
                placed
                    .buildings
                    .push(self.building(record, &node.full_path, base_x + dx, base_z + dz));
            }
        }

        if !node.children.is_empty() {
            let side = grid_side(node.children.len());
            let spacing = district_spacing(level, &self.config.district);

            for (index, child) in node.children.values().enumerate() {
                // keeps its grid cell, draws nothing
                if child.is_empty() {
                    continue;
                }

                let (dx, dz) = grid_offset(index, side, spacing);
                let (child_x, child_z) = (base_x + dx, base_z + dz);

                placed
                    .platforms
                    .push(self.platform(child, child_x, child_z, level));
                placed.merge(self.place_node(child, child_x, child_z, level + 1));
            }
        }

        placed
    }

    fn building(&self, record: &TypeMetrics, namespace_path: &str, x: f64, z: f64) -> Building {
        let size = building_dimensions(record, &self.config.building);
        let kind = BuildingKind::of(record);

        Building {
            record: record.clone(),
            namespace_path: namespace_path.to_string(),
            kind,
            color: kind.color(&self.config.palette),
            position: Vec3::new(x, size.height / 2.0 + self.config.building.lift, z),
            size,
        }
    }

    fn platform(&self, node: &NamespaceNode, x: f64, z: f64, tier: usize) -> Platform {
        let district = &self.config.district;
        let footprint = platform_footprint(node.record_count(), district);
        let height = platform_height(tier, district);

        Platform {
            name: node.name.clone(),
            full_path: node.full_path.clone(),
            tier,
            record_count: node.record_count(),
            position: Vec3::new(x, height / 2.0, z),
            size: Dimensions {
                width: footprint,
                height,
                depth: footprint,
            },
            color: platform_shade(tier, district),
        }
    }
}

/// Width from attributes, height from lines and methods, depth from lines
pub fn building_dimensions(record: &TypeMetrics, config: &BuildingConfig) -> Dimensions {
    let lines = f64::from(record.line_span);
    let attributes = f64::from(record.attribute_count);
    let methods = f64::from(record.method_count);

    Dimensions {
        width: config
            .width
            .apply(attributes * config.width_per_attribute + config.width_base),
        height: config
            .height
            .apply(lines * config.height_per_line + methods * config.height_per_method),
        depth: config
            .depth
            .apply(lines * config.depth_per_line + config.depth_base),
    }
}

/// Distance between sibling district centers at `level`, non-decreasing in depth
pub fn district_spacing(level: usize, config: &DistrictConfig) -> f64 {
    (config.spacing_base + level as f64 * config.spacing_per_level).max(config.spacing_min)
}

pub fn platform_footprint(record_count: usize, config: &DistrictConfig) -> f64 {
    config
        .size
        .apply(config.size_base + record_count as f64 * config.size_per_record)
}

pub fn platform_height(tier: usize, config: &DistrictConfig) -> f64 {
    config
        .height
        .apply(config.height_base + tier as f64 * config.height_per_tier)
}

fn platform_shade(tier: usize, config: &DistrictConfig) -> u32 {
    config
        .shades
        .get(tier)
        .or_else(|| config.shades.last())
        .copied()
        .unwrap_or_default()
}

/// Build the namespace tree for `records` and lay it out
pub fn layout_records(records: Vec<TypeMetrics>, config: LayoutConfig) -> Result<LayoutResult> {
    let engine = LayoutEngine::new(config)?;
    let root = build_hierarchy(records);
    Ok(engine.layout(&root))
}
