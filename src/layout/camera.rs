//! Camera framing from the shape of the namespace tree

use super::config::CameraConfig;
use super::{CameraFraming, Vec3};
use crate::hierarchy::NamespaceNode;

/// Scalar extent of the city, grows with both breadth and depth
pub fn city_size(max_depth: usize, max_breadth: usize, config: &CameraConfig) -> f64 {
    let extent = max_breadth as f64 * config.city_size_per_breadth
        + max_depth as f64 * config.city_size_per_depth;
    extent.max(config.city_size_min)
}

pub fn camera_distance(city_size: f64, config: &CameraConfig) -> f64 {
    (city_size * config.distance_factor).max(config.distance_min)
}

/// Frame the whole tree, looking at the origin
pub fn frame_camera(root: &NamespaceNode, config: &CameraConfig) -> CameraFraming {
    let max_depth = root.max_depth();
    let max_breadth = root.max_breadth();
    let city_size = city_size(max_depth, max_breadth, config);
    let distance = camera_distance(city_size, config);

    CameraFraming {
        max_depth,
        max_breadth,
        city_size,
        distance,
        position: config.direction.scale(distance),
        look_at: Vec3::ORIGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::TypeMetrics;
    use crate::hierarchy::build_hierarchy;

    #[test]
    fn test_empty_tree_gets_floor_values() {
        let framing = frame_camera(&NamespaceNode::root(), &CameraConfig::default());
        assert_eq!(framing.max_depth, 1);
        assert_eq!(framing.max_breadth, 1);
        assert_eq!(framing.city_size, 400.0);
        assert_eq!(framing.distance, 1000.0);
        assert_eq!(framing.look_at, Vec3::ORIGIN);
        assert!((framing.position.x - 700.0).abs() < 1e-9);
        assert!((framing.position.y - 400.0).abs() < 1e-9);
        assert!((framing.position.z - 700.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_tree_exceeds_floor() {
        let records: Vec<_> = (0..6)
            .map(|i| {
                let ns = format!("App\\Module{}\\Sub", i);
                TypeMetrics::new(format!("{}.php", i), Some(&ns), format!("C{}", i))
            })
            .collect();
        let root = build_hierarchy(records);
        let framing = frame_camera(&root, &CameraConfig::default());

        // Root -> App -> ModuleN -> Sub, App has 6 children
        assert_eq!(framing.max_depth, 4);
        assert_eq!(framing.max_breadth, 6);
        assert_eq!(framing.city_size, 6.0 * 150.0 + 4.0 * 100.0);
        assert_eq!(framing.distance, 1300.0 * 1.5);
    }

    #[test]
    fn test_distance_is_monotonic_in_depth_and_breadth() {
        let config = CameraConfig::default();
        for fixed in 1..12 {
            let mut previous_by_depth = 0.0;
            let mut previous_by_breadth = 0.0;
            for grow in 1..40 {
                let by_depth = camera_distance(city_size(grow, fixed, &config), &config);
                let by_breadth = camera_distance(city_size(fixed, grow, &config), &config);
                assert!(by_depth >= previous_by_depth);
                assert!(by_breadth >= previous_by_breadth);
                previous_by_depth = by_depth;
                previous_by_breadth = by_breadth;
            }
        }
    }
}
