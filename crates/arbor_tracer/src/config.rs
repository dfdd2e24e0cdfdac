//! Ray tracer settings.

use serde::{Deserialize, Serialize};

/// Rays whose accumulated weight falls below this are not traced further.
pub const MIN_WEIGHT: f32 = 0.01;

/// Default number of triangles a BVH leaf may hold before it is split.
pub const DEFAULT_LEAF_SIZE: usize = 16;

/// Ray tracer configuration.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Deepest recursion level that still traces; deeper rays return black
    pub max_recursion_level: u32,
    /// Smallest ray weight worth tracing
    pub min_weight: f32,
    /// BVH leaf size threshold
    pub bvh_leaf_size: usize,
    /// Scan rows in parallel with rayon
    pub parallel: bool,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_recursion_level: 6,
            min_weight: MIN_WEIGHT,
            bvh_leaf_size: DEFAULT_LEAF_SIZE,
            parallel: false,
        }
    }
}

impl TracerConfig {
    pub fn with_max_recursion_level(mut self, level: u32) -> Self {
        self.max_recursion_level = level;
        self
    }

    pub fn with_min_weight(mut self, weight: f32) -> Self {
        self.min_weight = weight;
        self
    }

    pub fn with_bvh_leaf_size(mut self, size: usize) -> Self {
        self.bvh_leaf_size = size.max(1);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TracerConfig::default();
        assert_eq!(config.max_recursion_level, 6);
        assert_eq!(config.bvh_leaf_size, 16);
        assert!((config.min_weight - 0.01).abs() < f32::EPSILON);
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_json() {
        let config: TracerConfig =
            serde_json::from_str(r#"{ "max_recursion_level": 2, "parallel": true }"#).unwrap();
        assert_eq!(config.max_recursion_level, 2);
        assert!(config.parallel);
        assert_eq!(config.bvh_leaf_size, DEFAULT_LEAF_SIZE);
    }

    #[test]
    fn test_json_round_trip() {
        let config = TracerConfig::default()
            .with_bvh_leaf_size(0)
            .with_min_weight(0.05);
        let json = serde_json::to_string(&config).unwrap();
        let back: TracerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.bvh_leaf_size, 1);
    }
}
