//! Traversal statistics.
//!
//! Counters are owned by whoever traces rays and passed down explicitly, so
//! each render worker accumulates its own copy and the copies are merged
//! once the image is done.

/// Counters gathered while tracing rays through a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Number of rays handed to `ray_color` (camera and scattered rays)
    pub rays: u64,
    /// Number of BVH interior nodes whose bounding box was tested
    pub bvh_node_visits: u64,
    /// Number of ray/primitive intersection tests
    pub primitive_tests: u64,
    /// Deepest BVH node visited (root = 1)
    pub max_bvh_depth: u32,
}

impl TraversalStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_ray(&mut self) {
        self.rays += 1;
    }

    #[inline]
    pub fn record_node_visit(&mut self, depth: u32) {
        self.bvh_node_visits += 1;
        self.max_bvh_depth = self.max_bvh_depth.max(depth);
    }

    #[inline]
    pub fn record_primitive_test(&mut self) {
        self.primitive_tests += 1;
    }

    /// Fold another worker's counters into this one.
    pub fn merge(&mut self, other: &TraversalStats) {
        self.rays += other.rays;
        self.bvh_node_visits += other.bvh_node_visits;
        self.primitive_tests += other.primitive_tests;
        self.max_bvh_depth = self.max_bvh_depth.max(other.max_bvh_depth);
    }

    /// Average number of BVH nodes visited per traced ray.
    pub fn nodes_per_ray(&self) -> f64 {
        if self.rays == 0 {
            0.0
        } else {
            self.bvh_node_visits as f64 / self.rays as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_counts_and_keeps_deepest() {
        let mut a = TraversalStats::new();
        a.record_ray();
        a.record_node_visit(3);
        a.record_primitive_test();

        let mut b = TraversalStats::new();
        b.record_ray();
        b.record_ray();
        b.record_node_visit(7);
        b.record_node_visit(2);

        a.merge(&b);

        assert_eq!(a.rays, 3);
        assert_eq!(a.bvh_node_visits, 3);
        assert_eq!(a.primitive_tests, 1);
        assert_eq!(a.max_bvh_depth, 7);
    }

    #[test]
    fn test_nodes_per_ray() {
        let mut stats = TraversalStats::new();
        assert_eq!(stats.nodes_per_ray(), 0.0);

        stats.record_ray();
        stats.record_ray();
        for _ in 0..5 {
            stats.record_node_visit(1);
        }
        assert_eq!(stats.nodes_per_ray(), 2.5);
    }
}
