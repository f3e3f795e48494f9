//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree built once from the flat scene list. Every interior node
//! caches the merged bounding box of its two children, so one slab test can
//! reject a whole subtree.
//!
//! Construction is an object-count median split with a random axis per node:
//! sort the range by the chosen axis' bounding-box lower bound and cut it in
//! half. Ranges of one object alias that object as both children; ranges of
//! two are ordered directly.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::{HitRecord, Hittable, HittableList, RenderError, RenderResult, Surface, TraversalStats};
use glint_math::{Aabb, Axis, Interval, Ray};
use rand::{Rng, RngCore};

/// BVH interior node. Children are either further nodes or primitives.
#[derive(Debug)]
pub struct BvhNode {
    left: Arc<Surface>,
    right: Arc<Surface>,
    bbox: Aabb,
    /// Depth in the tree, root = 1
    depth: u32,
}

impl BvhNode {
    /// Build a BVH over `objects`, reordering the slice in place.
    ///
    /// `rng` drives the per-node split axis, so a fixed seed yields a fixed
    /// tree.
    pub fn build(objects: &mut [Arc<Surface>], rng: &mut dyn RngCore) -> RenderResult<Self> {
        if objects.is_empty() {
            return Err(RenderError::EmptyScene);
        }

        let root = Self::build_range(objects, 1, rng);

        log::info!(
            "BVH built: {} primitives, height {}",
            root.primitive_count(),
            root.height()
        );

        Ok(root)
    }

    /// Build a BVH from every object in `list`.
    pub fn from_list(list: HittableList, rng: &mut dyn RngCore) -> RenderResult<Self> {
        let mut objects = list.into_objects();
        Self::build(&mut objects, rng)
    }

    fn build_range(objects: &mut [Arc<Surface>], depth: u32, rng: &mut dyn RngCore) -> Self {
        let axis = random_axis(rng);

        let (left, right) = match objects.len() {
            1 => (Arc::clone(&objects[0]), Arc::clone(&objects[0])),
            2 => {
                if box_compare(&objects[0], &objects[1], axis) == Ordering::Less {
                    (Arc::clone(&objects[0]), Arc::clone(&objects[1]))
                } else {
                    (Arc::clone(&objects[1]), Arc::clone(&objects[0]))
                }
            }
            n => {
                objects.sort_by(|a, b| box_compare(a, b, axis));

                let (lower, upper) = objects.split_at_mut(n / 2);
                let left = Self::build_range(lower, depth + 1, rng);
                let right = Self::build_range(upper, depth + 1, rng);

                (
                    Arc::new(Surface::Node(left)),
                    Arc::new(Surface::Node(right)),
                )
            }
        };

        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());

        Self {
            left,
            right,
            bbox,
            depth,
        }
    }

    pub fn left(&self) -> &Arc<Surface> {
        &self.left
    }

    pub fn right(&self) -> &Arc<Surface> {
        &self.right
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// True for the single-object case where both children are the same primitive.
    pub fn is_degenerate(&self) -> bool {
        Arc::ptr_eq(&self.left, &self.right)
    }

    /// Number of node levels below and including this one.
    pub fn height(&self) -> u32 {
        let child_height = |child: &Surface| match child {
            Surface::Node(node) => node.height(),
            Surface::Sphere(_) => 0,
        };
        1 + child_height(self.left.as_ref()).max(child_height(self.right.as_ref()))
    }

    /// Number of distinct primitives under this node.
    pub fn primitive_count(&self) -> usize {
        let count = |child: &Surface| match child {
            Surface::Node(node) => node.primitive_count(),
            Surface::Sphere(_) => 1,
        };
        if self.is_degenerate() {
            count(self.left.as_ref())
        } else {
            count(self.left.as_ref()) + count(self.right.as_ref())
        }
    }
}

impl Hittable for BvhNode {
    fn hit_counted<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        stats: &mut TraversalStats,
    ) -> Option<HitRecord<'a>> {
        stats.record_node_visit(self.depth);

        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit_counted(ray, ray_t, stats);

        // Anything the right subtree returns is strictly closer than the left hit.
        let right_t = match &hit_left {
            Some(rec) => ray_t.with_max(rec.t),
            None => ray_t,
        };
        let hit_right = self.right.hit_counted(ray, right_t, stats);

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

fn random_axis(rng: &mut dyn RngCore) -> Axis {
    Axis::ALL[rng.gen_range(0..Axis::ALL.len())]
}

/// Orders two surfaces by the lower bound of their boxes on `axis`.
fn box_compare(a: &Arc<Surface>, b: &Arc<Surface>, axis: Axis) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.total_cmp(&b_min)
}
