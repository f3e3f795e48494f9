//! The closed set of things a BVH can hold.

use crate::{BvhNode, HitRecord, Hittable, Sphere, TraversalStats};
use glint_math::{Aabb, Interval, Ray};

/// A node of the scene tree: either a primitive or a BVH interior node.
#[derive(Debug)]
pub enum Surface {
    Sphere(Sphere),
    Node(BvhNode),
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl From<BvhNode> for Surface {
    fn from(node: BvhNode) -> Self {
        Surface::Node(node)
    }
}

impl Hittable for Surface {
    #[inline]
    fn hit_counted<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        stats: &mut TraversalStats,
    ) -> Option<HitRecord<'a>> {
        match self {
            Surface::Sphere(sphere) => sphere.hit_counted(ray, ray_t, stats),
            Surface::Node(node) => node.hit_counted(ray, ray_t, stats),
        }
    }

    #[inline]
    fn bounding_box(&self) -> Aabb {
        match self {
            Surface::Sphere(sphere) => sphere.bounding_box(),
            Surface::Node(node) => node.bounding_box(),
        }
    }
}
