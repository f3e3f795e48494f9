//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use crate::{Material, Surface, TraversalStats};
use glint_math::{Aabb, Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Returned by value from every intersection query, never filled in place.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting the normal against the incoming ray.
    ///
    /// `outward_normal` is assumed to be unit length.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest intersection with `t` strictly inside `ray_t`, counting the
    /// work done into `stats`.
    fn hit_counted<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        stats: &mut TraversalStats,
    ) -> Option<HitRecord<'a>>;

    /// Closest intersection with `t` strictly inside `ray_t`.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        self.hit_counted(ray, ray_t, &mut TraversalStats::default())
    }

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// A flat list of surfaces, searched by brute force.
///
/// This is both the scene population container handed to the BVH builder
/// and the reference every BVH query must agree with.
pub struct HittableList {
    objects: Vec<Arc<Surface>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Surface>) {
        self.add_shared(Arc::new(object.into()));
    }

    /// Add an already shared object.
    pub fn add_shared(&mut self, object: Arc<Surface>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<Surface>] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<Arc<Surface>> {
        self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Surface> for HittableList {
    fn from_iter<I: IntoIterator<Item = Surface>>(iter: I) -> Self {
        let mut list = HittableList::new();
        for object in iter {
            list.add(object);
        }
        list
    }
}

impl Hittable for HittableList {
    fn hit_counted<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        stats: &mut TraversalStats,
    ) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            let closest_so_far = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit_counted(ray, ray_t.with_max(closest_so_far), stats) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
