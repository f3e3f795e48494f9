use crate::{Interval, Ray, Vec3};

/// One of the three spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Maps 0, 1, 2 to X, Y, Z. Returns `None` for anything else.
    pub fn from_index(n: usize) -> Option<Axis> {
        match n {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis-aligned bounding box, one slab interval per axis.
///
/// Used by the BVH to reject whole subtrees with a single slab test.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

/// Boxes thinner than this on an axis get padded so the slab test never
/// sees a zero-width slab.
const MIN_SLAB_WIDTH: f32 = 0.0001;

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };

    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two opposite corners, in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let lo = a.min(b);
        let hi = a.max(b);
        Self::new(
            Interval::new(lo.x, hi.x),
            Interval::new(lo.y, hi.y),
            Interval::new(lo.z, hi.z),
        )
    }

    /// Per-axis merge of two boxes. Never pads, never shrinks.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    pub fn axis_interval(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Slab test: does the ray pass through this box for some t in `ray_t`?
    ///
    /// A direction component of exactly zero is handled without dividing:
    /// the ray runs parallel to that slab, so it either lies inside it for
    /// every t or misses the box entirely.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in Axis::ALL {
            let slab = self.axis_interval(axis);
            let origin = r.origin[axis.index()];
            let dir = r.direction[axis.index()];

            if dir == 0.0 {
                if origin < slab.min || origin > slab.max {
                    return false;
                }
                continue;
            }

            let adinv = 1.0 / dir;
            let mut t0 = (slab.min - origin) * adinv;
            let mut t1 = (slab.max - origin) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    fn pad_to_minimums(&mut self) {
        for slab in [&mut self.x, &mut self.y, &mut self.z] {
            if slab.size() < MIN_SLAB_WIDTH {
                *slab = slab.expand(MIN_SLAB_WIDTH);
            }
        }
    }

    pub fn min_corner(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max_corner(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// True if `other` lies entirely within this box.
    pub fn encloses(&self, other: &Aabb) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let outer = self.axis_interval(axis);
            let inner = other.axis_interval(axis);
            outer.min <= inner.min && inner.max <= outer.max
        })
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
