//! Built-in scenes.

use std::sync::Arc;

use crate::sampling::{gen_f32, gen_range_f32, random_color};
use crate::{Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere};
use glint_math::Vec3;
use rand::RngCore;

/// A populated world together with the camera that frames it.
pub struct Scene {
    pub world: HittableList,
    pub camera: Camera,
}

/// Small random spheres keep this much clearance from the big metal sphere.
const CLEARANCE: f32 = 0.9;

/// The classic cover scene: a ground plane sphere, a grid of small random
/// spheres and three large feature spheres, seen through a defocused lens.
pub fn final_scene(image_width: u32, rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let ground = Arc::new(Material::from(Lambertian::new(Color::splat(0.5))));
    world.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    let feature = Vec3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - feature).length() <= CLEARANCE {
                continue;
            }

            let material: Material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                Lambertian::new(albedo).into()
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                Metal::new(albedo, fuzz).into()
            } else {
                // Glass
                Dielectric::new(1.5).into()
            };
            world.add(Sphere::new(center, 0.2, Arc::new(material)));
        }
    }

    world.add(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5).into()),
    ));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)).into()),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0).into()),
    ));

    log::debug!("Final scene: {} spheres", world.len());

    let mut camera = Camera::new()
        .with_aspect_ratio(image_width, 16, 9)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);
    camera.initialize();

    Scene { world, camera }
}

/// A single white diffuse unit sphere at the origin, viewed head-on from
/// five units away.
pub fn single_sphere(image_width: u32) -> Scene {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::ZERO,
        1.0,
        Arc::new(Lambertian::new(Color::ONE).into()),
    ));

    let mut camera = Camera::new()
        .with_resolution(image_width, image_width)
        .with_position(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::Y)
        .with_lens(40.0, 0.0, 5.0);
    camera.initialize();

    Scene { world, camera }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hittable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_final_scene_population() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = final_scene(400, &mut rng);

        // Ground + three feature spheres + at most the full 22x22 grid
        assert!(scene.world.len() > 4);
        assert!(scene.world.len() <= 4 + 22 * 22);
        assert_eq!(scene.camera.image_width, 400);
        assert_eq!(scene.camera.image_height, 225);
    }

    #[test]
    fn test_final_scene_keeps_clearance() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = final_scene(100, &mut rng);

        let feature = Vec3::new(4.0, 0.2, 0.0);
        for object in scene.world.objects() {
            let bbox = object.bounding_box();
            let center = (bbox.min_corner() + bbox.max_corner()) * 0.5;
            if (bbox.max_corner().y - center.y - 0.2).abs() < 1e-4 {
                assert!((center - feature).length() > CLEARANCE);
            }
        }
    }

    #[test]
    fn test_final_scene_is_deterministic() {
        let a = final_scene(100, &mut StdRng::seed_from_u64(7));
        let b = final_scene(100, &mut StdRng::seed_from_u64(7));

        assert_eq!(a.world.len(), b.world.len());
        for (x, y) in a.world.objects().iter().zip(b.world.objects()) {
            assert_eq!(x.bounding_box(), y.bounding_box());
        }
    }

    #[test]
    fn test_single_sphere() {
        let scene = single_sphere(32);

        assert_eq!(scene.world.len(), 1);
        assert_eq!(scene.camera.image_width, 32);
        assert_eq!(scene.camera.image_height, 32);
        assert_eq!(scene.camera.center(), Vec3::new(0.0, 0.0, -5.0));
    }
}
