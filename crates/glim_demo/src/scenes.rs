//! Built-in demo scenes.

use std::sync::Arc;

use glim_math::{Color, DMat4, Point3, Vec3};
use glim_renderer::{
    BvhNode, Camera, CheckerTexture, Dielectric, DiffuseLight, Disk, Lambertian, Mesh, Metal,
    RawMeshInfo, Sampler, Scene, SolidColor, Sphere, Transform, XyRect, XzRect, YzRect,
};

/// The classic Cornell box, lit by a ceiling panel, with a fuzzy gold
/// sphere at the center.
pub fn cornell_box(aspect_ratio: f64) -> Scene {
    let mut scene = Scene::new();

    let red = Arc::new(Lambertian::from_color(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Lambertian::from_color(Color::new(0.73, 0.73, 0.73)));
    let green = Arc::new(Lambertian::from_color(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(DiffuseLight::new(Color::new(12.0, 12.0, 12.0)));
    let gold = Arc::new(Metal::new(Color::new(0.9, 0.6, 0.1), 0.92));

    scene.add_hittable(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    scene.add_hittable(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    scene.add_hittable(Arc::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        0.0,
        white.clone(),
    )));
    scene.add_hittable(Arc::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )));
    scene.add_hittable(Arc::new(XyRect::new(0.0, 555.0, 0.0, 555.0, 555.0, white)));
    scene.add_light(Arc::new(XzRect::new(
        103.0, 453.0, 117.0, 442.0, 554.0, light,
    )));
    scene.add_hittable(Arc::new(Sphere::new(
        Point3::new(278.0, 278.0, 278.0),
        150.0,
        gold,
    )));

    scene.set_main_cam(Camera::new(
        Point3::new(278.0, 278.0, -800.0),
        Point3::new(278.0, 278.0, 0.0),
        Vec3::Y,
        40.0,
        aspect_ratio,
        0.05,
        800.0,
    ));

    scene
}

/// Open scene exercising the rest of the geometry: an instanced pyramid
/// mesh, a glass sphere, a metal ring, all under a checkered sky.
pub fn showcase(aspect_ratio: f64) -> Scene {
    let mut scene = Scene::new();

    scene.set_skybox_texture(Arc::new(CheckerTexture::from_colors(
        Color::new(0.08, 0.08, 0.1),
        Color::new(0.35, 0.45, 0.6),
    )));

    let ground = Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    scene.add_hittable(Arc::new(XzRect::new(
        -12.0,
        12.0,
        -12.0,
        12.0,
        0.0,
        Arc::new(Lambertian::new(ground)),
    )));

    // Four-sided pyramid, wound so every face normal points outward.
    let pyramid_info = RawMeshInfo {
        positions: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
            Point3::new(0.5, 1.0, 0.5),
        ],
        position_indices: vec![0, 1, 2, 1, 0, 3, 2, 1, 3, 0, 2, 3],
        ..RawMeshInfo::default()
    };
    let pyramid = Arc::new(Mesh::new(
        pyramid_info,
        DMat4::IDENTITY,
        false,
        Arc::new(Lambertian::from_color(Color::new(0.7, 0.25, 0.2))),
    ));
    let faces = pyramid.triangles();
    let pyramid_bvh = Arc::new(BvhNode::new(faces.objects, &mut Sampler::new(7)));
    scene.add_hittable(Arc::new(Transform::new(
        pyramid_bvh,
        Vec3::new(-1.6, 0.0, 0.0),
        Vec3::new(0.0, 35.0, 0.0),
        Vec3::splat(1.2),
    )));

    scene.add_hittable(Arc::new(Sphere::new(
        Point3::new(1.3, 0.8, 0.2),
        0.8,
        Arc::new(Dielectric::new(1.5)),
    )));

    scene.add_hittable(Arc::new(Disk::new(
        Point3::new(0.0, 2.6, 0.0),
        1.4,
        0.9,
        Arc::new(Metal::new(Color::new(0.8, 0.8, 0.9), 0.05)),
    )));

    scene.add_light(Arc::new(XzRect::new(
        -1.0,
        1.0,
        -1.0,
        1.0,
        4.0,
        Arc::new(DiffuseLight::new(Color::new(9.0, 9.0, 9.0))),
    )));

    scene.set_main_cam(Camera::new(
        Point3::new(0.0, 1.6, 6.5),
        Point3::new(0.0, 0.8, 0.0),
        Vec3::Y,
        40.0,
        aspect_ratio,
        0.0,
        6.5,
    ));

    scene
}

/// Furnace sanity check: a half-gray sphere in a uniform white
/// environment must render flat at its own albedo, so any energy gain or
/// loss in the integrator shows up as shading on the sphere.
pub fn furnace(aspect_ratio: f64) -> Scene {
    let mut scene = Scene::new();

    scene.set_skybox_texture(Arc::new(SolidColor::new(Color::new(1.0, 1.0, 1.0))));
    scene.add_hittable(Arc::new(Sphere::new(
        Point3::ZERO,
        1.0,
        Arc::new(Lambertian::from_color(Color::new(0.5, 0.5, 0.5))),
    )));

    scene.set_main_cam(Camera::new(
        Point3::new(0.0, 0.0, 3.0),
        Point3::ZERO,
        Vec3::Y,
        40.0,
        aspect_ratio,
        0.0,
        3.0,
    ));

    scene
}
