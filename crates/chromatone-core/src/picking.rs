use glam::Vec3;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest sphere hit along the ray among `(id, center, radius)` candidates.
pub fn pick_nearest<I>(ray_origin: Vec3, ray_dir: Vec3, spheres: I) -> Option<u32>
where
    I: IntoIterator<Item = (u32, Vec3, f32)>,
{
    let mut best = None::<(u32, f32)>;
    for (id, center, radius) in spheres {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((id, t)),
            }
        }
    }
    best.map(|(id, _)| id)
}
