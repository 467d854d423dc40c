use ardor_logging::{log_info, log_error, LogCategory, LogLevel, Logger, set_logger};
use ardor_math::*;
use rand::{rngs::StdRng, SeedableRng};

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

static LOGGER : Logger = Logger::new();

fn setup_logging() {
    LOGGER.set_max_level(LogLevel::Verbose);
    LOGGER.set_log_to_console(true);
    set_logger(&LOGGER);
}

/// Place an object: scale it up, spin it around y and move it away from the origin
fn object_transform() -> Result<Transform> {
    let mut transform = Transform::IDENTITY;
    transform.set_rotation_quaternion(Quaternion::from_angle_axis(QUARTER_PI, Vector3::UNIT_Y))
        .set_translation(Vector3::new(0.0, 0.0, -10.0))
        .set_scale_uniform(2.0)?;
    Ok(transform)
}

fn pick(ray: Ray3, triangles: &[Triangle]) -> Option<(usize, f64)> {
    triangles.iter()
        .filter_map(|tri| ray.intersect(tri).map(|t| (tri.index(), t)))
        .min_by(|lhs, rhs| lhs.1.total_cmp(&rhs.1))
}

fn run() -> core::result::Result<(), Box<dyn std::error::Error>> {
    let world = object_transform()?;
    log_info!(LOG_CAT, "Object transform: {}", world);

    // A unit quad in model space, split in 2 triangles and moved into world space
    let corners = [Vector3::new(-1.0, -1.0, 0.0), Vector3::new(1.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 0.0), Vector3::new(-1.0, 1.0, 0.0)]
        .map(|corner| world.apply_forward(corner));
    let triangles = [
        Triangle::with_index(corners[0], corners[1], corners[2], 0),
        Triangle::with_index(corners[0], corners[2], corners[3], 1),
    ];

    let ray = Ray3::new(Vector3::new(0.5, 0.5, 0.0), Vector3::NEG_UNIT_Z);
    match pick(ray, &triangles) {
        Some((index, dist)) => {
            let hit = ray.point_at(dist);
            log_info!(LOG_CAT, "Picked triangle {} at distance {}, model space hit {}", index, dist, world.apply_inverse(hit)?);
        },
        None => log_info!(LOG_CAT, "Ray {} missed the quad", ray),
    }

    let ground = Plane::XZ;
    let down = Ray3::new(Vector3::new(3.0, 5.0, 1.0), Vector3::new(0.0, -1.0, 0.5).normalize());
    if let Some(point) = down.intersects_plane(&ground) {
        log_info!(LOG_CAT, "Ray hits the ground at {} ({:?} of the ground)", point, ground.which_side(down.orig));
    }

    let start = Quaternion::IDENTITY;
    let end = Quaternion::from_angle_axis(PI * 0.5, Vector3::UNIT_Z);
    for step in 0..=4 {
        let t = step as f64 / 4.0;
        log_info!(LOG_CAT, "slerp({}) * x = {}", t, start.slerp(end, t).apply(Vector3::UNIT_X));
    }

    let mut rng = StdRng::seed_from_u64(0x41_52_44_4F_52);
    let ring = Ring::new(Vector3::ZERO, Vector3::UNIT_Y, 1.0, 2.0);
    log_info!(LOG_CAT, "Random point on {}: {}", ring, ring.random(&mut rng));
    let color = ColorRGBA::random_color(&mut rng);
    log_info!(LOG_CAT, "Random color: {} ({})", color, color.as_hex_rrggbbaa());

    let mut pool = ObjectPool::<Matrix4>::new(2)?;
    {
        let mut scratch = pool.scoped();
        *scratch = world.homogeneous_matrix();
        log_info!(LOG_CAT, "Homogeneous matrix: {}", *scratch);
    }

    // Rejected mutations leave the transform untouched
    let mut validating = ValidatingTransform::from_transform(world)?;
    if let Err(err) = validating.set_translation(Vector3::new(f64::NAN, 0.0, 0.0)) {
        log_info!(LOG_CAT, "Translation rejected: {}", err);
    }

    if let Err(err) = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0).invert() {
        log_info!(LOG_CAT, "{}", err);
    }

    // Square window frame: outer ring then the hole
    let frame = [
        Vector2::new(0.0, 0.0), Vector2::new(4.0, 0.0), Vector2::new(4.0, 4.0), Vector2::new(0.0, 4.0),
        Vector2::new(1.0, 1.0), Vector2::new(3.0, 1.0), Vector2::new(3.0, 3.0), Vector2::new(1.0, 3.0),
    ];
    let indices = triangulate(&frame, &[4])?;
    log_info!(LOG_CAT, "Window frame triangulated into {} triangles: {:?}", indices.len() / 3, indices);

    let terrain = SimplexNoise::new()
        .scale_input(0.05, 0.05, 0.05)
        .add(VoronoiFunction3D::new(0.1, 0.25, false, 7))
        .clamp(-1.0, 1.0)
        .remap(-1.0, 1.0, 0.0, 100.0);
    for step in 0..4 {
        let x = step as f64 * 12.5;
        log_info!(LOG_CAT, "Terrain height at ({}, 0, {}): {}", x, -x, terrain.eval(x, 0.0, -x));
    }
    Ok(())
}

fn main() {
    setup_logging();

    if let Err(err) = run() {
        log_error!(LOG_CAT, main, "{}", err);
    }
    LOGGER.flush();
}
