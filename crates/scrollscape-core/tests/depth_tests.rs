// Host-side tests for the depth projection and the procedural blob feed.

use glam::{Vec2, Vec3};
use scrollscape_core::constants::*;
use scrollscape_core::*;
use smallvec::smallvec;

#[test]
fn dark_field_projects_no_points() {
    let field = DepthField::new(64, 48);
    let points = DepthProjection::default().project(&field, DepthPalette::Standard);
    assert!(points.is_empty());

    let just_below = DepthField::uniform(8, 8, DEPTH_CUTOFF * 0.99);
    assert!(DepthProjection::default()
        .project(&just_below, DepthPalette::Standard)
        .is_empty());
}

#[test]
fn bright_field_projects_one_point_per_pixel() {
    let field = DepthField::uniform(16, 12, 1.0);
    let points = DepthProjection::default().project(&field, DepthPalette::Standard);
    assert_eq!(points.len(), 16 * 12);
    // full intensity sits on the near plane
    for p in &points {
        assert!((p.position().z - (-DEPTH_NEAR + DEPTH_Z_OFFSET)).abs() < 1e-3);
        assert_eq!(p.intensity(), 1.0);
    }
}

#[test]
fn projection_matches_the_pinhole_formula() {
    let proj = DepthProjection::default();
    let (w, h) = (DEPTH_WIDTH, DEPTH_HEIGHT);
    let i = 0.25;
    let p = proj.project_point(480, 120, w, h, i);
    let z = (1.0 - i) * (DEPTH_FAR - DEPTH_NEAR) + DEPTH_NEAR;
    assert!((p.x - (480.0 / w as f32 - 0.5) * z * DEPTH_X_TO_Z).abs() < 1e-3);
    assert!((p.y - (120.0 / h as f32 - 0.5) * z * DEPTH_Y_TO_Z).abs() < 1e-3);
    assert!((p.z - (-z + DEPTH_Z_OFFSET)).abs() < 1e-3);

    // center pixel lands on the axis
    let c = proj.project_point(w / 2, h / 2, w, h, 0.5);
    assert_eq!((c.x, c.y), (0.0, 0.0));
}

#[test]
fn projection_is_deterministic() {
    let mut source = BlobField::new(9);
    let mut field = DepthField::new(80, 60);
    source.render(1.0 / 60.0, &mut field);
    let proj = DepthProjection::default();
    let a = proj.project(&field, DepthPalette::Standard);
    let b = proj.project(&field, DepthPalette::Standard);
    assert!(!a.is_empty());
    assert_eq!(
        bytemuck::cast_slice::<DepthPoint, u8>(&a),
        bytemuck::cast_slice::<DepthPoint, u8>(&b)
    );
}

#[test]
fn nan_samples_are_dropped() {
    let mut field = DepthField::uniform(4, 4, 0.5);
    field.set(1, 1, f32::NAN);
    let points = DepthProjection::default().project(&field, DepthPalette::Standard);
    assert_eq!(points.len(), 15);
}

#[test]
fn from_samples_checks_the_grid_size() {
    assert_eq!(
        DepthField::from_samples(4, 4, vec![0.0; 15]),
        Err(CoreError::FieldSize {
            width: 4,
            height: 4,
            expected: 16,
            got: 15
        })
    );
    assert!(DepthField::from_samples(0, 4, vec![]).is_err());
    let ok = DepthField::from_samples(2, 2, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
    assert_eq!(ok.get(1, 1), 0.4);
}

#[test]
fn palettes_brighten_and_solidify_with_intensity() {
    let dim = DepthPalette::Standard.color(0.0);
    let bright = DepthPalette::Standard.color(1.0);
    assert_eq!(dim, [0.2, 0.4, 1.0, 0.2]);
    assert!((bright[1] - 1.4).abs() < 1e-6);
    assert!((bright[3] - 1.0).abs() < 1e-6);

    let green = DepthPalette::Success.color(1.0);
    assert_eq!(&green[..3], &SUCCESS_RGB[..]);
}

#[test]
fn blobs_stay_on_the_canvas() {
    let mut source = BlobField::new(1);
    for _ in 0..2000 {
        source.step(1.0 / 30.0);
        for b in source.blobs() {
            assert!(b.center.x >= 0.0 && b.center.x <= DEPTH_WIDTH as f32);
            assert!(b.center.y >= 0.0 && b.center.y <= DEPTH_HEIGHT as f32);
        }
    }
}

#[test]
fn blob_reflects_off_an_edge() {
    let blob = Blob {
        center: Vec2::new(DEPTH_WIDTH as f32 - 1.0, 100.0),
        radius: 10.0,
        velocity: Vec2::new(3.0, 0.0),
    };
    let mut source = BlobField::with_blobs(smallvec![blob], 0);
    source.step(1.0 / 60.0);
    let b = source.blobs()[0];
    assert!((b.center.x - (DEPTH_WIDTH as f32 - 2.0)).abs() < 1e-3);
    assert_eq!(b.velocity.x, -3.0);
}

#[test]
fn painted_blob_is_brightest_at_its_center() {
    let blob = Blob {
        center: Vec2::new(320.0, 240.0),
        radius: 100.0,
        velocity: Vec2::ZERO,
    };
    let source = BlobField::with_blobs(smallvec![blob], 0);
    let mut field = DepthField::new(DEPTH_WIDTH, DEPTH_HEIGHT);
    source.paint(&mut field);
    assert!(field.get(320, 240) > 0.99);
    assert_eq!(field.get(0, 0), 0.0);
    assert!(field.get(320, 240) > field.get(360, 240));
}

#[test]
fn intro_pose_locks_in_on_the_last_phase() {
    let mut pose = DepthPose::new(DepthVariant::Intro, 5);
    assert_eq!(pose.palette(0), DepthPalette::Standard);
    pose.advance(0.0, 0, 0.1, 1.0 / 60.0);
    assert!(pose.transform.rotation.y > 0.0);
    pose.advance(0.0, 3, 4.6, 1.0 / 60.0);
    assert_eq!(pose.transform.rotation.y, 0.0);
    assert_eq!(pose.transform.scale.x, INTRO_LOCKED_SCALE);
    assert_eq!(pose.palette(3), DepthPalette::Success);

    let analytics = DepthPose::new(DepthVariant::Analytics, 5);
    assert_eq!(analytics.palette(3), DepthPalette::Standard);
    assert_eq!(analytics.transform.position.z, DEPTH_GROUP_Z);
}

#[test]
fn intro_pose_settles_while_stabilizing() {
    let mut pose = DepthPose::new(DepthVariant::Intro, 5);
    assert_eq!(pose.transform.scale.x, DEPTH_BASE_SCALE);
    for i in 0..120 {
        pose.advance(0.0, 1, 1.5 + i as f32 / 60.0, 1.0 / 60.0);
    }
    assert!((pose.transform.scale.x - INTRO_STABLE_SCALE).abs() < 1e-4);
    // still turning, only slower than the chaos phase
    assert!(pose.transform.rotation.y > 0.5 && pose.transform.rotation.y < 0.7);
    assert_eq!(pose.transform.position, Vec3::ZERO);
}

#[test]
fn intro_pose_breathes_on_phase_two() {
    let mut pose = DepthPose::new(DepthVariant::Intro, 5);
    let t = std::f32::consts::FRAC_PI_4;
    pose.advance(0.0, 2, t, 1.0 / 60.0);
    assert!((pose.transform.scale.x - (INTRO_BREATH_SCALE + 0.002)).abs() < 1e-6);
    assert!((pose.transform.rotation.y - (t * 0.5).sin() * 0.2).abs() < 1e-6);

    for i in 0..600 {
        pose.advance(0.0, 2, i as f32 * 0.05, 1.0 / 60.0);
        let s = pose.transform.scale.x;
        assert!(s >= INTRO_BREATH_SCALE - 0.002 - 1e-6 && s <= INTRO_BREATH_SCALE + 0.002 + 1e-6);
        assert!(pose.transform.rotation.y.abs() <= 0.2 + 1e-6);
    }
}

#[test]
fn analytics_yaw_follows_the_scene_intensity() {
    let mut pose = DepthPose::new(DepthVariant::Analytics, 5);
    pose.advance(0.0, 0, 2.0, 1.0 / 60.0);
    let idle = pose.transform.rotation.y;
    pose.advance(1.0, 0, 2.0, 1.0 / 60.0);
    assert!((pose.transform.rotation.y - idle - 0.5).abs() < 1e-6);
    assert_eq!(pose.transform.position, Vec3::new(0.0, 0.0, DEPTH_GROUP_Z));
    assert_eq!(pose.transform.scale, Vec3::splat(DEPTH_BASE_SCALE));
}

#[test]
fn onboarding_pose_sways_sideways_behind_the_page() {
    let mut pose = DepthPose::new(DepthVariant::Onboarding, 5);
    let t = std::f32::consts::FRAC_PI_4;
    pose.advance(0.0, 0, t, 1.0 / 60.0);
    assert!((pose.transform.position.x - 50.0).abs() < 1e-3);
    assert_eq!(pose.transform.position.y, 0.0);
    assert_eq!(pose.transform.position.z, DEPTH_GROUP_Z);
    assert!((pose.transform.rotation.y + t.sin() * 0.5).abs() < 1e-6);

    pose.advance(1.0, 0, t, 1.0 / 60.0);
    assert!((pose.transform.rotation.y - (-t.sin() * 0.5 + 0.2)).abs() < 1e-6);
    assert_eq!(pose.palette(3), DepthPalette::Standard);
}
