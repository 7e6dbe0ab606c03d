use glam::Vec3;

// Shared layout/animation tuning constants used by both web and native frontends.

// Ring layout
pub const RING_RADIUS: f32 = 6.0; // horizontal distance of every node from the Y axis
pub const BPM_HEIGHT_ORIGIN: f32 = 50.0; // tempo that sits on the ground plane
pub const HEIGHT_PER_BPM: f32 = 0.1; // world units of lift per beat-per-minute
pub const RING_SAMPLES: usize = 100; // spline divisions; the sampled ring has one extra closing point

// Pitch -> size mapping (C4..B4, inverse relation)
pub const MIN_HZ: f32 = 261.63;
pub const MAX_HZ: f32 = 493.88;
pub const SCALE_AT_MIN_HZ: f32 = 1.8;
pub const SCALE_AT_MAX_HZ: f32 = 0.8;

// Node sizing
pub const SPHERE_BASE_RADIUS: f32 = 0.4; // unit sphere radius before the Hz scale
pub const LABEL_BASE_OFFSET: f32 = 0.8; // billboard label lift above the node surface

// Triad: Joy, Calm, Sadness and the harmonic ratio written on each edge
pub const TRIAD_IDS: [u32; 3] = [1, 5, 8];
pub const TRIAD_RATIO_LABELS: [&str; 3] = ["1", "4/5", "2/3"];

// Camera
pub const HOME_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 12.0, 4.0); // slightly tilted top view
pub const HOME_CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const HOME_AZIMUTH: f32 = -std::f32::consts::FRAC_PI_2; // puts node 1 at twelve o'clock
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 60.0;

// Camera animation
pub const ANIMATION_SPEED: f32 = 1.5; // progress units per second; a transition lasts 1/1.5 s
pub const FOCUS_DELAY_SEC: f32 = 0.010; // deferred start of a focus transition

// Per-node animation
pub const PULSE_AMOUNT: f32 = 0.05; // 5% of the base scale
pub const SPIN_PER_BEAT: f32 = 0.25; // radians of self rotation per beat
pub const EMISSIVE_HOVERED: f32 = 0.8;
pub const EMISSIVE_IDLE: f32 = 0.2;

// Lighting and atmosphere
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
pub const POINT_LIGHT_INTENSITY: f32 = 1.0;
pub const BACKGROUND_HEX: &str = "#050505";
pub const FOG_NEAR: f32 = 10.0;
pub const FOG_FAR: f32 = 400.0;

// Line styling: (hex, opacity)
pub const RING_LINE_STYLE: (&str, f32) = ("#888888", 0.5);
pub const TRIAD_LINE_STYLE: (&str, f32) = ("#ffffff", 0.3);
pub const DROP_LINE_STYLE: (&str, f32) = ("#666666", 0.2);

// Ground grid
pub const GRID_SIZE: f32 = 20.0;
pub const GRID_DIVISIONS: usize = 20;
pub const GRID_CENTER_HEX: &str = "#222222";
pub const GRID_LINE_HEX: &str = "#111111";

// Cosmic background
pub const STAR_COUNT: usize = 800;
pub const STAR_RADIUS: f32 = 300.0;
pub const STAR_DEPTH: f32 = 100.0;
pub const STAR_SIZE_FACTOR: f32 = 6.0;
pub const SPARKLE_COUNT: usize = 40;
pub const SPARKLE_SCALE: f32 = 10.0;
pub const SPARKLE_SPEED: f32 = 0.3;
pub const SPARKLE_OPACITY: f32 = 0.4;
pub const BACKDROP_SEED: u64 = 42;

// Orbiting spaceship
pub const SHIP_ORBIT_SPEED: f32 = 0.2;
pub const SHIP_ORBIT_RADIUS: f32 = 14.0; // well outside the ring
pub const SHIP_DRIFT_HEIGHT: f32 = 4.0;
pub const SHIP_ROLL_AMOUNT: f32 = 0.1;
pub const SHIP_ENGINE_PULSE_FREQ: f32 = 10.0;
pub const SHIP_ENGINE_PULSE_AMOUNT: f32 = 0.2;
pub const SHIP_HULL_HEX: &str = "#e0e0e0";
pub const SHIP_WING_HEX: &str = "#333333";
pub const SHIP_ENGINE_HEX: &str = "#00ffff";
pub const SHIP_COCKPIT_HEX: &str = "#ffaa00";
pub const SHIP_HULL_RADIUS: f32 = 0.2;
pub const SHIP_HULL_LENGTH: f32 = 1.0;
pub const SHIP_WING_SPAN: f32 = 0.4;
pub const SHIP_ENGINE_RADIUS: f32 = 0.15;
pub const SHIP_COCKPIT_RADIUS: f32 = 0.08;
