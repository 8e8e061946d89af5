#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Vertex position in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }
}

/// Floats per vertex in the quad's only attribute (slot 0).
pub const POSITION_COMPONENTS: u32 = 3;

pub const QUAD_VERTICES: [Vec3; 4] = [
    Vec3::new(-1.0, 1.0, 0.0),  // top-left
    Vec3::new(-1.0, -1.0, 0.0), // bottom-left
    Vec3::new(1.0, -1.0, 0.0),  // bottom-right
    Vec3::new(1.0, 1.0, 0.0),   // top-right
];

pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2, // first triangle
    0, 2, 3, // second triangle
];
