/// The shape of a mesh. The rendering library turns these into vertex buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// An axis aligned box centred on the origin
    Box {
        /// Size along X
        width: f32,
        /// Size along Y
        height: f32,
        /// Size along Z
        depth: f32,
    },
    /// A UV sphere centred on the origin
    Sphere {
        /// Radius
        radius: f32,
        /// Number of horizontal segments
        width_segments: u32,
        /// Number of vertical segments
        height_segments: u32,
    },
    /// A flat ring in the XY plane
    Ring {
        /// Inner radius
        inner_radius: f32,
        /// Outer radius
        outer_radius: f32,
        /// Number of segments
        segments: u32,
    },
}

impl Geometry {
    /// A cube with sides of `size`
    pub fn cube(size: f32) -> Self {
        Geometry::Box {
            width: size,
            height: size,
            depth: size,
        }
    }

    /// A sphere with 32 segments each way
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: 32,
            height_segments: 32,
        }
    }
}

/// A component that tells the renderer what shape to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    /// The shape
    pub geometry: Geometry,
    /// Draw the inside faces instead of the outside ones, eg. for a panorama you stand inside of
    pub inside_out: bool,
}

impl Mesh {
    /// A mesh seen from the outside
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            inside_out: false,
        }
    }

    /// A mesh seen from the inside
    pub fn inside_out(geometry: Geometry) -> Self {
        Self {
            geometry,
            inside_out: true,
        }
    }
}
