use cubelab_common::GeometryId;
use serde::{Deserialize, Serialize};

/// The six shape parameters of a box geometry.
///
/// The model does not validate: callers (the parameter panel) clamp values
/// before writing them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub depth_segments: u32,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }
}

/// Addresses one field of [`BoxParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxField {
    Width,
    Height,
    Depth,
    WidthSegments,
    HeightSegments,
    DepthSegments,
}

impl BoxField {
    /// Storage key, matching the serialized field name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Depth => "depth",
            Self::WidthSegments => "widthSegments",
            Self::HeightSegments => "heightSegments",
            Self::DepthSegments => "depthSegments",
        }
    }
}

impl BoxParams {
    pub fn get(&self, field: BoxField) -> f32 {
        match field {
            BoxField::Width => self.width,
            BoxField::Height => self.height,
            BoxField::Depth => self.depth,
            BoxField::WidthSegments => self.width_segments as f32,
            BoxField::HeightSegments => self.height_segments as f32,
            BoxField::DepthSegments => self.depth_segments as f32,
        }
    }

    /// Write one field. Segment counts are floored to whole numbers.
    pub fn set(&mut self, field: BoxField, value: f32) {
        match field {
            BoxField::Width => self.width = value,
            BoxField::Height => self.height = value,
            BoxField::Depth => self.depth = value,
            BoxField::WidthSegments => self.width_segments = value.floor() as u32,
            BoxField::HeightSegments => self.height_segments = value.floor() as u32,
            BoxField::DepthSegments => self.depth_segments = value.floor() as u32,
        }
    }
}

/// One vertex of a generated geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// A contiguous index range drawn with one material slot (one box face).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryGroup {
    pub start: u32,
    pub count: u32,
    pub material_index: u32,
}

/// Box geometry resource: indexed triangle list plus per-face groups.
///
/// Owned by exactly one mesh. Released through [`BoxGeometry::dispose`].
#[derive(Debug, Clone)]
pub struct BoxGeometry {
    id: GeometryId,
    params: BoxParams,
    vertices: Vec<GeometryVertex>,
    indices: Vec<u32>,
    groups: Vec<GeometryGroup>,
}

/// Axis selector used while laying out one face.
#[derive(Clone, Copy)]
enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

struct Face {
    u: Axis,
    v: Axis,
    w: Axis,
    udir: f32,
    vdir: f32,
    width: f32,
    height: f32,
    depth: f32,
    grid_x: u32,
    grid_y: u32,
}

impl BoxGeometry {
    /// Generate a box centred on the origin.
    ///
    /// Faces are laid out +X, -X, +Y, -Y, +Z, -Z; each face is a
    /// `(gx + 1) x (gy + 1)` vertex grid with counter-clockwise triangles
    /// seen from outside.
    pub fn new(params: BoxParams) -> Self {
        let BoxParams {
            width: w,
            height: h,
            depth: d,
            ..
        } = params;
        // Zero segments would divide by zero below.
        let ws = params.width_segments.max(1);
        let hs = params.height_segments.max(1);
        let ds = params.depth_segments.max(1);

        use Axis::{X, Y, Z};
        #[rustfmt::skip]
        let faces = [
            Face { u: Z, v: Y, w: X, udir: -1.0, vdir: -1.0, width: d, height: h, depth:  w, grid_x: ds, grid_y: hs },
            Face { u: Z, v: Y, w: X, udir:  1.0, vdir: -1.0, width: d, height: h, depth: -w, grid_x: ds, grid_y: hs },
            Face { u: X, v: Z, w: Y, udir:  1.0, vdir:  1.0, width: w, height: d, depth:  h, grid_x: ws, grid_y: ds },
            Face { u: X, v: Z, w: Y, udir:  1.0, vdir: -1.0, width: w, height: d, depth: -h, grid_x: ws, grid_y: ds },
            Face { u: X, v: Y, w: Z, udir:  1.0, vdir: -1.0, width: w, height: h, depth:  d, grid_x: ws, grid_y: hs },
            Face { u: X, v: Y, w: Z, udir: -1.0, vdir: -1.0, width: w, height: h, depth: -d, grid_x: ws, grid_y: hs },
        ];

        let mut geometry = Self {
            id: GeometryId::new(),
            params,
            vertices: Vec::new(),
            indices: Vec::new(),
            groups: Vec::with_capacity(faces.len()),
        };
        for (material_index, face) in faces.iter().enumerate() {
            geometry.build_face(face, material_index as u32);
        }
        geometry
    }

    fn build_face(&mut self, face: &Face, material_index: u32) {
        let segment_width = face.width / face.grid_x as f32;
        let segment_height = face.height / face.grid_y as f32;
        let width_half = face.width / 2.0;
        let height_half = face.height / 2.0;
        let depth_half = face.depth / 2.0;
        let grid_x1 = face.grid_x + 1;
        let grid_y1 = face.grid_y + 1;
        let normal_sign = if face.depth > 0.0 { 1.0 } else { -1.0 };

        let base = self.vertices.len() as u32;
        let group_start = self.indices.len() as u32;

        for iy in 0..grid_y1 {
            let y = iy as f32 * segment_height - height_half;
            for ix in 0..grid_x1 {
                let x = ix as f32 * segment_width - width_half;

                let mut position = [0.0; 3];
                position[face.u as usize] = x * face.udir;
                position[face.v as usize] = y * face.vdir;
                position[face.w as usize] = depth_half;

                let mut normal = [0.0; 3];
                normal[face.w as usize] = normal_sign;

                self.vertices.push(GeometryVertex {
                    position,
                    normal,
                    uv: [
                        ix as f32 / face.grid_x as f32,
                        1.0 - iy as f32 / face.grid_y as f32,
                    ],
                });
            }
        }

        for iy in 0..face.grid_y {
            for ix in 0..face.grid_x {
                let a = base + ix + grid_x1 * iy;
                let b = base + ix + grid_x1 * (iy + 1);
                let c = base + (ix + 1) + grid_x1 * (iy + 1);
                let d = base + (ix + 1) + grid_x1 * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        self.groups.push(GeometryGroup {
            start: group_start,
            count: self.indices.len() as u32 - group_start,
            material_index,
        });
    }

    pub fn id(&self) -> GeometryId {
        self.id
    }

    /// Parameters this geometry was built from.
    pub fn params(&self) -> BoxParams {
        self.params
    }

    pub fn vertices(&self) -> &[GeometryVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn groups(&self) -> &[GeometryGroup] {
        &self.groups
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices with the three edges of every triangle.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut lines = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            lines.extend_from_slice(&[tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]]);
        }
        lines
    }

    /// Release this geometry. Returns the id of the released resource.
    pub fn dispose(self) -> GeometryId {
        tracing::debug!(
            "disposed geometry {} ({} vertices)",
            self.id.short(),
            self.vertices.len()
        );
        self.id
    }
}
