/// Geometry primitives and procedural builders for the watch model
use nalgebra::{Point3, Vector3};
use std::f32::consts::TAU;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    pub fn at(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Append all triangles of another mesh
    pub fn merge(&mut self, other: Mesh) {
        self.triangles.extend(other.triangles);
    }

    /// Move every vertex by the given offset, returning the mesh for chaining
    pub fn translated(mut self, offset: Vector3<f32>) -> Self {
        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                vertex.position += offset;
            }
        }
        self
    }

    /// Add a flat quad (two triangles) with the normal derived from winding
    fn add_quad(&mut self, p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>, p3: Point3<f32>) {
        let normal = (p1 - p0).cross(&(p3 - p0)).normalize();
        self.add_triangle(Triangle::new(
            Vertex::at(p0, normal),
            Vertex::at(p1, normal),
            Vertex::at(p2, normal),
        ));
        self.add_triangle(Triangle::new(
            Vertex::at(p0, normal),
            Vertex::at(p2, normal),
            Vertex::at(p3, normal),
        ));
    }

    /// Axis-aligned box centered at the origin (bridges, levers, hands)
    pub fn bar(sx: f32, sy: f32, sz: f32) -> Self {
        let (hx, hy, hz) = (sx / 2.0, sy / 2.0, sz / 2.0);
        let p = |x: f32, y: f32, z: f32| Point3::new(x, y, z);
        let mut mesh = Self::with_capacity(12);

        // +Z and -Z faces
        mesh.add_quad(p(-hx, -hy, hz), p(hx, -hy, hz), p(hx, hy, hz), p(-hx, hy, hz));
        mesh.add_quad(p(hx, -hy, -hz), p(-hx, -hy, -hz), p(-hx, hy, -hz), p(hx, hy, -hz));
        // +Y and -Y faces
        mesh.add_quad(p(-hx, hy, hz), p(hx, hy, hz), p(hx, hy, -hz), p(-hx, hy, -hz));
        mesh.add_quad(p(-hx, -hy, -hz), p(hx, -hy, -hz), p(hx, -hy, hz), p(-hx, -hy, hz));
        // +X and -X faces
        mesh.add_quad(p(hx, -hy, hz), p(hx, -hy, -hz), p(hx, hy, -hz), p(hx, hy, hz));
        mesh.add_quad(p(-hx, -hy, -hz), p(-hx, -hy, hz), p(-hx, hy, hz), p(-hx, hy, -hz));

        mesh
    }

    /// Capped cylinder around the Y axis (plates, wheels, jewels)
    pub fn disc(radius: f32, thickness: f32, segments: usize) -> Self {
        let half = thickness / 2.0;
        let mut mesh = Self::with_capacity(segments * 4);

        for i in 0..segments {
            let a0 = TAU * i as f32 / segments as f32;
            let a1 = TAU * (i + 1) as f32 / segments as f32;
            let (x0, z0) = (radius * a0.cos(), radius * a0.sin());
            let (x1, z1) = (radius * a1.cos(), radius * a1.sin());

            // Top and bottom caps as fans around the center
            mesh.add_triangle(Triangle::new(
                Vertex::new(0.0, half, 0.0, 0.0, 1.0, 0.0),
                Vertex::new(x1, half, z1, 0.0, 1.0, 0.0),
                Vertex::new(x0, half, z0, 0.0, 1.0, 0.0),
            ));
            mesh.add_triangle(Triangle::new(
                Vertex::new(0.0, -half, 0.0, 0.0, -1.0, 0.0),
                Vertex::new(x0, -half, z0, 0.0, -1.0, 0.0),
                Vertex::new(x1, -half, z1, 0.0, -1.0, 0.0),
            ));

            // Side wall
            mesh.add_quad(
                Point3::new(x0, -half, z0),
                Point3::new(x1, -half, z1),
                Point3::new(x1, half, z1),
                Point3::new(x0, half, z0),
            );
        }

        mesh
    }

    /// Annular band around the Y axis (case middle, balance rim)
    pub fn ring(outer: f32, inner: f32, thickness: f32, segments: usize) -> Self {
        let half = thickness / 2.0;
        let mut mesh = Self::with_capacity(segments * 8);

        for i in 0..segments {
            let a0 = TAU * i as f32 / segments as f32;
            let a1 = TAU * (i + 1) as f32 / segments as f32;
            let rim = |r: f32, a: f32, y: f32| Point3::new(r * a.cos(), y, r * a.sin());

            // Top and bottom annular faces
            mesh.add_quad(
                rim(inner, a0, half),
                rim(inner, a1, half),
                rim(outer, a1, half),
                rim(outer, a0, half),
            );
            mesh.add_quad(
                rim(outer, a0, -half),
                rim(outer, a1, -half),
                rim(inner, a1, -half),
                rim(inner, a0, -half),
            );

            // Outer and inner walls
            mesh.add_quad(
                rim(outer, a0, -half),
                rim(outer, a1, -half),
                rim(outer, a1, half),
                rim(outer, a0, half),
            );
            mesh.add_quad(
                rim(inner, a1, -half),
                rim(inner, a0, -half),
                rim(inner, a0, half),
                rim(inner, a1, half),
            );
        }

        mesh
    }

    /// Toothed wheel: a disc hub with rectangular teeth around the rim
    pub fn gear(radius: f32, teeth: usize, thickness: f32) -> Self {
        let segments = (teeth * 2).max(12);
        let mut mesh = Self::disc(radius, thickness, segments);

        let half = thickness / 2.0;
        let tooth_depth = (radius * 0.18).max(0.04);
        let pitch = TAU / teeth as f32;
        // Tooth occupies half the pitch at the root, tapering toward the tip
        let root_half = pitch * 0.25;
        let tip_half = root_half * 0.6;

        for i in 0..teeth {
            let center = pitch * i as f32;
            let rim = |r: f32, a: f32, y: f32| Point3::new(r * a.cos(), y, r * a.sin());

            let r0 = radius * 0.98;
            let r1 = radius + tooth_depth;
            let (ra0, ra1) = (center - root_half, center + root_half);
            let (ta0, ta1) = (center - tip_half, center + tip_half);

            // Eight corners of the tooth prism
            let b = [
                rim(r0, ra0, -half),
                rim(r0, ra1, -half),
                rim(r1, ta1, -half),
                rim(r1, ta0, -half),
            ];
            let t = [
                rim(r0, ra0, half),
                rim(r0, ra1, half),
                rim(r1, ta1, half),
                rim(r1, ta0, half),
            ];

            mesh.add_quad(t[0], t[1], t[2], t[3]); // top
            mesh.add_quad(b[3], b[2], b[1], b[0]); // bottom
            mesh.add_quad(b[3], t[3], t[2], b[2]); // tip face
            mesh.add_quad(b[0], t[0], t[3], b[3]); // leading flank
            mesh.add_quad(b[2], t[2], t[1], b[1]); // trailing flank
        }

        mesh
    }
}
