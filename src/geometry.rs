//! Mesh generation for the crystal, its wireframe shell and the particle field.
//!
//! Meshes are plain attribute arrays with a `u32` index list, ready to upload
//! to WebGL2. Winding is counter-clockwise when viewed from outside.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::mapper::Shape;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[cfg(test)]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        self.uvs.push(uv);
        index
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    /// Line-list indices covering every triangle edge once. Vertices that
    /// share a position (UV seams, unindexed faces) are welded first.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut canonical = Vec::with_capacity(self.positions.len());
        let mut seen: HashMap<[i32; 3], u32> = HashMap::new();
        for (i, p) in self.positions.iter().enumerate() {
            let key = p.map(|c| (c * 1e4).round() as i32);
            canonical.push(*seen.entry(key).or_insert(i as u32));
        }

        let mut edges: Vec<(u32, u32)> = Vec::new();
        let mut unique = std::collections::HashSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let (a, b) = (canonical[a as usize], canonical[b as usize]);
                if a == b {
                    continue;
                }
                let key = (a.min(b), a.max(b));
                if unique.insert(key) {
                    edges.push(key);
                }
            }
        }
        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }
}

const ICOSAHEDRON_INDICES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1,
    8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

const OCTAHEDRON_INDICES: [u32; 24] = [
    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
];

fn icosahedron_vertices() -> Vec<Vec3> {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    vec![
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

fn octahedron_vertices() -> Vec<Vec3> {
    vec![
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ]
}

pub fn icosahedron(radius: f32, detail: u32) -> Mesh {
    polyhedron(&icosahedron_vertices(), &ICOSAHEDRON_INDICES, radius, detail)
}

pub fn octahedron(radius: f32, detail: u32) -> Mesh {
    polyhedron(&octahedron_vertices(), &OCTAHEDRON_INDICES, radius, detail)
}

/// Subdivides each face into `(detail + 1)^2` triangles and pushes every
/// vertex out onto the sphere of `radius`. Undivided solids keep flat
/// normals so their facets read sharply.
fn polyhedron(base: &[Vec3], faces: &[u32], radius: f32, detail: u32) -> Mesh {
    let cols = detail as usize + 1;
    let mut corners: Vec<Vec3> = Vec::with_capacity(faces.len() / 3 * cols * cols * 3);

    for face in faces.chunks_exact(3) {
        let (a, b, c) = (
            base[face[0] as usize],
            base[face[1] as usize],
            base[face[2] as usize],
        );
        let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let aj = a.lerp(c, i as f32 / cols as f32);
            let bj = b.lerp(c, i as f32 / cols as f32);
            let rows = cols - i;
            let row = (0..=rows)
                .map(|j| {
                    if rows == 0 {
                        aj
                    } else {
                        aj.lerp(bj, j as f32 / rows as f32)
                    }
                })
                .collect();
            grid.push(row);
        }
        for i in 0..cols {
            for j in 0..2 * (cols - i) - 1 {
                let k = j / 2;
                if j % 2 == 0 {
                    corners.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
                } else {
                    corners.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
                }
            }
        }
    }

    let mut mesh = Mesh::default();
    for tri in corners.chunks_exact(3) {
        let projected = [tri[0], tri[1], tri[2]].map(|v| v.normalize() * radius);
        let flat = (projected[1] - projected[0])
            .cross(projected[2] - projected[0])
            .normalize_or_zero();
        for p in projected {
            let normal = if detail == 0 { flat } else { p.normalize() };
            let index = mesh.push(p, normal, spherical_uv(p));
            mesh.indices.push(index);
        }
    }
    mesh
}

fn spherical_uv(p: Vec3) -> [f32; 2] {
    let azimuth = p.z.atan2(-p.x);
    let inclination = (-p.y).atan2((p.x * p.x + p.z * p.z).sqrt());
    [azimuth / TAU + 0.5, inclination / PI + 0.5]
}

/// Axis-aligned box centred on the origin, each face a subdivided grid.
pub fn cuboid(width: f32, height: f32, depth: f32, segments: [u32; 3]) -> Mesh {
    let [ws, hs, ds] = segments;
    let mut mesh = Mesh::default();
    // (u axis, v axis, w axis, u dir, v dir, u extent, v extent, w extent, u segs, v segs)
    let faces = [
        (2, 1, 0, -1.0, -1.0, depth, height, width, ds, hs),
        (2, 1, 0, 1.0, -1.0, depth, height, -width, ds, hs),
        (0, 2, 1, 1.0, 1.0, width, depth, height, ws, ds),
        (0, 2, 1, 1.0, -1.0, width, depth, -height, ws, ds),
        (0, 1, 2, 1.0, -1.0, width, height, depth, ws, hs),
        (0, 1, 2, -1.0, -1.0, width, height, -depth, ws, hs),
    ];
    for (u, v, w, udir, vdir, extent_u, extent_v, extent_w, grid_x, grid_y) in faces {
        let grid_x = grid_x.max(1);
        let grid_y = grid_y.max(1);
        let seg_u = extent_u / grid_x as f32;
        let seg_v = extent_v / grid_y as f32;
        let base = mesh.positions.len() as u32;
        for iy in 0..=grid_y {
            let y = iy as f32 * seg_v - extent_v / 2.0;
            for ix in 0..=grid_x {
                let x = ix as f32 * seg_u - extent_u / 2.0;
                let mut position = Vec3::ZERO;
                position[u] = x * udir;
                position[v] = y * vdir;
                position[w] = extent_w / 2.0;
                let mut normal = Vec3::ZERO;
                normal[w] = extent_w.signum();
                mesh.push(
                    position,
                    normal,
                    [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                );
            }
        }
        let row = grid_x + 1;
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = base + ix + row * iy;
                let b = base + ix + row * (iy + 1);
                let c = base + ix + 1 + row * (iy + 1);
                let d = base + ix + 1 + row * iy;
                mesh.quad(a, b, c, d);
            }
        }
    }
    mesh
}

/// UV sphere; the pole rows are triangle fans rather than degenerate quads.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = Mesh::default();
    let mut grid = Vec::with_capacity(hs as usize + 1);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let row: Vec<u32> = (0..=ws)
            .map(|ix| {
                let u = ix as f32 / ws as f32;
                let p = Vec3::new(
                    -radius * (u * TAU).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * TAU).sin() * (v * PI).sin(),
                );
                mesh.push(p, p.normalize_or_zero(), [u, 1.0 - v])
            })
            .collect();
        grid.push(row);
    }
    for iy in 0..hs as usize {
        for ix in 0..ws as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs as usize - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// (2, 3) torus knot swept with a circular tube.
pub fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32) -> Mesh {
    const P: f32 = 2.0;
    const Q: f32 = 3.0;
    let knot = |u: f32| {
        let quo = Q / P * u;
        let cs = quo.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * quo.sin() * 0.5,
        )
    };

    let ts = tubular_segments.max(3);
    let rs = radial_segments.max(3);
    let mut mesh = Mesh::default();
    for i in 0..=ts {
        let u = i as f32 / ts as f32 * P * TAU;
        let p1 = knot(u);
        let p2 = knot(u + 0.01);
        let tangent = p2 - p1;
        let mut n = p2 + p1;
        let b = tangent.cross(n).normalize();
        n = b.cross(tangent).normalize();
        for j in 0..=rs {
            let v = j as f32 / rs as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let p = p1 + n * cx + b * cy;
            mesh.push(
                p,
                (p - p1).normalize_or_zero(),
                [i as f32 / ts as f32, j as f32 / rs as f32],
            );
        }
    }
    let stride = rs + 1;
    for j in 1..=ts {
        for i in 1..=rs {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            mesh.quad(a, b, c, d);
        }
    }
    mesh
}

/// Capped cylinder along the y axis; six radial segments make a hex pillar.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> Mesh {
    let rs = radial_segments.max(3);
    let hs = height_segments.max(1);
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;
    let mut mesh = Mesh::default();

    let mut rows = Vec::with_capacity(hs as usize + 1);
    for y in 0..=hs {
        let v = y as f32 / hs as f32;
        let r = v * (radius_bottom - radius_top) + radius_top;
        let row: Vec<u32> = (0..=rs)
            .map(|x| {
                let u = x as f32 / rs as f32;
                let (sin, cos) = (u * TAU).sin_cos();
                mesh.push(
                    Vec3::new(r * sin, -v * height + half, r * cos),
                    Vec3::new(sin, slope, cos).normalize(),
                    [u, 1.0 - v],
                )
            })
            .collect();
        rows.push(row);
    }
    for x in 0..rs as usize {
        for y in 0..hs as usize {
            mesh.quad(rows[y][x], rows[y + 1][x], rows[y + 1][x + 1], rows[y][x + 1]);
        }
    }

    for top in [true, false] {
        let r = if top { radius_top } else { radius_bottom };
        let sign = if top { 1.0 } else { -1.0 };
        let normal = Vec3::new(0.0, sign, 0.0);
        let centres: Vec<u32> = (0..rs)
            .map(|_| mesh.push(Vec3::new(0.0, half * sign, 0.0), normal, [0.5, 0.5]))
            .collect();
        let rim: Vec<u32> = (0..=rs)
            .map(|x| {
                let (sin, cos) = (x as f32 / rs as f32 * TAU).sin_cos();
                mesh.push(
                    Vec3::new(r * sin, half * sign, r * cos),
                    normal,
                    [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
                )
            })
            .collect();
        for x in 0..rs as usize {
            let (c, i, j) = (centres[x], rim[x], rim[x + 1]);
            if top {
                mesh.indices.extend_from_slice(&[i, j, c]);
            } else {
                mesh.indices.extend_from_slice(&[j, i, c]);
            }
        }
    }
    mesh
}

/// Full-detail mesh for the crystal's solid body.
pub fn solid_mesh(shape: Shape) -> Mesh {
    match shape {
        Shape::Icosahedron => icosahedron(1.5, 2),
        Shape::Octahedron => octahedron(1.5, 0),
        Shape::Slab => cuboid(2.0, 2.5, 0.5, [10, 10, 2]),
        Shape::Sphere => sphere(1.5, 64, 64),
        Shape::Moon => icosahedron(1.5, 10),
        Shape::TorusKnot => torus_knot(1.0, 0.35, 150, 32),
        Shape::HexPillar => cylinder(0.8, 0.8, 3.5, 6, 20),
    }
}

/// Low-poly shell drawn as lines slightly outside the solid.
pub fn wire_mesh(shape: Shape) -> Mesh {
    match shape {
        Shape::Icosahedron => icosahedron(1.6, 1),
        Shape::Octahedron => octahedron(1.6, 0),
        Shape::Slab => cuboid(2.1, 2.6, 0.6, [2, 2, 1]),
        Shape::Sphere | Shape::Moon => sphere(1.6, 12, 12),
        Shape::TorusKnot => torus_knot(1.1, 0.4, 64, 8),
        Shape::HexPillar => cylinder(0.9, 0.9, 3.6, 6, 4),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub size: f32,
}

/// Dust motes scattered through a 25 × 25 × 15 box around the crystal.
pub struct ParticleField;

impl ParticleField {
    pub const EXTENT: Vec3 = Vec3::new(25.0, 25.0, 15.0);
    pub const MAX_SIZE: f32 = 0.06;

    /// `random` must yield values in `[0, 1)`.
    pub fn scatter(count: usize, mut random: impl FnMut() -> f32) -> Vec<Particle> {
        (0..count)
            .map(|_| {
                let x = (random() - 0.5) * Self::EXTENT.x;
                let y = (random() - 0.5) * Self::EXTENT.y;
                let z = (random() - 0.5) * Self::EXTENT.z;
                Particle {
                    position: Vec3::new(x, y, z),
                    size: random() * Self::MAX_SIZE,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(mesh: &Mesh) {
        let n = mesh.vertex_count();
        assert!(n > 0);
        assert_eq!(mesh.normals.len(), n);
        assert_eq!(mesh.uvs.len(), n);
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < n));
        for normal in &mesh.normals {
            let len = Vec3::from_array(*normal).length();
            assert!((len - 1.0).abs() < 1e-3, "normal length {len}");
        }
    }

    #[test]
    fn every_shape_builds_well_formed_meshes() {
        for shape in Shape::ALL {
            assert_well_formed(&solid_mesh(shape));
            assert_well_formed(&wire_mesh(shape));
        }
    }

    #[test]
    fn polyhedron_face_counts() {
        assert_eq!(icosahedron(1.0, 0).triangle_count(), 20);
        assert_eq!(icosahedron(1.0, 2).triangle_count(), 20 * 9);
        assert_eq!(octahedron(1.0, 0).triangle_count(), 8);
    }

    #[test]
    fn polyhedron_vertices_sit_on_the_sphere() {
        let mesh = icosahedron(1.5, 3);
        for p in &mesh.positions {
            assert!((Vec3::from_array(*p).length() - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn octahedron_keeps_flat_facets() {
        let mesh = octahedron(1.5, 0);
        for tri in mesh.indices.chunks_exact(3) {
            let n0 = mesh.normals[tri[0] as usize];
            assert_eq!(n0, mesh.normals[tri[1] as usize]);
            assert_eq!(n0, mesh.normals[tri[2] as usize]);
        }
    }

    #[test]
    fn outward_winding() {
        for mesh in [icosahedron(1.0, 1), sphere(1.0, 16, 8), cuboid(1.0, 1.0, 1.0, [1, 1, 1])] {
            for tri in mesh.indices.chunks_exact(3) {
                let [a, b, c] =
                    [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.positions[i as usize]));
                let face = (b - a).cross(c - a);
                let centre = (a + b + c) / 3.0;
                assert!(face.dot(centre) > 0.0);
            }
        }
    }

    #[test]
    fn cuboid_extents() {
        let mesh = cuboid(2.0, 2.5, 0.5, [10, 10, 2]);
        let max = mesh
            .positions
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc.max(Vec3::from_array(*p).abs()));
        assert!((max - Vec3::new(1.0, 1.25, 0.25)).abs().max_element() < 1e-5);
        // Two faces of 10x10, two of 10x2, two of 2x10 quads.
        assert_eq!(mesh.triangle_count(), 2 * 2 * (100 + 20 + 20));
    }

    #[test]
    fn hex_pillar_has_six_sides_and_caps() {
        let mesh = cylinder(0.8, 0.8, 3.5, 6, 1);
        // 6 side quads + 6 triangles per cap.
        assert_eq!(mesh.triangle_count(), 12 + 12);
        let ys: Vec<f32> = mesh.positions.iter().map(|p| p[1]).collect();
        let top = ys.iter().cloned().fold(f32::MIN, f32::max);
        assert!((top - 1.75).abs() < 1e-6);
    }

    #[test]
    fn torus_knot_grid_counts() {
        let mesh = torus_knot(1.0, 0.35, 150, 32);
        assert_eq!(mesh.vertex_count(), 151 * 33);
        assert_eq!(mesh.triangle_count(), 150 * 32 * 2);
    }

    #[test]
    fn wireframe_edges_are_welded() {
        let edges = octahedron(1.0, 0).edge_indices();
        assert_eq!(edges.len(), 12 * 2);
        let edges = icosahedron(1.0, 0).edge_indices();
        assert_eq!(edges.len(), 30 * 2);
    }

    #[test]
    fn particles_fill_the_box() {
        let mut seq = [0.0_f32, 0.999, 0.5, 0.25].into_iter().cycle();
        let particles = ParticleField::scatter(150, || seq.next().unwrap_or(0.5));
        assert_eq!(particles.len(), 150);
        let half = ParticleField::EXTENT / 2.0;
        for p in &particles {
            assert!(p.position.abs().cmple(half).all());
            assert!(p.size >= 0.0 && p.size < ParticleField::MAX_SIZE);
        }
    }
}
