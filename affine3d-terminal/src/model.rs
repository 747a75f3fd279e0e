//! Demo geometry for the terminal front-end.

use affine3d_core::{Edge, Vector3, WireModel};

/// Depth of the extruded letter along Z.
const LETTER_DEPTH: f64 = 1.0;

/// An extruded capital "B" drawn with straight strokes: an outline of eight
/// points with one rectangular hole, `size` wide and `1.5 * size` tall,
/// standing on the XY plane at the origin.
pub fn letter_b(size: f64) -> WireModel {
    let w = size;
    let h = size * 1.5;
    let (third, fifth) = (w / 3.0, h / 5.0);

    let outline = [
        (0.0, 0.0),
        (0.0, h),
        (w, h),
        (w, 4.0 * fifth),
        (third, 4.0 * fifth),
        (third, 3.0 * fifth),
        (w, 3.0 * fifth),
        (w, 0.0),
    ];
    let hole = [
        (third, 2.0 * fifth),
        (2.0 * third, 2.0 * fifth),
        (2.0 * third, fifth),
        (third, fifth),
    ];

    let profile: Vec<(f64, f64)> = outline.iter().chain(hole.iter()).copied().collect();
    let per_face = profile.len();

    let mut vertices = Vec::with_capacity(per_face * 2);
    for z in [0.0, LETTER_DEPTH] {
        vertices.extend(profile.iter().map(|&(x, y)| Vector3::new(x, y, z)));
    }

    let mut edges: Vec<Edge> = Vec::new();
    for face in [0, per_face] {
        closed_loop(&mut edges, face, outline.len());
        closed_loop(&mut edges, face + outline.len(), hole.len());
    }
    edges.extend((0..per_face).map(|i| [i, i + per_face]));

    // indices are generated from the profile above and always in range
    WireModel::new(vertices, edges).unwrap_or_default()
}

fn closed_loop(edges: &mut Vec<Edge>, start: usize, len: usize) {
    edges.extend((0..len).map(|i| [start + i, start + (i + 1) % len]));
}
