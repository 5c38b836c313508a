use approx::relative_eq;
use itertools::Itertools;

use crate::geometry::{Point, Segment};
use crate::{Diagram, Edge};

pub fn compare_points(a: &Point, b: &Point) -> bool {
    relative_eq!(a.x.into_inner(), b.x.into_inner())
        && relative_eq!(a.y.into_inner(), b.y.into_inner())
}

pub fn compare_segments(a: &Segment, b: &Segment) -> bool {
    (compare_points(&a[0], &b[0]) && compare_points(&a[1], &b[1]))
        || (compare_points(&a[0], &b[1]) && compare_points(&a[1], &b[0]))
}

pub fn compare_edges(a: &[Segment], b: &[Segment]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    for perm in a.iter().permutations(a.len()).unique() {
        let mut found_incorrect = false;
        for i in 0..perm.len() {
            if !compare_segments(perm[i], &b[i]) {
                found_incorrect = true;
                break;
            }
        }
        if !found_incorrect {
            return true;
        }
    }

    false
}

/// The endpoints of `diagram.edges[i]`, resolved from vertex indices back
/// to points.
pub fn edge_points(diagram: &Diagram, edge: &Edge) -> Segment {
    [diagram.vertices[edge.vertex1], diagram.vertices[edge.vertex2]]
}

/// Whether some edge in `diagram` runs between `a` and `b` (in either
/// order), up to floating-point tolerance.
pub fn has_edge_between(diagram: &Diagram, a: Point, b: Point) -> bool {
    diagram
        .edges
        .iter()
        .any(|edge| compare_segments(&edge_points(diagram, edge), &[a, b]))
}
