//! A bounded Fortune-sweep Voronoi diagram, plus Lloyd relaxation on top of
//! it.
//!
//! [`Diagram::build`] is the single entry point: given a set of sites and a
//! bounding rectangle, it runs the sweep (`sweep`), clips whatever is left
//! open against the rectangle (`postprocess`), and returns a site-indexed,
//! vertex-deduplicated diagram.

pub mod error;
pub mod geometry;
pub mod lloyd;

mod beachline;
mod edges;
mod events;
mod postprocess;
mod sweep;

#[cfg(test)]
mod test_utils;

use std::collections::HashMap;

pub use edges::Edge;
pub use error::VoronoiError;
pub use geometry::{BoundingBox, Point};

/// The output of a sweep: a deduplicated vertex arena and the edges
/// referencing it by index.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    pub vertices: Vec<Point>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Builds the Voronoi diagram of `sites` clipped to `bounds`. Validates
    /// the input (§7) before doing any geometric work; every other failure
    /// mode is an internal invariant violation and panics rather than
    /// returning an error (see `crate::error`).
    pub fn build(sites: &[Point], bounds: &BoundingBox) -> Result<Self, VoronoiError> {
        validate(sites, bounds)?;

        if sites.len() == 1 {
            log::debug!("single-site diagram: no edges or vertices");
            return Ok(Self::default());
        }

        let (vertices, edges) = sweep::run(sites, bounds);
        Ok(Self { vertices, edges })
    }
}

fn validate(sites: &[Point], bounds: &BoundingBox) -> Result<(), VoronoiError> {
    if sites.is_empty() {
        return Err(VoronoiError::EmptySiteSet);
    }
    if bounds.is_degenerate() {
        return Err(VoronoiError::DegenerateBounds);
    }
    for (index, site) in sites.iter().enumerate() {
        if !site.is_finite() {
            return Err(VoronoiError::NonFiniteCoordinate { index });
        }
        if !geometry::rect_contains(bounds, site) {
            return Err(VoronoiError::SiteOutsideBounds { index });
        }
    }

    let mut seen: HashMap<Point, usize> = HashMap::with_capacity(sites.len());
    for (index, site) in sites.iter().enumerate() {
        if let Some(&first) = seen.get(site) {
            return Err(VoronoiError::CoincidentSites { a: first, b: index });
        }
        seen.insert(*site, index);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{compare_edges, edge_points, has_edge_between};

    fn bbox() -> BoundingBox {
        BoundingBox::new(0.0.into(), 1000.0.into(), 0.0.into(), 1000.0.into())
    }

    #[test]
    fn single_site_has_no_edges_or_vertices() {
        let sites = vec![Point::from_f64(500.0, 500.0)];
        let diagram = Diagram::build(&sites, &bbox()).unwrap();
        assert!(diagram.edges.is_empty());
        assert!(diagram.vertices.is_empty());
    }

    #[test]
    fn two_sites_split_by_vertical_bisector() {
        let sites = vec![Point::from_f64(250.0, 500.0), Point::from_f64(750.0, 500.0)];
        let diagram = Diagram::build(&sites, &bbox()).unwrap();
        assert_eq!(diagram.edges.len(), 1);
        assert!(has_edge_between(
            &diagram,
            Point::from_f64(500.0, 0.0),
            Point::from_f64(500.0, 1000.0),
        ));
    }

    #[test]
    fn two_sites_split_by_horizontal_bisector() {
        let sites = vec![Point::from_f64(500.0, 250.0), Point::from_f64(500.0, 750.0)];
        let diagram = Diagram::build(&sites, &bbox()).unwrap();
        assert_eq!(diagram.edges.len(), 1);
        assert!(has_edge_between(
            &diagram,
            Point::from_f64(0.0, 500.0),
            Point::from_f64(1000.0, 500.0),
        ));
    }

    #[test]
    fn three_points_produce_one_vertex_and_three_edges() {
        let sites = vec![
            Point::from_f64(200.0, 800.0),
            Point::from_f64(800.0, 800.0),
            Point::from_f64(500.0, 200.0),
        ];
        let diagram = Diagram::build(&sites, &bbox()).unwrap();
        assert_eq!(diagram.edges.len(), 3);
        // All three edges should share the single circumcenter-derived vertex.
        let ends = |e: &Edge| [e.vertex1, e.vertex2];
        let shared = ends(&diagram.edges[0])
            .into_iter()
            .find(|v| ends(&diagram.edges[1]).contains(v) && ends(&diagram.edges[2]).contains(v));
        assert!(shared.is_some(), "no vertex shared by all three edges");
    }

    #[test]
    fn square_scenario_matches_the_full_edge_set_up_to_ordering() {
        let sites = vec![
            Point::from_f64(200.0, 200.0),
            Point::from_f64(800.0, 200.0),
            Point::from_f64(200.0, 800.0),
            Point::from_f64(800.0, 800.0),
        ];
        let diagram = Diagram::build(&sites, &bbox()).unwrap();
        let found: Vec<_> = diagram.edges.iter().map(|e| edge_points(&diagram, e)).collect();
        let expected = vec![
            [Point::from_f64(0.0, 500.0), Point::from_f64(500.0, 500.0)],
            [Point::from_f64(1000.0, 500.0), Point::from_f64(500.0, 500.0)],
            [Point::from_f64(500.0, 0.0), Point::from_f64(500.0, 500.0)],
            [Point::from_f64(500.0, 1000.0), Point::from_f64(500.0, 500.0)],
        ];
        assert!(compare_edges(&found, &expected), "edge set doesn't match up to reordering");
    }

    #[test]
    fn empty_site_set_is_rejected() {
        let err = Diagram::build(&[], &bbox()).unwrap_err();
        assert_eq!(err, VoronoiError::EmptySiteSet);
    }

    #[test]
    fn coincident_sites_are_rejected() {
        let sites = vec![Point::from_f64(100.0, 100.0), Point::from_f64(100.0, 100.0)];
        let err = Diagram::build(&sites, &bbox()).unwrap_err();
        assert_eq!(err, VoronoiError::CoincidentSites { a: 0, b: 1 });
    }

    #[test]
    fn site_outside_bounds_is_rejected() {
        let sites = vec![Point::from_f64(-10.0, 500.0), Point::from_f64(500.0, 500.0)];
        let err = Diagram::build(&sites, &bbox()).unwrap_err();
        assert_eq!(err, VoronoiError::SiteOutsideBounds { index: 0 });
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        let sites = vec![Point::from_f64(1.0, 1.0)];
        let flat = BoundingBox::new(0.0.into(), 1000.0.into(), 0.0.into(), 0.0.into());
        let err = Diagram::build(&sites, &flat).unwrap_err();
        assert_eq!(err, VoronoiError::DegenerateBounds);
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let sites = vec![Point::from_f64(f64::NAN, 1.0), Point::from_f64(500.0, 500.0)];
        let err = Diagram::build(&sites, &bbox()).unwrap_err();
        assert_eq!(err, VoronoiError::NonFiniteCoordinate { index: 0 });
    }
}
