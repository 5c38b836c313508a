//! Lloyd relaxation (§6): repeatedly rebuilds the diagram and moves each
//! site to a point derived from its cell's vertices, by default their
//! centroid. Grounded in `Lloyd.cpp`'s accumulate-and-divide loop, minus
//! the per-frame GIF encoding that loop also did — that rasterization
//! concern stays out of this crate.

use crate::error::VoronoiError;
use crate::geometry::{BoundingBox, Point};
use crate::Diagram;

/// Maps a site and the (deduplicated) vertices of its Voronoi cell to the
/// site's next position. The default, `centroid`, is the arithmetic mean
/// of the cell's vertices.
pub type CentroidPredicate = dyn Fn(&Point, &[Point]) -> Point;

pub fn centroid(_site: &Point, cell_vertices: &[Point]) -> Point {
    let n = cell_vertices.len() as f64;
    let (sum_x, sum_y) = cell_vertices.iter().fold((0.0, 0.0), |(sx, sy), p| {
        (sx + p.x.into_inner(), sy + p.y.into_inner())
    });
    Point::from_f64(sum_x / n, sum_y / n)
}

/// Options for `lloyd_iterated`. `jitter` is an optional perturbation
/// amplitude applied after each iteration (off by default, for
/// reproducibility); it only has an effect when this crate is built with
/// the `jitter` feature.
pub struct LloydOptions {
    pub iterations: usize,
    pub jitter: Option<f64>,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self { iterations: 1, jitter: None }
    }
}

/// One relaxation pass: builds the Voronoi diagram of `sites`, then maps
/// each site through `predicate` against its own cell's vertices. A site
/// whose cell has no finalized vertices (degenerate input, e.g. a single
/// site) is left in place.
pub fn lloyd(sites: &[Point], bounds: &BoundingBox, predicate: &CentroidPredicate) -> Result<Vec<Point>, VoronoiError> {
    let diagram = Diagram::build(sites, bounds)?;

    let mut cell_vertex_ids: Vec<Vec<usize>> = vec![Vec::new(); sites.len()];
    for edge in &diagram.edges {
        for site in [edge.site1, edge.site2] {
            for vertex in [edge.vertex1, edge.vertex2] {
                if !cell_vertex_ids[site].contains(&vertex) {
                    cell_vertex_ids[site].push(vertex);
                }
            }
        }
    }

    Ok(sites
        .iter()
        .zip(cell_vertex_ids.iter())
        .map(|(site, ids)| {
            if ids.is_empty() {
                *site
            } else {
                let points: Vec<Point> = ids.iter().map(|&id| diagram.vertices[id]).collect();
                predicate(site, &points)
            }
        })
        .collect())
}

/// Runs `lloyd` `options.iterations` times, building a fresh `Diagram`
/// each round, optionally jittering the result before the next round.
pub fn lloyd_iterated(
    sites: &[Point],
    bounds: &BoundingBox,
    options: &LloydOptions,
    predicate: &CentroidPredicate,
) -> Result<Vec<Point>, VoronoiError> {
    let mut current = sites.to_vec();
    for i in 0..options.iterations {
        current = lloyd(&current, bounds, predicate)?;
        if let Some(amplitude) = options.jitter {
            apply_jitter(&mut current, amplitude);
        }
        log::debug!("lloyd iteration {i} complete");
    }
    Ok(current)
}

#[cfg(feature = "jitter")]
fn apply_jitter(sites: &mut [Point], amplitude: f64) {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    for site in sites.iter_mut() {
        let dx = rng.gen_range(-amplitude..=amplitude);
        let dy = rng.gen_range(-amplitude..=amplitude);
        *site = Point::from_f64(site.x.into_inner() + dx, site.y.into_inner() + dy);
    }
}

#[cfg(not(feature = "jitter"))]
fn apply_jitter(_sites: &mut [Point], _amplitude: f64) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_of_four_relaxes_toward_center() {
        let bounds = BoundingBox::new(0.0.into(), 100.0.into(), 0.0.into(), 100.0.into());
        let sites = vec![
            Point::from_f64(10.0, 10.0),
            Point::from_f64(90.0, 15.0),
            Point::from_f64(15.0, 90.0),
            Point::from_f64(85.0, 88.0),
        ];
        let relaxed = lloyd(&sites, &bounds, &centroid).unwrap();
        assert_eq!(relaxed.len(), sites.len());
        for p in &relaxed {
            assert!(p.x.into_inner() >= 0.0 && p.x.into_inner() <= 100.0);
            assert!(p.y.into_inner() >= 0.0 && p.y.into_inner() <= 100.0);
        }
    }

    #[test]
    fn single_site_is_left_in_place() {
        let bounds = BoundingBox::new(0.0.into(), 100.0.into(), 0.0.into(), 100.0.into());
        let sites = vec![Point::from_f64(50.0, 50.0)];
        let relaxed = lloyd(&sites, &bounds, &centroid).unwrap();
        assert_eq!(relaxed, sites);
    }

    #[test]
    fn lloyd_iterated_runs_requested_rounds() {
        let bounds = BoundingBox::new(0.0.into(), 100.0.into(), 0.0.into(), 100.0.into());
        let sites = vec![
            Point::from_f64(10.0, 10.0),
            Point::from_f64(90.0, 10.0),
            Point::from_f64(50.0, 90.0),
        ];
        let options = LloydOptions { iterations: 3, jitter: None };
        let relaxed = lloyd_iterated(&sites, &bounds, &options, &centroid).unwrap();
        assert_eq!(relaxed.len(), sites.len());
    }
}
