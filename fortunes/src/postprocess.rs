//! Post-sweep clipping (§4.6): every edge still open (or finalized but
//! missing a vertex) when the sweep ends is a residual bisector piece that
//! must be clipped against the bounding rectangle before it can be
//! reported. Three cases, by how many ends are pinned to a junction:
//!
//! - both pinned: a finite segment between two circumcenters, one or both
//!   of which may sit outside the rectangle.
//! - neither pinned: the whole bisector is a bi-infinite line (two sites
//!   that never collided with a third).
//! - one pinned: a ray from the known junction, whose direction is
//!   reconstructed by projecting the triangle's third site onto the
//!   bisector and pointing away from it.

use crate::edges::{Endpoint, EdgeStore};
use crate::geometry::{
    clip_line_to_rect, clip_ray_to_rect, clip_segment_to_rect, perpendicular_bisector, project_onto_line,
    BoundingBox, Point, Ray, EPS,
};

pub(crate) fn run(edge_store: &mut EdgeStore, sites: &[Point], bounds: &BoundingBox) {
    let residual = edge_store.residual_edges();
    log::trace!("post-processing {} residual edge(s)", residual.len());

    for (site1, site2, ep1, ep2) in residual {
        match (ep1, ep2) {
            (Endpoint::Finalized(j1), Endpoint::Finalized(j2)) => {
                clip_segment_case(edge_store, bounds, site1, site2, j1, j2)
            }
            (Endpoint::Open(_), Endpoint::Open(_)) => clip_line_case(edge_store, sites, bounds, site1, site2),
            (Endpoint::Finalized(j), Endpoint::Open(_)) | (Endpoint::Open(_), Endpoint::Finalized(j)) => {
                clip_ray_case(edge_store, sites, bounds, site1, site2, j)
            }
        }
    }
}

fn clip_segment_case(
    edge_store: &mut EdgeStore,
    bounds: &BoundingBox,
    site1: usize,
    site2: usize,
    j1: usize,
    j2: usize,
) {
    let (p1, v1) = (edge_store.junction_position(j1), edge_store.junction_vertex(j1));
    let (p2, v2) = (edge_store.junction_position(j2), edge_store.junction_vertex(j2));

    let Some(seg) = clip_segment_to_rect(&p1, &p2, bounds) else {
        log::trace!("segment case between sites {site1},{site2} misses the rectangle, dropping");
        return;
    };
    let vid1 = reuse_or_push(edge_store, seg[0], v1);
    let vid2 = reuse_or_push(edge_store, seg[1], v2);
    edge_store.emit(site1, site2, vid1, vid2);
}

fn clip_line_case(edge_store: &mut EdgeStore, sites: &[Point], bounds: &BoundingBox, site1: usize, site2: usize) {
    let bisector = perpendicular_bisector(&sites[site1], &sites[site2]);
    let Some(seg) = clip_line_to_rect(&bisector, bounds) else {
        log::trace!("bi-infinite bisector between sites {site1},{site2} misses the rectangle, dropping");
        return;
    };
    let vid1 = edge_store.push_vertex(seg[0]);
    let vid2 = edge_store.push_vertex(seg[1]);
    edge_store.emit(site1, site2, vid1, vid2);
}

fn clip_ray_case(
    edge_store: &mut EdgeStore,
    sites: &[Point],
    bounds: &BoundingBox,
    site1: usize,
    site2: usize,
    junction: usize,
) {
    let origin = edge_store.junction_position(junction);
    let origin_vertex = edge_store.junction_vertex(junction);
    let junction_sites = edge_store.junction_sites(junction);
    let apex_site = junction_sites
        .into_iter()
        .find(|&s| s != site1 && s != site2)
        .expect("clip_ray_case: junction has no third site");

    let bisector = perpendicular_bisector(&sites[site1], &sites[site2]);
    let foot = project_onto_line(&sites[apex_site], &bisector);
    let dir = origin - foot;
    let ray = Ray { origin, dir };

    let Some(seg) = clip_ray_to_rect(&ray, bounds) else {
        log::trace!("ray from junction at site pair {site1},{site2} misses the rectangle, dropping");
        return;
    };
    let vid1 = reuse_or_push(edge_store, seg[0], origin_vertex);
    let vid2 = edge_store.push_vertex(seg[1]);
    edge_store.emit(site1, site2, vid1, vid2);
}

/// Reuses `existing` if it names a vertex within `EPS` of `point`, so a
/// circumcenter already emitted by one edge is not duplicated when a
/// second edge incident to the same vertex reaches the post-processor
/// (property P5).
fn reuse_or_push(edge_store: &mut EdgeStore, point: Point, existing: Option<usize>) -> usize {
    if let Some(id) = existing {
        let p = edge_store.vertices[id];
        if (p.x.into_inner() - point.x.into_inner()).abs() <= EPS
            && (p.y.into_inner() - point.y.into_inner()).abs() <= EPS
        {
            return id;
        }
    }
    edge_store.push_vertex(point)
}
