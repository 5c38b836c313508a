//! The sweep driver: merges site and circle events (§4.4), drives the
//! beach line through `InsertArcIntoArc`/`RemoveArc`, and predicts circle
//! events via `CheckCircleEvent` (§4.3). Produces the raw (still
//! rectangle-unclipped) edge store that `postprocess` finishes.

use ordered_float::OrderedFloat;

use crate::beachline::{Beachline, NodeId};
use crate::edges::EdgeStore;
use crate::events::{next_event, CircleEventQueue, NextEvent, SiteEventQueue, SiteKey};
use crate::geometry::{circumcenter, clockwise_sign, distance, BoundingBox, Point};
use crate::postprocess;
use crate::Edge;

pub(crate) fn run(sites: &[Point], bounds: &BoundingBox) -> (Vec<Point>, Vec<Edge>) {
    let mut beachline = Beachline::new();
    let mut edge_store = EdgeStore::new();
    let mut site_events = SiteEventQueue::new();
    let mut circle_events = CircleEventQueue::new();

    for (idx, site) in sites.iter().enumerate() {
        site_events.push(idx, SiteKey::new(site));
    }

    let first = site_events.pop().expect("run: no sites to sweep");
    let top_y = sites[first].y;
    log::trace!("seeding beachline with site {first}");
    beachline.add_first_arc(first);

    // The degenerate top-of-sweep prefix (§4.2 InsertTopArc, §4.4): every
    // further site sharing the same maximal y splices in at the head
    // instead of going through the generic 3-way split, which degenerates
    // when the flanking arc has zero vertical separation from the new site.
    while let Some(key) = site_events.peek_key() {
        if key.y() != top_y {
            break;
        }
        let idx = site_events.pop().unwrap();
        log::trace!("inserting top-of-sweep site {idx}");
        beachline.insert_top(idx, &mut edge_store);
    }

    let mut sweep_y = top_y;
    loop {
        match next_event(&mut site_events, &mut circle_events) {
            None => break,
            Some(NextEvent::Site(site_idx)) => {
                sweep_y = sites[site_idx].y;
                log::trace!("processing site event {site_idx} at y={sweep_y:?}");
                add_parabola(site_idx, sweep_y, sites, &mut beachline, &mut edge_store, &mut circle_events);
            }
            Some(NextEvent::Circle(arc_idx, trigger_y)) => {
                sweep_y = trigger_y;
                log::trace!("processing circle event for arc {arc_idx} at y={sweep_y:?}");
                remove_parabola(arc_idx, sweep_y, sites, bounds, &mut beachline, &mut edge_store, &mut circle_events);
            }
        }
    }

    postprocess::run(&mut edge_store, sites, bounds);
    log::debug!(
        "sweep complete: {} vertices, {} edges",
        edge_store.vertices.len(),
        edge_store.output.len()
    );
    (edge_store.vertices, edge_store.output)
}

fn add_parabola(
    site_idx: usize,
    sweep_y: OrderedFloat<f64>,
    sites: &[Point],
    beachline: &mut Beachline,
    edge_store: &mut EdgeStore,
    circle_events: &mut CircleEventQueue,
) {
    let x = sites[site_idx].x;
    let arc = beachline.locate(sites, x, sweep_y);
    if beachline.has_circle_event(arc) {
        beachline.set_circle_event(arc, false);
        circle_events.cancel(arc);
    }

    let (a, b, c) = beachline.insert_arc_into_arc(arc, site_idx, edge_store);

    let left_of_a = beachline.left_arc(a);
    check_circle_event(beachline, circle_events, sweep_y, sites, left_of_a, a, Some(b));
    let right_of_c = beachline.right_arc(c);
    check_circle_event(beachline, circle_events, sweep_y, sites, Some(b), c, right_of_c);
}

fn remove_parabola(
    mid: NodeId,
    sweep_y: OrderedFloat<f64>,
    sites: &[Point],
    bounds: &BoundingBox,
    beachline: &mut Beachline,
    edge_store: &mut EdgeStore,
    circle_events: &mut CircleEventQueue,
) {
    let left_arc = beachline.left_arc(mid).expect("remove_parabola: no left neighbor");
    let right_arc = beachline.right_arc(mid).expect("remove_parabola: no right neighbor");

    if beachline.has_circle_event(left_arc) {
        beachline.set_circle_event(left_arc, false);
        circle_events.cancel(left_arc);
    }
    if beachline.has_circle_event(right_arc) {
        beachline.set_circle_event(right_arc, false);
        circle_events.cancel(right_arc);
    }

    let (left_arc, right_arc) = beachline.remove_arc(mid, edge_store, sites, bounds);

    let outer_left = beachline.left_arc(left_arc);
    check_circle_event(beachline, circle_events, sweep_y, sites, outer_left, left_arc, Some(right_arc));
    let outer_right = beachline.right_arc(right_arc);
    check_circle_event(beachline, circle_events, sweep_y, sites, Some(left_arc), right_arc, outer_right);
}

/// `CheckCircleEvent` (§4.3): schedules a circle event for `mid` if `left`,
/// `mid`, `right` exist, are pairwise distinct sites, turn clockwise, and
/// the predicted trigger y has not already passed.
fn check_circle_event(
    beachline: &mut Beachline,
    circle_events: &mut CircleEventQueue,
    sweep_y: OrderedFloat<f64>,
    sites: &[Point],
    left: Option<NodeId>,
    mid: NodeId,
    right: Option<NodeId>,
) {
    let (Some(left), Some(right)) = (left, right) else {
        return;
    };
    if beachline.has_circle_event(mid) {
        return;
    }

    let sl = beachline.arc_site(left);
    let sm = beachline.arc_site(mid);
    let sr = beachline.arc_site(right);
    if sl == sm || sm == sr || sl == sr {
        return;
    }

    if clockwise_sign(&sites[sl], &sites[sm], &sites[sr]).into_inner() <= 0.0 {
        return;
    }

    let Ok(center) = circumcenter(&sites[sl], &sites[sm], &sites[sr]) else {
        return;
    };
    let trigger_y = center.y - distance(&center, &sites[sm]);
    if trigger_y.into_inner() > sweep_y.into_inner() + crate::geometry::EPS {
        return;
    }

    beachline.set_circle_event(mid, true);
    circle_events.push(mid, trigger_y);
}
