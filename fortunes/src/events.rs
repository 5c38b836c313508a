//! The two event queues the sweep driver merges: site events (known
//! entirely up front, ordered by decreasing y then decreasing x) and
//! circle events (discovered as the sweep proceeds, ordered by decreasing
//! trigger-y, inserted and cancelled as arcs are split and removed).

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;

use crate::geometry::Point;

/// Sort key for a site event: popping the queue's maximum gives the site
/// with the greatest y, and among equal y the greatest x — "decreasing y,
/// ties decreasing x" read off the front of the queue.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SiteKey {
    y: OrderedFloat<f64>,
    x: OrderedFloat<f64>,
}

impl SiteKey {
    pub fn new(p: &Point) -> Self {
        Self { y: p.y, x: p.x }
    }

    pub fn y(&self) -> OrderedFloat<f64> {
        self.y
    }
}

/// Priority queue of pending site events, keyed by site index into the
/// caller's slice.
#[derive(Default)]
pub struct SiteEventQueue {
    queue: PriorityQueue<usize, SiteKey>,
}

impl SiteEventQueue {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
        }
    }

    pub fn push(&mut self, site_idx: usize, key: SiteKey) {
        self.queue.push(site_idx, key);
    }

    pub fn peek_key(&self) -> Option<SiteKey> {
        self.queue.peek().map(|(_, k)| *k)
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.queue.pop().map(|(idx, _)| idx)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Priority queue of pending circle events, keyed by the trigger y (the
/// bottom of the circumscribed circle of the three converging sites).
/// Items are beach-line arc ids: invariant I3 guarantees at most one live
/// circle event per arc, so the arc id alone identifies the event.
#[derive(Default)]
pub struct CircleEventQueue {
    queue: PriorityQueue<usize, OrderedFloat<f64>>,
}

impl CircleEventQueue {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
        }
    }

    pub fn push(&mut self, arc_id: usize, trigger_y: OrderedFloat<f64>) {
        self.queue.push(arc_id, trigger_y);
    }

    pub fn peek_key(&self) -> Option<OrderedFloat<f64>> {
        self.queue.peek().map(|(_, y)| *y)
    }

    pub fn pop(&mut self) -> Option<(usize, OrderedFloat<f64>)> {
        self.queue.pop()
    }

    /// Cancels the circle event (if any) pending on `arc_id`. A no-op if
    /// the arc has no live event, so callers don't need to track that
    /// themselves beyond `Arc::has_pending_event`.
    pub fn cancel(&mut self, arc_id: usize) {
        self.queue.remove(&arc_id);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Picks the next event the driver should retire: whichever of the next
/// site event and the top of the circle queue has the greater y. Ties
/// favor the site event — the normative resolution of the tie-break
/// ambiguity documented in `spec.md` §9 / `SPEC_FULL.md` §1.
pub enum NextEvent {
    Site(usize),
    Circle(usize, OrderedFloat<f64>),
}

pub fn next_event(sites: &mut SiteEventQueue, circles: &mut CircleEventQueue) -> Option<NextEvent> {
    match (sites.peek_key(), circles.peek_key()) {
        (None, None) => None,
        (Some(_), None) => sites.pop().map(NextEvent::Site),
        (None, Some(_)) => circles.pop().map(|(idx, y)| NextEvent::Circle(idx, y)),
        (Some(site_key), Some(circle_y)) => {
            if circle_y > site_key.y() {
                circles.pop().map(|(idx, y)| NextEvent::Circle(idx, y))
            } else {
                sites.pop().map(NextEvent::Site)
            }
        }
    }
}
