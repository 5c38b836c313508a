//! The edge/vertex store (§4.5): an append-only arena of edge records, each
//! tracking its two endpoints as either a still-open breakpoint or a
//! finalized junction. A junction merges the "circumcenter shared by three
//! edges" bookkeeping into one ref-counted record, rather than a hierarchy
//! of small endpoint types — there are only ever two endpoint shapes that
//! matter here (open, or done), so `Endpoint` has exactly two variants.

use crate::beachline::NodeId;
use crate::geometry::{BoundingBox, Point, rect_contains, EPS};

pub type EdgeId = usize;
pub type JunctionId = usize;
pub type VertexId = usize;

#[derive(Clone, Copy, Debug)]
pub(crate) enum Endpoint {
    /// Still tracing the sweep: references the beach-line breakpoint whose
    /// motion currently traces this end of the edge.
    Open(NodeId),
    /// Pinned to a circumcenter discovered by a circle event.
    Finalized(JunctionId),
}

struct EdgeRecord {
    site1: usize,
    site2: usize,
    ep1: Endpoint,
    ep2: Endpoint,
    emitted: bool,
}

/// A circumcenter shared by the three edges separating three mutually
/// adjacent sites. `vertex` is `None` when the circumcenter itself lies
/// outside the bounding rectangle — the post-processor still needs the
/// position (to reconstruct a clipped ray's direction) even though no
/// output vertex is ever allocated for it.
pub(crate) struct Junction {
    pub(crate) position: Point,
    pub(crate) sites: [usize; 3],
    pub(crate) vertex: Option<VertexId>,
    refcount: u8,
}

/// One finalized piece of the diagram: the edge between the cells of
/// `site1` and `site2`, running from `vertex1` to `vertex2` (indices into
/// `Diagram::vertices`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub site1: usize,
    pub site2: usize,
    pub vertex1: VertexId,
    pub vertex2: VertexId,
}

pub(crate) struct EdgeStore {
    edges: Vec<EdgeRecord>,
    junctions: Vec<Junction>,
    pub(crate) vertices: Vec<Point>,
    pub(crate) output: Vec<Edge>,
}

impl EdgeStore {
    pub(crate) fn new() -> Self {
        Self {
            edges: Vec::new(),
            junctions: Vec::new(),
            vertices: Vec::new(),
            output: Vec::new(),
        }
    }

    pub(crate) fn new_edge(&mut self, site1: usize, site2: usize, ep1: Endpoint, ep2: Endpoint) -> EdgeId {
        self.edges.push(EdgeRecord { site1, site2, ep1, ep2, emitted: false });
        self.edges.len() - 1
    }

    /// Records a fresh circumcenter as a junction shared by three edges. If
    /// it lies inside `bounds`, a vertex is allocated for it — reusing an
    /// existing vertex within `EPS` rather than pushing a duplicate, since a
    /// cocircular quadruple (or larger) of sites schedules more than one
    /// circle event at the same circumcenter, one per converging triple
    /// (e.g. spec scenario #4, the square: all four circle events converge
    /// on the single center). Otherwise `vertex` stays `None` until (if
    /// ever) the post-processor clips a residual edge back into the
    /// rectangle.
    pub(crate) fn create_junction(&mut self, position: Point, sites: [usize; 3], bounds: &BoundingBox) -> JunctionId {
        let vertex = if rect_contains(bounds, &position) {
            Some(self.find_or_push_vertex(position))
        } else {
            None
        };
        self.junctions.push(Junction { position, sites, vertex, refcount: 3 });
        self.junctions.len() - 1
    }

    /// Returns the id of an existing vertex within `EPS` of `position`, or
    /// allocates a new one. Mirrors `postprocess::reuse_or_push`'s tolerance.
    fn find_or_push_vertex(&mut self, position: Point) -> VertexId {
        if let Some(id) = self.vertices.iter().position(|v| {
            (v.x.into_inner() - position.x.into_inner()).abs() <= EPS
                && (v.y.into_inner() - position.y.into_inner()).abs() <= EPS
        }) {
            return id;
        }
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    /// Replaces whichever endpoint of `edge_id` is `Open(old_bp)` with
    /// `Finalized(junction_id)`, then emits the edge if both ends are now
    /// finalized and both junctions have landed a vertex.
    pub(crate) fn finalize_endpoint(&mut self, edge_id: EdgeId, old_bp: NodeId, junction_id: JunctionId) {
        let edge = &mut self.edges[edge_id];
        if matches!(edge.ep1, Endpoint::Open(bp) if bp == old_bp) {
            edge.ep1 = Endpoint::Finalized(junction_id);
        } else if matches!(edge.ep2, Endpoint::Open(bp) if bp == old_bp) {
            edge.ep2 = Endpoint::Finalized(junction_id);
        } else {
            panic!("finalize_endpoint: edge {edge_id} does not have an open end at breakpoint {old_bp}");
        }
        self.try_emit(edge_id);
    }

    fn try_emit(&mut self, edge_id: EdgeId) {
        let edge = &self.edges[edge_id];
        if edge.emitted {
            return;
        }
        let (Endpoint::Finalized(j1), Endpoint::Finalized(j2)) = (edge.ep1, edge.ep2) else {
            return;
        };
        let (Some(v1), Some(v2)) = (self.junctions[j1].vertex, self.junctions[j2].vertex) else {
            return;
        };
        self.edges[edge_id].emitted = true;
        self.junctions[j1].refcount -= 1;
        self.junctions[j2].refcount -= 1;
        if v1 == v2 {
            // A cocircular degeneracy (more than three sites sharing a
            // circumcenter) can finalize both ends of an edge to the same
            // deduplicated vertex — a zero-length edge with no geometric
            // support. Drop it rather than emit it (spec P1/P5).
            return;
        }
        let (site1, site2) = (edge.site1, edge.site2);
        self.output.push(Edge { site1, site2, vertex1: v1, vertex2: v2 });
    }

    /// Edges still open (or finalized but missing a vertex) when the sweep
    /// ends: the post-processor's input.
    pub(crate) fn residual_edges(&self) -> Vec<(usize, usize, Endpoint, Endpoint)> {
        self.edges
            .iter()
            .filter(|e| !e.emitted)
            .map(|e| (e.site1, e.site2, e.ep1, e.ep2))
            .collect()
    }

    pub(crate) fn junction_position(&self, id: JunctionId) -> Point {
        self.junctions[id].position
    }

    pub(crate) fn junction_sites(&self, id: JunctionId) -> [usize; 3] {
        self.junctions[id].sites
    }

    pub(crate) fn junction_vertex(&self, id: JunctionId) -> Option<VertexId> {
        self.junctions[id].vertex
    }

    pub(crate) fn push_vertex(&mut self, p: Point) -> VertexId {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    pub(crate) fn emit(&mut self, site1: usize, site2: usize, vertex1: VertexId, vertex2: VertexId) {
        self.output.push(Edge { site1, site2, vertex1, vertex2 });
    }
}
