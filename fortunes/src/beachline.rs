//! The beach line: an arena-backed binary tree whose leaves are *arcs*
//! (parabolic segments keyed by a site index) and whose internal nodes are
//! *breakpoints* (intersections of adjacent arcs). A breakpoint's (x, y) is
//! never cached — it is always recomputed from the current sweep-line y and
//! the flanking arcs' sites (invariant I2, §4.2 of the design this follows).
//!
//! Arc/breakpoint ids are indices into a single node arena, replacing the
//! raw-pointer tree a naive port would reach for: parent/child links become
//! `Option<NodeId>`, so there is no use-after-free or double-free to guard
//! against, and destruction is a plain `Vec` drop.

use ordered_float::OrderedFloat;

use crate::edges::{Endpoint, EdgeStore};
use crate::geometry::parabola_intersect_x;
use crate::geometry::Point;

pub type NodeId = usize;

struct Node {
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    data: NodeData,
}

enum NodeData {
    Arc(ArcData),
    BreakPoint(BreakPointData),
}

struct ArcData {
    site: usize,
    has_circle_event: bool,
}

struct BreakPointData {
    site_left: usize,
    site_right: usize,
    open_edge: Option<usize>,
}

pub struct Beachline {
    root: Option<NodeId>,
    nodes: Vec<Node>,
}

impl Beachline {
    pub fn new() -> Self {
        Self {
            root: None,
            nodes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// `InsertArcHead`: the very first site becomes the sole root arc.
    pub fn add_first_arc(&mut self, site: usize) {
        assert!(self.root.is_none(), "add_first_arc: beachline already seeded");
        self.root = Some(self.push_arc(None, site));
    }

    /// `InsertTopArc`: splices a new arc in at the left of the current root,
    /// for the degenerate prefix of sites sharing the sweep's maximal y
    /// (§4.2, §4.4). The new edge's far endpoint is an orphan breakpoint
    /// node, never attached to the tree: it traces no position and will
    /// never finalize, which is exactly what an outside-marker means for a
    /// bisector that only ever grows in one direction (toward the post
    /// processor's full-line case).
    pub fn insert_top(&mut self, site: usize, edges: &mut EdgeStore) {
        let old_root = self.root.expect("insert_top: beachline is empty");
        let old_root_site = self.arc_site(self.minimum(old_root));

        let new_arc = self.push_arc(None, site);
        let sentinel = self.push_detached_breakpoint(site, old_root_site);
        let new_bp = self.push_node(
            None,
            Some(new_arc),
            Some(old_root),
            NodeData::BreakPoint(BreakPointData {
                site_left: site,
                site_right: old_root_site,
                open_edge: None,
            }),
        );

        self.nodes[new_arc].parent = Some(new_bp);
        self.nodes[old_root].parent = Some(new_bp);
        self.root = Some(new_bp);

        let edge_id = edges.new_edge(site, old_root_site, Endpoint::Open(new_bp), Endpoint::Open(sentinel));
        self.set_open_edge(new_bp, edge_id);
        self.set_open_edge(sentinel, edge_id);
    }

    /// `InsertArcIntoArc`: splits arc `l` (site sigma) into `L', M(s), R'`,
    /// replacing it with `bp1(L', bp2(M, R'))`. Creates exactly one new
    /// edge record, shared by the two fresh breakpoints (one edge, two
    /// endpoints — each endpoint references one of the two breakpoints, per
    /// invariant I4). Returns the three new arc ids, left to right.
    pub fn insert_arc_into_arc(
        &mut self,
        arc: NodeId,
        new_site: usize,
        edges: &mut EdgeStore,
    ) -> (NodeId, NodeId, NodeId) {
        let sigma = self.arc_site(arc);
        let parent = self.nodes[arc].parent;

        let a = self.push_arc(None, sigma);
        let b = self.push_arc(None, new_site);
        let c = self.push_arc(None, sigma);
        let bp1 = self.push_node(
            parent,
            Some(a),
            None,
            NodeData::BreakPoint(BreakPointData {
                site_left: sigma,
                site_right: new_site,
                open_edge: None,
            }),
        );
        let bp2 = self.push_node(
            Some(bp1),
            Some(b),
            Some(c),
            NodeData::BreakPoint(BreakPointData {
                site_left: new_site,
                site_right: sigma,
                open_edge: None,
            }),
        );
        self.nodes[bp1].right = Some(bp2);
        self.nodes[a].parent = Some(bp1);
        self.nodes[b].parent = Some(bp2);
        self.nodes[c].parent = Some(bp2);

        match parent {
            Some(p) => {
                if self.nodes[p].left == Some(arc) {
                    self.nodes[p].left = Some(bp1);
                } else {
                    self.nodes[p].right = Some(bp1);
                }
            }
            None => self.root = Some(bp1),
        }

        let edge_id = edges.new_edge(sigma, new_site, Endpoint::Open(bp1), Endpoint::Open(bp2));
        self.set_open_edge(bp1, edge_id);
        self.set_open_edge(bp2, edge_id);

        (a, b, c)
    }

    /// `RemoveArc`: precondition is that `mid` has a pending circle event
    /// and both a left and right arc neighbor. Collapses `mid` and one of
    /// its flanking breakpoints, promotes the other to separate the two
    /// surviving neighbor arcs, and wires the edge store's junction +
    /// endpoint bookkeeping (§4.2, §4.5). Returns the (unchanged) ids of
    /// the left and right arcs so the caller can re-run circle-event
    /// prediction on their new neighborhoods.
    pub fn remove_arc(
        &mut self,
        mid: NodeId,
        edges: &mut EdgeStore,
        sites: &[Point],
        bounds: &crate::geometry::BoundingBox,
    ) -> (NodeId, NodeId) {
        let bp_left = self.left_breakpoint(mid).expect("remove_arc: no left breakpoint");
        let bp_right = self.right_breakpoint(mid).expect("remove_arc: no right breakpoint");
        let left_arc = self.left_arc(mid).expect("remove_arc: no left arc");
        let right_arc = self.right_arc(mid).expect("remove_arc: no right arc");

        let l_site = self.arc_site(left_arc);
        let m_site = self.arc_site(mid);
        let r_site = self.arc_site(right_arc);

        let center = crate::geometry::circumcenter(&sites[l_site], &sites[m_site], &sites[r_site])
            .expect("remove_arc: circle event triple is collinear");
        let junction = edges.create_junction(center, [l_site, m_site, r_site], bounds);

        let edge_left = self.open_edge(bp_left).expect("remove_arc: left breakpoint has no open edge");
        let edge_right = self.open_edge(bp_right).expect("remove_arc: right breakpoint has no open edge");
        edges.finalize_endpoint(edge_left, bp_left, junction);
        edges.finalize_endpoint(edge_right, bp_right, junction);

        let parent = self.nodes[mid].parent.expect("remove_arc: mid arc has no parent");
        let (bp_remove, bp_modify) = if parent == bp_left {
            (bp_left, bp_right)
        } else if parent == bp_right {
            (bp_right, bp_left)
        } else {
            panic!("remove_arc: mid's parent is neither flanking breakpoint");
        };

        let new_edge = edges.new_edge(l_site, r_site, Endpoint::Open(bp_modify), Endpoint::Finalized(junction));
        self.nodes[bp_modify].data = NodeData::BreakPoint(BreakPointData {
            site_left: l_site,
            site_right: r_site,
            open_edge: Some(new_edge),
        });

        let sibling = if self.nodes[bp_remove].left == Some(mid) {
            self.nodes[bp_remove].right.expect("remove_arc: bp_remove has no other child")
        } else {
            self.nodes[bp_remove].left.expect("remove_arc: bp_remove has no other child")
        };

        let grandparent = self.nodes[bp_remove].parent;
        self.nodes[sibling].parent = grandparent;
        match grandparent {
            Some(g) => {
                if self.nodes[g].left == Some(bp_remove) {
                    self.nodes[g].left = Some(sibling);
                } else if self.nodes[g].right == Some(bp_remove) {
                    self.nodes[g].right = Some(sibling);
                } else {
                    panic!("remove_arc: grandparent does not claim bp_remove");
                }
            }
            None => self.root = Some(sibling),
        }

        (left_arc, right_arc)
    }

    pub fn arc_site(&self, node: NodeId) -> usize {
        match &self.nodes[node].data {
            NodeData::Arc(a) => a.site,
            NodeData::BreakPoint(_) => panic!("arc_site: not an arc"),
        }
    }

    pub fn breakpoint_sites(&self, node: NodeId) -> (usize, usize) {
        match &self.nodes[node].data {
            NodeData::BreakPoint(b) => (b.site_left, b.site_right),
            NodeData::Arc(_) => panic!("breakpoint_sites: not a breakpoint"),
        }
    }

    pub fn has_circle_event(&self, arc: NodeId) -> bool {
        match &self.nodes[arc].data {
            NodeData::Arc(a) => a.has_circle_event,
            NodeData::BreakPoint(_) => panic!("has_circle_event: not an arc"),
        }
    }

    pub fn set_circle_event(&mut self, arc: NodeId, value: bool) {
        match &mut self.nodes[arc].data {
            NodeData::Arc(a) => a.has_circle_event = value,
            NodeData::BreakPoint(_) => panic!("set_circle_event: not an arc"),
        }
    }

    fn open_edge(&self, bp: NodeId) -> Option<usize> {
        match &self.nodes[bp].data {
            NodeData::BreakPoint(b) => b.open_edge,
            NodeData::Arc(_) => panic!("open_edge: not a breakpoint"),
        }
    }

    fn set_open_edge(&mut self, bp: NodeId, edge: usize) {
        match &mut self.nodes[bp].data {
            NodeData::BreakPoint(b) => b.open_edge = Some(edge),
            NodeData::Arc(_) => panic!("set_open_edge: not a breakpoint"),
        }
    }

    /// `Locate`: descends from the root, at each breakpoint comparing `x`
    /// against `ParabolaIntersectX` of the flanking arcs (rightmost of the
    /// left subtree, leftmost of the right subtree), per §4.2.
    pub fn locate(&self, sites: &[Point], x: OrderedFloat<f64>, sweep_y: OrderedFloat<f64>) -> NodeId {
        let mut curr = self.root.expect("locate: beachline is empty");
        loop {
            match &self.nodes[curr].data {
                NodeData::Arc(_) => return curr,
                NodeData::BreakPoint(_) => {
                    let left_site = self.arc_site(self.maximum(self.nodes[curr].left.unwrap()));
                    let right_site = self.arc_site(self.minimum(self.nodes[curr].right.unwrap()));
                    let bp_x = parabola_intersect_x(&sites[left_site], &sites[right_site], sweep_y);
                    curr = if x > bp_x {
                        self.nodes[curr].right.unwrap()
                    } else {
                        self.nodes[curr].left.unwrap()
                    };
                }
            }
        }
    }

    pub fn left_arc(&self, node: NodeId) -> Option<NodeId> {
        self.predecessor(node)
            .and_then(|pred| self.nodes[pred].left)
            .map(|left| self.maximum(left))
    }

    pub fn right_arc(&self, node: NodeId) -> Option<NodeId> {
        self.successor(node)
            .and_then(|succ| self.nodes[succ].right)
            .map(|right| self.minimum(right))
    }

    pub fn left_breakpoint(&self, arc: NodeId) -> Option<NodeId> {
        self.predecessor(arc)
    }

    pub fn right_breakpoint(&self, arc: NodeId) -> Option<NodeId> {
        self.successor(arc)
    }

    fn minimum(&self, mut curr: NodeId) -> NodeId {
        loop {
            match &self.nodes[curr].data {
                NodeData::BreakPoint(_) => curr = self.nodes[curr].left.unwrap(),
                NodeData::Arc(_) => return curr,
            }
        }
    }

    fn maximum(&self, mut curr: NodeId) -> NodeId {
        loop {
            match &self.nodes[curr].data {
                NodeData::BreakPoint(_) => curr = self.nodes[curr].right.unwrap(),
                NodeData::Arc(_) => return curr,
            }
        }
    }

    /// Climbs until arriving at an ancestor from its right child: the
    /// nearest breakpoint to the left of `node` in in-order traversal.
    fn predecessor(&self, mut curr: NodeId) -> Option<NodeId> {
        while let Some(parent) = self.nodes[curr].parent {
            if self.nodes[parent].right == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Climbs until arriving at an ancestor from its left child: the
    /// nearest breakpoint to the right of `node` in in-order traversal.
    fn successor(&self, mut curr: NodeId) -> Option<NodeId> {
        while let Some(parent) = self.nodes[curr].parent {
            if self.nodes[parent].left == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    fn push_node(
        &mut self,
        parent: Option<NodeId>,
        left: Option<NodeId>,
        right: Option<NodeId>,
        data: NodeData,
    ) -> NodeId {
        self.nodes.push(Node { parent, left, right, data });
        self.nodes.len() - 1
    }

    fn push_arc(&mut self, parent: Option<NodeId>, site: usize) -> NodeId {
        self.push_node(
            parent,
            None,
            None,
            NodeData::Arc(ArcData { site, has_circle_event: false }),
        )
    }

    /// A breakpoint node that is never attached to the tree: the
    /// permanent "open forever" endpoint for the degenerate top-of-sweep
    /// prefix (§4.2 `InsertTopArc`).
    fn push_detached_breakpoint(&mut self, site_left: usize, site_right: usize) -> NodeId {
        self.push_node(
            None,
            None,
            None,
            NodeData::BreakPoint(BreakPointData { site_left, site_right, open_edge: None }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::EdgeStore;

    #[test]
    fn single_arc_has_no_neighbors() {
        let mut beachline = Beachline::new();
        beachline.add_first_arc(0);
        let root = 0;
        assert!(beachline.left_arc(root).is_none());
        assert!(beachline.right_arc(root).is_none());
    }

    #[test]
    fn split_produces_three_arcs_in_order() {
        let mut beachline = Beachline::new();
        let mut edges = EdgeStore::new();
        beachline.add_first_arc(0);
        let root = 0;
        let (a, b, c) = beachline.insert_arc_into_arc(root, 1, &mut edges);

        assert_eq!(beachline.arc_site(a), 0);
        assert_eq!(beachline.arc_site(b), 1);
        assert_eq!(beachline.arc_site(c), 0);

        assert_eq!(beachline.right_arc(a), Some(b));
        assert_eq!(beachline.left_arc(b), Some(a));
        assert_eq!(beachline.right_arc(b), Some(c));
        assert_eq!(beachline.left_arc(c), Some(b));

        let bp1 = beachline.left_breakpoint(b).unwrap();
        let bp2 = beachline.right_breakpoint(b).unwrap();
        assert_eq!(beachline.breakpoint_sites(bp1), (0, 1));
        assert_eq!(beachline.breakpoint_sites(bp2), (1, 0));
    }

    #[test]
    fn insert_top_prepends_to_the_left() {
        let mut beachline = Beachline::new();
        let mut edges = EdgeStore::new();
        beachline.add_first_arc(0);
        beachline.insert_top(1, &mut edges);
        beachline.insert_top(2, &mut edges);

        // Each insert_top prepends further left, so the arc order (left to
        // right) is newest-to-oldest: site 2, site 1, site 0.
        let leftmost = beachline.minimum(beachline.root.unwrap());
        assert_eq!(beachline.arc_site(leftmost), 2);
        assert_eq!(beachline.right_arc(leftmost).map(|a| beachline.arc_site(a)), Some(1));
    }
}
