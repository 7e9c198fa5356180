//! Open list, closed set and the node arena backing a search.
//!
//! The open list is intentionally a sorted `Vec` rather than a binary
//! heap: insertion position is the first entry whose `f` strictly exceeds
//! the new node's, which gives first-discovered-first tie-breaking, and
//! an open duplicate is unconditionally superseded by evicting the old
//! entry to the closed set. Both behaviors are part of the observable
//! contract (they shape the expansion order a renderer animates).

use gridpaint_core::Point;

/// A search node. `parent` indexes the arena; the chain of parents forms
/// a tree rooted at the start node and is walked backward to reconstruct
/// the path.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Node {
    pub(crate) pos: Point,
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) parent: Option<usize>,
}

/// Frontier state for one run: node arena, sorted open list, closed set.
pub(crate) struct Frontier {
    /// Every node ever created this run; never shrinks while running, so
    /// parent indices stay valid for the backtrace.
    nodes: Vec<Node>,
    /// Arena indices, kept sorted ascending by `f`.
    open: Vec<usize>,
    /// Per-position expansion flag, flat row-major.
    closed: Vec<bool>,
    width: i32,
}

impl Frontier {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            nodes: Vec::new(),
            open: Vec::new(),
            closed: vec![false; (width.max(0) * height.max(0)) as usize],
            width: width.max(0),
        }
    }

    /// Discard all nodes and closed positions; called when a run starts.
    pub(crate) fn reset(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.closed.fill(false);
    }

    #[inline]
    fn pos_index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    #[inline]
    pub(crate) fn open_len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub(crate) fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Arena index of the lowest-`f` open node, if any.
    #[inline]
    pub(crate) fn peek(&self) -> Option<usize> {
        self.open.first().copied()
    }

    /// Insert a node, keeping the open list sorted: position is the first
    /// entry with `f` strictly greater than the new node's, so equal-`f`
    /// nodes stay in discovery order. Returns the arena index.
    pub(crate) fn push(&mut self, node: Node) -> usize {
        let f = node.f;
        let idx = self.nodes.len();
        self.nodes.push(node);
        let at = self
            .open
            .iter()
            .position(|&i| self.nodes[i].f > f)
            .unwrap_or(self.open.len());
        self.open.insert(at, idx);
        idx
    }

    /// Move the front open node to the closed set.
    pub(crate) fn close_front(&mut self) {
        if !self.open.is_empty() {
            let idx = self.open.remove(0);
            let pi = self.pos_index(self.nodes[idx].pos);
            self.closed[pi] = true;
        }
    }

    /// Whether `p` has already been expanded.
    #[inline]
    pub(crate) fn is_closed(&self, p: Point) -> bool {
        self.closed[self.pos_index(p)]
    }

    /// Open-list index (not arena index) of the node at `p`, linear scan.
    pub(crate) fn open_index_of(&self, p: Point) -> Option<usize> {
        self.open.iter().position(|&i| self.nodes[i].pos == p)
    }

    /// Remove the open entry at `open_idx` and mark its position closed.
    /// Used when a newly discovered node supersedes an open duplicate.
    pub(crate) fn evict_to_closed(&mut self, open_idx: usize) {
        let idx = self.open.remove(open_idx);
        let pi = self.pos_index(self.nodes[idx].pos);
        self.closed[pi] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, y: i32, f: f64) -> Node {
        Node {
            pos: Point::new(x, y),
            g: f,
            f,
            parent: None,
        }
    }

    #[test]
    fn pops_lowest_f_first() {
        let mut fr = Frontier::new(8, 8);
        fr.push(node(0, 0, 3.0));
        fr.push(node(1, 0, 1.0));
        fr.push(node(2, 0, 2.0));
        assert_eq!(fr.node(fr.peek().unwrap()).pos, Point::new(1, 0));
        fr.close_front();
        assert_eq!(fr.node(fr.peek().unwrap()).pos, Point::new(2, 0));
    }

    #[test]
    fn equal_f_keeps_discovery_order() {
        let mut fr = Frontier::new(8, 8);
        fr.push(node(0, 0, 2.0));
        fr.push(node(1, 0, 2.0));
        fr.push(node(2, 0, 2.0));
        let order: Vec<_> = (0..3)
            .map(|_| {
                let p = fr.node(fr.peek().unwrap()).pos;
                fr.close_front();
                p
            })
            .collect();
        assert_eq!(
            order,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
    }

    #[test]
    fn close_front_marks_position_closed() {
        let mut fr = Frontier::new(8, 8);
        fr.push(node(3, 4, 1.0));
        assert!(!fr.is_closed(Point::new(3, 4)));
        fr.close_front();
        assert!(fr.is_closed(Point::new(3, 4)));
        assert_eq!(fr.open_len(), 0);
    }

    #[test]
    fn evict_moves_open_duplicate_to_closed() {
        let mut fr = Frontier::new(8, 8);
        fr.push(node(0, 0, 1.0));
        fr.push(node(5, 5, 2.0));
        let oi = fr.open_index_of(Point::new(5, 5)).unwrap();
        fr.evict_to_closed(oi);
        assert_eq!(fr.open_len(), 1);
        assert!(fr.is_closed(Point::new(5, 5)));
        assert!(fr.open_index_of(Point::new(5, 5)).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut fr = Frontier::new(4, 4);
        fr.push(node(1, 1, 1.0));
        fr.close_front();
        fr.reset();
        assert_eq!(fr.open_len(), 0);
        assert!(fr.peek().is_none());
        assert!(!fr.is_closed(Point::new(1, 1)));
    }
}
