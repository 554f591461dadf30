// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buchheim/Walker tidy tree.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;

use kurbo::{Point, Rect, Size};

/// Index of the virtual parent of the root inside the walk arena.
const SUPER_ROOT: usize = 0;

/// Tidy tree layout with a fixed node size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TidyTree {
    /// Lateral distance between adjacent siblings (`width`) and vertical
    /// distance between adjacent levels (`height`).
    pub node_size: Size,
}

impl TidyTree {
    /// Creates a layout with the given node size.
    #[must_use]
    #[inline]
    pub const fn new(node_size: Size) -> Self {
        Self { node_size }
    }

    /// Lays out the tree rooted at `root`.
    ///
    /// `children` must return the ordered children of a node. Placements in
    /// the result are in pre-order.
    pub fn layout<'a, T, F>(&self, root: &'a T, children: F) -> TreeLayout
    where
        F: Fn(&'a T) -> &'a [T],
    {
        let mut walk = Walk::build(root, &children);
        walk.run();
        walk.into_layout(self.node_size)
    }
}

/// One placed node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacedNode {
    /// Lateral (`x`) and depth (`y`) coordinate.
    pub position: Point,
    /// Depth of the node; the root is at depth 0.
    pub depth: usize,
    /// Pre-order index of the parent, `None` for the root.
    pub parent: Option<usize>,
}

/// Result of [`TidyTree::layout`]: placements in pre-order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeLayout {
    nodes: Vec<PlacedNode>,
}

impl TreeLayout {
    /// Number of placed nodes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing was placed.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Placements in pre-order.
    #[must_use]
    #[inline]
    pub fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    /// Iterates over placements in pre-order.
    pub fn iter(&self) -> core::slice::Iter<'_, PlacedNode> {
        self.nodes.iter()
    }

    /// Bounding box of all node positions.
    ///
    /// `x0`/`x1` are the minimum and maximum lateral positions; `y0` is the
    /// root's depth coordinate (always 0) and `y1` the deepest level. Node
    /// extents are not included; callers pad by their own node radius.
    #[must_use]
    pub fn extent(&self) -> Rect {
        let mut out = Rect::ZERO;
        for node in &self.nodes {
            out.x0 = out.x0.min(node.position.x);
            out.x1 = out.x1.max(node.position.x);
            out.y1 = out.y1.max(node.position.y);
        }
        out
    }
}

impl Index<usize> for TreeLayout {
    type Output = PlacedNode;

    fn index(&self, index: usize) -> &PlacedNode {
        &self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a TreeLayout {
    type Item = &'a PlacedNode;
    type IntoIter = core::slice::Iter<'a, PlacedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Per-node walk state, named after the quantities in the Buchheim paper.
#[derive(Clone, Debug)]
struct WalkState {
    /// Preliminary x.
    prelim: f64,
    /// Modifier applied to the whole subtree.
    modifier: f64,
    /// Pending change/shift, resolved by `execute_shifts`.
    change: f64,
    shift: f64,
    /// Contour thread for leaves.
    thread: Option<usize>,
    /// Ancestor pointer used by `apportion`.
    ancestor: usize,
    /// Default ancestor for the children of this node.
    default_ancestor: Option<usize>,
}

/// Arena for one layout run. Index [`SUPER_ROOT`] is a virtual parent of the
/// root; real nodes follow in pre-order starting at 1.
struct Walk {
    parent: Vec<usize>,
    children: Vec<Vec<usize>>,
    /// Position of each node among its siblings.
    number: Vec<usize>,
    depth: Vec<usize>,
    state: Vec<WalkState>,
    /// Final lateral position in units of node width.
    x: Vec<f64>,
}

impl Walk {
    fn build<'a, T, F>(root: &'a T, children_of: &F) -> Self
    where
        F: Fn(&'a T) -> &'a [T],
    {
        let mut walk = Self {
            parent: vec![SUPER_ROOT],
            children: vec![Vec::new()],
            number: vec![0],
            depth: vec![0],
            state: Vec::new(),
            x: Vec::new(),
        };
        // (node, parent, sibling number, depth)
        let mut stack: Vec<(&'a T, usize, usize, usize)> = vec![(root, SUPER_ROOT, 0, 0)];
        while let Some((node, parent, number, depth)) = stack.pop() {
            let idx = walk.parent.len();
            walk.parent.push(parent);
            walk.children.push(Vec::new());
            walk.number.push(number);
            walk.depth.push(depth);
            walk.children[parent].push(idx);
            let kids = children_of(node);
            stack.extend(
                kids.iter()
                    .enumerate()
                    .rev()
                    .map(|(n, child)| (child, idx, n, depth + 1)),
            );
        }
        let len = walk.parent.len();
        walk.state = (0..len)
            .map(|i| WalkState {
                prelim: 0.0,
                modifier: 0.0,
                change: 0.0,
                shift: 0.0,
                thread: None,
                ancestor: i,
                default_ancestor: None,
            })
            .collect();
        walk.x = vec![0.0; len];
        walk
    }

    fn run(&mut self) {
        for v in self.post_order() {
            self.first_walk(v);
        }
        let root = 1;
        self.state[SUPER_ROOT].modifier = -self.state[root].prelim;
        // Pre-order: every parent precedes its children in the arena.
        for v in 1..self.parent.len() {
            let p = self.parent[v];
            let parent_mod = self.state[p].modifier;
            self.x[v] = self.state[v].prelim + parent_mod;
            self.state[v].modifier += parent_mod;
        }
    }

    fn into_layout(self, node_size: Size) -> TreeLayout {
        let nodes = (1..self.parent.len())
            .map(|v| PlacedNode {
                position: Point::new(
                    self.x[v] * node_size.width,
                    self.depth[v] as f64 * node_size.height,
                ),
                depth: self.depth[v],
                parent: (self.parent[v] != SUPER_ROOT).then(|| self.parent[v] - 1),
            })
            .collect();
        TreeLayout { nodes }
    }

    /// Real nodes in post-order, children left to right.
    fn post_order(&self) -> Vec<usize> {
        // Pre-order with children visited right to left, reversed.
        let mut out = Vec::with_capacity(self.parent.len() - 1);
        let mut stack = vec![1];
        while let Some(v) = stack.pop() {
            out.push(v);
            stack.extend(self.children[v].iter().copied());
        }
        out.reverse();
        out
    }

    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.parent[a] == self.parent[b] {
            1.0
        } else {
            2.0
        }
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.children[v].first().copied().or(self.state[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.children[v].last().copied().or(self.state[v].thread)
    }

    fn left_sibling(&self, v: usize) -> Option<usize> {
        let n = self.number[v];
        (n > 0).then(|| self.children[self.parent[v]][n - 1])
    }

    fn first_walk(&mut self, v: usize) {
        let parent = self.parent[v];
        let w = self.left_sibling(v);
        if let (Some(&first), Some(&last)) = (self.children[v].first(), self.children[v].last()) {
            self.execute_shifts(v);
            let midpoint = (self.state[first].prelim + self.state[last].prelim) / 2.0;
            if let Some(w) = w {
                self.state[v].prelim = self.state[w].prelim + self.separation(v, w);
                self.state[v].modifier = self.state[v].prelim - midpoint;
            } else {
                self.state[v].prelim = midpoint;
            }
        } else if let Some(w) = w {
            self.state[v].prelim = self.state[w].prelim + self.separation(v, w);
        }
        let default_ancestor = self.state[parent]
            .default_ancestor
            .unwrap_or(self.children[parent][0]);
        self.state[parent].default_ancestor = Some(self.apportion(v, w, default_ancestor));
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for i in (0..self.children[v].len()).rev() {
            let w = self.children[v][i];
            let s = &mut self.state[w];
            s.prelim += shift;
            s.modifier += shift;
            change += s.change;
            shift += s.shift + change;
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let subtrees = (self.number[wp] - self.number[wm]) as f64;
        let change = shift / subtrees;
        self.state[wp].change -= change;
        self.state[wp].shift += shift;
        self.state[wm].change += change;
        self.state[wp].prelim += shift;
        self.state[wp].modifier += shift;
    }

    fn next_ancestor(&self, vim: usize, v: usize, default_ancestor: usize) -> usize {
        let a = self.state[vim].ancestor;
        if self.parent[a] == self.parent[v] {
            a
        } else {
            default_ancestor
        }
    }

    fn apportion(&mut self, v: usize, w: Option<usize>, mut default_ancestor: usize) -> usize {
        let Some(w) = w else {
            return default_ancestor;
        };
        // i = inner, o = outer; p = right subtree (v), m = left forest.
        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.children[self.parent[v]][0];
        let mut sip = self.state[vip].modifier;
        let mut sop = self.state[vop].modifier;
        let mut sim = self.state[vim].modifier;
        let mut som = self.state[vom].modifier;

        let (next_vim, next_vip) = loop {
            let (Some(im), Some(ip)) = (self.next_right(vim), self.next_left(vip)) else {
                break (self.next_right(vim), self.next_left(vip));
            };
            vim = im;
            vip = ip;
            let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
                // Outer contours are at least as deep as inner ones.
                debug_assert!(false, "outer contour ended before the inner contour");
                break (None, None);
            };
            vom = om;
            vop = op;
            self.state[vop].ancestor = v;
            let shift = self.state[vim].prelim + sim - self.state[vip].prelim - sip
                + self.separation(vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(vim, v, default_ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.state[vim].modifier;
            sip += self.state[vip].modifier;
            som += self.state[vom].modifier;
            sop += self.state[vop].modifier;
        };

        if next_vim.is_some() && self.next_right(vop).is_none() {
            self.state[vop].thread = next_vim;
            self.state[vop].modifier += sim - sop;
        }
        if next_vip.is_some() && self.next_left(vom).is_none() {
            self.state[vom].thread = next_vip;
            self.state[vom].modifier += sip - som;
            default_ancestor = v;
        }
        default_ancestor
    }
}
