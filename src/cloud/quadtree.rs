//! Region quadtree of placed word boxes.
//!
//! The spiral placer asks "does this box hit anything already placed?" for
//! every candidate position, so boxes are bucketed by quadrant and a query
//! only visits cells that overlap the candidate.

use egui::{Pos2, Rect};

/// Boxes per cell before it splits
const CELL_CAPACITY: usize = 8;

/// Prevent unbounded splitting for piles of tiny boxes
const MAX_DEPTH: u32 = 8;

#[derive(Debug)]
enum Cell {
    Leaf {
        items: Vec<Rect>,
    },
    Internal {
        /// Boxes straddling more than one child
        items: Vec<Rect>,
        /// Children: NW, NE, SW, SE
        children: Box<[Cell; 4]>,
    },
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Leaf { items: Vec::new() }
    }
}

/// Get bounds for a specific quadrant (0=NW, 1=NE, 2=SW, 3=SE)
fn child_bounds(bounds: Rect, quadrant: usize) -> Rect {
    let c = bounds.center();
    match quadrant {
        0 => Rect::from_min_max(bounds.min, c),
        1 => Rect::from_min_max(Pos2::new(c.x, bounds.min.y), Pos2::new(bounds.max.x, c.y)),
        2 => Rect::from_min_max(Pos2::new(bounds.min.x, c.y), Pos2::new(c.x, bounds.max.y)),
        _ => Rect::from_min_max(c, bounds.max),
    }
}

/// The single quadrant fully containing `rect`, if any
fn quadrant_of(bounds: Rect, rect: Rect) -> Option<usize> {
    (0..4).find(|&q| child_bounds(bounds, q).contains_rect(rect))
}

/// Strict overlap: boxes that only share an edge don't collide
fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Collision index for axis-aligned boxes inside a fixed area
pub struct RectTree {
    root: Cell,
    bounds: Rect,
    len: usize,
}

impl RectTree {
    pub fn new(bounds: Rect) -> Self {
        Self {
            root: Cell::default(),
            bounds,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn insert(&mut self, rect: Rect) {
        let root = std::mem::take(&mut self.root);
        self.root = Self::insert_into(root, rect, self.bounds, 0);
        self.len += 1;
    }

    fn insert_into(cell: Cell, rect: Rect, bounds: Rect, depth: u32) -> Cell {
        match cell {
            Cell::Leaf { mut items } => {
                items.push(rect);
                if items.len() <= CELL_CAPACITY || depth >= MAX_DEPTH {
                    return Cell::Leaf { items };
                }
                // Split and push down whatever fits in a single child
                let mut children: Box<[Cell; 4]> = Box::default();
                let mut straddling = Vec::new();
                for item in items {
                    match quadrant_of(bounds, item) {
                        Some(q) => {
                            let child = std::mem::take(&mut children[q]);
                            children[q] =
                                Self::insert_into(child, item, child_bounds(bounds, q), depth + 1);
                        }
                        None => straddling.push(item),
                    }
                }
                Cell::Internal {
                    items: straddling,
                    children,
                }
            }
            Cell::Internal {
                mut items,
                mut children,
            } => {
                match quadrant_of(bounds, rect) {
                    Some(q) => {
                        let child = std::mem::take(&mut children[q]);
                        children[q] =
                            Self::insert_into(child, rect, child_bounds(bounds, q), depth + 1);
                    }
                    None => items.push(rect),
                }
                Cell::Internal { items, children }
            }
        }
    }

    /// Does `rect` overlap any stored box?
    pub fn collides(&self, rect: &Rect) -> bool {
        Self::collides_in(&self.root, rect, self.bounds)
    }

    fn collides_in(cell: &Cell, rect: &Rect, bounds: Rect) -> bool {
        match cell {
            Cell::Leaf { items } => items.iter().any(|item| overlaps(item, rect)),
            Cell::Internal { items, children } => {
                if items.iter().any(|item| overlaps(item, rect)) {
                    return true;
                }
                children.iter().enumerate().any(|(q, child)| {
                    let cb = child_bounds(bounds, q);
                    overlaps(&cb, rect) && Self::collides_in(child, rect, cb)
                })
            }
        }
    }
}
