use super::Rect;
use crate::hierarchy::{Hierarchy, NodeId};

/// Target aspect ratio for squarified rows.
const PHI: f64 = 1.618_033_988_749_895;

/// Tiles `children` (already in descending-sum order) into `region`,
/// writing each child's rectangle into `boxes`.
pub(super) fn squarify(
    tree: &Hierarchy,
    children: &[NodeId],
    value: f64,
    region: Rect,
    boxes: &mut [Rect],
) {
    if value <= 0.0 {
        collapse(children, region, boxes);
        return;
    }
    match children {
        [] => return,
        [only] => {
            boxes[only.0] = region;
            return;
        }
        _ => {}
    }

    let sum_of = |id: NodeId| tree.node(id).sum;
    let n = children.len();
    let mut rect = region;
    let mut remaining = value;
    let mut i0 = 0usize;

    while i0 < n {
        let dx = rect.width();
        let dy = rect.height();
        if remaining <= 0.0 || dx <= 0.0 || dy <= 0.0 {
            collapse(&children[i0..], rect, boxes);
            return;
        }

        // Seed the row with the first non-empty child; empty ones ride along.
        let mut i1 = i0;
        let mut row_sum = 0.0;
        while i1 < n {
            row_sum = sum_of(children[i1]);
            i1 += 1;
            if row_sum > 0.0 {
                break;
            }
        }
        if row_sum <= 0.0 {
            collapse(&children[i0..], rect, boxes);
            return;
        }

        let mut min_value = row_sum;
        let mut max_value = row_sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * PHI);
        let mut beta = row_sum * row_sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while i1 < n {
            let node_value = sum_of(children[i1]);
            let next_sum = row_sum + node_value;
            let next_min = min_value.min(node_value);
            let next_max = max_value.max(node_value);
            beta = next_sum * next_sum * alpha;
            let ratio = (next_max / beta).max(beta / next_min);
            if ratio > min_ratio {
                break;
            }
            row_sum = next_sum;
            min_value = next_min;
            max_value = next_max;
            min_ratio = ratio;
            i1 += 1;
        }

        let row = &children[i0..i1];
        let last_row = i1 == n;
        if dx < dy {
            let y2 = if last_row {
                rect.y1
            } else {
                rect.y0 + dy * row_sum / remaining
            };
            dice(tree, row, row_sum, Rect::new(rect.x0, rect.y0, rect.x1, y2), boxes);
            rect.y0 = y2;
        } else {
            let x2 = if last_row {
                rect.x1
            } else {
                rect.x0 + dx * row_sum / remaining
            };
            slice(tree, row, row_sum, Rect::new(rect.x0, rect.y0, x2, rect.y1), boxes);
            rect.x0 = x2;
        }

        remaining -= row_sum;
        i0 = i1;
    }
}

/// Lays a row out left to right across `rect`.
fn dice(tree: &Hierarchy, row: &[NodeId], row_sum: f64, rect: Rect, boxes: &mut [Rect]) {
    let k = if row_sum > 0.0 {
        rect.width() / row_sum
    } else {
        0.0
    };
    let mut x = rect.x0;
    for (idx, child) in row.iter().enumerate() {
        let x0 = x;
        x = if idx + 1 == row.len() {
            rect.x1
        } else {
            x + tree.node(*child).sum * k
        };
        boxes[child.0] = Rect::new(x0, rect.y0, x, rect.y1);
    }
}

/// Lays a column out top to bottom across `rect`.
fn slice(tree: &Hierarchy, row: &[NodeId], row_sum: f64, rect: Rect, boxes: &mut [Rect]) {
    let k = if row_sum > 0.0 {
        rect.height() / row_sum
    } else {
        0.0
    };
    let mut y = rect.y0;
    for (idx, child) in row.iter().enumerate() {
        let y0 = y;
        y = if idx + 1 == row.len() {
            rect.y1
        } else {
            y + tree.node(*child).sum * k
        };
        boxes[child.0] = Rect::new(rect.x0, y0, rect.x1, y);
    }
}

fn collapse(children: &[NodeId], rect: Rect, boxes: &mut [Rect]) {
    for child in children {
        boxes[child.0] = Rect::collapsed(rect.x0, rect.y0);
    }
}
