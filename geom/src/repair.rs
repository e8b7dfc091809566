use std::collections::HashMap;

use anyhow::Result;

use crate::line::{is_collinear, project_param, segment_hit, SegmentHit};
use crate::ring::{close_and_dedupe, is_simple, signed_area};
use crate::{HashablePt2D, Polygon, Pt2D, Ring, AREA_EPSILON, PARAM_EPSILON};

/// The outcome of repairing a ring.
#[derive(Clone, Debug, PartialEq)]
pub enum Repaired {
    /// The input was already a valid ring, and nothing changed besides closing it.
    Valid(Polygon),
    /// The input crossed or touched itself, or had spikes. These are the pieces with area that
    /// it encloses, with overlapping pieces merged.
    Fixed(Vec<Polygon>),
}

/// Turns an arbitrary sequence of points into valid polygons. Fails if no area at all is
/// enclosed. Repairing any of the resulting polygons again leaves it untouched.
pub fn repair_ring(pts: Vec<Pt2D>) -> Result<Repaired> {
    let pts = close_and_dedupe(pts);
    if pts.len() >= 4 && is_simple(&pts) && signed_area(&pts).abs() > AREA_EPSILON {
        return Ok(Repaired::Valid(Ring::new(pts)?.into_polygon()));
    }
    if pts.len() < 4 {
        bail!("Can't repair a ring with {} distinct points", pts.len().saturating_sub(1));
    }

    let mut open = pts;
    open.pop();
    let open = drop_flat_vertices(open);
    if open.len() < 3 {
        bail!("Ring collapses to a line or point");
    }

    let mut polygons = Vec::new();
    for piece in split_loops(insert_crossings(&open)) {
        let mut piece = drop_flat_vertices(piece);
        if piece.len() < 3 {
            continue;
        }
        piece.push(piece[0]);
        if signed_area(&piece).abs() <= AREA_EPSILON {
            continue;
        }
        if !is_simple(&piece) {
            bail!("Couldn't untangle part of a ring into a simple loop");
        }
        polygons.push(Ring::new(piece)?.into_polygon());
    }
    if polygons.is_empty() {
        bail!("Ring doesn't enclose any area");
    }
    Ok(Repaired::Fixed(merge_overlapping(polygons)))
}

/// Works on open rings, where the last point implicitly connects back to the first. Removes
/// vertices that add nothing: ones in the middle of a straight run, and tips of spikes that fold
/// back on themselves.
fn drop_flat_vertices(mut pts: Vec<Pt2D>) -> Vec<Pt2D> {
    loop {
        pts.dedup();
        while pts.len() > 1 && pts[0] == *pts.last().unwrap() {
            pts.pop();
        }
        let n = pts.len();
        if n < 3 {
            return pts;
        }
        let flat = (0..n).find(|i| {
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            prev == next || is_collinear(prev, pts[*i], next)
        });
        match flat {
            Some(i) => {
                pts.remove(i);
            }
            None => return pts,
        }
    }
}

/// Adds a vertex everywhere two edges of an open ring cross or touch. Both edges get exactly the
/// same point, so the loops can be split apart by matching points later.
fn insert_crossings(pts: &[Pt2D]) -> Vec<Pt2D> {
    let n = pts.len();
    let edge = |i: usize| (pts[i], pts[(i + 1) % n]);
    let mut splits: Vec<Vec<(f64, Pt2D)>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a1, a2) = edge(i);
            let (b1, b2) = edge(j);
            match segment_hit(a1, a2, b1, b2) {
                SegmentHit::None => {}
                SegmentHit::Point { t, u } => {
                    let pt = snap(a1, a2, t, b1, b2, u);
                    splits[i].push((t, pt));
                    splits[j].push((u, pt));
                }
                SegmentHit::Overlap { t0, t1 } => {
                    for t in [t0, t1] {
                        let along = lerp(a1, a2, t);
                        let u = project_param(b1, b2, along).clamp(0.0, 1.0);
                        let pt = snap(a1, a2, t, b1, b2, u);
                        splits[i].push((t, pt));
                        splits[j].push((u, pt));
                    }
                }
            }
        }
    }

    let mut result = Vec::new();
    for (i, mut extra) in splits.into_iter().enumerate() {
        result.push(pts[i]);
        extra.sort_by(|a, b| a.0.total_cmp(&b.0));
        result.extend(extra.into_iter().map(|(_, pt)| pt));
    }
    result.dedup();
    while result.len() > 1 && result[0] == *result.last().unwrap() {
        result.pop();
    }
    result
}

/// Prefers an existing vertex over a computed point, so touching at a corner doesn't introduce a
/// near-duplicate.
fn snap(a1: Pt2D, a2: Pt2D, t: f64, b1: Pt2D, b2: Pt2D, u: f64) -> Pt2D {
    if t <= PARAM_EPSILON {
        a1
    } else if t >= 1.0 - PARAM_EPSILON {
        a2
    } else if u <= PARAM_EPSILON {
        b1
    } else if u >= 1.0 - PARAM_EPSILON {
        b2
    } else {
        lerp(a1, a2, t)
    }
}

fn lerp(a1: Pt2D, a2: Pt2D, t: f64) -> Pt2D {
    Pt2D::new(a1.x() + t * (a2.x() - a1.x()), a1.y() + t * (a2.y() - a1.y()))
}

/// Walks an open ring where points may repeat. Every time the walk returns to a point it already
/// visited, the stretch in between is cut off as its own open loop.
fn split_loops(pts: Vec<Pt2D>) -> Vec<Vec<Pt2D>> {
    let mut loops = Vec::new();
    let mut stack: Vec<Pt2D> = Vec::new();
    let mut index: HashMap<HashablePt2D, usize> = HashMap::new();

    let first = pts[0];
    for pt in pts.into_iter().chain(std::iter::once(first)) {
        if let Some(idx) = index.get(&pt.to_hashable()).cloned() {
            let piece = stack.split_off(idx + 1);
            for p in &piece {
                index.remove(&p.to_hashable());
            }
            let mut piece_loop = vec![stack[idx]];
            piece_loop.extend(piece);
            loops.push(piece_loop);
        } else {
            index.insert(pt.to_hashable(), stack.len());
            stack.push(pt);
        }
    }
    loops
}

fn merge_overlapping(mut polygons: Vec<Polygon>) -> Vec<Polygon> {
    loop {
        let mut pair = None;
        'search: for i in 0..polygons.len() {
            for j in (i + 1)..polygons.len() {
                if polygons[i].overlaps(&polygons[j]) {
                    pair = Some((i, j));
                    break 'search;
                }
            }
        }
        let (i, j) = match pair {
            Some(pair) => pair,
            None => return polygons,
        };

        let second = polygons.remove(j);
        let first = polygons.remove(i);
        let mut merged = Polygon::union_all(vec![first.clone(), second.clone()]);
        if merged.len() != 1 {
            warn!(
                "Overlapping loops unioned into {} pieces; leaving them separate",
                merged.len()
            );
            polygons.push(first);
            polygons.push(second);
            return polygons;
        }
        polygons.insert(i, merged.remove(0));
    }
}
