use serde::{Deserialize, Serialize};

use geom::{Distance, Line, LineClip, Polygon};

use crate::Centerline;

/// The stretch of the centerline that's closed, as distances from its start.
/// `0 <= start <= end <= length` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosureRange {
    start: Distance,
    end: Distance,
}

impl ClosureRange {
    pub fn start(&self) -> Distance {
        self.start
    }

    pub fn end(&self) -> Distance {
        self.end
    }

    pub fn length(&self) -> Distance {
        self.end - self.start
    }
}

/// Finds where the centerline passes through the closure. If it passes through several separate
/// pieces, the longest one wins; between equally long pieces, the one closest to the start of the
/// centerline does. Only touching the closure at isolated points doesn't count as closed.
pub fn analyze_closure(centerline: &Centerline, closure: &[Polygon]) -> Option<ClosureRange> {
    let line = centerline.line()?;
    let piece = match line.clip_to(closure) {
        LineClip::Empty => {
            return None;
        }
        LineClip::Segment(piece) => piece,
        LineClip::Segments(pieces) => longest(pieces)?,
        LineClip::Other { pieces, touches } => {
            debug!(
                "Centerline meets the closure in {} piece(s) and {} isolated point(s); no closure \
                 range",
                pieces.len(),
                touches.len()
            );
            return None;
        }
    };

    let d1 = centerline.project(piece.pt1());
    let d2 = centerline.project(piece.pt2());
    Some(ClosureRange {
        start: d1.min(d2),
        end: d1.max(d2),
    })
}

fn longest(pieces: Vec<Line>) -> Option<Line> {
    let mut best: Option<Line> = None;
    for piece in pieces {
        if best.map(|b| piece.length() > b.length()).unwrap_or(true) {
            best = Some(piece);
        }
    }
    best
}
