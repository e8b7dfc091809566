use std::fmt;

use serde::{Deserialize, Serialize};

use geom::Pt2D;

/// One thing to put on the road.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlanItem {
    Sign { label: String, position: Pt2D },
    ChannelDevice { label: String, position: Pt2D },
    /// A stretch of the centerline, from upstream to downstream.
    Zone { label: String, from: Pt2D, to: Pt2D },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    Sign,
    ChannelDevice,
    Zone,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemGeometry {
    Point(Pt2D),
    Span(Pt2D, Pt2D),
}

impl PlanItem {
    pub fn sign<S: Into<String>>(label: S, position: Pt2D) -> PlanItem {
        PlanItem::Sign {
            label: label.into(),
            position,
        }
    }

    pub fn channel_device<S: Into<String>>(label: S, position: Pt2D) -> PlanItem {
        PlanItem::ChannelDevice {
            label: label.into(),
            position,
        }
    }

    pub fn zone<S: Into<String>>(label: S, from: Pt2D, to: Pt2D) -> PlanItem {
        PlanItem::Zone {
            label: label.into(),
            from,
            to,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            PlanItem::Sign { .. } => ItemKind::Sign,
            PlanItem::ChannelDevice { .. } => ItemKind::ChannelDevice,
            PlanItem::Zone { .. } => ItemKind::Zone,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PlanItem::Sign { label, .. }
            | PlanItem::ChannelDevice { label, .. }
            | PlanItem::Zone { label, .. } => label,
        }
    }

    pub fn geometry(&self) -> ItemGeometry {
        match self {
            PlanItem::Sign { position, .. } | PlanItem::ChannelDevice { position, .. } => {
                ItemGeometry::Point(*position)
            }
            PlanItem::Zone { from, to, .. } => ItemGeometry::Span(*from, *to),
        }
    }
}

impl fmt::Display for PlanItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.geometry() {
            ItemGeometry::Point(pt) => write!(f, "{:?} \"{}\" at {}", self.kind(), self.label(), pt),
            ItemGeometry::Span(from, to) => write!(
                f,
                "{:?} \"{}\" from {} to {}",
                self.kind(),
                self.label(),
                from,
                to
            ),
        }
    }
}

/// How many of each kind of item are in a plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub signs: usize,
    pub channel_devices: usize,
    pub zones: usize,
}

impl PlanSummary {
    pub fn new(items: &[PlanItem]) -> PlanSummary {
        let mut summary = PlanSummary::default();
        for item in items {
            match item.kind() {
                ItemKind::Sign => summary.signs += 1,
                ItemKind::ChannelDevice => summary.channel_devices += 1,
                ItemKind::Zone => summary.zones += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.signs + self.channel_devices + self.zones
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} signs, {} channel devices, {} zones",
            self.signs, self.channel_devices, self.zones
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let sign = PlanItem::sign("End Road Work", Pt2D::new(5.0, 45.0));
        assert_eq!(sign.kind(), ItemKind::Sign);
        assert_eq!(sign.label(), "End Road Work");
        assert_eq!(sign.geometry(), ItemGeometry::Point(Pt2D::new(5.0, 45.0)));

        let zone = PlanItem::zone("Buffer Space", Pt2D::new(5.0, 10.0), Pt2D::new(5.0, 40.0));
        assert_eq!(zone.kind(), ItemKind::Zone);
        assert_eq!(
            zone.geometry(),
            ItemGeometry::Span(Pt2D::new(5.0, 10.0), Pt2D::new(5.0, 40.0))
        );
    }

    #[test]
    fn tagged_json() {
        let cone = PlanItem::channel_device("Taper Barrel/Cone", Pt2D::new(1.0, 2.0));
        let json = serde_json::to_value(&cone).unwrap();
        assert_eq!(json["type"], "ChannelDevice");
        assert_eq!(json["label"], "Taper Barrel/Cone");
    }

    #[test]
    fn summary() {
        let items = vec![
            PlanItem::sign("Road Work Ahead", Pt2D::new(0.0, 0.0)),
            PlanItem::channel_device("Closure Perimeter Cone", Pt2D::new(0.0, 1.0)),
            PlanItem::channel_device("Closure Perimeter Cone", Pt2D::new(0.0, 2.0)),
            PlanItem::zone("Buffer Space", Pt2D::new(0.0, 0.0), Pt2D::new(0.0, 3.0)),
        ];
        let summary = PlanSummary::new(&items);
        assert_eq!(
            summary,
            PlanSummary {
                signs: 1,
                channel_devices: 2,
                zones: 1,
            }
        );
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.to_string(), "1 signs, 2 channel devices, 1 zones");
    }
}
