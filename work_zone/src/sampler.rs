use geom::{Distance, Pt2D};

use crate::Centerline;

/// Evenly spaces `count` points between two distances along the centerline, including both ends.
/// Asking for fewer than 2 points gives just the midpoint. Expects `start <= end`.
pub fn sample_interval(
    centerline: &Centerline,
    start: Distance,
    end: Distance,
    count: usize,
) -> Vec<Pt2D> {
    if count < 2 {
        return vec![centerline.interpolate((start + end) / 2.0)];
    }
    let step = (end - start) / ((count - 1) as f64);
    (0..count)
        .map(|i| {
            let dist = if i == count - 1 {
                end
            } else {
                start + step * (i as f64)
            };
            centerline.interpolate(dist)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centerline() -> Centerline {
        Centerline::new(Pt2D::new(5.0, 0.0), Pt2D::new(5.0, 50.0))
    }

    #[test]
    fn even_spacing() {
        let pts = sample_interval(&centerline(), Distance::ZERO, Distance::meters(10.0), 5);
        let ys: Vec<f64> = pts.iter().map(|pt| pt.y()).collect();
        assert_eq!(ys, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert!(pts.iter().all(|pt| pt.x() == 5.0));

        let pts = sample_interval(&centerline(), Distance::meters(20.0), Distance::meters(30.0), 2);
        assert_eq!(pts, vec![Pt2D::new(5.0, 20.0), Pt2D::new(5.0, 30.0)]);
    }

    #[test]
    fn too_few_points() {
        for count in [0, 1] {
            assert_eq!(
                sample_interval(&centerline(), Distance::meters(10.0), Distance::meters(20.0), count),
                vec![Pt2D::new(5.0, 15.0)]
            );
        }
    }

    #[test]
    fn empty_interval() {
        let pts = sample_interval(&centerline(), Distance::meters(10.0), Distance::meters(10.0), 3);
        assert_eq!(pts, vec![Pt2D::new(5.0, 10.0); 3]);
    }
}
