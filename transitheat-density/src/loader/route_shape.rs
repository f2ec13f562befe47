use geo::Point;
use itertools::Itertools;

/// ordered points of one GTFS shape. points are stored as (x=lon, y=lat).
#[derive(Clone, Debug, PartialEq)]
pub struct RouteShape {
    pub shape_id: String,
    pub points: Vec<Point<f64>>,
}

impl RouteShape {
    /// builds a shape from (sequence, point) pairs in any order. the sort is
    /// stable so duplicated sequence values keep their source order.
    pub fn from_sequenced(shape_id: String, sequenced: Vec<(u32, Point<f64>)>) -> RouteShape {
        let points = sequenced
            .into_iter()
            .sorted_by_key(|(seq, _)| *seq)
            .map(|(_, p)| p)
            .collect_vec();
        RouteShape { shape_id, points }
    }

    /// consecutive point pairs along the shape. empty for shapes with fewer
    /// than two points.
    pub fn edges(&self) -> impl Iterator<Item = (Point<f64>, Point<f64>)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::RouteShape;
    use geo::Point;

    #[test]
    fn test_sorted_by_sequence_not_arrival() {
        let shape = RouteShape::from_sequenced(
            String::from("a"),
            vec![
                (3, Point::new(3.0, 0.0)),
                (1, Point::new(1.0, 0.0)),
                (2, Point::new(2.0, 0.0)),
            ],
        );
        let xs: Vec<f64> = shape.points.iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_edges_of_short_shapes() {
        let empty = RouteShape::from_sequenced(String::from("e"), vec![]);
        assert_eq!(empty.edges().count(), 0);
        let single = RouteShape::from_sequenced(String::from("s"), vec![(0, Point::new(0.0, 0.0))]);
        assert_eq!(single.edges().count(), 0);
    }
}
