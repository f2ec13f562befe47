use geo::Point;

use super::DensityClass;

/// two consecutive points of one shape, classified at their midpoint
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<'a> {
    pub shape_id: &'a str,
    pub src: Point<f64>,
    pub dst: Point<f64>,
    pub class: DensityClass,
}

impl<'a> Edge<'a> {
    pub fn new(shape_id: &'a str, src: Point<f64>, dst: Point<f64>, class: DensityClass) -> Self {
        Self {
            shape_id,
            src,
            dst,
            class,
        }
    }
}
