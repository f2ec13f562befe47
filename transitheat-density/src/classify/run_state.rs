use geo::Point;

use crate::geometry::haversine_km;

use super::{DensityClass, Edge, MergedFeature};

/// thresholds deciding whether an edge may extend the current run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeCriteria {
    /// class values must differ by strictly less than this
    pub class_epsilon: f64,
    /// the run's last point must be strictly closer than this to the edge start
    pub contiguity_threshold_km: f64,
}

/// the polyline being accumulated
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub shape_id: String,
    pub class: DensityClass,
    pub coords: Vec<Point<f64>>,
}

impl Run {
    fn start(edge: &Edge) -> Run {
        Run {
            shape_id: edge.shape_id.to_string(),
            class: edge.class,
            coords: vec![edge.src, edge.dst],
        }
    }

    fn accepts(&self, edge: &Edge, criteria: &MergeCriteria) -> bool {
        if self.shape_id != edge.shape_id || !self.class.within(&edge.class, criteria.class_epsilon) {
            return false;
        }
        match self.coords.last() {
            Some(last) => haversine_km(*last, edge.src) < criteria.contiguity_threshold_km,
            None => false,
        }
    }

    fn into_feature(self) -> Option<MergedFeature> {
        if self.coords.len() < 2 {
            return None;
        }
        Some(MergedFeature {
            shape_id: self.shape_id,
            density: self.class,
            coords: self.coords,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunTransition {
    /// append the edge's end point to the current run
    Extend,
    /// emit the current run, if any, and seed a new one from the edge
    FlushAndStart,
}

/// accumulator that greedily merges classified edges into polylines.
///
/// feed edges in shape order with [`RunState::push`], which returns a
/// finished feature whenever the run breaks, then call
/// [`RunState::finish`] to emit the last open run.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RunState {
    #[default]
    Empty,
    Accumulating(Run),
}

impl RunState {
    pub fn new() -> RunState {
        RunState::Empty
    }

    /// the transition `push` would take for this edge
    pub fn transition(&self, edge: &Edge, criteria: &MergeCriteria) -> RunTransition {
        match self {
            RunState::Accumulating(run) if run.accepts(edge, criteria) => RunTransition::Extend,
            _ => RunTransition::FlushAndStart,
        }
    }

    /// applies the next edge, returning the feature emitted by a flush
    pub fn push(&mut self, edge: &Edge, criteria: &MergeCriteria) -> Option<MergedFeature> {
        match self.transition(edge, criteria) {
            RunTransition::Extend => {
                if let RunState::Accumulating(run) = self {
                    run.coords.push(edge.dst);
                }
                None
            }
            RunTransition::FlushAndStart => {
                let previous = std::mem::replace(self, RunState::Accumulating(Run::start(edge)));
                previous.finish()
            }
        }
    }

    /// flushes the open run at the end of input
    pub fn finish(self) -> Option<MergedFeature> {
        match self {
            RunState::Empty => None,
            RunState::Accumulating(run) => run.into_feature(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RunState::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRITERIA: MergeCriteria = MergeCriteria {
        class_epsilon: 0.001,
        contiguity_threshold_km: 0.05,
    };

    fn class(sample: f64) -> DensityClass {
        DensityClass::quantize(sample, 20)
    }

    fn p(lon: f64, lat: f64) -> Point<f64> {
        Point::new(lon, lat)
    }

    #[test]
    fn test_empty_state_starts_a_run() {
        let mut state = RunState::new();
        let edge = Edge::new("a", p(0.0, 0.0), p(0.0001, 0.0), class(0.5));
        assert_eq!(state.transition(&edge, &CRITERIA), RunTransition::FlushAndStart);
        assert!(state.push(&edge, &CRITERIA).is_none());
        assert!(!state.is_empty());
    }

    #[test]
    fn test_extend_appends_only_end_point() {
        let mut state = RunState::new();
        let e1 = Edge::new("a", p(0.0, 0.0), p(0.0001, 0.0), class(0.5));
        let e2 = Edge::new("a", p(0.0001, 0.0), p(0.0002, 0.0), class(0.5));
        let e3 = Edge::new("a", p(0.0002, 0.0), p(0.0003, 0.0), class(0.5));
        state.push(&e1, &CRITERIA);
        assert_eq!(state.transition(&e2, &CRITERIA), RunTransition::Extend);
        assert!(state.push(&e2, &CRITERIA).is_none());
        assert!(state.push(&e3, &CRITERIA).is_none());
        let feature = state.finish().expect("test failed");
        assert_eq!(
            feature.coords,
            vec![p(0.0, 0.0), p(0.0001, 0.0), p(0.0002, 0.0), p(0.0003, 0.0)]
        );
        assert_eq!(feature.density, class(0.5));
    }

    #[test]
    fn test_class_change_flushes() {
        let mut state = RunState::new();
        let e1 = Edge::new("a", p(0.0, 0.0), p(0.0001, 0.0), class(0.5));
        let e2 = Edge::new("a", p(0.0001, 0.0), p(0.0002, 0.0), class(0.55));
        state.push(&e1, &CRITERIA);
        let flushed = state.push(&e2, &CRITERIA).expect("test failed");
        assert_eq!(flushed.coords, vec![p(0.0, 0.0), p(0.0001, 0.0)]);
        assert_eq!(flushed.density, class(0.5));
        let last = state.finish().expect("test failed");
        assert_eq!(last.coords, vec![p(0.0001, 0.0), p(0.0002, 0.0)]);
        assert_eq!(last.density, class(0.55));
    }

    #[test]
    fn test_shape_change_flushes() {
        let mut state = RunState::new();
        let e1 = Edge::new("a", p(0.0, 0.0), p(0.0001, 0.0), class(0.5));
        let e2 = Edge::new("b", p(0.0001, 0.0), p(0.0002, 0.0), class(0.5));
        state.push(&e1, &CRITERIA);
        let flushed = state.push(&e2, &CRITERIA).expect("test failed");
        assert_eq!(flushed.shape_id, "a");
        assert_eq!(state.finish().expect("test failed").shape_id, "b");
    }

    #[test]
    fn test_spatial_gap_flushes() {
        let mut state = RunState::new();
        // ~111 m apart at the equator, above the 50 m contiguity threshold
        let e1 = Edge::new("a", p(0.0, 0.0), p(0.0001, 0.0), class(0.5));
        let e2 = Edge::new("a", p(0.0011, 0.0), p(0.0012, 0.0), class(0.5));
        state.push(&e1, &CRITERIA);
        assert_eq!(state.transition(&e2, &CRITERIA), RunTransition::FlushAndStart);
        assert!(state.push(&e2, &CRITERIA).is_some());
    }

    #[test]
    fn test_small_gap_still_extends() {
        let mut state = RunState::new();
        // ~11 m apart, below the contiguity threshold
        let e1 = Edge::new("a", p(0.0, 0.0), p(0.0001, 0.0), class(0.5));
        let e2 = Edge::new("a", p(0.0002, 0.0), p(0.0003, 0.0), class(0.5));
        state.push(&e1, &CRITERIA);
        assert_eq!(state.transition(&e2, &CRITERIA), RunTransition::Extend);
    }

    #[test]
    fn test_finish_on_empty() {
        assert!(RunState::new().finish().is_none());
    }
}
