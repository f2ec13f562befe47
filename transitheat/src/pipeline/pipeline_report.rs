use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Frequency,
    Density,
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Frequency => write!(f, "frequency"),
            PipelineStage::Density => write!(f, "density"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StageOutcome {
    pub stage: PipelineStage,
    /// None on success, otherwise the error message
    pub error: Option<String>,
}

/// stage outcomes of one city run
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    pub city: String,
    pub stages: Vec<StageOutcome>,
}

impl PipelineReport {
    pub fn new(city: &str) -> Self {
        Self {
            city: city.to_string(),
            stages: vec![],
        }
    }

    pub fn record<T, E: Display>(&mut self, stage: PipelineStage, result: Result<T, E>) {
        let error = match result {
            Ok(_) => {
                log::info!("{}: finished {stage}", self.city);
                None
            }
            Err(e) => {
                log::error!("{}: {stage} failed: {e}", self.city);
                Some(e.to_string())
            }
        };
        self.stages.push(StageOutcome { stage, error });
    }

    pub fn n_failed(&self) -> usize {
        self.stages.iter().filter(|s| s.error.is_some()).count()
    }

    pub fn is_success(&self) -> bool {
        self.n_failed() == 0
    }
}
