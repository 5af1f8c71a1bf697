use std::fmt;

use crate::analysis::axis::{self, AxisPair, AxisSelection};
use crate::analysis::narrative::{self, NarrativeReport};
use crate::analysis::relationship::{self, RelationshipMetrics};
use crate::analysis::stats::{self, SummaryStatistics};
use crate::data::loader;
use crate::data::model::TabularDataset;
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Steps and stages
// ---------------------------------------------------------------------------

/// A unit of work in the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Load,
    Statistics,
    Axes,
    Relationship,
    Narrative,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Load,
        Step::Statistics,
        Step::Axes,
        Step::Relationship,
        Step::Narrative,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Step::Load => "Step 1: Upload Your Data",
            Step::Statistics => "Step 2: View Data Statistics",
            Step::Axes => "Step 3: Visualize Your Data",
            Step::Relationship => "Step 4: Descriptive Analysis for the Graph",
            Step::Narrative => "Step 5: Provide Insights",
        }
    }
}

/// Where the pipeline currently stands. Stages only move forward; an
/// `Error` is left only by a new upload or a reset.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    NoFile,
    Loaded,
    StatisticsShown,
    AxesSelected,
    RelationshipComputed,
    NarrativeShown,
    Error { step: Step, error: PipelineError },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::NoFile => write!(f, "NoFile"),
            Stage::Loaded => write!(f, "Loaded"),
            Stage::StatisticsShown => write!(f, "StatisticsShown"),
            Stage::AxesSelected => write!(f, "AxesSelected"),
            Stage::RelationshipComputed => write!(f, "RelationshipComputed"),
            Stage::NarrativeShown => write!(f, "NarrativeShown"),
            Stage::Error { step, error } => write!(f, "Error({step:?}, {})", error.kind()),
        }
    }
}

// ---------------------------------------------------------------------------
// Render sink
// ---------------------------------------------------------------------------

/// Successful output of one step, borrowed from the pipeline.
#[derive(Debug, Clone, Copy)]
pub enum StepOutput<'a> {
    Dataset(&'a TabularDataset),
    Statistics(&'a SummaryStatistics),
    Axes(&'a AxisPair),
    Relationship {
        pair: &'a AxisPair,
        metrics: &'a RelationshipMetrics,
    },
    Narrative(&'a NarrativeReport),
}

/// Receives each step's payload, or the error that halted the pipeline, in
/// step order.
pub trait RenderSink {
    fn step_succeeded(&mut self, step: Step, output: StepOutput<'_>);
    fn step_failed(&mut self, step: Step, error: &PipelineError);
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// One session's analysis run: upload → statistics → axes → relationship →
/// narrative. Every step gates the next; the first failure halts the run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stage: Stage,
    source: Option<String>,
    dataset: Option<TabularDataset>,
    statistics: Option<SummaryStatistics>,
    axes: Option<AxisPair>,
    metrics: Option<RelationshipMetrics>,
    narrative: Option<NarrativeReport>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            stage: Stage::NoFile,
            source: None,
            dataset: None,
            statistics: None,
            axes: None,
            metrics: None,
            narrative: None,
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Name of the uploaded file, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn dataset(&self) -> Option<&TabularDataset> {
        self.dataset.as_ref()
    }

    pub fn axes(&self) -> Option<&AxisPair> {
        self.axes.as_ref()
    }

    pub fn metrics(&self) -> Option<&RelationshipMetrics> {
        self.metrics.as_ref()
    }

    pub fn narrative(&self) -> Option<&NarrativeReport> {
        self.narrative.as_ref()
    }

    /// Column names offered to the selection intake.
    pub fn column_names(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(TabularDataset::column_names)
            .unwrap_or_default()
    }

    /// The halting error and the step that raised it.
    pub fn error(&self) -> Option<(Step, &PipelineError)> {
        match &self.stage {
            Stage::Error { step, error } => Some((*step, error)),
            _ => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.stage, Stage::Error { .. })
    }

    /// Whether an axis selection can be applied in the current stage.
    pub fn accepts_selection(&self) -> bool {
        matches!(
            self.stage,
            Stage::StatisticsShown
                | Stage::AxesSelected
                | Stage::RelationshipComputed
                | Stage::NarrativeShown
        )
    }

    /// Discard everything and return to `NoFile`.
    pub fn reset(&mut self) {
        *self = Self::default();
        log::debug!("pipeline reset");
    }

    /// Start a fresh run from raw CSV bytes. Loads the table and computes
    /// statistics, then waits for an axis selection.
    pub fn upload(&mut self, source: impl Into<String>, bytes: &[u8]) -> &Stage {
        self.reset();
        let source = source.into();
        log::info!("upload '{source}' ({} bytes)", bytes.len());
        self.source = Some(source);

        let dataset = match loader::parse_csv(bytes) {
            Ok(ds) => ds,
            Err(e) => {
                self.fail(Step::Load, e);
                return &self.stage;
            }
        };
        log::info!(
            "loaded {} rows with columns {:?}",
            dataset.len(),
            dataset.column_names()
        );
        let described = stats::describe(&dataset);
        self.dataset = Some(dataset);
        self.transition(Stage::Loaded);

        match described {
            Ok(statistics) => {
                self.statistics = Some(statistics);
                self.transition(Stage::StatisticsShown);
            }
            Err(e) => self.fail(Step::Statistics, e),
        }
        &self.stage
    }

    /// Apply an axis selection and run the remaining steps. Re-selecting
    /// discards the previous axes, metrics and narrative first.
    ///
    /// Ignored (stage unchanged) before statistics exist or once halted.
    pub fn select_axes(&mut self, selection: AxisSelection) -> &Stage {
        if !self.accepts_selection() {
            log::warn!(
                "axis selection {} vs {} ignored in stage {}",
                selection.y,
                selection.x,
                self.stage
            );
            return &self.stage;
        }

        self.axes = None;
        self.metrics = None;
        self.narrative = None;
        self.transition(Stage::StatisticsShown);

        let Some(dataset) = &self.dataset else {
            return &self.stage;
        };
        let pair = match axis::select_axes(dataset, &selection) {
            Ok(pair) => pair,
            Err(e) => {
                self.fail(Step::Axes, e);
                return &self.stage;
            }
        };
        log::debug!(
            "axes {} vs {}: {} points, {} rows dropped",
            selection.y,
            selection.x,
            pair.len(),
            pair.dropped
        );
        self.transition(Stage::AxesSelected);

        let metrics = relationship::analyze_pair(&pair);
        self.transition(Stage::RelationshipComputed);

        self.narrative = Some(narrative::narrate(&pair.selection, &metrics));
        self.axes = Some(pair);
        self.metrics = Some(metrics);
        self.transition(Stage::NarrativeShown);
        &self.stage
    }

    /// Feed every completed step to `sink` in order, then the halting error
    /// if there is one. Steps after the first missing output are not visited.
    pub fn render(&self, sink: &mut impl RenderSink) {
        for step in Step::ALL {
            match self.output(step) {
                Some(output) => sink.step_succeeded(step, output),
                None => {
                    if let Some((failed, error)) = self.error() {
                        if failed == step {
                            sink.step_failed(step, error);
                        }
                    }
                    return;
                }
            }
        }
    }

    fn output(&self, step: Step) -> Option<StepOutput<'_>> {
        match step {
            Step::Load => self.dataset.as_ref().map(StepOutput::Dataset),
            Step::Statistics => self.statistics.as_ref().map(StepOutput::Statistics),
            Step::Axes => self.axes.as_ref().map(StepOutput::Axes),
            Step::Relationship => match (&self.axes, &self.metrics) {
                (Some(pair), Some(metrics)) => Some(StepOutput::Relationship { pair, metrics }),
                _ => None,
            },
            Step::Narrative => self.narrative.as_ref().map(StepOutput::Narrative),
        }
    }

    fn transition(&mut self, next: Stage) {
        log::debug!("pipeline: {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn fail(&mut self, step: Step, error: PipelineError) {
        log::warn!("{step:?} step failed: {error}");
        self.transition(Stage::Error { step, error });
    }
}
