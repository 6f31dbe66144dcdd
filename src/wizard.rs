//! AI diagnosis wizard.
//!
//! Four data-collection steps followed by an analysis phase. The whole
//! flow is one enum with guarded transitions — the old pair of
//! `is_analyzing`/`analysis_complete` flags allowed both to be true at
//! once; `WizardPhase` makes that unrepresentable.
//!
//! Each run of the analysis carries a one-time token. A completion that
//! arrives after `reset()` (or after a newer run started) is discarded,
//! so a stale payload can never be displayed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════
// Steps
// ═══════════════════════════════════════════════════════════

/// Data-collection steps, in stepper order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    PatientSelect,
    ClinicalData,
    Imaging,
    Genomic,
}

/// The ordered step sequence shown in the stepper.
pub const STEPS: &[WizardStep] = &[
    WizardStep::PatientSelect,
    WizardStep::ClinicalData,
    WizardStep::Imaging,
    WizardStep::Genomic,
];

impl WizardStep {
    pub fn label(self) -> &'static str {
        match self {
            Self::PatientSelect => "Patient Select",
            Self::ClinicalData => "Clinical Data",
            Self::Imaging => "Imaging",
            Self::Genomic => "Genomic",
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Analysis payload
// ═══════════════════════════════════════════════════════════

/// Input modality scored by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    Imaging,
    Genomic,
    Clinical,
}

/// Per-modality confidence, 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityConfidence {
    pub modality: Modality,
    pub confidence: u8,
}

/// Risk banding derived from the score — derived on read, never stored,
/// so score and level cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => Self::High,
            40..=69 => Self::Moderate,
            _ => Self::Low,
        }
    }
}

/// One analysis run's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall risk score, 0–100.
    pub risk_score: u8,
    pub confidences: Vec<ModalityConfidence>,
}

impl AnalysisResult {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

/// Errors from the analysis collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis service failed: {0}")]
    Service(String),
    #[error(transparent)]
    NotStarted(#[from] WizardError),
}

/// The external analysis collaborator.
pub trait AnalysisEngine {
    fn analyze(
        &self,
    ) -> impl std::future::Future<Output = Result<AnalysisResult, AnalysisError>> + Send;
}

/// Simulated engine: fixed delay, constant payload. Stands in until the
/// real diagnosis service exists.
pub struct MockAnalysisEngine {
    pub delay: Duration,
}

impl Default for MockAnalysisEngine {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
        }
    }
}

impl AnalysisEngine for MockAnalysisEngine {
    async fn analyze(&self) -> Result<AnalysisResult, AnalysisError> {
        tokio::time::sleep(self.delay).await;
        Ok(AnalysisResult {
            risk_score: 85,
            confidences: vec![
                ModalityConfidence {
                    modality: Modality::Imaging,
                    confidence: 92,
                },
                ModalityConfidence {
                    modality: Modality::Genomic,
                    confidence: 78,
                },
                ModalityConfidence {
                    modality: Modality::Clinical,
                    confidence: 88,
                },
            ],
        })
    }
}

// ═══════════════════════════════════════════════════════════
// State machine
// ═══════════════════════════════════════════════════════════

/// Where the wizard is. `AnalysisComplete` is the only phase that holds a
/// payload, and it holds exactly the latest run's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    /// Filling in `STEPS[index]`.
    Collecting(usize),
    AnalysisIdle,
    AnalysisRunning,
    AnalysisComplete(AnalysisResult),
}

/// Token for one analysis run; completions are applied only if their
/// token is still current.
#[derive(Debug, PartialEq, Eq)]
pub struct AnalysisRun(u64);

/// Errors from wizard transitions.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Analysis can only start from the idle analysis phase")]
    NotIdle,
}

/// Step-local validation: may the user leave this step?
pub type StepValidator = Box<dyn Fn() -> bool + Send>;

/// The diagnosis flow. Instantiated per page visit; nothing here is
/// persisted across visits.
pub struct DiagnosisWizard {
    phase: WizardPhase,
    validators: Vec<StepValidator>,
    run_token: u64,
}

impl DiagnosisWizard {
    /// One validator per step, in `STEPS` order. `next()` is a no-op
    /// while a step's validator returns false.
    pub fn new(validators: Vec<StepValidator>) -> Self {
        debug_assert_eq!(validators.len(), STEPS.len());
        Self {
            phase: WizardPhase::Collecting(0),
            validators,
            run_token: 0,
        }
    }

    /// A wizard whose steps have no required inputs.
    pub fn permissive() -> Self {
        Self::new(STEPS.iter().map(|_| validator_ok()).collect())
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    /// The step being collected, if any.
    pub fn current_step(&self) -> Option<WizardStep> {
        match self.phase {
            WizardPhase::Collecting(i) => STEPS.get(i).copied(),
            _ => None,
        }
    }

    /// The latest results, only while in `AnalysisComplete`.
    pub fn results(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            WizardPhase::AnalysisComplete(result) => Some(result),
            _ => None,
        }
    }

    // ── User-driven movement ─────────────────────────────

    /// Advance one step, into the analysis phase after the last one.
    /// No-op when the current step's validator fails or the flow is
    /// already past collecting.
    pub fn next(&mut self) {
        if let WizardPhase::Collecting(index) = self.phase {
            if !(self.validators[index])() {
                tracing::debug!(step = ?STEPS[index], "Step incomplete; staying");
                return;
            }
            self.phase = if index + 1 < STEPS.len() {
                WizardPhase::Collecting(index + 1)
            } else {
                WizardPhase::AnalysisIdle
            };
        }
    }

    /// Move back one step. No-op at the first step and while the
    /// analysis is running or complete.
    pub fn previous(&mut self) {
        match self.phase {
            WizardPhase::Collecting(index) if index > 0 => {
                self.phase = WizardPhase::Collecting(index - 1);
            }
            WizardPhase::AnalysisIdle => {
                self.phase = WizardPhase::Collecting(STEPS.len() - 1);
            }
            _ => {}
        }
    }

    // ── Analysis lifecycle ───────────────────────────────

    /// Begin an analysis run. Valid only from `AnalysisIdle`; moves to
    /// `AnalysisRunning` synchronously and returns the run's token.
    pub fn start_analysis(&mut self) -> Result<AnalysisRun, WizardError> {
        if self.phase != WizardPhase::AnalysisIdle {
            return Err(WizardError::NotIdle);
        }
        self.run_token += 1;
        self.phase = WizardPhase::AnalysisRunning;
        tracing::info!(run = self.run_token, "Analysis started");
        Ok(AnalysisRun(self.run_token))
    }

    /// Deliver a run's results. Applied only if the token is still
    /// current and the analysis is still running; stale completions
    /// (after `reset()` or a newer run) are discarded. Returns whether
    /// the payload was applied.
    pub fn complete_analysis(&mut self, run: AnalysisRun, result: AnalysisResult) -> bool {
        if run.0 == self.run_token && self.phase == WizardPhase::AnalysisRunning {
            tracing::info!(run = run.0, score = result.risk_score, "Analysis complete");
            self.phase = WizardPhase::AnalysisComplete(result);
            true
        } else {
            tracing::debug!(run = run.0, "Discarding stale analysis completion");
            false
        }
    }

    /// Run the analysis end to end against an engine. On engine failure
    /// the wizard returns to `AnalysisIdle` so the user can retry.
    pub async fn run_analysis<E: AnalysisEngine>(
        &mut self,
        engine: &E,
    ) -> Result<(), AnalysisError> {
        let run = self.start_analysis()?;
        match engine.analyze().await {
            Ok(result) => {
                self.complete_analysis(run, result);
                Ok(())
            }
            Err(err) => {
                if self.phase == WizardPhase::AnalysisRunning && run.0 == self.run_token {
                    self.phase = WizardPhase::AnalysisIdle;
                }
                Err(err)
            }
        }
    }

    /// Discard the current run (or its results) and return to
    /// `AnalysisIdle`, ready for a new analysis. No-op while collecting.
    pub fn reset(&mut self) {
        match self.phase {
            WizardPhase::AnalysisRunning | WizardPhase::AnalysisComplete(_) => {
                // Invalidate any in-flight completion.
                self.run_token += 1;
                self.phase = WizardPhase::AnalysisIdle;
            }
            _ => {}
        }
    }
}

fn validator_ok() -> StepValidator {
    Box::new(|| true)
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
