//! Optimize round trips for the Planner.

use log::info;

use super::Planner;
use crate::{
    applier::ValidatedPlan,
    error::Result,
    models::{AppliedSummary, OptimizationResult},
    params::Optimize,
    session::Optimizer,
};

/// What an optimize run produced.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    /// The optimizer's answer as received
    pub result: OptimizationResult,
    /// Edits that passed validation
    pub plan: ValidatedPlan,
    /// Set when the suggestions were applied and saved
    pub applied: Option<AppliedSummary>,
}

impl Planner {
    /// Asks an optimizer for suggestions on a trip and applies them.
    ///
    /// The suggestions are validated as a whole; if any is rejected the
    /// error lists every rejection and nothing is saved. With `dry_run` the
    /// plan is validated and returned without touching the database.
    pub async fn optimize(
        &self,
        params: &Optimize,
        optimizer: &dyn Optimizer,
    ) -> Result<OptimizeOutcome> {
        let mut session = self.open_session(&params.trip_id).await?;
        let result = session
            .optimize(optimizer, params.mode, params.constraints.clone())
            .await?
            .clone();
        let plan = session.preview()?;

        if params.dry_run {
            info!(
                "Dry run for trip {}: {} edit(s) would be applied",
                params.trip_id,
                plan.len()
            );
            return Ok(OptimizeOutcome {
                result,
                plan,
                applied: None,
            });
        }

        let summary = session.apply_suggestions()?;
        self.save_session(&mut session).await?;
        Ok(OptimizeOutcome {
            result,
            plan,
            applied: Some(summary),
        })
    }
}
