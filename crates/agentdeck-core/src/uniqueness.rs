//! Orchestrator name uniqueness and the creation workflow.
//!
//! Orchestrator creation is a two-phase protocol:
//!
//!   [local pre-flight] → check-orchestrator-name → create-multi-agent
//!
//! The local pre-flight is a cheap filter against the roster snapshot and
//! guarantees nothing. The remote check is authoritative for this invocation:
//! `create_multi_agent()` is only reachable after the backend answered
//! `isUnique: true` in the same call. The two requests are not atomic on the
//! backend, so a create that the backend itself rejects is surfaced as the
//! real outcome.

use serde_json::Value;
use tracing::{debug, info, warn};

use agentdeck_contracts::{
    agent::{Agent, AgentKind},
    error::{DeckError, DeckResult},
    outcome::{CreationOutcome, WorkflowId},
};

use crate::traits::{AgentRoster, ProvisioningBackend};

/// Local pre-flight: fail with `DuplicateName` if the roster already holds
/// an orchestrator called `name`.
pub fn local_duplicate(roster: &dyn AgentRoster, name: &str) -> DeckResult<()> {
    let taken = roster
        .by_kind(AgentKind::Orchestrator)
        .iter()
        .any(|a| a.name == name);
    if taken {
        return Err(DeckError::DuplicateName {
            name: name.to_string(),
            kind: AgentKind::Orchestrator,
        });
    }
    Ok(())
}

/// Drives the orchestrator creation protocol against a backend.
///
/// Construct one per backend; each call to `create_orchestrator` is an
/// independent workflow with its own `WorkflowId`.
pub struct UniquenessChecker {
    backend: Box<dyn ProvisioningBackend>,
}

impl UniquenessChecker {
    pub fn new(backend: Box<dyn ProvisioningBackend>) -> Self {
        Self { backend }
    }

    /// Run the remote phase for `agent` and report the outcome in the shape
    /// the front end consumes. Never returns an error: every rejection is an
    /// outcome with `success: false`.
    pub async fn create_orchestrator(&self, agent: &Agent) -> CreationOutcome {
        let workflow_id = WorkflowId::new();
        Self::outcome_of(&workflow_id, self.run(&workflow_id, agent).await)
    }

    /// Same as `create_orchestrator`, preceded by the local pre-flight
    /// against `roster`. A local hit stops the workflow before any request.
    pub async fn create_orchestrator_checked(
        &self,
        roster: &dyn AgentRoster,
        agent: &Agent,
    ) -> CreationOutcome {
        let workflow_id = WorkflowId::new();
        if let Err(e) = local_duplicate(roster, &agent.name) {
            return Self::outcome_of(&workflow_id, Err(e));
        }
        Self::outcome_of(&workflow_id, self.run(&workflow_id, agent).await)
    }

    /// The remote phase proper.
    ///
    /// # Errors
    ///
    /// `DuplicateOrchestratorName` when the backend reports the name taken
    /// (at check time or at create time), `RemoteCallFailed` for any
    /// transport, status, or decoding failure. No retry is attempted.
    pub async fn run(
        &self,
        workflow_id: &WorkflowId,
        agent: &Agent,
    ) -> DeckResult<Option<Value>> {
        let workflow = workflow_id.0.to_string();

        // ── Step 1: Remote uniqueness check ──────────────────────────────────
        debug!(workflow_id = %workflow, name = %agent.name, "checking orchestrator name");
        let is_unique = self.backend.check_orchestrator_name(&agent.name).await?;

        if !is_unique {
            return Err(DeckError::DuplicateOrchestratorName {
                name: agent.name.clone(),
            });
        }

        // ── Step 2: Create ───────────────────────────────────────────────────
        //
        // Only reachable after the check above returned true.
        debug!(
            workflow_id = %workflow,
            name = %agent.name,
            sub_agents = agent.sub_agents.len(),
            "name is unique, creating multi-agent"
        );
        let received = self.backend.create_multi_agent(agent).await?;

        info!(workflow_id = %workflow, name = %agent.name, "orchestrator created");
        Ok(received)
    }

    fn outcome_of(workflow_id: &WorkflowId, result: DeckResult<Option<Value>>) -> CreationOutcome {
        match result {
            Ok(received) => CreationOutcome::created(received),
            Err(e) => {
                warn!(workflow_id = %workflow_id.0, error = %e, "orchestrator creation failed");
                CreationOutcome::failed(&e)
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
