//! Reasoning accumulated for one in-flight query

use crate::protocol::ReasoningStep;

/// The single in-flight turn.
///
/// Created at submission, fed by the event loop, and consumed exactly once
/// into a finalized message. The session holds at most one; after
/// finalization no turn exists for late events to reach.
#[derive(Debug, Default)]
pub struct Turn {
    steps: Vec<ReasoningStep>,
}

impl Turn {
    /// Create an empty turn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observed reasoning step. Arrival order is preserved.
    pub fn record_step(&mut self, step: ReasoningStep) {
        self.steps.push(step);
    }

    /// Steps observed so far, oldest first.
    pub fn reasoning(&self) -> &[ReasoningStep] {
        &self.steps
    }

    /// Consume the turn into its ordered steps.
    pub fn into_steps(self) -> Vec<ReasoningStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(agent: &str) -> ReasoningStep {
        ReasoningStep {
            agent: agent.to_string(),
            action: "act".to_string(),
            reason: "because".to_string(),
        }
    }

    #[test]
    fn steps_keep_arrival_order() {
        let mut turn = Turn::new();
        turn.record_step(step("first"));
        turn.record_step(step("second"));
        turn.record_step(step("third"));

        let agents: Vec<&str> = turn.reasoning().iter().map(|s| s.agent.as_str()).collect();
        assert_eq!(agents, vec!["first", "second", "third"]);

        let consumed = turn.into_steps();
        assert_eq!(consumed.len(), 3);
        assert_eq!(consumed[0].agent, "first");
    }
}
