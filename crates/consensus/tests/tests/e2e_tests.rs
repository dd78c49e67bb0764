#[path = "e2e/low_risk_acceptance.rs"]
mod low_risk_acceptance;

#[path = "e2e/security_escalation.rs"]
mod security_escalation;

#[path = "e2e/timeout_neutrality.rs"]
mod timeout_neutrality;

#[path = "e2e/intent_admission.rs"]
mod intent_admission;

#[path = "e2e/goal_negotiation.rs"]
mod goal_negotiation;

#[path = "e2e/cancellation.rs"]
mod cancellation;

#[path = "e2e/escalation_lifecycle.rs"]
mod escalation_lifecycle;

#[path = "e2e/malformed_proposals.rs"]
mod malformed_proposals;

#[path = "e2e/persistence.rs"]
mod persistence;

#[path = "e2e/calibration.rs"]
mod calibration;
