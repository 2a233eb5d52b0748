mod mock;

mod orchestrator_flow;
mod reconcile_flow;
