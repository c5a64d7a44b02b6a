pub mod calculators;
pub mod runner;
pub mod scoring;
pub mod state;
pub mod turn_orchestrator;

#[cfg(test)]
pub(crate) mod tests;
