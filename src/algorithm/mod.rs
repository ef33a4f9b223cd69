/// Single-run simulated annealing loop
pub mod annealing;
/// Discrepancy between observed and simulated summary curves
pub mod energy;
/// Independent runs, seeding and shared inputs
pub mod orchestrator;
/// Validated reconstruction options
pub mod parameters;
/// Pre-drawn random proposals for a run
pub mod perturbation;
/// Run histories, diagnostics and aggregated results
pub mod result;
