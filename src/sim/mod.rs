/// Greedy assignment of waiting trucks to free slots.
pub mod allocator;
/// Simulation clock for tick management.
pub mod clock;
/// Clean-energy budget and energy accounting.
pub mod energy;
pub mod engine;
/// Charging groups (clusters of identical slots).
pub mod group;
pub mod report;
pub mod scoring;
pub mod truck;
pub mod types;
