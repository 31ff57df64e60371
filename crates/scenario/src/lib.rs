//! What-if scenario modeling on top of the prediction engine.
//!
//! A scenario is an independent copy of an objective that can be edited
//! (tasks added, removed, reprioritized or reordered, agent role changed)
//! and re-forecast after each edit. Scenarios are compared against a
//! baseline to produce time deltas and recommendations.

#![warn(missing_docs)]

pub mod scenario;
pub mod simulator;
pub mod compare;
pub mod set;

pub use scenario::{Change, Modification, ModificationKind, Scenario, TaskPatch};
pub use simulator::ScenarioSimulator;
pub use compare::{compare_scenarios, Comparison};
pub use set::ScenarioSet;
