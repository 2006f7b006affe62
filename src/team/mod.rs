// Team building: budget-constrained driver and constructor selection.

pub mod selection;

pub use selection::{SelectedConstructor, SelectedDriver, SelectionError, TeamSelection};
