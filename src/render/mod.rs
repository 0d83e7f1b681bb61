//! Chart rendering: one PNG per instance, cost and runtime side by side.

pub mod plot;
pub mod theme;

pub use plot::plot_by_instance;
