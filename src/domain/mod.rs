// Domain layer - Data shapes mirrored from the water quality API
pub mod chart;
pub mod dashboard;
pub mod measurement;
pub mod parameter;
pub mod prediction;
pub mod trends;
