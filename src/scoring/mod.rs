// Score fusion and report building.

pub mod fusion;
pub mod report;
