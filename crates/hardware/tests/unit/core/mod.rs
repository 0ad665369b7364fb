
/// Randomized programs and configurations.
pub mod properties;


/// Individual renaming and scheduling structures.
pub mod structures;
