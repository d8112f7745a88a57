pub mod occlusion;
pub mod queue;
