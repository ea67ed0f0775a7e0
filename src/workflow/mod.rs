pub mod stage_flow;

pub use stage_flow::StageRouter;
