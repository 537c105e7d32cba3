pub mod dispatch;
pub mod queue;
