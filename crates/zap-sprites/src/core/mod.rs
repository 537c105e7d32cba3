pub mod order;
pub mod scene;
