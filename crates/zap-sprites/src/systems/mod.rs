pub mod animation;
pub mod collision;
pub mod debug;
pub mod kinematics;
