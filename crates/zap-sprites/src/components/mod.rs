pub mod animation;
pub mod domain;
pub mod frames;
pub mod sprite;
