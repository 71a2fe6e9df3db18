//! The 3D garden scene: math, tree composition, projection and drawing.

pub mod composer;
pub mod math;
pub mod projection;
pub mod render;

pub use composer::{compose_tree, TreeVisual};
pub use projection::{pick_tree, Projector};
