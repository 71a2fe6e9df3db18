pub mod camera;
pub mod selection;

pub use camera::Camera;
pub use selection::{selection_message, Selection};
