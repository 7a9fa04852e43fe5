pub mod interactive;
pub mod render;

pub use render::{LookupView, TextRenderer};
