pub mod classify;
pub mod directory;
pub mod normalize;
pub mod session;
