// Domain layer: commune records, tax classification and the ports the directory is loaded through.

pub mod model;
pub mod ports;
