// Adapters layer: concrete sources for the commune directory.

pub mod dataset;

pub use dataset::CsvDataset;
