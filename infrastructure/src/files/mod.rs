//! File system adapters for the application ports

pub mod layer_files;
pub mod output_file;

pub use layer_files::FsLayerSource;
pub use output_file::FsOutputSink;
