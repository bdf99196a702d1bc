pub mod atomic_writer;
pub mod save_pipeline;
