pub mod dialogs;
pub mod encoder;
pub mod file_sink;
pub mod media;
pub mod recorder_delegate;
pub mod source_provider;
