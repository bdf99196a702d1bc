pub mod chunk_buffer;
