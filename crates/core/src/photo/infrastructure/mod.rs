pub mod dpi_probe;
pub mod image_file_reader;
pub mod image_file_writer;
