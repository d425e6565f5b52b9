pub mod input_reader;
