pub mod image_sequence_surface;
