pub mod display_loop;
pub mod domain;
pub mod infrastructure;
