pub mod constants;
pub mod frame;
pub mod options;
pub mod record;
pub mod region;
