pub mod crop;
pub mod draw;
pub mod equalize;
pub mod flip;
pub mod grayscale;
pub mod resize;
