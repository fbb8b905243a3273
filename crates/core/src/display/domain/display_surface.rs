use crate::shared::frame::Frame;

/// Where annotated frames end up, and where the quit request comes from.
///
/// Runs on the calling thread only; `Send` is required so the whole use
/// case can be moved onto a worker by embedders.
pub trait DisplaySurface: Send {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Non-blocking key poll; `None` when no key is pending.
    fn poll_key(&mut self) -> Option<char>;
}
