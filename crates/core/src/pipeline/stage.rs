use crate::shared::record::FrameRecord;

pub type StageError = Box<dyn std::error::Error + Send + Sync>;

/// One serial transformation step in the frame pipeline.
///
/// Each stage instance is owned by exactly one worker thread and sees
/// records strictly in frame order; `&mut self` state (detector sessions,
/// running statistics) therefore needs no synchronization.
pub trait PipelineStage: Send {
    fn name(&self) -> &'static str;

    /// Consume a record, produce the enriched record for the next stage.
    fn apply(&mut self, record: FrameRecord) -> Result<FrameRecord, StageError>;
}
