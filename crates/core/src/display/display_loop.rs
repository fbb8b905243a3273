use std::time::Instant;

use crate::display::domain::display_surface::DisplaySurface;
use crate::pipeline::handoff::{HandoffReceiver, TryPop};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::shutdown::ShutdownToken;
use crate::shared::record::FrameRecord;

const QUIT_KEYS: [char; 3] = ['\u{1b}', 'q', 'Q'];

/// Accounting for one display run.
#[derive(Debug, PartialEq, Eq)]
pub struct DisplayStats {
    /// Records actually presented on the surface.
    pub rendered: usize,
    /// Records discarded during wind-down, never presented.
    pub drained: usize,
}

/// Consumes the hand-off queue on the calling thread until the stream
/// ends, then drains whatever the pipeline still delivers.
///
/// Termination is driven by queue disconnection, not by the shutdown
/// flag: a raised flag stops the *source*, and every record already in
/// flight still arrives here to be rendered or counted as drained. That
/// makes `rendered + drained` equal to the number of records the
/// pipeline completed, with none lost.
pub fn run_display_loop(
    queue: &HandoffReceiver<FrameRecord>,
    surface: &mut dyn DisplaySurface,
    shutdown: &ShutdownToken,
    logger: &mut dyn PipelineLogger,
) -> DisplayStats {
    let mut rendered = 0usize;
    let mut quit = false;

    loop {
        match queue.try_pop() {
            TryPop::Record(record) => {
                if let Some(key) = surface.poll_key() {
                    if QUIT_KEYS.contains(&key) {
                        logger.info("quit requested");
                        shutdown.request();
                        quit = true;
                    }
                }

                let started = Instant::now();
                if let Err(e) = surface.present(&record.frame) {
                    log::warn!("presentation failed: {e}");
                    shutdown.request();
                    break;
                }
                rendered += 1;
                logger.timing("render", started.elapsed().as_secs_f64() * 1000.0);
                logger.metric("queue_depth", queue.len() as f64);
                logger.metric("faces", record.faces.len() as f64);
                logger.progress(rendered);

                if quit {
                    break;
                }
            }
            TryPop::Empty => std::thread::yield_now(),
            TryPop::Closed => break,
        }
    }

    DisplayStats {
        rendered,
        drained: queue.drain(),
    }
}
