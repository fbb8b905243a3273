use std::time::Instant;

use thiserror::Error;

use crate::pipeline::acquire::FrameAcquirer;
use crate::pipeline::handoff::HandoffSender;
use crate::pipeline::shutdown::ShutdownToken;
use crate::pipeline::stage::PipelineStage;
use crate::shared::record::FrameRecord;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: &'static str, message: String },
    #[error("stage '{stage}' panicked")]
    Panicked { stage: &'static str },
}

/// Per-thread accounting returned by `PipelineHandle::join`.
#[derive(Debug)]
pub struct StepReport {
    pub name: &'static str,
    pub frames: usize,
    pub busy_ms: f64,
}

/// Runs the stage chain with one dedicated thread per step.
///
/// Layout: `acquire → stage₁ → … → stageₙ → dispatch → hand-off queue`.
///
/// Links between steps are rendezvous channels (capacity zero), so each
/// record moves by direct hand-over and at most one record is resident
/// per step. Frames therefore flow through every stage strictly in
/// acquisition order while different frames occupy different stages
/// concurrently; total frames in flight never exceeds the number of
/// steps plus the hand-off queue capacity.
pub struct ThreadedStageScheduler;

impl ThreadedStageScheduler {
    pub fn spawn(
        acquirer: FrameAcquirer,
        stages: Vec<Box<dyn PipelineStage>>,
        output: HandoffSender<FrameRecord>,
        shutdown: ShutdownToken,
    ) -> PipelineHandle {
        let mut entries = Vec::with_capacity(stages.len() + 2);

        let (head_tx, mut link_rx) = crossbeam_channel::bounded::<FrameRecord>(0);
        entries.push(("acquire", spawn_acquire(acquirer, head_tx)));

        for stage in stages {
            let name = stage.name();
            let (tx, rx) = crossbeam_channel::bounded::<FrameRecord>(0);
            entries.push((name, spawn_stage(stage, link_rx, tx, shutdown.clone())));
            link_rx = rx;
        }

        entries.push(("dispatch", spawn_dispatch(link_rx, output, shutdown)));

        PipelineHandle { entries }
    }
}

fn spawn_acquire(
    mut acquirer: FrameAcquirer,
    tx: crossbeam_channel::Sender<FrameRecord>,
) -> std::thread::JoinHandle<Result<StepReport, PipelineError>> {
    std::thread::spawn(move || {
        let mut report = StepReport {
            name: "acquire",
            frames: 0,
            busy_ms: 0.0,
        };
        loop {
            let started = Instant::now();
            let Some(record) = acquirer.acquire() else {
                break;
            };
            report.busy_ms += started.elapsed().as_secs_f64() * 1000.0;
            report.frames += 1;
            if tx.send(record).is_err() {
                // Downstream has gone away; the acquirer's own shutdown
                // check ends the source on the next iteration anyway.
                break;
            }
        }
        Ok(report)
    })
}

fn spawn_stage(
    mut stage: Box<dyn PipelineStage>,
    rx: crossbeam_channel::Receiver<FrameRecord>,
    tx: crossbeam_channel::Sender<FrameRecord>,
    shutdown: ShutdownToken,
) -> std::thread::JoinHandle<Result<StepReport, PipelineError>> {
    std::thread::spawn(move || {
        let name = stage.name();
        let mut report = StepReport {
            name,
            frames: 0,
            busy_ms: 0.0,
        };
        for record in rx {
            let started = Instant::now();
            match stage.apply(record) {
                Ok(record) => {
                    report.busy_ms += started.elapsed().as_secs_f64() * 1000.0;
                    report.frames += 1;
                    if tx.send(record).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("stage '{name}' failed: {e}");
                    shutdown.request();
                    return Err(PipelineError::Stage {
                        stage: name,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    })
}

fn spawn_dispatch(
    rx: crossbeam_channel::Receiver<FrameRecord>,
    output: HandoffSender<FrameRecord>,
    shutdown: ShutdownToken,
) -> std::thread::JoinHandle<Result<StepReport, PipelineError>> {
    std::thread::spawn(move || {
        let mut report = StepReport {
            name: "dispatch",
            frames: 0,
            busy_ms: 0.0,
        };
        for record in rx {
            let started = Instant::now();
            // Every completed record is offered to the consumer, even
            // during shutdown; the consumer's drain accounts for what it
            // chooses not to render.
            if output.push(record).is_err() {
                log::warn!("display side disconnected; discarding frame");
                shutdown.request();
                continue;
            }
            report.busy_ms += started.elapsed().as_secs_f64() * 1000.0;
            report.frames += 1;
        }
        Ok(report)
    })
}

pub struct PipelineHandle {
    entries: Vec<(
        &'static str,
        std::thread::JoinHandle<Result<StepReport, PipelineError>>,
    )>,
}

impl PipelineHandle {
    /// Joins every step thread; returns the first stage error if any
    /// occurred, otherwise all step reports.
    pub fn join(self) -> Result<Vec<StepReport>, PipelineError> {
        let mut first_error: Option<PipelineError> = None;
        let mut reports = Vec::with_capacity(self.entries.len());

        for (name, handle) in self.entries {
            match handle.join() {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                Err(_) => {
                    if first_error.is_none() {
                        first_error = Some(PipelineError::Panicked { stage: name });
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(reports),
        }
    }
}
