use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::region_detector::RegionDetector;
use crate::display::display_loop::{run_display_loop, DisplayStats};
use crate::display::domain::display_surface::DisplaySurface;
use crate::pipeline::acquire::FrameAcquirer;
use crate::pipeline::handoff::handoff_queue;
use crate::pipeline::infrastructure::threaded_stage_scheduler::ThreadedStageScheduler;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::shutdown::ShutdownToken;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::stages::downscale_stage::DownscaleStage;
use crate::pipeline::stages::equalize_stage::EqualizeStage;
use crate::pipeline::stages::face_detect_stage::FaceDetectStage;
use crate::pipeline::stages::grayscale_stage::GrayscaleStage;
use crate::pipeline::stages::smile_annotate_stage::SmileAnnotateStage;
use crate::shared::constants::HANDOFF_CAPACITY;
use crate::shared::options::PipelineOptions;

/// Orchestrates one live detection run: frames flow from the source
/// through the stage chain on worker threads while the display consumer
/// runs on the calling thread.
///
/// Single-use: components are consumed on `execute`, and a second call
/// fails.
pub struct DetectSmilesUseCase {
    source: Option<Box<dyn FrameSource>>,
    face_detector: Option<Box<dyn RegionDetector>>,
    smile_detector: Option<Box<dyn RegionDetector>>,
    surface: Option<Box<dyn DisplaySurface>>,
    options: PipelineOptions,
    logger: Box<dyn PipelineLogger>,
    shutdown: ShutdownToken,
}

impl DetectSmilesUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        face_detector: Box<dyn RegionDetector>,
        smile_detector: Box<dyn RegionDetector>,
        surface: Box<dyn DisplaySurface>,
        options: PipelineOptions,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source: Some(source),
            face_detector: Some(face_detector),
            smile_detector: Some(smile_detector),
            surface: Some(surface),
            options,
            logger,
            shutdown: ShutdownToken::new(),
        }
    }

    /// Token for requesting shutdown from outside (signal handlers,
    /// embedding UIs).
    pub fn shutdown_token(&self) -> ShutdownToken {
        self.shutdown.clone()
    }

    pub fn execute(&mut self) -> Result<DisplayStats, Box<dyn std::error::Error>> {
        let source = self.source.take().ok_or("Pipeline already executed")?;
        let face_detector = self
            .face_detector
            .take()
            .ok_or("Pipeline already executed")?;
        let smile_detector = self
            .smile_detector
            .take()
            .ok_or("Pipeline already executed")?;
        let mut surface = self.surface.take().ok_or("Pipeline already executed")?;

        let factor = self.options.downscale_factor();
        let stages: Vec<Box<dyn PipelineStage>> = vec![
            Box::new(GrayscaleStage),
            Box::new(DownscaleStage::new(factor)),
            Box::new(EqualizeStage),
            Box::new(FaceDetectStage::new(
                face_detector,
                self.options.mirror_detection(),
            )),
            Box::new(SmileAnnotateStage::new(smile_detector, factor)),
        ];

        let (queue_tx, queue_rx) = handoff_queue(HANDOFF_CAPACITY);
        let acquirer = FrameAcquirer::new(source, self.shutdown.clone());
        let handle =
            ThreadedStageScheduler::spawn(acquirer, stages, queue_tx, self.shutdown.clone());

        let stats = run_display_loop(
            &queue_rx,
            surface.as_mut(),
            &self.shutdown,
            self.logger.as_mut(),
        );

        let reports = handle.join()?;
        for report in &reports {
            self.logger.timing(report.name, report.busy_ms);
        }
        self.logger.info(&format!(
            "rendered {} frames, drained {}",
            stats.rendered, stats.drained
        ));
        self.logger.summary();

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::region_detector::DetectParams;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::frame::Frame;
    use crate::shared::region::Region;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubSource {
        total: usize,
        produced: Arc<AtomicUsize>,
    }

    impl FrameSource for StubSource {
        fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            let index = self.produced.load(Ordering::SeqCst);
            if index >= self.total {
                return Ok(None);
            }
            self.produced.fetch_add(1, Ordering::SeqCst);
            Ok(Some(Frame::new(
                vec![128u8; 64 * 64 * 3],
                64,
                64,
                3,
                index,
            )))
        }
    }

    struct StubDetector {
        region: Option<Region>,
    }

    impl RegionDetector for StubDetector {
        fn detect(
            &mut self,
            _image: &Frame,
            _params: &DetectParams,
        ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            Ok(self.region.into_iter().collect())
        }
    }

    struct StubSurface {
        rendered: Arc<AtomicUsize>,
        quit_after: Option<usize>,
    }

    impl DisplaySurface for StubSurface {
        fn present(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.rendered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn poll_key(&mut self) -> Option<char> {
            match self.quit_after {
                Some(n) if self.rendered.load(Ordering::SeqCst) >= n => Some('q'),
                _ => None,
            }
        }
    }

    fn use_case(
        total_frames: usize,
        produced: Arc<AtomicUsize>,
        rendered: Arc<AtomicUsize>,
        quit_after: Option<usize>,
    ) -> DetectSmilesUseCase {
        DetectSmilesUseCase::new(
            Box::new(StubSource {
                total: total_frames,
                produced,
            }),
            Box::new(StubDetector {
                region: Some(Region::new(2, 2, 40, 40)),
            }),
            Box::new(StubDetector { region: None }),
            Box::new(StubSurface {
                rendered,
                quit_after,
            }),
            PipelineOptions::new(2.0, false),
            Box::new(NullPipelineLogger),
        )
    }

    #[test]
    fn test_exhausted_source_renders_every_frame() {
        let produced = Arc::new(AtomicUsize::new(0));
        let rendered = Arc::new(AtomicUsize::new(0));
        let mut use_case = use_case(6, produced.clone(), rendered.clone(), None);

        let stats = use_case.execute().unwrap();

        assert_eq!(stats.rendered, 6);
        assert_eq!(stats.drained, 0);
        assert_eq!(rendered.load(Ordering::SeqCst), 6);
        assert!(use_case.shutdown.is_requested());
    }

    #[test]
    fn test_no_record_is_lost_on_quit() {
        let produced = Arc::new(AtomicUsize::new(0));
        let rendered = Arc::new(AtomicUsize::new(0));
        let mut use_case = use_case(1000, produced.clone(), rendered.clone(), Some(2));

        let stats = use_case.execute().unwrap();

        assert!(stats.rendered >= 2);
        assert!(stats.rendered < 1000);
        assert!(use_case.shutdown.is_requested());
        // Every acquired frame was either rendered or drained.
        assert_eq!(
            produced.load(Ordering::SeqCst),
            stats.rendered + stats.drained
        );
    }

    #[test]
    fn test_stream_ending_mid_sequence_renders_what_came_before() {
        // Five frames are prepared but the source dries up at the third
        // pull; the two acquired frames are rendered, the flag is raised,
        // and nothing leaks.
        struct DryingSource {
            pulls: usize,
        }
        impl FrameSource for DryingSource {
            fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
                let pull = self.pulls;
                self.pulls += 1;
                if pull >= 2 {
                    return Ok(None);
                }
                Ok(Some(Frame::new(vec![128u8; 64 * 64 * 3], 64, 64, 3, pull)))
            }
        }

        let rendered = Arc::new(AtomicUsize::new(0));
        let mut use_case = DetectSmilesUseCase::new(
            Box::new(DryingSource { pulls: 0 }),
            Box::new(StubDetector {
                region: Some(Region::new(2, 2, 40, 40)),
            }),
            Box::new(StubDetector { region: None }),
            Box::new(StubSurface {
                rendered: rendered.clone(),
                quit_after: None,
            }),
            PipelineOptions::new(2.0, false),
            Box::new(NullPipelineLogger),
        );

        let stats = use_case.execute().unwrap();

        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.drained, 0);
        assert_eq!(rendered.load(Ordering::SeqCst), 2);
        assert!(use_case.shutdown.is_requested());
    }

    #[test]
    fn test_pre_requested_shutdown_renders_nothing() {
        let produced = Arc::new(AtomicUsize::new(0));
        let rendered = Arc::new(AtomicUsize::new(0));
        let mut use_case = use_case(10, produced, rendered, None);

        use_case.shutdown_token().request();
        let stats = use_case.execute().unwrap();

        assert_eq!(stats.rendered, 0);
        assert_eq!(stats.drained, 0);
    }

    #[test]
    fn test_second_execute_fails() {
        let produced = Arc::new(AtomicUsize::new(0));
        let rendered = Arc::new(AtomicUsize::new(0));
        let mut use_case = use_case(2, produced, rendered, None);

        use_case.execute().unwrap();
        let second = use_case.execute();
        assert!(second.is_err());
        assert_eq!(second.unwrap_err().to_string(), "Pipeline already executed");
    }
}
