use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting observer for pipeline orchestration events.
///
/// Keeps the use case independent of any particular output mechanism, and
/// lets tests run the pipeline silently.
pub trait PipelineLogger: Send {
    /// Report that another frame reached the display.
    ///
    /// A live pipeline has no known frame total, so progress is a running
    /// count rather than a fraction.
    fn progress(&mut self, rendered: usize);

    /// Record how long a named step took for one frame.
    fn timing(&mut self, step: &str, duration_ms: f64);

    /// Record a point-in-time metric (queue depth, region count, smile
    /// intensity).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger for tests and embedders with their own reporting.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _rendered: usize) {}
    fn timing(&mut self, _step: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger: throttled progress lines plus per-step timing and metric
/// aggregation for the end-of-run summary.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    rendered: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            rendered: 0,
        }
    }

    /// Formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.rendered == 0 && self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Run summary ({} frames, {elapsed_s:.1}s):",
            self.rendered
        )];

        let mut steps: Vec<_> = self.timings.keys().collect();
        steps.sort();
        for step in steps {
            let durations = &self.timings[step];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len() as f64;
            lines.push(format!(
                "  {step:12}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let avg = values.iter().sum::<f64>() / values.len() as f64;
            lines.push(format!("  {name}: avg {avg:.2}"));
        }

        if self.rendered > 0 && elapsed_s > 0.0 {
            lines.push(format!(
                "  Throughput: {:.1} fps",
                self.rendered as f64 / elapsed_s
            ));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, step: &str) -> Option<&[f64]> {
        self.timings.get(step).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, rendered: usize) {
        self.rendered = rendered;
        if rendered % self.throttle_frames == 0 {
            let elapsed_s = self.start_time.elapsed().as_secs_f64();
            if elapsed_s > 0.0 {
                log::info!(
                    "rendered {rendered} frames ({:.1} fps)",
                    rendered as f64 / elapsed_s
                );
            }
        }
    }

    fn timing(&mut self, step: &str, duration_ms: f64) {
        self.timings
            .entry(step.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
