use crossbeam_channel::TryRecvError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("hand-off queue closed")]
pub struct HandoffClosed;

/// Outcome of a non-blocking pop.
#[derive(Debug)]
pub enum TryPop<T> {
    Record(T),
    Empty,
    /// The producer side has disconnected and nothing is queued: the
    /// stream is over.
    Closed,
}

/// Create the bounded FIFO connecting the pipeline's final stage to the
/// display consumer.
///
/// The small fixed capacity is the backpressure mechanism: a full queue
/// parks the dispatching stage until the consumer catches up, so the
/// pipeline can never run far ahead of rendering.
pub fn handoff_queue<T>(capacity: usize) -> (HandoffSender<T>, HandoffReceiver<T>) {
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (HandoffSender { tx }, HandoffReceiver { rx })
}

pub struct HandoffSender<T> {
    tx: crossbeam_channel::Sender<T>,
}

impl<T> HandoffSender<T> {
    /// Blocks until space is available; fails only once the receiver is
    /// gone.
    pub fn push(&self, item: T) -> Result<(), HandoffClosed> {
        self.tx.send(item).map_err(|_| HandoffClosed)
    }
}

pub struct HandoffReceiver<T> {
    rx: crossbeam_channel::Receiver<T>,
}

impl<T> HandoffReceiver<T> {
    pub fn try_pop(&self) -> TryPop<T> {
        match self.rx.try_recv() {
            Ok(item) => TryPop::Record(item),
            Err(TryRecvError::Empty) => TryPop::Empty,
            Err(TryRecvError::Disconnected) => TryPop::Closed,
        }
    }

    /// Current queue depth (diagnostic).
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Release every queued record and return how many were dropped.
    ///
    /// Keeps receiving until all senders have disconnected, so a producer
    /// parked mid-push during shutdown is released too — this is what
    /// makes shutdown leak-free. Only call once the shutdown flag is set;
    /// otherwise this would consume the live stream.
    pub fn drain(&self) -> usize {
        self.rx.iter().count()
    }
}
