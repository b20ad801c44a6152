/// One fixed-duration block of raw microphone samples.
///
/// Frames are produced by the capture callback, moved into the frame
/// channel, and consumed exactly once by the listen loop. FIFO order is
/// the frame's implicit sequence position.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioFrame {
    /// Frame duration in seconds, derived from sample count and rate.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}

/// Outcome of feeding one frame to a recognizer engine.
///
/// `Final` carries the decoder's best hypothesis for the completed
/// utterance and is emitted once per utterance boundary. An empty
/// hypothesis means "no speech recognized" and is discarded by the
/// listen loop rather than surfaced as an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    Partial,
    Final(String),
}

impl RecognitionOutcome {
    pub fn is_final(&self) -> bool {
        matches!(self, RecognitionOutcome::Final(_))
    }
}
