use voxchat_core::AudioFrame;

/// Re-chunks arbitrarily sized capture callbacks into fixed-size frames.
///
/// The audio backend delivers whatever buffer size it likes; the
/// recognizer wants exact `block_size`-sample frames. Leftover samples
/// carry over to the next callback, so no sample is dropped and frame
/// order matches arrival order.
pub struct FrameChunker {
    block_size: usize,
    sample_rate: u32,
    channels: u16,
    pending: Vec<i16>,
}

impl FrameChunker {
    pub fn new(block_size: usize, sample_rate: u32, channels: u16) -> Self {
        Self {
            block_size,
            sample_rate,
            channels,
            pending: Vec::with_capacity(block_size),
        }
    }

    /// Absorb one callback buffer and return every frame it completes.
    pub fn push(&mut self, data: &[i16]) -> Vec<AudioFrame> {
        self.pending.extend_from_slice(data);

        let mut frames = Vec::new();
        while self.pending.len() >= self.block_size {
            let rest = self.pending.split_off(self.block_size);
            let samples = std::mem::replace(&mut self.pending, rest);
            frames.push(AudioFrame {
                samples,
                sample_rate: self.sample_rate,
                channels: self.channels,
            });
        }
        frames
    }

    /// Samples waiting for the next frame boundary.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
