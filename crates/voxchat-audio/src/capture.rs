use crate::chunker::FrameChunker;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, StreamConfig};
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use voxchat_core::{AudioError, AudioFrame};

/// A source of capture sessions.
///
/// `start` opens the device and hands back the receiving end of the
/// frame channel; `stop` releases the device. Scoping capture to the
/// listening phase keeps the microphone closed while the assistant is
/// thinking or speaking.
pub trait AudioSource: Send {
    fn start(&mut self) -> Result<mpsc::UnboundedReceiver<AudioFrame>, AudioError>;
    fn stop(&mut self);
}

/// Microphone-backed [`AudioSource`].
///
/// The cpal stream is not `Send`, so each capture session runs on a
/// dedicated thread that owns the stream; only the frame channel
/// crosses back to the caller.
pub struct MicSource {
    device_name: String,
    sample_rate: u32,
    block_size: usize,
    active: Option<CaptureNode>,
}

impl MicSource {
    pub fn new(device_name: &str, sample_rate: u32, block_size: usize) -> Self {
        Self {
            device_name: device_name.to_string(),
            sample_rate,
            block_size,
            active: None,
        }
    }
}

impl AudioSource for MicSource {
    fn start(&mut self) -> Result<mpsc::UnboundedReceiver<AudioFrame>, AudioError> {
        self.stop();
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let node = CaptureNode::spawn(
            self.device_name.clone(),
            self.sample_rate,
            self.block_size,
            frame_tx,
        )?;
        self.active = Some(node);
        Ok(frame_rx)
    }

    fn stop(&mut self) {
        self.active = None;
    }
}

/// Owns one live capture stream on its thread.
///
/// Dropping the node signals the thread and joins it, so the device
/// handle is released on every exit path from the listening phase.
struct CaptureNode {
    shutdown_tx: Option<std::sync::mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl CaptureNode {
    fn spawn(
        device_name: String,
        sample_rate: u32,
        block_size: usize,
        frame_tx: mpsc::UnboundedSender<AudioFrame>,
    ) -> Result<Self, AudioError> {
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<(), AudioError>>();
        let (shutdown_tx, shutdown_rx) = std::sync::mpsc::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("voxchat-capture".to_string())
            .spawn(move || {
                let stream =
                    match build_capture_stream(&device_name, sample_rate, block_size, frame_tx) {
                        Ok(stream) => stream,
                        Err(e) => {
                            let _ = ready_tx.send(Err(e));
                            return;
                        }
                    };
                if let Err(e) = stream.play() {
                    let _ = ready_tx.send(Err(AudioError::StreamBuild(e.to_string())));
                    return;
                }
                let _ = ready_tx.send(Ok(()));

                // Park until the owning node drops its sender.
                let _ = shutdown_rx.recv();
                drop(stream);
                tracing::debug!("capture stream closed");
            })
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                tracing::debug!(sample_rate, block_size, "capture stream started");
                Ok(Self {
                    shutdown_tx: Some(shutdown_tx),
                    thread: Some(thread),
                })
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(AudioError::StreamBuild(
                    "capture thread exited before reporting readiness".to_string(),
                ))
            }
        }
    }
}

impl Drop for CaptureNode {
    fn drop(&mut self) {
        self.shutdown_tx.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn build_capture_stream(
    device_name: &str,
    sample_rate: u32,
    block_size: usize,
    frame_tx: mpsc::UnboundedSender<AudioFrame>,
) -> Result<cpal::Stream, AudioError> {
    let host = cpal::default_host();
    let device = if device_name == "default" {
        host.default_input_device()
            .ok_or_else(|| AudioError::DeviceNotFound("no default input device".to_string()))?
    } else {
        let mut found = None;
        let devices = host
            .input_devices()
            .map_err(|e| AudioError::DeviceEnumeration(e.to_string()))?;
        for device in devices {
            if device.name().map(|n| n == device_name).unwrap_or(false) {
                found = Some(device);
                break;
            }
        }
        found.ok_or_else(|| {
            AudioError::DeviceNotFound(format!("input device not found: {}", device_name))
        })?
    };

    let channels: u16 = 1;
    let config = StreamConfig {
        channels,
        sample_rate: SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let mut chunker = FrameChunker::new(block_size, sample_rate, channels);

    // Stream errors (overruns, device gone) are logged and capture
    // continues; they are not fatal mid-session.
    let err_callback = |err: cpal::StreamError| {
        tracing::warn!("capture stream error: {}", err);
    };

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                for frame in chunker.push(data) {
                    if frame_tx.send(frame).is_err() {
                        // Consumer is gone; the stream is being torn down.
                        return;
                    }
                }
            },
            err_callback,
            None,
        )
        .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

    Ok(stream)
}
