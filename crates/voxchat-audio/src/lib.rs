pub mod capture;
pub mod chunker;
pub mod device;

pub use capture::{AudioSource, MicSource};
pub use chunker::FrameChunker;
pub use device::DeviceManager;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires audio hardware
    fn test_device_enumeration() {
        let manager = DeviceManager::new();
        let inputs = manager.list_input_devices().unwrap();
        println!("Input devices: {}", inputs.len());
        for (name, _) in &inputs {
            println!("  - {}", name);
        }
    }
}
