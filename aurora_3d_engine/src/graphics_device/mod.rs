/// Graphics device module - GPU abstraction traits and value types

// Module declarations
pub mod graphics_device;
pub mod types;

// Re-export everything
pub use graphics_device::*;
pub use types::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
