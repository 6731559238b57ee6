/*!
# Aurora 3D Engine

Core GPU resource management for the Aurora 3D rendering engine: named,
ref-counted registries for attachments, render passes and framebuffers, a
declarative render pass builder, and an asynchronous asset loader that
uploads textures through a dedicated transfer queue with cross-queue
ownership transfer.

The engine talks to the GPU only through the [`GraphicsDevice`] trait
family; backend implementations (e.g. the Vulkan renderer crate) provide
the concrete types.

## Architecture

- **GraphicsDevice**: factory trait for GPU resources and named queues
- **AttachmentRegistry**: named render-target images with ref-counting
- **RenderPassRegistry**: compiles named builders into immutable passes
- **FramebufferRegistry**: binds attachments to passes, drives ref-counts
- **AssetLoader**: worker pool uploading textures asynchronously

[`GraphicsDevice`]: crate::graphics_device::GraphicsDevice
*/

// Internal modules
mod context;
mod engine;
mod error;
pub mod asset;
pub mod attachment;
pub mod framebuffer;
pub mod graphics_device;
pub mod log;
pub mod render_pass;

// Main aurora3d namespace module
pub mod aurora3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine log sink
    pub use crate::engine::Engine;

    // Graphics context owning the registries
    pub use crate::context::GraphicsContext;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Device sub-module with the GPU trait family and value types
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Render sub-module: registries, builder, compiled objects
    pub mod render {
        pub use crate::attachment::*;
        pub use crate::framebuffer::*;
        pub use crate::render_pass::*;
    }

    // Asset sub-module: loader, textures, decode traits
    pub mod asset {
        pub use crate::asset::*;
    }
}

// Re-export math library at crate root
pub use glam;
