/// Framebuffer module - attachment bindings for render passes

pub mod framebuffer;
pub mod framebuffer_registry;

pub use framebuffer::*;
pub use framebuffer_registry::*;
