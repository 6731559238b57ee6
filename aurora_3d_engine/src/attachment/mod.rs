/// Attachment module - render target images and their ref-counted registry

pub mod attachment;
pub mod attachment_registry;

pub use attachment::*;
pub use attachment_registry::*;
