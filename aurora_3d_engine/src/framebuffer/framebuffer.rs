//! Framebuffer - concrete attachments bound to a render pass

use std::sync::Arc;

use crate::attachment::Attachment;
use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{Extent2d, GpuFramebuffer};
use crate::render_pass::RenderPass;

const SOURCE: &str = "aurora3d::Framebuffer";

/// A named framebuffer
///
/// Holds shared handles to its render pass and every bound attachment, so
/// their GPU resources outlive the framebuffer even if their registry
/// entries are removed first.
pub struct Framebuffer {
    name: String,
    native: Arc<dyn GpuFramebuffer>,
    render_pass: Arc<RenderPass>,
    /// Bound attachments, in render-pass slot order
    attachments: Vec<Arc<Attachment>>,
    extent: Extent2d,
}

impl Framebuffer {
    pub(crate) fn new(
        name: String,
        native: Arc<dyn GpuFramebuffer>,
        render_pass: Arc<RenderPass>,
        attachments: Vec<Arc<Attachment>>,
        extent: Extent2d,
    ) -> Self {
        Self {
            name,
            native,
            render_pass,
            attachments,
            extent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native framebuffer handle
    pub fn native(&self) -> &Arc<dyn GpuFramebuffer> {
        &self.native
    }

    pub fn render_pass(&self) -> &Arc<RenderPass> {
        &self.render_pass
    }

    pub fn extent(&self) -> Extent2d {
        self.extent
    }

    /// Bound attachments, in render-pass slot order
    pub fn attachments(&self) -> &[Arc<Attachment>] {
        &self.attachments
    }

    /// Look up a bound attachment by its registry name
    pub fn attachment(&self, name: &str) -> Result<&Arc<Attachment>> {
        match self.attachments.iter().find(|a| a.name() == name) {
            Some(attachment) => Ok(attachment),
            None => engine_bail!(NotFound, SOURCE,
                "framebuffer '{}' does not bind attachment '{}'", self.name, name),
        }
    }
}
