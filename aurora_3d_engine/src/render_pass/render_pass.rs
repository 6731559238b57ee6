//! RenderPass - a compiled, immutable render pass

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{GpuRenderPass, RenderPassDescription, EXTERNAL_SUBPASS_INDEX};
use super::builder::EXTERNAL_SUBPASS;

const SOURCE: &str = "aurora3d::RenderPass";

/// A compiled render pass
///
/// Immutable once compiled; owned by the
/// [`RenderPassRegistry`](crate::render_pass::RenderPassRegistry), with
/// shared handles held by framebuffers and the render loop.
pub struct RenderPass {
    name: String,
    native: Arc<dyn GpuRenderPass>,
    description: RenderPassDescription,
    attachment_indices: FxHashMap<String, u32>,
    subpass_indices: FxHashMap<String, u32>,
    /// Live framebuffers built against this pass
    framebuffer_refs: AtomicU32,
}

impl RenderPass {
    pub(crate) fn new(
        name: String,
        native: Arc<dyn GpuRenderPass>,
        description: RenderPassDescription,
        attachment_indices: FxHashMap<String, u32>,
        subpass_indices: FxHashMap<String, u32>,
    ) -> Self {
        Self {
            name,
            native,
            description,
            attachment_indices,
            subpass_indices,
            framebuffer_refs: AtomicU32::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native render pass handle
    pub fn native(&self) -> &Arc<dyn GpuRenderPass> {
        &self.native
    }

    /// The compiled, index-resolved description (declaration order)
    pub fn description(&self) -> &RenderPassDescription {
        &self.description
    }

    /// Index assigned to a declared attachment name
    pub fn attachment_index(&self, name: &str) -> Result<u32> {
        match self.attachment_indices.get(name) {
            Some(&index) => Ok(index),
            None => engine_bail!(NotFound, SOURCE,
                "render pass '{}' has no attachment '{}'", self.name, name),
        }
    }

    /// Index assigned to a declared subpass name
    ///
    /// The [`EXTERNAL_SUBPASS`] sentinel resolves without a lookup.
    pub fn subpass_index(&self, name: &str) -> Result<u32> {
        if name == EXTERNAL_SUBPASS {
            return Ok(EXTERNAL_SUBPASS_INDEX);
        }
        match self.subpass_indices.get(name) {
            Some(&index) => Ok(index),
            None => engine_bail!(NotFound, SOURCE,
                "render pass '{}' has no subpass '{}'", self.name, name),
        }
    }

    pub(crate) fn retain_framebuffer(&self) {
        self.framebuffer_refs.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn release_framebuffer(&self) {
        let previous = self.framebuffer_refs.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "framebuffer ref-count underflow");
    }

    pub(crate) fn framebuffer_refs(&self) -> u32 {
        self.framebuffer_refs.load(Ordering::SeqCst)
    }
}
