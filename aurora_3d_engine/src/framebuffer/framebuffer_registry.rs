//! Central framebuffer registry
//!
//! Binds registered attachments to compiled render passes. Creating a
//! framebuffer retains every bound attachment and its render pass; deleting
//! it releases them again, re-enabling their deletion.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::attachment::AttachmentRegistry;
use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{FramebufferDescription, GraphicsDevice};
use crate::render_pass::{RenderPass, RenderPassRegistry};
use super::framebuffer::Framebuffer;

const SOURCE: &str = "aurora3d::FramebufferRegistry";

/// Registry of named framebuffers
///
/// All operations take `&self` and may be called from any thread. Locks are
/// always taken in registry order (framebuffers, then render passes, then
/// attachments), so cross-registry operations cannot deadlock.
pub struct FramebufferRegistry {
    device: Arc<dyn GraphicsDevice>,
    render_passes: Arc<RenderPassRegistry>,
    attachments: Arc<AttachmentRegistry>,
    framebuffers: RwLock<FxHashMap<String, Arc<Framebuffer>>>,
}

impl FramebufferRegistry {
    pub fn new(
        device: Arc<dyn GraphicsDevice>,
        render_passes: Arc<RenderPassRegistry>,
        attachments: Arc<AttachmentRegistry>,
    ) -> Self {
        Self {
            device,
            render_passes,
            attachments,
            framebuffers: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create a framebuffer binding attachments to a render pass
    ///
    /// `attachment_names[i]` is bound to the pass's attachment slot `i`.
    /// Every bound attachment's ref-count and the render pass's framebuffer
    /// count are incremented; on any failure nothing stays retained.
    ///
    /// # Errors
    ///
    /// `Error::DuplicateName` if `name` is taken; `Error::NotFound` if the
    /// pass or any attachment is unregistered; `Error::InvalidDescription`
    /// if the binding list is empty, its length does not match the pass's
    /// attachment count, or formats/extents are inconsistent.
    pub fn add_framebuffer(
        &self,
        name: &str,
        render_pass_name: &str,
        attachment_names: &[&str],
    ) -> Result<Arc<Framebuffer>> {
        let mut framebuffers = self.framebuffers.write().unwrap();

        if framebuffers.contains_key(name) {
            engine_bail!(DuplicateName, SOURCE, "framebuffer '{}' already exists", name);
        }

        // Resolution and retention are one atomic step, so the pass cannot
        // be deleted out from under a framebuffer that is being built
        // against it.
        let render_pass = self.render_passes.resolve_and_retain(render_pass_name)?;
        let framebuffer = match self.build_framebuffer(
            name,
            render_pass_name,
            &render_pass,
            attachment_names,
        ) {
            Ok(framebuffer) => framebuffer,
            Err(err) => {
                render_pass.release_framebuffer();
                return Err(err);
            }
        };
        framebuffers.insert(name.to_string(), framebuffer.clone());

        crate::engine_debug!(SOURCE, "framebuffer '{}' created ({}x{}, pass '{}')",
            name, framebuffer.extent().width, framebuffer.extent().height,
            render_pass_name);
        Ok(framebuffer)
    }

    /// Validate the binding list against the retained pass and construct the
    /// native framebuffer; attachments end up retained only on success.
    fn build_framebuffer(
        &self,
        name: &str,
        render_pass_name: &str,
        render_pass: &Arc<RenderPass>,
        attachment_names: &[&str],
    ) -> Result<Arc<Framebuffer>> {
        let slots = &render_pass.description().attachments;

        if attachment_names.is_empty() {
            engine_bail!(InvalidDescription, SOURCE,
                "framebuffer '{}' binds no attachments", name);
        }
        if attachment_names.len() != slots.len() {
            engine_bail!(InvalidDescription, SOURCE,
                "framebuffer '{}' binds {} attachment(s), render pass '{}' declares {}",
                name, attachment_names.len(), render_pass_name, slots.len());
        }

        // Resolves every name and bumps every ref-count, or neither
        let resolved = self.attachments.retain_all(attachment_names)?;

        let extent = resolved[0].extent();
        for (index, attachment) in resolved.iter().enumerate() {
            if attachment.format() != slots[index].format {
                self.attachments.release_all(attachment_names);
                engine_bail!(InvalidDescription, SOURCE,
                    "framebuffer '{}': attachment '{}' is {:?}, slot {} of render pass '{}' expects {:?}",
                    name, attachment.name(), attachment.format(), index,
                    render_pass_name, slots[index].format);
            }
            if attachment.extent() != extent {
                self.attachments.release_all(attachment_names);
                engine_bail!(InvalidDescription, SOURCE,
                    "framebuffer '{}': attachment '{}' extent {}x{} differs from {}x{}",
                    name, attachment.name(),
                    attachment.extent().width, attachment.extent().height,
                    extent.width, extent.height);
            }
        }

        let native = match self.device.create_framebuffer(&FramebufferDescription {
            render_pass: render_pass.native().clone(),
            attachments: resolved.iter().map(|a| a.image().clone()).collect(),
            extent,
        }) {
            Ok(native) => native,
            Err(err) => {
                self.attachments.release_all(attachment_names);
                return Err(err);
            }
        };

        Ok(Arc::new(Framebuffer::new(
            name.to_string(),
            native,
            render_pass.clone(),
            resolved,
            extent,
        )))
    }

    /// Look up a framebuffer by name
    pub fn framebuffer(&self, name: &str) -> Result<Arc<Framebuffer>> {
        let framebuffers = self.framebuffers.read().unwrap();
        match framebuffers.get(name) {
            Some(framebuffer) => Ok(framebuffer.clone()),
            None => {
                engine_bail!(NotFound, SOURCE, "framebuffer '{}' is not registered", name)
            }
        }
    }

    /// Delete a framebuffer, releasing its attachments and render pass
    pub fn delete_framebuffer(&self, name: &str) -> Result<()> {
        let mut framebuffers = self.framebuffers.write().unwrap();

        let framebuffer = match framebuffers.remove(name) {
            Some(framebuffer) => framebuffer,
            None => {
                engine_bail!(NotFound, SOURCE, "framebuffer '{}' is not registered", name)
            }
        };

        let names: Vec<&str> = framebuffer.attachments().iter().map(|a| a.name()).collect();
        self.attachments.release_all(&names);
        framebuffer.render_pass().release_framebuffer();

        crate::engine_debug!(SOURCE, "framebuffer '{}' deleted", name);
        Ok(())
    }

    /// Number of registered framebuffers
    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.read().unwrap().len()
    }
}

#[cfg(test)]
#[path = "framebuffer_registry_tests.rs"]
mod tests;
