//! Central render pass registry
//!
//! Compiles [`RenderPassBuilder`]s into immutable [`RenderPass`]es and
//! stores them by name. Name-to-index resolution is deterministic: every
//! attachment and subpass gets the index of its declaration position.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{
    AttachmentDescription, AttachmentReference, DependencyDescription, GraphicsDevice,
    RenderPassDescription, SubpassDescription, EXTERNAL_SUBPASS_INDEX,
};
use super::builder::{RenderPassBuilder, EXTERNAL_SUBPASS};
use super::render_pass::RenderPass;

const SOURCE: &str = "aurora3d::RenderPassRegistry";

/// Registry of named, compiled render passes
///
/// All operations take `&self` and may be called from any thread.
pub struct RenderPassRegistry {
    device: Arc<dyn GraphicsDevice>,
    passes: RwLock<FxHashMap<String, Arc<RenderPass>>>,
}

impl RenderPassRegistry {
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Self {
        Self {
            device,
            passes: RwLock::new(FxHashMap::default()),
        }
    }

    /// Compile a builder into a render pass and register it under the
    /// builder's name
    ///
    /// Attachments and subpasses are assigned indices in declaration order,
    /// so compiling the same builder twice yields identical descriptions.
    ///
    /// # Errors
    ///
    /// `Error::DuplicateName` if the pass name, an attachment name or a
    /// subpass name is declared twice; `Error::UnresolvedReference` if a
    /// subpass or dependency names something that was never declared.
    pub fn create_render_pass(&self, builder: RenderPassBuilder) -> Result<Arc<RenderPass>> {
        let mut passes = self.passes.write().unwrap();

        if passes.contains_key(&builder.name) {
            engine_bail!(DuplicateName, SOURCE, "render pass '{}' already exists", builder.name);
        }

        let mut attachment_indices = FxHashMap::default();
        let mut attachments = Vec::with_capacity(builder.attachments.len());
        for descriptor in &builder.attachments {
            if attachment_indices
                .insert(descriptor.name.clone(), attachments.len() as u32)
                .is_some()
            {
                engine_bail!(DuplicateName, SOURCE,
                    "render pass '{}' declares attachment '{}' twice",
                    builder.name, descriptor.name);
            }
            attachments.push(AttachmentDescription {
                format: descriptor.format,
                load_op: descriptor.load_op,
                store_op: descriptor.store_op,
                stencil_load_op: descriptor.stencil_load_op,
                stencil_store_op: descriptor.stencil_store_op,
                initial_layout: descriptor.initial_layout,
                final_layout: descriptor.final_layout,
            });
        }

        let mut subpass_indices = FxHashMap::default();
        let mut subpasses = Vec::with_capacity(builder.subpasses.len());
        for descriptor in &builder.subpasses {
            if descriptor.name == EXTERNAL_SUBPASS {
                engine_bail!(DuplicateName, SOURCE,
                    "render pass '{}': subpass name '{}' is reserved",
                    builder.name, EXTERNAL_SUBPASS);
            }
            if subpass_indices
                .insert(descriptor.name.clone(), subpasses.len() as u32)
                .is_some()
            {
                engine_bail!(DuplicateName, SOURCE,
                    "render pass '{}' declares subpass '{}' twice",
                    builder.name, descriptor.name);
            }

            let mut color_attachments = Vec::with_capacity(descriptor.color_attachment_names.len());
            for name in &descriptor.color_attachment_names {
                color_attachments.push(Self::resolve_attachment(
                    &builder, &attachment_indices, name, &descriptor.name)?);
            }
            let depth_stencil_attachment = match &descriptor.depth_stencil_attachment_name {
                Some(name) => Some(Self::resolve_attachment(
                    &builder, &attachment_indices, name, &descriptor.name)?),
                None => None,
            };

            subpasses.push(SubpassDescription {
                bind_point: descriptor.bind_point,
                color_attachments,
                depth_stencil_attachment,
            });
        }

        let mut dependencies = Vec::with_capacity(builder.dependencies.len());
        for descriptor in &builder.dependencies {
            dependencies.push(DependencyDescription {
                src_subpass: Self::resolve_subpass(
                    &builder, &subpass_indices, &descriptor.src_subpass_name)?,
                dst_subpass: Self::resolve_subpass(
                    &builder, &subpass_indices, &descriptor.dst_subpass_name)?,
                src_stages: descriptor.src_stages,
                dst_stages: descriptor.dst_stages,
                src_access: descriptor.src_access,
                dst_access: descriptor.dst_access,
            });
        }

        let description = RenderPassDescription {
            attachments,
            subpasses,
            dependencies,
        };

        // Created under the write lock so a concurrent lookup never observes
        // a half-registered pass.
        let native = self.device.create_render_pass(&description)?;

        let pass = Arc::new(RenderPass::new(
            builder.name.clone(),
            native,
            description,
            attachment_indices,
            subpass_indices,
        ));
        passes.insert(builder.name.clone(), pass.clone());

        crate::engine_debug!(SOURCE, "render pass '{}' compiled ({} attachment(s), {} subpass(es))",
            builder.name, pass.description().attachments.len(),
            pass.description().subpasses.len());
        Ok(pass)
    }

    fn resolve_attachment(
        builder: &RenderPassBuilder,
        indices: &FxHashMap<String, u32>,
        name: &str,
        subpass_name: &str,
    ) -> Result<AttachmentReference> {
        match indices.get(name) {
            Some(&index) => Ok(AttachmentReference {
                attachment: index,
                layout: builder.attachments[index as usize].subpass_layout,
            }),
            None => engine_bail!(UnresolvedReference, SOURCE,
                "render pass '{}': subpass '{}' references undeclared attachment '{}'",
                builder.name, subpass_name, name),
        }
    }

    fn resolve_subpass(
        builder: &RenderPassBuilder,
        indices: &FxHashMap<String, u32>,
        name: &str,
    ) -> Result<u32> {
        if name == EXTERNAL_SUBPASS {
            return Ok(EXTERNAL_SUBPASS_INDEX);
        }
        match indices.get(name) {
            Some(&index) => Ok(index),
            None => engine_bail!(UnresolvedReference, SOURCE,
                "render pass '{}': dependency references undeclared subpass '{}'",
                builder.name, name),
        }
    }

    /// Resolve a pass and increment its framebuffer count, atomically.
    ///
    /// `delete_render_pass` checks the count under the write lock, so a
    /// pass resolved here cannot be deleted before the caller either
    /// publishes its framebuffer or calls `release_framebuffer`.
    pub(crate) fn resolve_and_retain(&self, name: &str) -> Result<Arc<RenderPass>> {
        let passes = self.passes.read().unwrap();
        match passes.get(name) {
            Some(pass) => {
                pass.retain_framebuffer();
                Ok(pass.clone())
            }
            None => {
                engine_bail!(NotFound, SOURCE, "render pass '{}' is not registered", name)
            }
        }
    }

    /// Look up a render pass by name
    pub fn render_pass(&self, name: &str) -> Result<Arc<RenderPass>> {
        let passes = self.passes.read().unwrap();
        match passes.get(name) {
            Some(pass) => Ok(pass.clone()),
            None => {
                engine_bail!(NotFound, SOURCE, "render pass '{}' is not registered", name)
            }
        }
    }

    /// Delete a render pass
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if absent; `Error::StillReferenced` while any live
    /// framebuffer was built against it.
    pub fn delete_render_pass(&self, name: &str) -> Result<()> {
        let mut passes = self.passes.write().unwrap();

        let refs = match passes.get(name) {
            Some(pass) => pass.framebuffer_refs(),
            None => {
                engine_bail!(NotFound, SOURCE, "render pass '{}' is not registered", name)
            }
        };
        if refs > 0 {
            engine_bail!(StillReferenced, SOURCE,
                "render pass '{}' is referenced by {} framebuffer(s)", name, refs);
        }

        passes.remove(name);
        crate::engine_debug!(SOURCE, "render pass '{}' deleted", name);
        Ok(())
    }

    /// Number of registered render passes
    pub fn render_pass_count(&self) -> usize {
        self.passes.read().unwrap().len()
    }
}

#[cfg(test)]
#[path = "render_pass_registry_tests.rs"]
mod tests;
