//! Central attachment registry
//!
//! Stores named attachments together with their framebuffer reference
//! counts. The attachment map and the ref-count table live under ONE
//! readers-writer lock: lookups proceed concurrently, structural mutation
//! (create/delete) and ref-count updates serialize against them, so a
//! concurrent framebuffer creation can never race a deletion into a lost
//! update.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{
    Extent2d, GraphicsDevice, ImageAspect, ImageDescription, ImageTiling, ImageUsage,
    MemoryProperties, TextureFormat,
};
use super::attachment::Attachment;

const SOURCE: &str = "aurora3d::AttachmentRegistry";

struct RegistryState {
    attachments: FxHashMap<String, Arc<Attachment>>,
    /// name → number of live framebuffers (or explicit holds) referencing it
    ref_counts: FxHashMap<String, u32>,
}

/// Registry of named render-target attachments
///
/// All operations take `&self` and may be called from any thread.
pub struct AttachmentRegistry {
    device: Arc<dyn GraphicsDevice>,
    state: RwLock<RegistryState>,
}

impl AttachmentRegistry {
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Self {
        Self {
            device,
            state: RwLock::new(RegistryState {
                attachments: FxHashMap::default(),
                ref_counts: FxHashMap::default(),
            }),
        }
    }

    /// Create a color attachment under `name`
    ///
    /// GPU memory is allocated immediately. `extra_usage` is OR-ed onto
    /// COLOR_ATTACHMENT (e.g. SAMPLED for targets read by later passes).
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateName` if `name` is already registered,
    /// or the device error if allocation fails.
    pub fn add_color_attachment(
        &self,
        name: &str,
        extent: Extent2d,
        format: TextureFormat,
        extra_usage: ImageUsage,
        properties: MemoryProperties,
    ) -> Result<()> {
        self.add_attachment(
            name,
            extent,
            format,
            ImageUsage::COLOR_ATTACHMENT | extra_usage,
            properties,
            ImageAspect::COLOR,
        )
    }

    /// Create a depth attachment under `name` (DEPTH aspect only)
    pub fn add_depth_attachment(
        &self,
        name: &str,
        extent: Extent2d,
        format: TextureFormat,
        extra_usage: ImageUsage,
        properties: MemoryProperties,
    ) -> Result<()> {
        self.add_attachment(
            name,
            extent,
            format,
            ImageUsage::DEPTH_STENCIL_ATTACHMENT | extra_usage,
            properties,
            ImageAspect::DEPTH,
        )
    }

    /// Create a depth attachment whose view also covers `extra_aspect`
    /// (e.g. STENCIL for combined depth-stencil formats)
    pub fn add_depth_attachment_with_aspect(
        &self,
        name: &str,
        extent: Extent2d,
        format: TextureFormat,
        extra_usage: ImageUsage,
        properties: MemoryProperties,
        extra_aspect: ImageAspect,
    ) -> Result<()> {
        self.add_attachment(
            name,
            extent,
            format,
            ImageUsage::DEPTH_STENCIL_ATTACHMENT | extra_usage,
            properties,
            ImageAspect::DEPTH | extra_aspect,
        )
    }

    fn add_attachment(
        &self,
        name: &str,
        extent: Extent2d,
        format: TextureFormat,
        usage: ImageUsage,
        properties: MemoryProperties,
        aspect: ImageAspect,
    ) -> Result<()> {
        let mut state = self.state.write().unwrap();

        if state.attachments.contains_key(name) {
            engine_bail!(DuplicateName, SOURCE, "attachment '{}' already exists", name);
        }

        // Allocation happens under the write lock so a concurrent lookup
        // never observes a half-registered attachment.
        let image = self.device.create_image(&ImageDescription {
            extent,
            format,
            tiling: ImageTiling::Optimal,
            usage,
            properties,
            aspect,
            mip_levels: 1,
        })?;

        state.attachments.insert(
            name.to_string(),
            Arc::new(Attachment::new(name.to_string(), image, extent, format, aspect)),
        );
        state.ref_counts.insert(name.to_string(), 0);

        crate::engine_debug!(SOURCE, "attachment '{}' created ({}x{}, {:?})",
            name, extent.width, extent.height, format);
        Ok(())
    }

    /// Look up an attachment by name
    ///
    /// Returns a shared handle; the registry's own entry keeps the GPU
    /// resources alive until `delete_attachment` succeeds and the last
    /// outstanding handle is dropped.
    pub fn attachment(&self, name: &str) -> Result<Arc<Attachment>> {
        let state = self.state.read().unwrap();
        match state.attachments.get(name) {
            Some(attachment) => Ok(attachment.clone()),
            None => {
                engine_bail!(NotFound, SOURCE, "attachment '{}' is not registered", name)
            }
        }
    }

    /// Delete an attachment
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if absent; `Error::StillReferenced` while any live
    /// framebuffer (or explicit hold) references it.
    pub fn delete_attachment(&self, name: &str) -> Result<()> {
        let mut state = self.state.write().unwrap();

        let count = match state.ref_counts.get(name) {
            Some(&count) => count,
            None => {
                engine_bail!(NotFound, SOURCE, "attachment '{}' is not registered", name)
            }
        };
        if count > 0 {
            engine_bail!(StillReferenced, SOURCE,
                "attachment '{}' is referenced by {} framebuffer(s)", name, count);
        }

        state.attachments.remove(name);
        state.ref_counts.remove(name);

        crate::engine_debug!(SOURCE, "attachment '{}' deleted", name);
        Ok(())
    }

    /// Current framebuffer reference count of an attachment
    pub fn ref_count(&self, name: &str) -> Result<u32> {
        let state = self.state.read().unwrap();
        match state.ref_counts.get(name) {
            Some(&count) => Ok(count),
            None => {
                engine_bail!(NotFound, SOURCE, "attachment '{}' is not registered", name)
            }
        }
    }

    /// Number of registered attachments
    pub fn attachment_count(&self) -> usize {
        self.state.read().unwrap().attachments.len()
    }

    /// Resolve every name and increment its ref-count, atomically.
    ///
    /// Either all names resolve and all counts are incremented, or nothing
    /// is mutated and the first missing name is reported as NotFound.
    pub(crate) fn retain_all(&self, names: &[&str]) -> Result<Vec<Arc<Attachment>>> {
        let mut state = self.state.write().unwrap();

        // Validate everything before touching any count
        for name in names {
            if !state.attachments.contains_key(*name) {
                engine_bail!(NotFound, SOURCE, "attachment '{}' is not registered", name);
            }
        }

        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            resolved.push(state.attachments[*name].clone());
            *state.ref_counts.get_mut(*name).unwrap() += 1;
        }
        Ok(resolved)
    }

    /// Decrement the ref-count of every name (inverse of `retain_all`)
    pub(crate) fn release_all(&self, names: &[&str]) {
        let mut state = self.state.write().unwrap();
        for name in names {
            if let Some(count) = state.ref_counts.get_mut(*name) {
                debug_assert!(*count > 0, "ref-count underflow for '{}'", name);
                *count = count.saturating_sub(1);
            }
        }
    }
}

#[cfg(test)]
#[path = "attachment_registry_tests.rs"]
mod tests;
