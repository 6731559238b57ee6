//! RenderPassBuilder - transient, single-use render pass description
//!
//! Accumulates named attachment, subpass and dependency descriptors in
//! declaration order; the registry resolves the names into stable integer
//! indices when it compiles the builder. Descriptors are pure value records
//! and are not retained after compilation.

use crate::attachment::Attachment;
use crate::graphics_device::{
    Access, AttachmentLoadOp, AttachmentStoreOp, ImageLayout, PipelineBindPoint, PipelineStages,
    TextureFormat,
};

/// Distinguished subpass name denoting the pipeline stages outside any
/// subpass; resolves to [`EXTERNAL_SUBPASS_INDEX`] without a name lookup.
///
/// [`EXTERNAL_SUBPASS_INDEX`]: crate::graphics_device::EXTERNAL_SUBPASS_INDEX
pub const EXTERNAL_SUBPASS: &str = "external";

#[derive(Debug, Clone)]
pub(crate) struct AttachmentDescriptor {
    pub name: String,
    pub format: TextureFormat,
    pub load_op: AttachmentLoadOp,
    pub store_op: AttachmentStoreOp,
    pub stencil_load_op: AttachmentLoadOp,
    pub stencil_store_op: AttachmentStoreOp,
    pub initial_layout: ImageLayout,
    /// Layout the attachment is in while a subpass references it
    pub subpass_layout: ImageLayout,
    pub final_layout: ImageLayout,
}

#[derive(Debug, Clone)]
pub(crate) struct SubpassDescriptor {
    pub name: String,
    pub bind_point: PipelineBindPoint,
    pub color_attachment_names: Vec<String>,
    pub depth_stencil_attachment_name: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct DependencyDescriptor {
    pub src_subpass_name: String,
    pub dst_subpass_name: String,
    pub src_stages: PipelineStages,
    pub dst_stages: PipelineStages,
    pub src_access: Access,
    pub dst_access: Access,
}

/// Transient builder for one named render pass
///
/// Hand the finished builder to
/// [`RenderPassRegistry::create_render_pass`](crate::render_pass::RenderPassRegistry::create_render_pass);
/// it is consumed by compilation.
pub struct RenderPassBuilder {
    pub(crate) name: String,
    pub(crate) attachments: Vec<AttachmentDescriptor>,
    pub(crate) subpasses: Vec<SubpassDescriptor>,
    pub(crate) dependencies: Vec<DependencyDescriptor>,
}

impl RenderPassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attachments: Vec::new(),
            subpasses: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a color attachment slot
    ///
    /// The attachment's index is its declaration position. The format is
    /// taken from the attachment handle.
    pub fn add_color_attachment(
        &mut self,
        name: &str,
        attachment: &Attachment,
        load_op: AttachmentLoadOp,
        store_op: AttachmentStoreOp,
        initial_layout: ImageLayout,
        final_layout: ImageLayout,
    ) -> &mut Self {
        self.attachments.push(AttachmentDescriptor {
            name: name.to_string(),
            format: attachment.format(),
            load_op,
            store_op,
            stencil_load_op: AttachmentLoadOp::DontCare,
            stencil_store_op: AttachmentStoreOp::DontCare,
            initial_layout,
            subpass_layout: ImageLayout::ColorAttachmentOptimal,
            final_layout,
        });
        self
    }

    /// Declare a depth-stencil attachment slot
    ///
    /// `stencil_ops` carries the stencil load/store pair for formats with a
    /// stencil aspect; pass `None` for pure depth formats.
    pub fn add_depth_attachment(
        &mut self,
        name: &str,
        attachment: &Attachment,
        load_op: AttachmentLoadOp,
        store_op: AttachmentStoreOp,
        initial_layout: ImageLayout,
        final_layout: ImageLayout,
        stencil_ops: Option<(AttachmentLoadOp, AttachmentStoreOp)>,
    ) -> &mut Self {
        let (stencil_load_op, stencil_store_op) =
            stencil_ops.unwrap_or((AttachmentLoadOp::DontCare, AttachmentStoreOp::DontCare));
        self.attachments.push(AttachmentDescriptor {
            name: name.to_string(),
            format: attachment.format(),
            load_op,
            store_op,
            stencil_load_op,
            stencil_store_op,
            initial_layout,
            subpass_layout: ImageLayout::DepthStencilAttachmentOptimal,
            final_layout,
        });
        self
    }

    /// Declare a subpass referencing color attachments by name
    pub fn add_subpass(
        &mut self,
        name: &str,
        bind_point: PipelineBindPoint,
        color_attachment_names: &[&str],
    ) -> &mut Self {
        self.subpasses.push(SubpassDescriptor {
            name: name.to_string(),
            bind_point,
            color_attachment_names: color_attachment_names
                .iter()
                .map(|n| n.to_string())
                .collect(),
            depth_stencil_attachment_name: None,
        });
        self
    }

    /// Declare a subpass with color attachments and a depth-stencil attachment
    pub fn add_subpass_with_depth(
        &mut self,
        name: &str,
        bind_point: PipelineBindPoint,
        color_attachment_names: &[&str],
        depth_stencil_attachment_name: &str,
    ) -> &mut Self {
        self.subpasses.push(SubpassDescriptor {
            name: name.to_string(),
            bind_point,
            color_attachment_names: color_attachment_names
                .iter()
                .map(|n| n.to_string())
                .collect(),
            depth_stencil_attachment_name: Some(depth_stencil_attachment_name.to_string()),
        });
        self
    }

    /// Declare a dependency between two subpasses by name
    ///
    /// Either side may be [`EXTERNAL_SUBPASS`].
    pub fn add_dependency(
        &mut self,
        src_subpass_name: &str,
        dst_subpass_name: &str,
        src_stages: PipelineStages,
        dst_stages: PipelineStages,
        src_access: Access,
        dst_access: Access,
    ) -> &mut Self {
        self.dependencies.push(DependencyDescriptor {
            src_subpass_name: src_subpass_name.to_string(),
            dst_subpass_name: dst_subpass_name.to_string(),
            src_stages,
            dst_stages,
            src_access,
            dst_access,
        });
        self
    }
}
