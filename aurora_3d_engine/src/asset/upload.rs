//! The texture upload protocol
//!
//! One load runs in five GPU-visible phases on the worker's two command
//! lists:
//!
//! 1. stage: decoded pixels and the info block are written to host-visible
//!    buffers, device-local destinations are created
//! 2. transfer queue: layout transition to transfer-dst, buffer-to-image and
//!    buffer-to-buffer copies
//! 3. transfer queue: release barriers handing the image and info buffer to
//!    the destination queue family, submit signals a semaphore
//! 4. destination queue: matching acquire barriers, submit waits on the
//!    semaphore, then a blocking wait for completion
//! 5. sampler creation and publication of the finished texture
//!
//! Release and acquire barriers name the same queue family pair and the
//! same subresource range; when both queues share a family the transfer is
//! skipped and the barriers keep `QUEUE_FAMILY_IGNORED` on both sides.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::graphics_device::{
    Access, BufferBarrier, BufferDescription, BufferUsage, CommandListUsage, ImageAspect,
    ImageBarrier, ImageDescription, ImageLayout, ImageTiling, ImageUsage, MemoryProperties,
    PipelineStages, SamplerDescription, QUEUE_FAMILY_IGNORED,
};
use super::load_handle::{LoadPublisher, LoadState};
use super::loader::WorkerContext;
use super::texture::{Texture2d, TextureInfo, TextureSettings};

const SOURCE: &str = "aurora3d::AssetLoader";

/// Run one full texture load on the worker, publishing progress and the
/// final value (or failure) through `publisher`.
pub(crate) fn load_texture_2d(
    context: &mut WorkerContext,
    path: &Path,
    settings: TextureSettings,
    publisher: LoadPublisher<Texture2d>,
) {
    match run_upload(context, path, settings, &publisher) {
        Ok(texture) => {
            crate::engine_debug!(SOURCE, "texture '{}' loaded ({}x{})",
                path.display(), texture.extent().width, texture.extent().height);
            publisher.publish(Arc::new(texture));
        }
        Err(err) => {
            crate::engine_error!(SOURCE, "texture '{}' failed to load: {}", path.display(), err);
            publisher.fail(err);
        }
    }
}

fn run_upload(
    context: &mut WorkerContext,
    path: &Path,
    settings: TextureSettings,
    publisher: &LoadPublisher<Texture2d>,
) -> Result<Texture2d> {
    publisher.set_state(LoadState::Decoding);
    let decoded = context.decoder.decode(path)?;
    let extent = decoded.extent;
    let info = TextureInfo::new(extent);

    // Phase 1: device-local destinations plus host-visible staging
    let image = context.device.create_image(&ImageDescription {
        extent,
        format: settings.format,
        tiling: ImageTiling::Optimal,
        usage: ImageUsage::TRANSFER_SRC | ImageUsage::TRANSFER_DST | ImageUsage::SAMPLED,
        properties: MemoryProperties::DEVICE_LOCAL,
        aspect: ImageAspect::COLOR,
        mip_levels: 1,
    })?;

    let pixel_staging = context.device.create_buffer(&BufferDescription {
        size: decoded.pixels.len() as u64,
        usage: BufferUsage::TRANSFER_SRC,
        properties: MemoryProperties::HOST_VISIBLE | MemoryProperties::HOST_COHERENT,
    })?;
    pixel_staging.write(&decoded.pixels)?;

    let info_bytes = bytemuck::bytes_of(&info);
    let info_staging = context.device.create_buffer(&BufferDescription {
        size: info_bytes.len() as u64,
        usage: BufferUsage::TRANSFER_SRC,
        properties: MemoryProperties::HOST_VISIBLE | MemoryProperties::HOST_COHERENT,
    })?;
    info_staging.write(info_bytes)?;

    let info_buffer = context.device.create_buffer(&BufferDescription {
        size: info_bytes.len() as u64,
        usage: BufferUsage::TRANSFER_DST | BufferUsage::UNIFORM,
        properties: MemoryProperties::DEVICE_LOCAL,
    })?;
    publisher.set_state(LoadState::Staged);

    let transfer_family = context.transfer_queue.family_index;
    let destination_family = context.destination_queue.family_index;
    // Same family means nothing changes hands
    let (release_src, release_dst) = if transfer_family == destination_family {
        (QUEUE_FAMILY_IGNORED, QUEUE_FAMILY_IGNORED)
    } else {
        (transfer_family, destination_family)
    };
    let range = image.subresource_range();

    // Phases 2 + 3 on the transfer queue
    let transfer = &mut context.transfer_list;
    transfer.begin_record(CommandListUsage::OneTimeSubmit)?;

    transfer.add_pipeline_barrier(
        PipelineStages::TOP_OF_PIPE,
        PipelineStages::TRANSFER,
        &[],
        &[],
        &[ImageBarrier {
            image: image.clone(),
            old_layout: ImageLayout::Undefined,
            new_layout: ImageLayout::TransferDstOptimal,
            src_access: Access::empty(),
            dst_access: Access::TRANSFER_WRITE,
            src_queue_family: QUEUE_FAMILY_IGNORED,
            dst_queue_family: QUEUE_FAMILY_IGNORED,
            subresource_range: range,
        }],
    )?;

    transfer.copy_buffer_to_image(&pixel_staging, &image, ImageLayout::TransferDstOptimal)?;
    transfer.copy_buffer(&info_staging, &info_buffer, info_bytes.len() as u64)?;

    // Release: hand the image and the info buffer to the destination family.
    // dst_access stays empty, the acquire side makes the memory visible.
    transfer.add_pipeline_barrier(
        PipelineStages::TRANSFER,
        PipelineStages::BOTTOM_OF_PIPE,
        &[],
        &[BufferBarrier {
            buffer: info_buffer.clone(),
            src_access: Access::TRANSFER_WRITE,
            dst_access: Access::empty(),
            src_queue_family: release_src,
            dst_queue_family: release_dst,
            offset: 0,
            size: info_bytes.len() as u64,
        }],
        &[ImageBarrier {
            image: image.clone(),
            old_layout: ImageLayout::TransferDstOptimal,
            new_layout: ImageLayout::ShaderReadOnlyOptimal,
            src_access: Access::TRANSFER_WRITE,
            dst_access: Access::empty(),
            src_queue_family: release_src,
            dst_queue_family: release_dst,
            subresource_range: range,
        }],
    )?;

    transfer.end_record()?;

    let semaphore = context.device.create_semaphore()?;
    transfer.submit(&[], &[], &[semaphore.clone()])?;
    publisher.set_state(LoadState::TransferSubmitted);

    // Phase 4 on the destination queue: the acquire half. Queue families and
    // subresource range must match the release exactly; the layouts repeat
    // the release's final layout, no further transition happens.
    publisher.set_state(LoadState::OwnershipTransferring);
    let destination = &mut context.destination_list;
    destination.begin_record(CommandListUsage::OneTimeSubmit)?;

    destination.add_pipeline_barrier(
        PipelineStages::TOP_OF_PIPE,
        PipelineStages::BOTTOM_OF_PIPE,
        &[],
        &[BufferBarrier {
            buffer: info_buffer.clone(),
            src_access: Access::empty(),
            dst_access: Access::empty(),
            src_queue_family: release_src,
            dst_queue_family: release_dst,
            offset: 0,
            size: info_bytes.len() as u64,
        }],
        &[ImageBarrier {
            image: image.clone(),
            old_layout: ImageLayout::ShaderReadOnlyOptimal,
            new_layout: ImageLayout::ShaderReadOnlyOptimal,
            src_access: Access::empty(),
            dst_access: Access::empty(),
            src_queue_family: release_src,
            dst_queue_family: release_dst,
            subresource_range: range,
        }],
    )?;

    destination.end_record()?;
    destination.submit(&[semaphore], &[PipelineStages::BOTTOM_OF_PIPE], &[])?;

    // The semaphore orders the two submits, so once the destination queue is
    // done the transfer work is too.
    destination.wait_for_finish()?;
    publisher.set_state(LoadState::Acquired);

    context.transfer_list.reset()?;
    context.destination_list.reset()?;

    // Phase 5: sampler, then the finished texture. Staging buffers drop here.
    let sampler = context.device.create_sampler(&SamplerDescription {
        mag_filter: settings.mag_filter,
        min_filter: settings.min_filter,
        address_mode: settings.address_mode,
        anisotropy: settings.anisotropy,
        border_color: settings.border_color,
    })?;

    Ok(Texture2d::new(extent, settings, info, image, sampler, info_buffer))
}
