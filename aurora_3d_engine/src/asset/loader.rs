//! AssetLoader - worker pool driving asynchronous GPU uploads
//!
//! Each worker owns two command lists, one on the transfer queue and one on
//! the destination queue, and replays the full upload protocol (stage, copy,
//! release, acquire) per job. Queues and command lists are resolved up front
//! so a bad configuration fails at construction, not mid-load.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::error::Result;
use crate::graphics_device::{GpuCommandList, GraphicsDevice, QueueInfo};
use super::decoder::{ImageFileDecoder, PixelDecoder};
use super::load_handle::{load_channel, LoadHandle};
use super::texture::{Texture2d, TextureSettings};
use super::upload;

const SOURCE: &str = "aurora3d::AssetLoader";

/// AssetLoader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub worker_threads: usize,
    /// Queue the staging copies and release barriers run on
    pub transfer_queue: String,
    /// Queue family that owns the resources after the load
    pub destination_queue: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            worker_threads: 1,
            transfer_queue: "TransferQueue".to_string(),
            destination_queue: "GraphicsQueue".to_string(),
        }
    }
}

/// Per-worker GPU state, owned by exactly one worker thread
pub(crate) struct WorkerContext {
    pub(crate) device: Arc<dyn GraphicsDevice>,
    pub(crate) decoder: Arc<dyn PixelDecoder>,
    pub(crate) transfer_queue: QueueInfo,
    pub(crate) destination_queue: QueueInfo,
    pub(crate) transfer_list: Box<dyn GpuCommandList>,
    pub(crate) destination_list: Box<dyn GpuCommandList>,
}

type Job = Box<dyn FnOnce(&mut WorkerContext) + Send>;

/// Asynchronous asset loader
///
/// `load_texture_2d` returns immediately with a [`LoadHandle`]; a worker
/// thread decodes the file and uploads it through the transfer queue.
/// Dropping the loader joins the workers after draining queued jobs.
pub struct AssetLoader {
    jobs: Option<Sender<Job>>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl AssetLoader {
    /// Loader decoding real image files (PNG, JPEG)
    pub fn new(device: Arc<dyn GraphicsDevice>, config: LoaderConfig) -> Result<Self> {
        Self::with_decoder(device, Arc::new(ImageFileDecoder), config)
    }

    /// Loader with a custom pixel decoder
    pub fn with_decoder(
        device: Arc<dyn GraphicsDevice>,
        decoder: Arc<dyn PixelDecoder>,
        config: LoaderConfig,
    ) -> Result<Self> {
        let transfer_queue = device.queue(&config.transfer_queue)?;
        let destination_queue = device.queue(&config.destination_queue)?;

        let worker_threads = config.worker_threads.max(1);
        let mut contexts = Vec::with_capacity(worker_threads);
        for _ in 0..worker_threads {
            contexts.push(WorkerContext {
                device: device.clone(),
                decoder: decoder.clone(),
                transfer_queue: transfer_queue.clone(),
                destination_queue: destination_queue.clone(),
                transfer_list: device.create_command_list(&config.transfer_queue)?,
                destination_list: device.create_command_list(&config.destination_queue)?,
            });
        }

        let (sender, receiver) = channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = contexts
            .into_iter()
            .enumerate()
            .map(|(index, mut context)| {
                let receiver = receiver.clone();
                thread::Builder::new()
                    .name(format!("aurora3d-loader-{}", index))
                    .spawn(move || Self::worker_loop(&receiver, &mut context))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                crate::engine_err!(InitializationFailed, SOURCE,
                    "failed to spawn loader worker: {}", e)
            })?;

        crate::engine_info!(SOURCE,
            "asset loader started ({} worker(s), transfer '{}' family {}, destination '{}' family {})",
            worker_threads, transfer_queue.name, transfer_queue.family_index,
            destination_queue.name, destination_queue.family_index);

        Ok(Self {
            jobs: Some(sender),
            workers,
        })
    }

    fn worker_loop(receiver: &Mutex<Receiver<Job>>, context: &mut WorkerContext) {
        loop {
            // Lock only to receive so workers pull jobs independently
            let job = match receiver.lock().unwrap().recv() {
                Ok(job) => job,
                Err(_) => break,
            };
            job(context);
        }
    }

    /// Queue a 2D texture load
    ///
    /// Never blocks. Decode or upload failures surface on the returned
    /// handle as `LoadState::Failed`.
    pub fn load_texture_2d(
        &self,
        path: impl AsRef<Path>,
        settings: TextureSettings,
    ) -> LoadHandle<Texture2d> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let (handle, publisher) = load_channel();

        let job: Job = Box::new(move |context| {
            upload::load_texture_2d(context, &path, settings, publisher);
        });

        // jobs is Some until Drop; send only fails if every worker died
        if let Some(sender) = &self.jobs {
            if sender.send(job).is_err() {
                crate::engine_error!(SOURCE, "asset loader workers are gone, load dropped");
            }
        }
        handle
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        // Closing the channel ends worker_loop after queued jobs drain
        self.jobs.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                crate::engine_error!(SOURCE, "asset loader worker panicked");
            }
        }
    }
}
