//! Asynchronous texture loading
//!
//! Each request runs fetch and decode on its own worker thread. Results come
//! back over a channel and are only handed out by [`AsyncTextureLoader::poll`],
//! which the owner calls between frames. A result whose cancellation token
//! fired while the worker was running is dropped there.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::assets::{AssetError, ResourceProvider, TextureData, TextureKind};
use crate::foundation::cancel::CancellationToken;

/// A finished texture request
#[derive(Debug)]
pub struct TextureLoad {
    /// Surface the texture was requested for
    pub kind: TextureKind,
    /// Resource path that was requested
    pub path: String,
    /// Decoded texture or the reason it is unavailable
    pub result: Result<Arc<TextureData>, AssetError>,
}

struct Completion {
    load: TextureLoad,
    token: CancellationToken,
}

/// Loads textures on worker threads
pub struct AsyncTextureLoader {
    provider: Arc<dyn ResourceProvider>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    pending: usize,
}

impl AsyncTextureLoader {
    /// Loader fetching through `provider`
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            provider,
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Start loading `path` for `kind`
    ///
    /// The result is discarded if `token` is cancelled before it is polled.
    pub fn request(
        &mut self,
        kind: TextureKind,
        path: impl Into<String>,
        token: &CancellationToken,
    ) -> Result<(), AssetError> {
        if token.is_cancelled() {
            return Err(AssetError::Cancelled);
        }

        let path = path.into();
        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();
        let token = token.clone();

        log::debug!("Requesting {:?} texture {}", kind, path);

        thread::Builder::new()
            .name(format!("texture-{}", path))
            .spawn(move || {
                let result = provider
                    .fetch(&path)
                    .and_then(|bytes| TextureData::from_bytes(&bytes))
                    .map(Arc::new);
                // The loader may be gone by now; nobody is left to care
                let _ = sender.send(Completion {
                    load: TextureLoad { kind, path, result },
                    token,
                });
            })?;

        self.pending += 1;
        Ok(())
    }

    /// Requests not yet handed out or discarded
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Collect every completion that has arrived, without blocking
    pub fn poll(&mut self) -> Vec<TextureLoad> {
        let mut loads = Vec::new();
        while let Ok(completion) = self.receiver.try_recv() {
            self.accept(completion, &mut loads);
        }
        loads
    }

    /// Wait up to `timeout` for the first completion, then drain the rest
    pub fn poll_timeout(&mut self, timeout: Duration) -> Vec<TextureLoad> {
        if self.pending == 0 {
            return Vec::new();
        }
        let mut loads = Vec::new();
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => self.accept(completion, &mut loads),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return loads,
        }
        loads.extend(self.poll());
        loads
    }

    fn accept(&mut self, completion: Completion, loads: &mut Vec<TextureLoad>) {
        self.pending = self.pending.saturating_sub(1);
        if completion.token.is_cancelled() {
            log::debug!(
                "Discarding {:?} texture {} completed after teardown",
                completion.load.kind,
                completion.load.path
            );
            return;
        }
        loads.push(completion.load);
    }
}

impl std::fmt::Debug for AsyncTextureLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncTextureLoader")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
