//! Model import and background asset delivery

pub mod gltf;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::error::AssetError;
use crate::math::AABB;
use crate::scene::Transform;

pub use self::gltf::load_model;

/// One named mesh of an imported model
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    /// Placement relative to the model root
    pub transform: Transform,
    /// Bounds in the mesh's own space
    pub bounds: AABB,
    pub color: [f32; 3],
}

/// Geometry summary of an imported model
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
}

impl ModelData {
    /// Single box standing in for a model that could not be loaded
    pub fn placeholder(name: &str, bounds: AABB) -> Self {
        Self {
            meshes: vec![MeshData {
                name: name.to_string(),
                transform: Transform::IDENTITY,
                bounds,
                color: [1.0, 0.0, 1.0], // Magenta marks missing geometry
            }],
        }
    }
}

/// Result of one load request
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(ModelData),
    Failed(AssetError),
}

/// A finished load, tagged with the key the requester chose
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEvent {
    pub key: String,
    pub path: PathBuf,
    pub outcome: LoadOutcome,
}

/// What a demo asks to have loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub key: String,
    pub file: PathBuf,
}

impl AssetRequest {
    pub fn new(key: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            file: file.into(),
        }
    }
}

/// Loads models on background threads and hands results back over a channel.
///
/// `poll` never blocks, so it can be drained from inside the frame callback.
pub struct AssetLoader {
    root: PathBuf,
    sender: Sender<AssetEvent>,
    receiver: Receiver<AssetEvent>,
    pending: usize,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            root: root.into(),
            sender,
            receiver,
            pending: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of requests not yet delivered by `poll`
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Start loading `request.file` (relative to the asset root)
    pub fn request(&mut self, request: AssetRequest) {
        let path = self.root.join(&request.file);
        let sender = self.sender.clone();
        self.pending += 1;

        log::info!("Loading {} from {:?}", request.key, path);
        let spawned = thread::Builder::new()
            .name(format!("load-{}", request.key))
            .spawn({
                let path = path.clone();
                let key = request.key.clone();
                move || {
                    let outcome = load_outcome(&path);
                    // Receiver gone means the viewer shut down; nothing to report to
                    let _ = sender.send(AssetEvent { key, path, outcome });
                }
            });

        if let Err(e) = spawned {
            log::error!("Could not spawn loader thread for {:?}: {}", path, e);
            let _ = self.sender.send(AssetEvent {
                key: request.key,
                path: path.clone(),
                outcome: LoadOutcome::Failed(AssetError::Disconnected(path)),
            });
        }
    }

    /// Drain every load that has finished since the last poll
    pub fn poll(&mut self) -> Vec<AssetEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.pending = self.pending.saturating_sub(1);
                    events.push(event);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

/// Load synchronously and fold the error into a `LoadOutcome`
pub fn load_outcome(path: &Path) -> LoadOutcome {
    if !path.exists() {
        return LoadOutcome::Failed(AssetError::NotFound(path.to_path_buf()));
    }

    match load_model(path) {
        Ok(model) if model.meshes.is_empty() => LoadOutcome::Failed(AssetError::Empty {
            path: path.to_path_buf(),
        }),
        Ok(model) => LoadOutcome::Loaded(model),
        Err(e) => LoadOutcome::Failed(AssetError::Import {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::time::{Duration, Instant};

    fn wait_for_events(loader: &mut AssetLoader, count: usize) -> Vec<AssetEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.len() < count && Instant::now() < deadline {
            events.extend(loader.poll());
            thread::sleep(Duration::from_millis(5));
        }
        events
    }

    #[test]
    fn missing_asset_is_reported_as_failed() {
        let mut loader = AssetLoader::new("no/such/dir");
        loader.request(AssetRequest::new("cap", "pen_head.gltf"));
        assert_eq!(loader.pending(), 1);

        let events = wait_for_events(&mut loader, 1);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key, "cap");
        assert_eq!(
            events[0].outcome,
            LoadOutcome::Failed(AssetError::NotFound(PathBuf::from("no/such/dir/pen_head.gltf")))
        );
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn poll_without_requests_is_empty() {
        let mut loader = AssetLoader::new(".");
        assert!(loader.poll().is_empty());
    }

    #[test]
    fn placeholder_is_single_named_mesh() {
        let model = ModelData::placeholder("Object006", AABB::new(Vec3::ZERO, Vec3::ONE));
        assert_eq!(model.meshes.len(), 1);
        assert_eq!(model.meshes[0].name, "Object006");
    }
}
