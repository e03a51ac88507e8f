use std::sync::Arc;

use crate::platform::Pending;

/// What an asset is going to be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// An image
    Texture,
    /// An audio buffer
    Audio,
    /// A video stream
    Video,
}

/// A loaded asset. Decoding is the rendering or audio library's problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// What the asset is for
    pub kind: AssetKind,
    /// Where it was loaded from
    pub path: String,
    /// The raw bytes
    pub data: Arc<[u8]>,
}

/// Loads assets in the background.
///
/// Loading is kicked off once during setup. Completion only ever flips readiness flags that later
/// frames look at; nothing waits for it.
pub trait AssetLoader {
    /// Start loading the asset at `path`
    fn load(&self, kind: AssetKind, path: &str) -> Pending<Asset>;
}

/// Component for an entity whose asset is still loading.
///
/// Removed by [`crate::systems::asset_system`] once the load settles, and replaced by
/// [`Loaded`] plus [`crate::components::Visible`] if it succeeded.
#[derive(Debug)]
pub struct Loading {
    /// The load in progress
    pub pending: Pending<Asset>,
}

impl Loading {
    /// Start loading `path` with `loader`
    pub fn start(loader: &dyn AssetLoader, kind: AssetKind, path: &str) -> Self {
        Self {
            pending: loader.load(kind, path),
        }
    }
}

/// Component for an entity whose asset has finished loading
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded(pub Asset);

/// Component for an entity whose asset could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailed(pub String);
