use std::{cell::RefCell, collections::BTreeSet, rc::Rc, sync::Arc};

use log::debug;

use crate::{
    assets::{Asset, AssetKind, AssetLoader},
    platform::{pending, Pending, Resolver},
    PlatformError,
};

#[derive(Debug, Default)]
struct AssetsState {
    manual: bool,
    failing: BTreeSet<String>,
    pending: Vec<(AssetKind, String, Resolver<Asset>)>,
    requested: Vec<String>,
}

/// An [`AssetLoader`] whose assets are just their own path, as bytes.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAssets {
    state: Rc<RefCell<AssetsState>>,
}

impl SimulatedAssets {
    /// A loader that finishes every load straight away
    pub fn new() -> Self {
        Default::default()
    }

    /// A loader that only finishes loads when [`SimulatedAssets::resolve_all`] is called
    pub fn manual() -> Self {
        let assets = Self::default();
        assets.state.borrow_mut().manual = true;
        assets
    }

    /// Make loads of `path` fail
    pub fn fail(self, path: impl Into<String>) -> Self {
        self.state.borrow_mut().failing.insert(path.into());
        self
    }

    /// Finish every outstanding load. Returns how many had someone waiting for them.
    pub fn resolve_all(&self) -> usize {
        let mut state = self.state.borrow_mut();
        let loads = std::mem::take(&mut state.pending);
        let mut delivered = 0;
        for (kind, path, resolver) in loads {
            debug!("[XRLOOP_SIMULATOR] Finishing {kind:?} load of {path}");
            let sent = match settle(&state.failing, kind, &path) {
                Ok(asset) => resolver.resolve(asset),
                Err(e) => resolver.reject(e),
            };
            if sent {
                delivered += 1;
            }
        }
        delivered
    }

    /// Every path that has been asked for, in order
    pub fn requested(&self) -> Vec<String> {
        self.state.borrow().requested.clone()
    }

    /// Loads that haven't finished yet
    pub fn pending_loads(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

impl AssetLoader for SimulatedAssets {
    fn load(&self, kind: AssetKind, path: &str) -> Pending<Asset> {
        let mut state = self.state.borrow_mut();
        state.requested.push(path.to_string());
        if state.manual {
            let (resolver, pending) = pending();
            state.pending.push((kind, path.to_string(), resolver));
            return pending;
        }

        match settle(&state.failing, kind, path) {
            Ok(asset) => Pending::ready(asset),
            Err(e) => Pending::failed(e),
        }
    }
}

fn settle(failing: &BTreeSet<String>, kind: AssetKind, path: &str) -> Result<Asset, PlatformError> {
    if failing.contains(path) {
        return Err(PlatformError::Other(format!("Unable to load {path}")));
    }
    Ok(Asset {
        kind,
        path: path.to_string(),
        data: Arc::from(path.as_bytes()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_manual_loads() {
        let assets = SimulatedAssets::manual().fail("missing.jpg");
        let mut photo = assets.load(AssetKind::Texture, "photo.jpg");
        let mut missing = assets.load(AssetKind::Texture, "missing.jpg");
        assert_eq!(assets.pending_loads(), 2);
        assert_eq!(photo.poll_ready(), None);

        assert_eq!(assets.resolve_all(), 2);
        assert_eq!(photo.poll_ready().unwrap().unwrap().data.as_ref(), b"photo.jpg");
        assert!(missing.poll_ready().unwrap().is_err());
        assert_eq!(assets.requested(), vec!["photo.jpg", "missing.jpg"]);
    }
}
