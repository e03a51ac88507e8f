use hecs::World;
use log::{info, warn};

use crate::{
    assets::{LoadFailed, Loaded, Loading},
    components::Visible,
};

/// Asset system
/// Checks every in-flight load without waiting. Finished loads become [`Loaded`] and make their
/// entity [`Visible`]; failed loads become [`LoadFailed`] and leave the entity hidden.
pub fn asset_system(world: &mut World) {
    let mut settled = Vec::new();
    for (entity, loading) in world.query_mut::<&mut Loading>() {
        if let Some(result) = loading.pending.poll_ready() {
            settled.push((entity, result));
        }
    }

    for (entity, result) in settled {
        // The entity is known to exist; it was just returned by the query above.
        let _ = world.remove_one::<Loading>(entity);
        match result {
            Ok(asset) => {
                info!("[XRLOOP_ASSETS] Loaded {}", asset.path);
                let _ = world.insert(entity, (Loaded(asset), Visible {}));
            }
            Err(e) => {
                warn!("[XRLOOP_ASSETS] Unable to load asset for {entity:?}: {e}");
                let _ = world.insert_one(entity, LoadFailed(e.to_string()));
            }
        }
    }
}
