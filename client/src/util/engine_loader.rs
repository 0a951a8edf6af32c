//! Page-wide lazy loading of Leaflet and its plugins.
//!
//! ARCHITECTURE
//! ============
//! The first map to mount injects the engine's stylesheets and scripts, in
//! order, into `<head>`. Every other map waits on that same load through a
//! thread-local `mapcore::bridge::LazyModule`, and later mounts get the
//! cached namespace immediately. Maps that unmount before the load finishes
//! [`abandon`] their request and are never called back.

#[cfg(test)]
#[path = "engine_loader_test.rs"]
mod engine_loader_test;

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::collections::HashMap;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use mapcore::bridge::{ConsumerId, LazyModule, Request, ensure_browser};
#[cfg(feature = "hydrate")]
use mapcore::error::BridgeError;
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

/// How an asset is attached to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Script,
}

/// One file of the engine or a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineAsset {
    pub module: &'static str,
    pub kind: AssetKind,
    pub url: &'static str,
}

/// Everything the map needs, in load order. Plugins extend the `L`
/// namespace, so Leaflet itself comes first.
pub const ENGINE_ASSETS: &[EngineAsset] = &[
    EngineAsset {
        module: "leaflet",
        kind: AssetKind::Stylesheet,
        url: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css",
    },
    EngineAsset {
        module: "leaflet",
        kind: AssetKind::Script,
        url: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
    },
    EngineAsset {
        module: "leaflet-draw",
        kind: AssetKind::Stylesheet,
        url: "https://unpkg.com/leaflet-draw@1.0.4/dist/leaflet.draw.css",
    },
    EngineAsset {
        module: "leaflet-draw",
        kind: AssetKind::Script,
        url: "https://unpkg.com/leaflet-draw@1.0.4/dist/leaflet.draw.js",
    },
    EngineAsset {
        module: "leaflet.fullscreen",
        kind: AssetKind::Stylesheet,
        url: "https://unpkg.com/leaflet.fullscreen@3.0.2/Control.FullScreen.css",
    },
    EngineAsset {
        module: "leaflet.fullscreen",
        kind: AssetKind::Script,
        url: "https://unpkg.com/leaflet.fullscreen@3.0.2/Control.FullScreen.js",
    },
    EngineAsset {
        module: "leaflet.markercluster",
        kind: AssetKind::Stylesheet,
        url: "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css",
    },
    EngineAsset {
        module: "leaflet.markercluster",
        kind: AssetKind::Stylesheet,
        url: "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css",
    },
    EngineAsset {
        module: "leaflet.markercluster",
        kind: AssetKind::Script,
        url: "https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js",
    },
];

/// DOM id of the injected element, used to avoid injecting twice. Built
/// from the file name, since a plugin may ship several stylesheets.
pub fn element_id(asset: &EngineAsset) -> String {
    let file = asset.url.rsplit('/').next().unwrap_or(asset.url);
    let file: String = file
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("mapcore-{file}")
}

/// The loaded engine.
#[cfg(feature = "hydrate")]
pub struct Engine {
    /// The global `L` namespace with every plugin attached.
    pub leaflet: JsValue,
}

#[cfg(feature = "hydrate")]
type Waiter = Box<dyn FnOnce(Result<Rc<Engine>, BridgeError>)>;

#[cfg(feature = "hydrate")]
thread_local! {
    static ENGINE: RefCell<LazyModule<Engine>> = RefCell::new(LazyModule::new());
    static WAITERS: RefCell<HashMap<ConsumerId, Waiter>> = RefCell::new(HashMap::new());
}

/// Ask for the engine. `on_ready` runs once, immediately when the engine is
/// cached or when the shared load finishes.
///
/// Returns the consumer to [`abandon`] on unmount while the load is pending.
#[cfg(feature = "hydrate")]
pub fn request_engine(on_ready: impl FnOnce(Result<Rc<Engine>, BridgeError>) + 'static) -> Option<ConsumerId> {
    if let Err(err) = ensure_browser() {
        on_ready(Err(err));
        return None;
    }
    let request = ENGINE.with(|engine| engine.borrow_mut().request());
    let consumer = match request {
        Request::Ready(engine) => {
            on_ready(Ok(engine));
            return None;
        }
        Request::Wait(consumer) => consumer,
        Request::Start(consumer) => {
            log::info!("engine loader: loading {} assets", ENGINE_ASSETS.len());
            leptos::task::spawn_local(async {
                finish(load_assets().await);
            });
            consumer
        }
    };
    WAITERS.with(|waiters| {
        waiters.borrow_mut().insert(consumer, Box::new(on_ready));
    });
    Some(consumer)
}

/// Drop interest in a pending load.
#[cfg(feature = "hydrate")]
pub fn abandon(consumer: ConsumerId) {
    ENGINE.with(|engine| engine.borrow_mut().abandon(consumer));
    WAITERS.with(|waiters| {
        waiters.borrow_mut().remove(&consumer);
    });
}

#[cfg(feature = "hydrate")]
fn finish(result: Result<Engine, BridgeError>) {
    let Some(resolution) = ENGINE.with(|engine| engine.borrow_mut().resolve(result)) else {
        return;
    };
    let waiting: Vec<Waiter> = WAITERS.with(|waiters| {
        let mut waiters = waiters.borrow_mut();
        resolution.consumers.iter().filter_map(|consumer| waiters.remove(consumer)).collect()
    });
    for waiter in waiting {
        waiter(resolution.result.clone());
    }
}

#[cfg(feature = "hydrate")]
async fn load_assets() -> Result<Engine, BridgeError> {
    for asset in ENGINE_ASSETS {
        inject(asset)
            .await
            .map_err(|message| BridgeError::LoadFailed { module: asset.module.to_owned(), message })?;
    }
    let leaflet = crate::util::leaflet::global().map_err(|err| BridgeError::LoadFailed {
        module: "leaflet".to_owned(),
        message: crate::util::leaflet::describe(&err),
    })?;
    Ok(Engine { leaflet })
}

#[cfg(feature = "hydrate")]
async fn inject(asset: &EngineAsset) -> Result<(), String> {
    let describe = |err: JsValue| crate::util::leaflet::describe(&err);
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "no document".to_owned())?;
    let id = element_id(asset);
    if document.get_element_by_id(&id).is_some() {
        return Ok(());
    }
    let head = document.head().ok_or_else(|| "no <head>".to_owned())?;

    let element: web_sys::HtmlElement = match asset.kind {
        AssetKind::Script => {
            let script: web_sys::HtmlScriptElement = document
                .create_element("script")
                .map_err(describe)?
                .dyn_into()
                .map_err(|_| "not a script element".to_owned())?;
            script.set_src(asset.url);
            script.set_async(false);
            script.into()
        }
        AssetKind::Stylesheet => {
            let link: web_sys::HtmlLinkElement = document
                .create_element("link")
                .map_err(describe)?
                .dyn_into()
                .map_err(|_| "not a link element".to_owned())?;
            link.set_rel("stylesheet");
            link.set_href(asset.url);
            link.into()
        }
    };
    element.set_id(&id);

    let (tx, rx) = futures::channel::oneshot::channel::<Result<(), String>>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let settle = move |outcome: Result<(), String>| {
        let Some(tx) = tx.borrow_mut().take() else {
            return;
        };
        if tx.send(outcome).is_err() {
            log::debug!("engine loader: load finished after its waiter went away");
        }
    };
    let on_load = {
        let settle = settle.clone();
        Closure::<dyn FnMut()>::new(move || settle(Ok(())))
    };
    let url = asset.url;
    let on_error = Closure::<dyn FnMut()>::new(move || settle(Err(format!("could not load {url}"))));
    element.set_onload(Some(on_load.as_ref().unchecked_ref()));
    element.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    head.append_child(&element).map_err(describe)?;

    let outcome = rx.await.map_err(|_| format!("load of {url} was cancelled"))?;
    element.set_onload(None);
    element.set_onerror(None);
    if outcome.is_err() {
        // Lets the next request inject it again.
        element.remove();
    }
    outcome
}
