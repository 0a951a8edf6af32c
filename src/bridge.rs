//! Lazy, de-duplicated loading of the mapping engine.
//!
//! DESIGN
//! ======
//! [`LazyModule`] is the bookkeeping half of a page-wide singleton: the first
//! consumer to [`LazyModule::request`] is told to start the load, later ones
//! wait on the same load, and once resolved every consumer gets the same
//! cached handle. Consumers that unmount mid-flight call
//! [`LazyModule::abandon`] and are left out of the resolution, so nothing is
//! delivered into a torn-down scope. A failed load is reported to the waiting
//! consumers and the next request starts a fresh attempt.
//!
//! The async half (script injection, promises) lives in the browser client;
//! this type never blocks and never touches the DOM.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use std::rc::Rc;

use crate::error::BridgeError;

/// Identifies one consumer waiting on a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(u64);

/// Where a module is in its load lifecycle.
#[derive(Debug)]
pub enum LoadState<T> {
    NotLoaded,
    Loading,
    Loaded(Rc<T>),
    Failed(BridgeError),
}

/// What a consumer should do after [`LazyModule::request`].
#[derive(Debug)]
pub enum Request<T> {
    /// No load is in flight: the consumer starts it.
    Start(ConsumerId),
    /// A load is in flight: wait for [`LazyModule::resolve`].
    Wait(ConsumerId),
    /// Already loaded.
    Ready(Rc<T>),
}

/// Outcome of a finished load, with the consumers still interested in it.
#[derive(Debug)]
pub struct Resolution<T> {
    pub result: Result<Rc<T>, BridgeError>,
    pub consumers: Vec<ConsumerId>,
}

/// Page-lifetime cache for an asynchronously loaded module.
#[derive(Debug)]
pub struct LazyModule<T> {
    state: LoadState<T>,
    waiting: Vec<ConsumerId>,
    next_consumer: u64,
}

impl<T> Default for LazyModule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LazyModule<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { state: LoadState::NotLoaded, waiting: Vec::new(), next_consumer: 0 }
    }

    #[must_use]
    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// The cached handle, once loaded.
    #[must_use]
    pub fn get(&self) -> Option<Rc<T>> {
        match &self.state {
            LoadState::Loaded(module) => Some(Rc::clone(module)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Register interest in the module.
    pub fn request(&mut self) -> Request<T> {
        if let LoadState::Loaded(module) = &self.state {
            return Request::Ready(Rc::clone(module));
        }
        self.next_consumer += 1;
        let consumer = ConsumerId(self.next_consumer);
        self.waiting.push(consumer);
        if self.is_loading() {
            return Request::Wait(consumer);
        }
        log::debug!("bridge: starting load");
        self.state = LoadState::Loading;
        Request::Start(consumer)
    }

    /// A consumer went away before the load finished.
    ///
    /// The load itself keeps going so later consumers can reuse it.
    pub fn abandon(&mut self, consumer: ConsumerId) {
        self.waiting.retain(|waiting| *waiting != consumer);
    }

    /// Record the outcome of the in-flight load.
    ///
    /// Returns `None` when no load was in flight (a duplicate or late
    /// resolution), leaving the cached state untouched.
    pub fn resolve(&mut self, result: Result<T, BridgeError>) -> Option<Resolution<T>> {
        if !self.is_loading() {
            log::warn!("bridge: ignoring resolution with no load in flight");
            return None;
        }
        let consumers = std::mem::take(&mut self.waiting);
        let result = match result {
            Ok(module) => {
                let module = Rc::new(module);
                self.state = LoadState::Loaded(Rc::clone(&module));
                log::debug!("bridge: loaded for {} consumers", consumers.len());
                Ok(module)
            }
            Err(err) => {
                log::error!("bridge: {err}");
                self.state = LoadState::Failed(err.clone());
                Err(err)
            }
        };
        Some(Resolution { result, consumers })
    }
}

/// Whether engine modules can be loaded in this environment.
///
/// # Errors
///
/// [`BridgeError::NotInBrowser`] during server rendering and native tests.
pub fn ensure_browser() -> Result<(), BridgeError> {
    #[cfg(target_arch = "wasm32")]
    {
        if web_sys::window().is_some() {
            return Ok(());
        }
    }
    Err(BridgeError::NotInBrowser)
}
