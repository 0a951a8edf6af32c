//! Shared handle to the live map instance.
//!
//! The map only exists in the browser, after the engine has loaded. Every
//! layer and control receives the same [`MapSignal`] as a prop and renders
//! nothing while it holds `None`.

use leptos::prelude::*;

/// Cheap clone of the page's map.
#[derive(Clone)]
pub struct MapHandle {
    #[cfg(feature = "hydrate")]
    map: std::rc::Rc<std::cell::RefCell<crate::util::leaflet::LeafletMap>>,
}

/// The map once it is ready. Local storage: engine handles are not `Send`.
pub type MapSignal = RwSignal<Option<MapHandle>, LocalStorage>;

/// A signal with no map yet.
pub fn map_signal() -> MapSignal {
    RwSignal::new_local(None)
}

#[cfg(feature = "hydrate")]
impl MapHandle {
    pub fn new(map: crate::util::leaflet::LeafletMap) -> Self {
        Self { map: std::rc::Rc::new(std::cell::RefCell::new(map)) }
    }

    pub fn borrow(&self) -> std::cell::Ref<'_, crate::util::leaflet::LeafletMap> {
        self.map.borrow()
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, crate::util::leaflet::LeafletMap> {
        self.map.borrow_mut()
    }
}
