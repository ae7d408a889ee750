//! The layer registry (paint order) and the panel registry (update order).
//!
//! The display list maps each named layer to an ordered run of screen
//! objects; layers paint in their fixed enumeration order and objects
//! within a layer paint in insertion order. The update list is the same
//! shape keyed by panel, holding the objects that receive per-tick time
//! updates. An object sits in at most one layer and at most one panel.

use super::{ObjectId, SceneError, ScreenObjectRef};
use std::cell::RefCell;
use std::rc::Rc;

/// Paint-order buckets, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Sky, sun, anything behind the building.
    World,
    /// Building shell, wallpaper, roof sign.
    Building,
    /// Elevator shaft columns and the shaft terminus caps.
    Shafts,
    /// Floor-division bands and their ordinal labels.
    Floors,
    /// Door overlays, dimmed on non-current floors.
    Doors,
    /// Elevator cars.
    Elevators,
    /// People sprites and their gas clouds.
    People,
    /// Anything drawn over the game proper.
    Ui,
}

impl Layer {
    pub const ALL: [Layer; 8] = [
        Layer::World,
        Layer::Building,
        Layer::Shafts,
        Layer::Floors,
        Layer::Doors,
        Layer::Elevators,
        Layer::People,
        Layer::Ui,
    ];

    /// Layers painted to the static background surface.
    pub const BACKGROUND: [Layer; 4] = [Layer::World, Layer::Building, Layer::Shafts, Layer::Floors];

    /// Layers repainted to the foreground surface every qualifying tick.
    pub const FOREGROUND: [Layer; 4] = [Layer::Doors, Layer::Elevators, Layer::People, Layer::Ui];

    fn index(self) -> usize {
        Layer::ALL
            .iter()
            .position(|layer| *layer == self)
            .unwrap_or(0)
    }
}

/// Where an object is registered: which layer and at what insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub layer: Layer,
    pub index: usize,
}

/// The per-layer ordered registry driving paint order.
pub struct DisplayList {
    layers: Vec<Vec<ScreenObjectRef>>,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    pub fn new() -> Self {
        DisplayList {
            layers: Layer::ALL.iter().map(|_| Vec::new()).collect(),
        }
    }

    /// Resets every layer to an empty run, clearing the layer tag of each
    /// object that was registered.
    pub fn initialize(&mut self) {
        for layer in &mut self.layers {
            for obj in layer.iter() {
                obj.borrow_mut().clear_layer();
            }
            layer.clear();
        }
    }

    /// Appends `obj` to `layer`. Registering also sets the object's layer
    /// tag; a second registration anywhere is refused.
    pub fn add(&mut self, obj: &ScreenObjectRef, layer: Layer) -> Result<(), SceneError> {
        let id = obj.borrow().id();
        if self.find(id).is_some() {
            return Err(SceneError::AlreadyRegistered(id));
        }
        obj.borrow_mut().set_layer(layer);
        self.layers[layer.index()].push(Rc::clone(obj));
        Ok(())
    }

    /// Linear scan across all layers.
    pub fn find(&self, id: ObjectId) -> Option<Registration> {
        for layer in Layer::ALL {
            if let Some(index) = self.layers[layer.index()]
                .iter()
                .position(|obj| obj.borrow().id() == id)
            {
                return Some(Registration { layer, index });
            }
        }
        None
    }

    /// Unregisters by id. With a layer hint only that layer is searched;
    /// otherwise the registration is located first. A missing object is a
    /// quiet `None`, not an error.
    pub fn remove(&mut self, id: ObjectId, layer: Option<Layer>) -> Option<ScreenObjectRef> {
        let registration = match layer {
            Some(layer) => {
                let index = self.layers[layer.index()]
                    .iter()
                    .position(|obj| obj.borrow().id() == id)?;
                Registration { layer, index }
            }
            None => self.find(id)?,
        };
        let obj = self.layers[registration.layer.index()].remove(registration.index);
        obj.borrow_mut().clear_layer();
        Some(obj)
    }

    pub fn objects(&self, layer: Layer) -> &[ScreenObjectRef] {
        &self.layers[layer.index()]
    }

    pub fn len(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Timing buckets. Each panel has its own tick threshold and draw routine;
/// the loop processes panels in this enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Background,
    Foreground,
}

impl PanelId {
    pub const ALL: [PanelId; 2] = [PanelId::Background, PanelId::Foreground];

    fn index(self) -> usize {
        match self {
            PanelId::Background => 0,
            PanelId::Foreground => 1,
        }
    }
}

/// A time-updatable object. `update` consumes the elapsed milliseconds
/// since the panel last ticked and reports whether visible state changed.
pub trait TimeUpdate {
    fn id(&self) -> ObjectId;
    fn update(&mut self, elapsed_ms: f64) -> bool;
}

pub type UpdateRef = Rc<RefCell<dyn TimeUpdate>>;

/// The per-panel ordered registry driving time updates. Mirrors the
/// display list's registration invariant: one panel position per object.
pub struct UpdateList {
    panels: Vec<Vec<UpdateRef>>,
}

impl Default for UpdateList {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateList {
    pub fn new() -> Self {
        UpdateList {
            panels: PanelId::ALL.iter().map(|_| Vec::new()).collect(),
        }
    }

    pub fn initialize(&mut self) {
        for panel in &mut self.panels {
            panel.clear();
        }
    }

    /// Schedules `obj` under `panel`. The panel assignment happens here;
    /// an object already scheduled anywhere is refused.
    pub fn add(&mut self, obj: UpdateRef, panel: PanelId) -> Result<(), SceneError> {
        let id = obj.borrow().id();
        if self.find(id).is_some() {
            return Err(SceneError::AlreadyScheduled(id));
        }
        self.panels[panel.index()].push(obj);
        Ok(())
    }

    pub fn find(&self, id: ObjectId) -> Option<(PanelId, usize)> {
        for panel in PanelId::ALL {
            if let Some(index) = self.panels[panel.index()]
                .iter()
                .position(|obj| obj.borrow().id() == id)
            {
                return Some((panel, index));
            }
        }
        None
    }

    /// Unschedules by id; takes effect from the next tick. A missing
    /// object is a quiet `None`.
    pub fn remove(&mut self, id: ObjectId) -> Option<UpdateRef> {
        let (panel, index) = self.find(id)?;
        Some(self.panels[panel.index()].remove(index))
    }

    /// A defensive copy of a panel's run, so updaters may unschedule
    /// themselves without invalidating the walk in progress.
    pub fn snapshot(&self, panel: PanelId) -> Vec<UpdateRef> {
        self.panels[panel.index()].clone()
    }

    pub fn len(&self) -> usize {
        self.panels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ScreenObject;

    #[test]
    fn registration_round_trip() {
        let mut list = DisplayList::new();
        let obj = ScreenObject::rect(0.0, 0.0, 10.0, 10.0).unwrap();
        let id = obj.borrow().id();

        list.add(&obj, Layer::Elevators).unwrap();
        assert_eq!(obj.borrow().layer(), Some(Layer::Elevators));
        assert_eq!(
            list.find(id),
            Some(Registration {
                layer: Layer::Elevators,
                index: 0
            })
        );

        let removed = list.remove(id, None).unwrap();
        assert_eq!(list.find(id), None);
        assert_eq!(removed.borrow().layer(), None);
    }

    #[test]
    fn duplicate_registration_is_refused() {
        let mut list = DisplayList::new();
        let obj = ScreenObject::rect(0.0, 0.0, 10.0, 10.0).unwrap();
        list.add(&obj, Layer::Doors).unwrap();
        assert!(matches!(
            list.add(&obj, Layer::People),
            Err(SceneError::AlreadyRegistered(_))
        ));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn removing_a_missing_object_is_a_quiet_miss() {
        let mut list = DisplayList::new();
        let obj = ScreenObject::rect(0.0, 0.0, 10.0, 10.0).unwrap();
        let id = obj.borrow().id();
        assert!(list.remove(id, None).is_none());
        assert!(list.remove(id, Some(Layer::Ui)).is_none());
    }

    #[test]
    fn remove_with_wrong_layer_hint_misses() {
        let mut list = DisplayList::new();
        let obj = ScreenObject::rect(0.0, 0.0, 10.0, 10.0).unwrap();
        let id = obj.borrow().id();
        list.add(&obj, Layer::People).unwrap();
        assert!(list.remove(id, Some(Layer::Doors)).is_none());
        assert!(list.remove(id, Some(Layer::People)).is_some());
    }

    #[test]
    fn insertion_order_is_preserved_within_a_layer() {
        let mut list = DisplayList::new();
        let first = ScreenObject::rect(0.0, 0.0, 1.0, 1.0).unwrap();
        let second = ScreenObject::rect(0.0, 0.0, 1.0, 1.0).unwrap();
        list.add(&first, Layer::World).unwrap();
        list.add(&second, Layer::World).unwrap();

        let run = list.objects(Layer::World);
        assert_eq!(run[0].borrow().id(), first.borrow().id());
        assert_eq!(run[1].borrow().id(), second.borrow().id());
        assert_eq!(list.find(second.borrow().id()).unwrap().index, 1);
    }

    #[test]
    fn initialize_clears_layers_and_tags() {
        let mut list = DisplayList::new();
        let obj = ScreenObject::rect(0.0, 0.0, 1.0, 1.0).unwrap();
        list.add(&obj, Layer::Floors).unwrap();
        list.initialize();
        assert!(list.is_empty());
        assert_eq!(obj.borrow().layer(), None);
    }

    struct Dummy {
        id: super::super::ObjectId,
        updates: usize,
    }

    impl Dummy {
        fn new() -> Rc<RefCell<Dummy>> {
            // Borrow an id from a throwaway screen object so update-list
            // entries share the same id space.
            let id = ScreenObject::rect(0.0, 0.0, 1.0, 1.0).unwrap().borrow().id();
            Rc::new(RefCell::new(Dummy { id, updates: 0 }))
        }
    }

    impl TimeUpdate for Dummy {
        fn id(&self) -> super::super::ObjectId {
            self.id
        }

        fn update(&mut self, _elapsed_ms: f64) -> bool {
            self.updates += 1;
            true
        }
    }

    #[test]
    fn update_list_mirrors_the_registration_invariant() {
        let mut list = UpdateList::new();
        let dummy = Dummy::new();
        let id = dummy.borrow().id;

        list.add(dummy.clone(), PanelId::Foreground).unwrap();
        assert_eq!(list.find(id), Some((PanelId::Foreground, 0)));
        assert!(matches!(
            list.add(dummy.clone(), PanelId::Background),
            Err(SceneError::AlreadyScheduled(_))
        ));

        assert!(list.remove(id).is_some());
        assert_eq!(list.find(id), None);
        assert!(list.remove(id).is_none());
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let mut list = UpdateList::new();
        let dummy = Dummy::new();
        let id = dummy.borrow().id;
        list.add(dummy, PanelId::Foreground).unwrap();

        let snapshot = list.snapshot(PanelId::Foreground);
        list.remove(id);
        assert_eq!(snapshot.len(), 1);
        assert!(list.is_empty());
    }
}
