use crate::models::Listing;
use crate::render::{render_pin, Dialog, Pin};
use tracing::debug;

/// Keys the map reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

/// Events delivered to the map, one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    /// Pointer click on the pin with this index
    PinClick(usize),
    /// Key pressed while the pin with this index has focus
    PinKeyDown { index: usize, key: Key },
    /// Click on the dialog's close control
    CloseClick,
    /// Key pressed anywhere else in the document
    KeyDown(Key),
}

impl MapEvent {
    fn pin_index(&self) -> Option<usize> {
        match self {
            MapEvent::PinClick(index) | MapEvent::PinKeyDown { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Selection state of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapState {
    #[default]
    Idle,
    Active(usize),
}

impl MapState {
    pub fn transition(self, event: &MapEvent) -> MapState {
        match *event {
            MapEvent::PinClick(index)
            | MapEvent::PinKeyDown {
                index,
                key: Key::Enter,
            } => MapState::Active(index),
            // Escape on a focused pin bubbles up to the document
            MapEvent::CloseClick
            | MapEvent::KeyDown(Key::Escape)
            | MapEvent::PinKeyDown {
                key: Key::Escape, ..
            } => MapState::Idle,
            MapEvent::PinKeyDown { .. } | MapEvent::KeyDown(_) => self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("no pin with index {index} (map has {count})")]
    UnknownPin { index: usize, count: usize },
}

/// Owns the session's listings, their pins and the details dialog
pub struct MapController {
    listings: Vec<Listing>,
    pins: Vec<Pin>,
    dialog: Dialog,
    state: MapState,
}

impl MapController {
    pub fn new(listings: Vec<Listing>) -> Self {
        let pins = listings
            .iter()
            .enumerate()
            .map(|(index, listing)| render_pin(listing, index))
            .collect();

        Self {
            listings,
            pins,
            dialog: Dialog::default(),
            state: MapState::Idle,
        }
    }

    /// Apply one event and return the resulting state.
    ///
    /// Events naming a pin outside the set are rejected and leave the map
    /// untouched.
    pub fn dispatch(&mut self, event: MapEvent) -> Result<MapState, ControllerError> {
        if let Some(index) = event.pin_index() {
            if index >= self.listings.len() {
                return Err(ControllerError::UnknownPin {
                    index,
                    count: self.listings.len(),
                });
            }
        }

        let next = self.state.transition(&event);
        debug!("{:?}: {:?} -> {:?}", event, self.state, next);

        match (self.state, next) {
            (MapState::Idle, MapState::Idle) => {}
            (_, MapState::Idle) => {
                self.dialog.close();
                self.clear_active();
            }
            (_, MapState::Active(index)) => {
                self.clear_active();
                self.pins[index].active = true;
                self.dialog.open(&self.listings[index]);
            }
        }

        self.state = next;
        Ok(next)
    }

    fn clear_active(&mut self) {
        for pin in &mut self.pins {
            pin.active = false;
        }
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn active_listing(&self) -> Option<&Listing> {
        match self.state {
            MapState::Active(index) => self.listings.get(index),
            MapState::Idle => None,
        }
    }
}
