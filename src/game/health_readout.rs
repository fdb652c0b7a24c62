//! Health readout.
//!
//! Listens to `damage_applied` and `healing_applied` and keeps the latest
//! health as a value and as two-digit display text.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{EventBus, Subscription};

/// Health as HUD text, at least two digits, no decimals. Halves round away
/// from zero.
pub fn format_health(health: f32) -> String {
    format!("{:02}", health.round() as i64)
}

#[derive(Debug)]
struct Readout {
    value: f32,
    text: String,
}

impl Readout {
    fn set(&mut self, value: f32) {
        self.value = value;
        self.text = format_health(value);
    }
}

#[derive(Debug)]
pub struct HealthReadout {
    readout: Rc<RefCell<Readout>>,
    bus: Rc<EventBus>,
    damage_token: Option<Subscription>,
    healing_token: Option<Subscription>,
}

impl HealthReadout {
    /// Subscribe to `bus`, showing `initial` until the first event.
    pub fn new(bus: Rc<EventBus>, initial: f32) -> Self {
        let readout = Rc::new(RefCell::new(Readout {
            value: initial,
            text: format_health(initial),
        }));

        let on_damage = Rc::clone(&readout);
        let damage_token = bus
            .damage_applied
            .subscribe(move |health| on_damage.borrow_mut().set(health));
        let on_heal = Rc::clone(&readout);
        let healing_token = bus
            .healing_applied
            .subscribe(move |health| on_heal.borrow_mut().set(health));

        Self {
            readout,
            bus,
            damage_token: Some(damage_token),
            healing_token: Some(healing_token),
        }
    }

    pub fn value(&self) -> f32 {
        self.readout.borrow().value
    }

    pub fn text(&self) -> String {
        self.readout.borrow().text.clone()
    }
}

impl Drop for HealthReadout {
    fn drop(&mut self) {
        if let Some(token) = self.damage_token.take() {
            self.bus.damage_applied.unsubscribe(token);
        }
        if let Some(token) = self.healing_token.take() {
            self.bus.healing_applied.unsubscribe(token);
        }
    }
}
