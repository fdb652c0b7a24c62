//! Damage trigger volume.
//!
//! An axis-aligned box that publishes `damage_taken` once each time the
//! tracked position enters it. Leaving the box re-arms it.

use std::rc::Rc;

use glam::Vec3;
use log::debug;

use crate::events::EventBus;

/// Damage dealt per entry unless overridden
pub const DEFAULT_TRIGGER_DAMAGE: f32 = 15.0;

#[derive(Debug)]
pub struct DamageTrigger {
    min: Vec3,
    max: Vec3,
    damage: f32,
    occupied: bool,
    bus: Rc<EventBus>,
}

impl DamageTrigger {
    pub fn new(min: Vec3, max: Vec3, bus: Rc<EventBus>) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            damage: DEFAULT_TRIGGER_DAMAGE,
            occupied: false,
            bus,
        }
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Track `position` for this tick. Returns `true` if damage was published.
    pub fn update(&mut self, position: Vec3) -> bool {
        let inside = self.contains(position);
        let entered = inside && !self.occupied;
        self.occupied = inside;

        if entered {
            debug!("damage trigger: entered at {position:?}, dealing {}", self.damage);
            self.bus.damage_taken.publish(self.damage);
        }
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn trigger() -> (DamageTrigger, Rc<RefCell<Vec<f32>>>, Rc<EventBus>) {
        let bus = Rc::new(EventBus::new());
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        let _token = bus.damage_taken.subscribe(move |amount| sink.borrow_mut().push(amount));
        let trigger = DamageTrigger::new(Vec3::ZERO, Vec3::splat(2.0), Rc::clone(&bus));
        (trigger, hits, bus)
    }

    #[test]
    fn test_fires_once_per_entry() {
        let (mut trigger, hits, _bus) = trigger();

        assert!(!trigger.update(Vec3::splat(-1.0)));
        assert!(trigger.update(Vec3::splat(1.0)));
        assert!(!trigger.update(Vec3::splat(1.5)));
        assert_eq!(*hits.borrow(), vec![15.0]);

        trigger.update(Vec3::splat(5.0));
        assert!(trigger.update(Vec3::splat(1.0)));
        assert_eq!(hits.borrow().len(), 2);
    }

    #[test]
    fn test_custom_damage() {
        let (trigger, hits, _bus) = trigger();
        let mut trigger = trigger.with_damage(40.0);
        trigger.update(Vec3::ONE);
        assert_eq!(*hits.borrow(), vec![40.0]);
    }
}
