//! Health System
//!
//! Current health, death, and delayed stepped regeneration.
//!
//! Damage normally arrives through the [`EventBus`]: once
//! [`activate`](HealthSystem::activate)d, the system listens on `damage_taken`
//! so damage sources never need a handle to it. Each applied hit broadcasts
//! `damage_applied(current)`; each regeneration step broadcasts
//! `healing_applied(current)`.
//!
//! # Regeneration
//!
//! Every hit that leaves the character alive cancels any running regen and
//! starts a new one: wait `time_before_regen` seconds, then add
//! `health_amount_increment` every `health_time_increment` seconds until
//! health is full. Death cancels regen and nothing restarts it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info, warn};

use crate::config::HealthConfig;
use crate::events::{EventBus, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Alive,
    /// Terminal
    Dead,
}

/// Phase of an in-flight regeneration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegenTransition {
    /// Waiting out the post-damage delay
    Delay { remaining: f32 },
    /// Healing in steps; next step due in `until_next` seconds
    Stepping { until_next: f32 },
}

#[derive(Debug)]
struct HealthCore {
    config: HealthConfig,
    current: f32,
    state: HealthState,
    regen: Option<RegenTransition>,
}

impl HealthCore {
    fn new(config: &HealthConfig) -> Self {
        Self {
            config: *config,
            current: config.max_health,
            state: HealthState::Alive,
            regen: None,
        }
    }

    /// Returns the health to broadcast, or `None` if the hit was ignored.
    fn apply_damage(&mut self, amount: f32) -> Option<f32> {
        if !amount.is_finite() {
            warn!("health: ignoring non-finite damage {amount}");
            return None;
        }
        if self.state == HealthState::Dead {
            debug!("health: damage {amount} ignored, already dead");
            return None;
        }

        self.current = (self.current - amount).clamp(0.0, self.config.max_health);

        if self.current <= 0.0 {
            self.state = HealthState::Dead;
            self.regen = None;
            info!("health: died (took {amount})");
        } else {
            if self.regen.is_some() {
                debug!("health: regen restarted");
            }
            self.regen = Some(RegenTransition::Delay {
                remaining: self.config.time_before_regen,
            });
        }
        Some(self.current)
    }

    /// Advance regen by `delta_time`; returns every healing value produced.
    fn tick(&mut self, delta_time: f32) -> Vec<f32> {
        let mut healed = Vec::new();
        let Some(mut regen) = self.regen else {
            return healed;
        };
        if self.config.health_amount_increment <= 0.0 {
            warn!("health: regen disabled, non-positive increment");
            self.regen = None;
            return healed;
        }

        let mut budget = delta_time.max(0.0);
        loop {
            match regen {
                RegenTransition::Delay { remaining } => {
                    if budget < remaining {
                        regen = RegenTransition::Delay {
                            remaining: remaining - budget,
                        };
                        break;
                    }
                    budget -= remaining;
                    regen = RegenTransition::Stepping { until_next: 0.0 };
                }
                RegenTransition::Stepping { until_next } => {
                    if budget < until_next {
                        regen = RegenTransition::Stepping {
                            until_next: until_next - budget,
                        };
                        break;
                    }
                    budget -= until_next;
                    if self.current >= self.config.max_health {
                        debug!("health: regen finished at {}", self.current);
                        self.regen = None;
                        return healed;
                    }
                    self.current = (self.current + self.config.health_amount_increment)
                        .min(self.config.max_health);
                    healed.push(self.current);
                    regen = RegenTransition::Stepping {
                        until_next: self.config.health_time_increment,
                    };
                }
            }
        }
        self.regen = Some(regen);
        healed
    }
}

/// Apply a hit and broadcast the result after the core borrow is released.
fn apply_and_publish(core: &RefCell<HealthCore>, bus: &EventBus, amount: f32) {
    let applied = core.borrow_mut().apply_damage(amount);
    if let Some(current) = applied {
        bus.damage_applied.publish(current);
    }
}

/// Owns the character's health and regeneration.
#[derive(Debug)]
pub struct HealthSystem {
    core: Rc<RefCell<HealthCore>>,
    bus: Rc<EventBus>,
    subscription: Option<Subscription>,
}

impl HealthSystem {
    /// Full health, not yet listening on the bus.
    pub fn new(config: &HealthConfig, bus: Rc<EventBus>) -> Self {
        Self {
            core: Rc::new(RefCell::new(HealthCore::new(config))),
            bus,
            subscription: None,
        }
    }

    /// Start listening on `damage_taken`. Calling twice is a no-op.
    pub fn activate(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let core: Weak<RefCell<HealthCore>> = Rc::downgrade(&self.core);
        let bus: Weak<EventBus> = Rc::downgrade(&self.bus);
        self.subscription = Some(self.bus.damage_taken.subscribe(move |amount| {
            if let (Some(core), Some(bus)) = (core.upgrade(), bus.upgrade()) {
                apply_and_publish(&core, &bus, amount);
            }
        }));
    }

    /// Stop listening on `damage_taken`.
    pub fn deactivate(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.bus.damage_taken.unsubscribe(subscription);
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// Apply damage directly, bypassing the bus subscription.
    pub fn apply_damage(&self, amount: f32) {
        apply_and_publish(&self.core, &self.bus, amount);
    }

    /// Advance regeneration by real elapsed time.
    pub fn tick(&self, delta_time: f32) {
        let healed = self.core.borrow_mut().tick(delta_time);
        for current in healed {
            self.bus.healing_applied.publish(current);
        }
    }

    pub fn current(&self) -> f32 {
        self.core.borrow().current
    }

    pub fn max(&self) -> f32 {
        self.core.borrow().config.max_health
    }

    pub fn state(&self) -> HealthState {
        self.core.borrow().state
    }

    pub fn is_alive(&self) -> bool {
        self.state() == HealthState::Alive
    }

    pub fn regen(&self) -> Option<RegenTransition> {
        self.core.borrow().regen
    }

    pub fn is_regenerating(&self) -> bool {
        self.regen().is_some()
    }
}

impl Drop for HealthSystem {
    fn drop(&mut self) {
        self.deactivate();
    }
}
