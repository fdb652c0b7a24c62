//! Game Module
//!
//! Game-level collaborators that sit on top of the controller: things that
//! publish damage into the event bus and things that display health.

pub mod damage_trigger;
pub mod health_readout;

pub use damage_trigger::{DEFAULT_TRIGGER_DAMAGE, DamageTrigger};
pub use health_readout::{HealthReadout, format_health};
