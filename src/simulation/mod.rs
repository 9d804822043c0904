//! House progression rules and the daily pass that applies them

pub mod consumption;
pub mod desirability;
pub mod explanation;
pub mod hysteresis;
pub mod neighbours;
pub mod requirements;
pub mod tick;
pub mod transition;

pub use consumption::{consume_resources, should_consume_today};
pub use desirability::{check_evolve_desirability, UNREACHABLE_EVOLVE_DESIRABILITY};
pub use explanation::{determine_evolve_text, EvolveText};
pub use hysteresis::has_devolve_delay;
pub use neighbours::worst_desirability_neighbour;
pub use requirements::{check_requirements, has_required_goods_and_services};
pub use tick::{HouseEngine, HouseEvent, PassReport, SimulationContext};
pub use transition::{apply_transition, transition_for, Outcome, Transition, TransitionRow};
