use enum_dispatch::enum_dispatch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Action, GridWorldObservation, DT, GOAL_RADIUS, MOVE_DRAIN_FACTOR};

#[enum_dispatch]
pub trait Policy {
    fn get_action(&mut self, obs: &GridWorldObservation) -> Action;
}

#[derive(Debug, Clone)]
#[enum_dispatch(Policy)]
pub enum EnumPolicy {
    RandomPolicy(RandomPolicy),
    PursuePolicy(PursuePolicy),
    BatteryAwarePolicy(BatteryAwarePolicy),
}

impl EnumPolicy {
    pub const NAMES: [&'static str; 3] = ["random", "pursue", "battery"];

    pub fn from_name(name: &str, seed: Option<u64>) -> Option<Self> {
        match name {
            "random" => Some(RandomPolicy::new(seed).into()),
            "pursue" => Some(PursuePolicy.into()),
            "battery" => Some(BatteryAwarePolicy.into()),
            _ => None,
        }
    }
}

/// Flips a fair coin between resting and pursuing.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn get_action(&mut self, _obs: &GridWorldObservation) -> Action {
        if self.rng.gen_bool(0.5) {
            Action::Pursue
        } else {
            Action::Rest
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PursuePolicy;

impl Policy for PursuePolicy {
    fn get_action(&mut self, _obs: &GridWorldObservation) -> Action {
        Action::Pursue
    }
}

/// Pursues only while the battery covers the whole chase, otherwise rests.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryAwarePolicy;

impl BatteryAwarePolicy {
    /// Battery spent pursuing from `gap` until the target is within reach.
    pub fn pursuit_cost(gap: f64) -> f64 {
        if !gap.is_finite() {
            return f64::INFINITY;
        }
        let mut gap = gap;
        let mut cost = 0.0;
        while gap >= GOAL_RADIUS {
            cost += MOVE_DRAIN_FACTOR * gap;
            gap *= 1.0 - DT;
        }
        cost
    }
}

impl Policy for BatteryAwarePolicy {
    fn get_action(&mut self, obs: &GridWorldObservation) -> Action {
        let dx = obs.target[0] - obs.agent[0];
        let dy = obs.target[1] - obs.agent[1];
        let gap = dx.hypot(dy);
        if Self::pursuit_cost(gap) <= obs.agent_battery {
            Action::Pursue
        } else {
            Action::Rest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve() {
        for name in EnumPolicy::NAMES {
            assert!(EnumPolicy::from_name(name, Some(0)).is_some());
        }
        assert!(EnumPolicy::from_name("greedy", None).is_none());
    }

    #[test]
    fn seeded_random_policy_repeats() {
        let obs = GridWorldObservation::default();
        let mut a = RandomPolicy::new(Some(9));
        let mut b = RandomPolicy::new(Some(9));
        let left: Vec<Action> = (0..32).map(|_| a.get_action(&obs)).collect();
        let right: Vec<Action> = (0..32).map(|_| b.get_action(&obs)).collect();
        assert_eq!(left, right);
        assert!(left.contains(&Action::Rest) && left.contains(&Action::Pursue));
    }

    #[test]
    fn pursuit_cost_is_zero_inside_goal() {
        assert_eq!(BatteryAwarePolicy::pursuit_cost(0.3), 0.0);
        assert_eq!(BatteryAwarePolicy::pursuit_cost(0.55), 0.275);
    }

    #[test]
    fn unbounded_gap_is_never_affordable() {
        assert_eq!(BatteryAwarePolicy::pursuit_cost(f64::INFINITY), f64::INFINITY);
        assert_eq!(BatteryAwarePolicy::pursuit_cost(f64::NAN), f64::INFINITY);
        let mut policy = BatteryAwarePolicy;
        let far = GridWorldObservation::new([0.0, 0.0], [f64::MAX, f64::MAX], 99.0, 5.0);
        assert_eq!(policy.get_action(&far), Action::Rest);
    }

    #[test]
    fn battery_aware_rests_when_chase_is_unaffordable() {
        let mut policy = EnumPolicy::from_name("battery", None).unwrap();
        let cheap = GridWorldObservation::new([0.0, 0.0], [1.0, 0.0], 60.0, 5.0);
        let costly = GridWorldObservation::new([0.0, 0.0], [19.0, 19.0], 50.0, 5.0);
        assert_eq!(policy.get_action(&cheap), Action::Pursue);
        assert_eq!(policy.get_action(&costly), Action::Rest);
    }
}
