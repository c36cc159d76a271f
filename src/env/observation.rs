use crate::env::FxIndexMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObsValue {
    Vector([f64; 2]),
    Scalar(f64),
}

/// What the agent sees after `reset` and after every `step`.
///
/// The target location is published under the `distance` key. The name is
/// kept so consumers of the map layout keep working, but the value is the
/// raw target position and not a distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridWorldObservation {
    pub agent: [f64; 2],
    pub target: [f64; 2],
    pub agent_battery: f64,
    pub time_remaining: f64,
}

impl GridWorldObservation {
    pub const KEYS: [&'static str; 4] = ["agent", "distance", "agent_battery", "time_remaining"];

    pub fn new(agent: [f64; 2], target: [f64; 2], agent_battery: f64, time_remaining: f64) -> Self {
        Self {
            agent,
            target,
            agent_battery,
            time_remaining,
        }
    }

    pub fn as_map(&self) -> FxIndexMap<&'static str, ObsValue> {
        let mut map = FxIndexMap::default();
        map.insert(Self::KEYS[0], ObsValue::Vector(self.agent));
        map.insert(Self::KEYS[1], ObsValue::Vector(self.target));
        map.insert(Self::KEYS[2], ObsValue::Scalar(self.agent_battery));
        map.insert(Self::KEYS[3], ObsValue::Scalar(self.time_remaining));
        map
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Info {
    /// L1 distance between agent and target.
    pub distance: f64,
}

impl Info {
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }

    pub fn as_map(&self) -> FxIndexMap<&'static str, f64> {
        let mut map = FxIndexMap::default();
        map.insert("distance", self.distance);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_field_order_and_legacy_key() {
        let obs = GridWorldObservation::new([1.0, 2.0], [3.0, 4.0], 70.0, 5.0);
        let map = obs.as_map();
        let keys: Vec<&str> = map.keys().copied().collect();
        assert_eq!(keys, GridWorldObservation::KEYS.to_vec());
        assert_eq!(map["distance"], ObsValue::Vector([3.0, 4.0]));
        assert_eq!(map["agent_battery"], ObsValue::Scalar(70.0));
    }

    #[test]
    fn info_map() {
        let info = Info::new(2.5);
        assert_eq!(info.as_map()["distance"], 2.5);
        assert_eq!(info.as_map().len(), 1);
    }
}
