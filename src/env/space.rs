use crate::env::FxIndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceType {
    Discrete,
    Continuous,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceTypeBounds {
    Discrete(usize),
    Continuous(f64, f64),
}

/// Declared shape of an action or of one observation field.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceInfo {
    pub data: Vec<SpaceTypeBounds>,
}

/// Observation fields in the order they appear in an observation map.
pub type ObservationSpace = FxIndexMap<&'static str, SpaceInfo>;

impl SpaceInfo {
    pub fn new(data: Vec<SpaceTypeBounds>) -> Self {
        Self { data }
    }

    /// `None` for a space without dimensions.
    pub fn get_type(&self) -> Option<SpaceType> {
        let is_discrete = self
            .data
            .iter()
            .any(|b| matches!(b, SpaceTypeBounds::Discrete(_)));
        let is_continuous = self
            .data
            .iter()
            .any(|b| matches!(b, SpaceTypeBounds::Continuous(_, _)));
        match (is_discrete, is_continuous) {
            (true, false) => Some(SpaceType::Discrete),
            (false, true) => Some(SpaceType::Continuous),
            (true, true) => Some(SpaceType::Mixed),
            (false, false) => None,
        }
    }

    pub fn get_discrete_combinations(&self) -> usize {
        self.data
            .iter()
            .map(|b| match *b {
                SpaceTypeBounds::Discrete(n) => n,
                SpaceTypeBounds::Continuous(_, _) => 1,
            })
            .product()
    }

    /// Whether `value` is a member of a one dimensional discrete space.
    pub fn contains_discrete(&self, value: i64) -> bool {
        match self.data.as_slice() {
            [SpaceTypeBounds::Discrete(n)] => value >= 0 && (value as u64) < *n as u64,
            _ => false,
        }
    }

    /// Whether every component of `values` lies inside the declared bounds.
    pub fn contains_continuous(&self, values: &[f64]) -> bool {
        self.data.len() == values.len()
            && self.data.iter().zip(values).all(|(b, v)| match *b {
                SpaceTypeBounds::Continuous(low, high) => *v >= low && *v <= high,
                SpaceTypeBounds::Discrete(_) => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_types() {
        let discrete = SpaceInfo::new(vec![SpaceTypeBounds::Discrete(2)]);
        let continuous = SpaceInfo::new(vec![SpaceTypeBounds::Continuous(0.0, 1.0)]);
        let mixed = SpaceInfo::new(vec![
            SpaceTypeBounds::Discrete(3),
            SpaceTypeBounds::Continuous(0.0, 1.0),
        ]);
        assert_eq!(discrete.get_type(), Some(SpaceType::Discrete));
        assert_eq!(continuous.get_type(), Some(SpaceType::Continuous));
        assert_eq!(mixed.get_type(), Some(SpaceType::Mixed));
        assert_eq!(SpaceInfo::new(vec![]).get_type(), None);
        assert_eq!(mixed.get_discrete_combinations(), 3);
    }

    #[test]
    fn discrete_membership() {
        let space = SpaceInfo::new(vec![SpaceTypeBounds::Discrete(2)]);
        assert!(space.contains_discrete(0));
        assert!(space.contains_discrete(1));
        assert!(!space.contains_discrete(2));
        assert!(!space.contains_discrete(-1));
    }

    #[test]
    fn continuous_membership() {
        let space = SpaceInfo::new(vec![
            SpaceTypeBounds::Continuous(0.0, 20.0),
            SpaceTypeBounds::Continuous(0.0, 20.0),
        ]);
        assert!(space.contains_continuous(&[0.0, 19.5]));
        assert!(!space.contains_continuous(&[-0.1, 3.0]));
        assert!(!space.contains_continuous(&[3.0]));
    }
}
