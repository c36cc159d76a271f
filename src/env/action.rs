use crate::env::EnvError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Rest = 0,
    Pursue = 1,
}

impl Action {
    pub const ACTIONS: [&'static str; 2] = ["REST", "PURSUE THE TARGET"];
    pub const RANGE: usize = 2;

    pub fn label(&self) -> &'static str {
        Self::ACTIONS[*self as usize]
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Rest),
            1 => Ok(Self::Pursue),
            _ => Err(EnvError::InvalidAction(value)),
        }
    }
}

impl From<Action> for i64 {
    fn from(value: Action) -> Self {
        value as i64
    }
}
