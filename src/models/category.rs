use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Bills,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "bills" => Some(Self::Bills),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Entry and aggregation order.
    pub fn all() -> &'static [Category] {
        &[Self::Food, Self::Transport, Self::Bills, Self::Other]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Food => 0,
            Self::Transport => 1,
            Self::Bills => 2,
            Self::Other => 3,
        }
    }

    /// Step through `all()` with wrap-around.
    pub fn cycle(&self, delta: i32) -> Self {
        let all = Self::all();
        let len = all.len() as i32;
        let next = (self.index() as i32 + delta).rem_euclid(len);
        all[next as usize]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
