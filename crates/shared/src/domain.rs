use serde::{Deserialize, Serialize};

/// Identifier assigned by the record store at creation time. Opaque to
/// callers; never reused within a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroRecord {
    pub id: HeroId,
    pub name: String,
    pub power: String,
}

/// Form-in-progress values. Whether the draft targets a new hero or an
/// existing one is tracked next to it by the controller, not in here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDraft {
    pub name: String,
    pub power: String,
}

impl HeroDraft {
    pub fn from_record(record: &HeroRecord) -> Self {
        Self {
            name: record.name.clone(),
            power: record.power.clone(),
        }
    }

    /// Both required fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.power.is_empty()
    }
}

/// What `delete` resolves with, whether or not a record was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    pub id: HeroId,
}
