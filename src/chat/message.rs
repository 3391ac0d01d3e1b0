use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Milliseconds since the session started
    pub timestamp: u64,
}

/// Part of the monument a question can be focused on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LibertyPart {
    Torch,
    Crown,
    Tablet,
    Robe,
    Pedestal,
}

impl LibertyPart {
    pub const ALL: [LibertyPart; 5] = [
        LibertyPart::Torch,
        LibertyPart::Crown,
        LibertyPart::Tablet,
        LibertyPart::Robe,
        LibertyPart::Pedestal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LibertyPart::Torch => "Torch",
            LibertyPart::Crown => "Crown",
            LibertyPart::Tablet => "Tablet",
            LibertyPart::Robe => "Robe",
            LibertyPart::Pedestal => "Pedestal",
        }
    }
}

impl fmt::Display for LibertyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
