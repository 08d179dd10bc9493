// ============================================================
// Layer 3 — Phase
// ============================================================
// A phase decides which data subset a dataset exposes and which
// transform pipeline applies to it:
//
//   Train → first split segment, randomized augmentation
//   Val   → remaining split segment, deterministic transform
//   Test  → the full file (no split), deterministic transform
//
// Unknown phase names must fail before any file is opened, so
// the string boundary lives here as a FromStr impl with an
// error message listing the valid names.
//
// Reference: Rust Book §6 (Enums), §10 (Traits)

use std::fmt;
use std::str::FromStr;

/// One of the three data phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Train,
    Val,
    Test,
}

impl Phase {
    /// True when randomized augmentation applies (training only).
    pub fn augments(self) -> bool {
        matches!(self, Phase::Train)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Train => "train",
            Phase::Val => "val",
            Phase::Test => "test",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Phase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Phase::Train),
            "val" => Ok(Phase::Val),
            "test" => Ok(Phase::Test),
            other => anyhow::bail!(
                "unknown phase '{other}', choose one of: train, val, test"
            ),
        }
    }
}
