//! Save/Load for the economy state
//!
//! Uses bincode for binary serialization. Only the durable economy
//! numbers are persisted; floor state (agents, orders, seats) is
//! transient and rebuilt fresh on every run.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// The durable slice of simulation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomySnapshot {
    /// Save format version
    pub version: u32,
    /// Simulation time in seconds
    pub sim_time: f64,
    /// Till balance
    pub cash: f32,
    /// Reputation score
    pub reputation: i32,
}

impl EconomySnapshot {
    pub fn new(sim_time: f64, cash: f32, reputation: i32) -> Self {
        Self {
            version: SAVE_VERSION,
            sim_time,
            cash,
            reputation,
        }
    }
}

/// Write an economy snapshot to a writer.
pub fn save_economy<W: Write>(writer: W, snapshot: &EconomySnapshot) -> Result<(), SaveError> {
    bincode::serialize_into(writer, snapshot)?;
    Ok(())
}

/// Read an economy snapshot from a reader.
pub fn load_economy<R: Read>(reader: R) -> Result<EconomySnapshot, SaveError> {
    let snapshot: EconomySnapshot = bincode::deserialize_from(reader)?;

    if snapshot.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: snapshot.version,
        });
    }

    Ok(snapshot)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {e}"),
            SaveError::Bincode(e) => write!(f, "serialization error: {e}"),
            SaveError::VersionMismatch { expected, found } => {
                write!(f, "save version mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let snapshot = EconomySnapshot::new(123.5, 87.25, 61);

        let mut buffer = Vec::new();
        save_economy(&mut buffer, &snapshot).unwrap();

        let loaded = load_economy(buffer.as_slice()).unwrap();
        assert_eq!(loaded.sim_time, 123.5);
        assert_eq!(loaded.cash, 87.25);
        assert_eq!(loaded.reputation, 61);
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut snapshot = EconomySnapshot::new(0.0, 0.0, 50);
        snapshot.version = 99;

        let mut buffer = Vec::new();
        save_economy(&mut buffer, &snapshot).unwrap();

        match load_economy(buffer.as_slice()) {
            Err(SaveError::VersionMismatch { expected: 1, found: 99 }) => {}
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_data_is_an_error() {
        let snapshot = EconomySnapshot::new(1.0, 2.0, 3);
        let mut buffer = Vec::new();
        save_economy(&mut buffer, &snapshot).unwrap();
        buffer.truncate(buffer.len() / 2);

        assert!(matches!(
            load_economy(buffer.as_slice()),
            Err(SaveError::Bincode(_))
        ));
    }
}
