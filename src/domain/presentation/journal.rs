use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub name: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Resource, Debug, Default)]
pub struct Journal {
    pub entries: Vec<JournalEntry>,
    active: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum JournalError {
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalError::OutOfRange { index, len } => {
                write!(f, "journal entry {} requested but only {} exist", index, len)
            }
        }
    }
}

impl std::error::Error for JournalError {}

/// Sent by the journal dropdown when the player picks another entry.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchJournal {
    pub index: usize,
}

impl Journal {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        Self { entries, active: 0 }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_entry(&self) -> Option<&JournalEntry> {
        self.entries.get(self.active)
    }

    pub fn select(&mut self, index: usize) -> Result<&JournalEntry, JournalError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get(index)
            .ok_or(JournalError::OutOfRange { index, len })?;
        self.active = index;
        Ok(entry)
    }
}

pub fn apply_journal_switch(mut ev_switch: EventReader<SwitchJournal>, mut journal: ResMut<Journal>) {
    for ev in ev_switch.read() {
        match journal.select(ev.index) {
            Ok(entry) => info!("Journal switched to \"{}\"", entry.name),
            Err(e) => warn!("Ignoring journal switch: {}", e),
        }
    }
}
