//! The on-disk shape of a farm game.

use bean_core::Bean;
use bean_core::error::Result;
use bean_core::persistence::SaveStore;
use serde::{Deserialize, Serialize};

/// Slot the console game saves into.
pub const DEFAULT_SLOT: &str = "default";

/// Everything needed to resume a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    /// Farmer's name.
    pub farmer_name: String,
    /// The Bean, with its full state.
    pub bean: Bean,
    /// Current day, starting at 1.
    pub day: u32,
    /// Turns taken since the game started.
    pub turn_count: u32,
}

impl SaveGame {
    /// Write to `slot`.
    ///
    /// # Errors
    /// Propagates store errors.
    pub fn write(&self, store: &SaveStore, slot: &str) -> Result<()> {
        store.save(slot, self)
    }

    /// Read from `slot`, or `None` if nothing was saved there.
    ///
    /// # Errors
    /// Propagates store errors, including checksum mismatches.
    pub fn read(store: &SaveStore, slot: &str) -> Result<Option<Self>> {
        store.load(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bean_core::Personality;
    use bean_core::config::PersistenceConfig;

    #[test]
    fn save_game_round_trips_through_store() {
        let store = SaveStore::open_in_memory(&PersistenceConfig::default()).expect("open");
        let game = SaveGame {
            farmer_name: "Ana".to_string(),
            bean: Bean::new("Pip", Personality::Lazy).with_actions_count(7),
            day: 3,
            turn_count: 12,
        };
        game.write(&store, DEFAULT_SLOT).expect("write");
        let back = SaveGame::read(&store, DEFAULT_SLOT).expect("read").expect("Some");
        assert_eq!(back, game);
        assert!(SaveGame::read(&store, "other").expect("read").is_none());
    }

    #[test]
    fn save_survives_reopening_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("farm.db");
        let config = PersistenceConfig::default();
        let game = SaveGame {
            farmer_name: "Ana".to_string(),
            bean: Bean::new("Pip", Personality::Snappy).with_energy(12),
            day: 1,
            turn_count: 2,
        };

        {
            let store = SaveStore::open(&path, &config).expect("open");
            game.write(&store, DEFAULT_SLOT).expect("write");
        }
        let store = SaveStore::open(&path, &config).expect("reopen");
        let back = SaveGame::read(&store, DEFAULT_SLOT).expect("read").expect("Some");
        assert_eq!(back.bean.energy(), 12);
        assert_eq!(back.bean.id(), game.bean.id());
    }
}
