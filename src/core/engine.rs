use crate::core::types::Profile;
use crate::error::StoreError;
use crate::learning::LearningEngine;
use crate::persistence::{load_profile, save_profile, FileStore, Store};
use std::path::{Path, PathBuf};

// The profile together with where it came from, so a learning session can
// write back to the same place.
pub struct ProfileEngine<S: Store = FileStore> {
    pub profile: Profile,
    store: S,
    learning_engine: LearningEngine,
    profile_path: PathBuf,
}

impl<S: Store> ProfileEngine<S> {
    /// Loads the profile at `path`, or starts empty if there is none usable.
    pub fn from_store_or_new(store: S, path: impl Into<PathBuf>) -> Self {
        let profile_path = path.into();
        let profile = load_profile(&store, &profile_path);
        Self {
            profile,
            store,
            learning_engine: LearningEngine::new(),
            profile_path,
        }
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    /// Runs the learning rules over `text`. Returns whether the profile changed.
    pub fn observe(&mut self, text: &str) -> bool {
        self.learning_engine.learn(text, &mut self.profile)
    }

    pub fn save_profile(&self) -> Result<(), StoreError> {
        save_profile(&self.store, &self.profile_path, &self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn observe_then_save_round_trips() {
        let store = MemoryStore::new();
        let mut engine = ProfileEngine::from_store_or_new(&store, "/data/learned_profile.json");
        assert!(engine.observe("pushto github"));
        engine.save_profile().unwrap();

        let reloaded = ProfileEngine::from_store_or_new(&store, "/data/learned_profile.json");
        assert_eq!(reloaded.profile, engine.profile);
        assert_eq!(reloaded.profile.word_corrections["pushto"], "push to");
    }

    #[test]
    fn saved_bytes_are_stable_when_nothing_fires() {
        let store = MemoryStore::new();
        let path = Path::new("/p.json");
        let mut engine = ProfileEngine::from_store_or_new(&store, path);
        engine.observe("Let's setup the api integration and pushto github");
        engine.save_profile().unwrap();
        let before = store.get(path).unwrap();

        let mut again = ProfileEngine::from_store_or_new(&store, path);
        assert!(!again.observe("Let's setup the api integration and pushto github"));
        assert_eq!(store.get(path).unwrap(), before);
    }
}
