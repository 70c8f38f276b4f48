use crate::traits::{CatalogStore, Reply, StoreCommand, StoreError, StoreResult};
use crate::CatalogStoreKind;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Clone)]
enum Entry {
    Set(BTreeSet<String>),
    Hash(Vec<(String, String)>),
    /// Plain string value; only written by tests to simulate corrupt records
    Text(String),
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    /// Keys whose commands fail with the given message
    failing_keys: HashMap<String, String>,
}

/// In-process catalog store
///
/// Sets are kept ordered, so listings are deterministic. Nothing survives a
/// restart; use it for local development and tests only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Connection("memory store lock poisoned".to_string()))
    }

    /// Make every later command touching `key` fail with `message`.
    pub fn fail_key(&self, key: impl Into<String>, message: impl Into<String>) {
        if let Ok(mut state) = self.lock() {
            state.failing_keys.insert(key.into(), message.into());
        }
    }

    /// Store a plain string at `key`, replacing whatever was there.
    pub fn put_text(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut state) = self.lock() {
            state.entries.insert(key.into(), Entry::Text(value.into()));
        }
    }

    /// Number of members in the set at `key` (0 when missing)
    pub fn set_len(&self, key: &str) -> usize {
        match self.lock() {
            Ok(state) => match state.entries.get(key) {
                Some(Entry::Set(members)) => members.len(),
                _ => 0,
            },
            Err(_) => 0,
        }
    }

    fn apply(state: &mut State, command: &StoreCommand) -> StoreResult<Reply> {
        if let Some(message) = state.failing_keys.get(command.key()) {
            return Err(StoreError::Command(message.clone()));
        }

        match command {
            StoreCommand::SetAdd { key, member } => {
                let entry = state
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| Entry::Set(BTreeSet::new()));
                match entry {
                    Entry::Set(members) => Ok(Reply::Integer(i64::from(
                        members.insert(member.clone()),
                    ))),
                    _ => Err(StoreError::Command(WRONG_TYPE.to_string())),
                }
            }
            StoreCommand::HashSet { key, fields } => {
                let entry = state
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| Entry::Hash(Vec::new()));
                let Entry::Hash(existing) = entry else {
                    return Err(StoreError::Command(WRONG_TYPE.to_string()));
                };

                let mut created = 0;
                for (field, value) in fields {
                    match existing.iter_mut().find(|(name, _)| name == field) {
                        Some(slot) => slot.1 = value.clone(),
                        None => {
                            existing.push((field.clone(), value.clone()));
                            created += 1;
                        }
                    }
                }
                Ok(Reply::Integer(created))
            }
            StoreCommand::HashGetAll { key } => match state.entries.get(key) {
                None => Ok(Reply::Fields(Vec::new())),
                Some(Entry::Hash(fields)) => Ok(Reply::Fields(fields.clone())),
                // Mirrors what a misbehaving store could hand back
                Some(Entry::Text(text)) => Ok(Reply::Text(text.clone())),
                Some(Entry::Set(_)) => Err(StoreError::Command(WRONG_TYPE.to_string())),
            },
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut state = self.lock()?;
        Self::apply(
            &mut state,
            &StoreCommand::SetAdd {
                key: key.to_string(),
                member: member.to_string(),
            },
        )
        .map(drop)
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        let state = self.lock()?;
        if let Some(message) = state.failing_keys.get(key) {
            return Err(StoreError::Command(message.clone()));
        }

        match state.entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(_) => Err(StoreError::Command(WRONG_TYPE.to_string())),
        }
    }

    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> StoreResult<()> {
        let mut state = self.lock()?;
        Self::apply(
            &mut state,
            &StoreCommand::HashSet {
                key: key.to_string(),
                fields: fields.to_vec(),
            },
        )
        .map(drop)
    }

    async fn hash_get_all(&self, key: &str) -> StoreResult<Reply> {
        let mut state = self.lock()?;
        Self::apply(
            &mut state,
            &StoreCommand::HashGetAll {
                key: key.to_string(),
            },
        )
    }

    async fn execute_batch(
        &self,
        commands: Vec<StoreCommand>,
    ) -> StoreResult<Vec<StoreResult<Reply>>> {
        let mut state = self.lock()?;
        Ok(commands
            .iter()
            .map(|command| Self::apply(&mut state, command))
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.lock().map(drop)
    }

    fn backend_type(&self) -> CatalogStoreKind {
        CatalogStoreKind::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_add_is_idempotent() {
        let store = MemoryStore::new();
        store.set_add("tags", "x").await.unwrap();
        store.set_add("tags", "x").await.unwrap();
        store.set_add("tags", "y").await.unwrap();

        assert_eq!(store.set_members("tags").await.unwrap(), vec!["x", "y"]);
        assert_eq!(store.set_len("tags"), 2);
    }

    #[tokio::test]
    async fn test_missing_keys_read_empty() {
        let store = MemoryStore::new();
        assert!(store.set_members("tags:none").await.unwrap().is_empty());
        assert_eq!(
            store.hash_get_all("media:none").await.unwrap(),
            Reply::Fields(vec![])
        );
    }

    #[tokio::test]
    async fn test_hash_set_updates_in_place() {
        let store = MemoryStore::new();
        store
            .hash_set("media:1", &[("name".to_string(), "a".to_string())])
            .await
            .unwrap();
        store
            .hash_set(
                "media:1",
                &[
                    ("name".to_string(), "b".to_string()),
                    ("tags".to_string(), "x".to_string()),
                ],
            )
            .await
            .unwrap();

        assert_eq!(
            store.hash_get_all("media:1").await.unwrap(),
            Reply::Fields(vec![
                ("name".to_string(), "b".to_string()),
                ("tags".to_string(), "x".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn test_batch_reports_failures_in_place() {
        let store = MemoryStore::new();
        store.fail_key("tags:bad", "ERR injected");

        let results = store
            .execute_batch(vec![
                StoreCommand::SetAdd {
                    key: "tags".to_string(),
                    member: "bad".to_string(),
                },
                StoreCommand::SetAdd {
                    key: "tags:bad".to_string(),
                    member: "1".to_string(),
                },
                StoreCommand::SetAdd {
                    key: "tags".to_string(),
                    member: "good".to_string(),
                },
            ])
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap_err().to_string(), "ERR injected");
        assert!(results[2].is_ok());
        // No rollback of the commands around the failure
        assert_eq!(store.set_members("tags").await.unwrap(), vec!["bad", "good"]);
    }

    #[tokio::test]
    async fn test_wrong_type() {
        let store = MemoryStore::new();
        store.put_text("media:1", "name2");

        assert_eq!(
            store.hash_get_all("media:1").await.unwrap(),
            Reply::Text("name2".to_string())
        );
        assert!(matches!(
            store.set_add("media:1", "x").await,
            Err(StoreError::Command(_))
        ));
    }
}
