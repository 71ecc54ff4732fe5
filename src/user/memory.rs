use crate::user::{StoreError, User, UserChanges, UserMessage, UserStore};
use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Process-lifetime store keeping users in insertion order.
pub struct MemoryStore {
    users: Mutex<IndexMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            users: Mutex::new(IndexMap::new()),
        }
    }

    /// A store holding the single startup fixture.
    pub fn seeded() -> Self {
        let store = MemoryStore::new();
        let fixture = User {
            id: "1".to_string(),
            username: "Aerith".to_string(),
            password: "password123".to_string(),
            email: "Aerith@company.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 2, 7),
            date_created: Utc::now().naive_utc(),
        };
        store.lock().insert(fixture.id.clone(), fixture);
        store
    }

    // Poisoning is recovered: every mutation is a single map call.
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemoryStore {
    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock().values().cloned().collect())
    }

    fn get(&self, id: &str) -> Result<User, StoreError> {
        self.lock().get(id).cloned().ok_or(StoreError::NotFound)
    }

    fn create(&self, user: UserMessage) -> Result<User, StoreError> {
        let mut user = User::from(user);
        let mut users = self.lock();

        while users.contains_key(&user.id) {
            user.id = Uuid::new_v4().to_string();
        }

        users.insert(user.id.clone(), user.clone());

        Ok(user)
    }

    fn update(&self, id: &str, changes: UserChanges) -> Result<User, StoreError> {
        let mut users = self.lock();
        let user = users.get_mut(id).ok_or(StoreError::NotFound)?;

        changes.apply(user);

        Ok(user.clone())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.lock()
            .shift_remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn message(username: &str) -> UserMessage {
        UserMessage {
            username: username.to_string(),
            password: "p".to_string(),
            email: format!("{}@x.com", username.to_lowercase()),
            date_of_birth: None,
        }
    }

    #[test]
    fn seeded_store_holds_fixture() {
        let store = MemoryStore::seeded();
        let users = store.list().unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "1");
        assert_eq!(users[0].username, "Aerith");
        assert_eq!(users[0].date_of_birth, NaiveDate::from_ymd_opt(1985, 2, 7));
    }

    #[test]
    fn create_assigns_fresh_id_and_timestamp() {
        let store = MemoryStore::seeded();
        let started = Utc::now().naive_utc();

        let user = store.create(message("A")).unwrap();

        assert!(!user.id.is_empty());
        assert_ne!(user.id, "1");
        assert!(user.date_created >= started);
        assert_eq!(store.get(&user.id).unwrap(), user);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = MemoryStore::new();
        let a = store.create(message("A")).unwrap();
        let b = store.create(message("B")).unwrap();
        let c = store.create(message("C")).unwrap();

        store.delete(&b.id).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = MemoryStore::seeded();

        assert_eq!(store.get("missing"), Err(StoreError::NotFound));
        assert_eq!(
            store.update("missing", UserChanges::default()),
            Err(StoreError::NotFound)
        );
        assert_eq!(store.delete("missing"), Err(StoreError::NotFound));
    }

    #[test]
    fn update_touches_only_supplied_fields() {
        let store = MemoryStore::seeded();
        let before = store.get("1").unwrap();

        let changes = UserChanges {
            email: Some("aerith@cetra.org".to_string()),
            ..UserChanges::default()
        };
        let after = store.update("1", changes).unwrap();

        assert_eq!(after.email, "aerith@cetra.org");
        assert_eq!(after.username, before.username);
        assert_eq!(after.password, before.password);
        assert_eq!(after.date_of_birth, before.date_of_birth);
        assert_eq!(after.date_created, before.date_created);
        assert_eq!(store.get("1").unwrap(), after);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let store = MemoryStore::seeded();

        store.delete("1").unwrap();

        assert_eq!(store.get("1"), Err(StoreError::NotFound));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn concurrent_creates_are_all_kept() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..25)
                        .map(|i| store.create(message(&format!("u{}-{}", n, i))).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(ids.len(), 200);
        assert_eq!(store.list().unwrap().len(), 200);
    }
}
