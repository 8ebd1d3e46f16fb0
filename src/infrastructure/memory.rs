//! Process-local implementation of every repository trait.
//!
//! Backs the scenario tests, which run without a database. All three
//! repositories share one lock so that the cross-table rules Postgres
//! enforces hold here too: unique keys, an existing creator, and cascade on
//! user delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::{
    AboutPage, InsertOutcome, ListCursor, NewUrlMapping, NewUser, UrlMapping, User, UserSummary,
};
use crate::domain::repositories::{AboutRepository, MappingRepository, UserRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    mappings: BTreeMap<i64, UrlMapping>,
    about: Option<AboutPage>,
    next_user_id: i64,
    next_mapping_id: i64,
}

impl Tables {
    fn newest_first(&self) -> impl Iterator<Item = &UrlMapping> {
        let mut all: Vec<&UrlMapping> = self.mappings.values().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        all.into_iter()
    }

    fn find_mapping(&self, pred: impl Fn(&UrlMapping) -> bool) -> Option<UrlMapping> {
        self.mappings.values().find(|m| pred(m)).cloned()
    }
}

/// In-memory store for users, mappings and the About page.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MappingRepository for InMemoryStore {
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<InsertOutcome, AppError> {
        let mut tables = self.write();

        if tables
            .mappings
            .values()
            .any(|m| m.short_code == new_mapping.short_code)
        {
            return Ok(InsertOutcome::CodeTaken);
        }
        if tables
            .mappings
            .values()
            .any(|m| m.original_url == new_mapping.original_url)
        {
            return Ok(InsertOutcome::UrlTaken);
        }

        let Some(creator) = tables.users.get(&new_mapping.created_by) else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Account no longer exists", "user_id": new_mapping.created_by}),
            ));
        };
        let creator_username = creator.username.clone();

        tables.next_mapping_id += 1;
        let mapping = UrlMapping {
            id: tables.next_mapping_id,
            original_url: new_mapping.original_url,
            short_code: new_mapping.short_code,
            created_by: new_mapping.created_by,
            creator_username,
            created_at: Utc::now(),
            click_count: 0,
            last_accessed: None,
        };
        tables.mappings.insert(mapping.id, mapping.clone());

        Ok(InsertOutcome::Created(mapping))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.read().mappings.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.read().find_mapping(|m| m.short_code == code))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.read().find_mapping(|m| m.original_url == original_url))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.read().mappings.values().any(|m| m.short_code == code))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        Ok(self
            .read()
            .newest_first()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list_after(
        &self,
        cursor: Option<ListCursor>,
        limit: i64,
    ) -> Result<Vec<UrlMapping>, AppError> {
        Ok(self
            .read()
            .newest_first()
            .filter(|m| cursor.is_none_or(|c| c.precedes(m)))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.read().mappings.len() as i64)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write().mappings.remove(&id).is_some())
    }

    async fn record_visit(&self, code: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let mut tables = self.write();

        let Some(mapping) = tables
            .mappings
            .values_mut()
            .find(|m| m.short_code == code)
        else {
            return Ok(false);
        };

        mapping.click_count += 1;
        mapping.last_accessed = Some(mapping.last_accessed.map_or(at, |prev| prev.max(at)));

        Ok(true)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.write();

        if tables
            .users
            .values()
            .any(|u| u.username == new_user.username)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_username_key" }),
            ));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.read().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_with_counts(&self) -> Result<Vec<UserSummary>, AppError> {
        let tables = self.read();

        Ok(tables
            .users
            .values()
            .map(|user| UserSummary {
                user: user.clone(),
                mapping_count: tables
                    .mappings
                    .values()
                    .filter(|m| m.created_by == user.id)
                    .count() as i64,
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write();

        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        tables.mappings.retain(|_, m| m.created_by != id);
        if let Some(about) = tables.about.as_mut()
            && about.modified_by == Some(id)
        {
            about.modified_by = None;
            about.modified_by_username = None;
        }

        Ok(true)
    }
}

#[async_trait]
impl AboutRepository for InMemoryStore {
    async fn get(&self) -> Result<Option<AboutPage>, AppError> {
        Ok(self.read().about.clone())
    }

    async fn upsert(&self, content: &str, modified_by: i64) -> Result<AboutPage, AppError> {
        let mut tables = self.write();

        let Some(modifier) = tables.users.get(&modified_by) else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Account no longer exists", "user_id": modified_by}),
            ));
        };

        let page = AboutPage {
            id: 1,
            content: content.to_string(),
            last_modified: Utc::now(),
            modified_by: Some(modified_by),
            modified_by_username: Some(modifier.username.clone()),
        };
        tables.about = Some(page.clone());

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;

    async fn seed_user(store: &InMemoryStore, name: &str) -> User {
        UserRepository::create(
            store,
            NewUser {
                username: name.to_string(),
                password_hash: "hash".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap()
    }

    fn new_mapping(url: &str, code: &str, by: i64) -> NewUrlMapping {
        NewUrlMapping {
            original_url: url.to_string(),
            short_code: code.to_string(),
            created_by: by,
        }
    }

    #[tokio::test]
    async fn test_insert_reports_which_key_was_taken() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "alice").await;

        let first = store
            .insert(new_mapping("https://a.com", "aaaaaa", user.id))
            .await
            .unwrap();
        assert!(matches!(first, InsertOutcome::Created(_)));

        let same_code = store
            .insert(new_mapping("https://b.com", "aaaaaa", user.id))
            .await
            .unwrap();
        assert_eq!(same_code, InsertOutcome::CodeTaken);

        let same_url = store
            .insert(new_mapping("https://a.com", "bbbbbb", user.id))
            .await
            .unwrap();
        assert_eq!(same_url, InsertOutcome::UrlTaken);

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_requires_existing_creator() {
        let store = InMemoryStore::new();

        let err = store
            .insert(new_mapping("https://a.com", "aaaaaa", 404))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_user_delete_cascades() {
        let store = InMemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;

        store
            .insert(new_mapping("https://a.com", "aaaaaa", alice.id))
            .await
            .unwrap();
        store
            .insert(new_mapping("https://b.com", "bbbbbb", bob.id))
            .await
            .unwrap();

        assert!(UserRepository::delete(&store, alice.id).await.unwrap());

        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.find_by_code("aaaaaa").await.unwrap().is_none());
        assert!(store.find_by_code("bbbbbb").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_record_visit_keeps_latest_timestamp() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "alice").await;
        store
            .insert(new_mapping("https://a.com", "aaaaaa", user.id))
            .await
            .unwrap();

        let later = Utc::now();
        let earlier = later - chrono::Duration::seconds(5);

        assert!(store.record_visit("aaaaaa", later).await.unwrap());
        assert!(store.record_visit("aaaaaa", earlier).await.unwrap());

        let mapping = store.find_by_code("aaaaaa").await.unwrap().unwrap();
        assert_eq!(mapping.click_count, 2);
        assert_eq!(mapping.last_accessed, Some(later));
    }

    #[tokio::test]
    async fn test_list_after_survives_concurrent_changes() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "alice").await;
        for (url, code) in [
            ("https://a.com", "aaaaaa"),
            ("https://b.com", "bbbbbb"),
            ("https://c.com", "cccccc"),
        ] {
            store.insert(new_mapping(url, code, user.id)).await.unwrap();
        }

        let first = store.list_after(None, 2).await.unwrap();
        assert_eq!(first.len(), 2);

        // A newer row and a deleted row between pages shift nothing.
        store
            .insert(new_mapping("https://d.com", "dddddd", user.id))
            .await
            .unwrap();
        MappingRepository::delete(&store, first[0].id).await.unwrap();

        let cursor = first.last().map(UrlMapping::cursor);
        let second = store.list_after(cursor, 2).await.unwrap();

        assert_eq!(second.len(), 1);
        assert_eq!(second[0].short_code, "aaaaaa");
    }

    #[tokio::test]
    async fn test_about_upsert_requires_existing_modifier() {
        let store = InMemoryStore::new();

        let err = store.upsert("Hello", 404).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = InMemoryStore::new();
        seed_user(&store, "alice").await;

        let err = UserRepository::create(
            &store,
            NewUser {
                username: "alice".to_string(),
                password_hash: "x".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }
}
