//! In-memory repository
//!
//! BTreeMap-backed storage, keyed and iterated by id so listings and
//! pages come out in stable order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::Entity;
use crate::repo::{RepoError, Repository};

// == Memory Repository ==
/// Thread-safe in-memory [`Repository`] implementation.
#[derive(Debug)]
pub struct MemoryRepo<E> {
    inner: RwLock<Inner<E>>,
}

#[derive(Debug)]
struct Inner<E> {
    items: BTreeMap<i64, E>,
    next_id: i64,
}

impl<E> MemoryRepo<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: BTreeMap::new(),
                next_id: 0,
            }),
        }
    }
}

impl<E> Default for MemoryRepo<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepo<E> {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepoError> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<E>, RepoError> {
        Ok(self.inner.read().await.items.values().cloned().collect())
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<(Vec<E>, u64), RepoError> {
        let inner = self.inner.read().await;
        let total = inner.items.len() as u64;
        let items = inner
            .items
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn save(&self, mut entity: E) -> Result<E, RepoError> {
        let mut inner = self.inner.write().await;

        if entity.id() == 0 {
            inner.next_id += 1;
            let id = inner.next_id;
            entity.set_id(id);
        } else {
            // Explicit ids (tests, updates) must not collide with ones
            // handed out later
            inner.next_id = inner.next_id.max(entity.id());
        }

        inner.items.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, entity: &E) -> Result<(), RepoError> {
        self.inner.write().await.items.remove(&entity.id());
        Ok(())
    }

    async fn exists_by_unique_field(&self, field: &str, value: &str) -> Result<bool, RepoError> {
        if !E::unique_fields().contains(&field) {
            return Err(RepoError::UnknownField(field.to_string()));
        }

        let inner = self.inner.read().await;
        Ok(inner
            .items
            .values()
            .any(|entity| entity.unique_field(field) == Some(value)))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Country;

    fn country(name: &str, iso_code: &str) -> Country {
        Country {
            id: 0,
            name: name.to_string(),
            iso_code: iso_code.to_string(),
            flag_url: format!("https://flags.example.com/{iso_code}.png"),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = MemoryRepo::new();

        let first = repo.save(country("England", "GB")).await.unwrap();
        let second = repo.save(country("Spain", "ES")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_save_with_explicit_id_updates_in_place() {
        let repo = MemoryRepo::new();

        let mut saved = repo.save(country("England", "GB")).await.unwrap();
        saved.name = "England and Wales".to_string();
        repo.save(saved.clone()).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.name, "England and Wales");

        // Id assignment continues past explicit ids
        let next = repo.save(country("Spain", "ES")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let repo: MemoryRepo<Country> = MemoryRepo::new();
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_page_in_id_order() {
        let repo = MemoryRepo::new();
        for (name, iso) in [("England", "GB"), ("Spain", "ES"), ("Italy", "IT")] {
            repo.save(country(name, iso)).await.unwrap();
        }

        let (page, total) = repo.find_page(1, 1).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Spain");

        let (rest, _) = repo.find_page(2, 10).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "Italy");
    }

    #[tokio::test]
    async fn test_find_page_past_the_end() {
        let repo = MemoryRepo::new();
        repo.save(country("England", "GB")).await.unwrap();

        let (page, total) = repo.find_page(10, 40).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = MemoryRepo::new();
        let saved = repo.save(country("England", "GB")).await.unwrap();

        repo.delete(&saved).await.unwrap();

        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exists_by_unique_field() {
        let repo = MemoryRepo::new();
        repo.save(country("England", "GB")).await.unwrap();

        assert!(repo
            .exists_by_unique_field("name", "England")
            .await
            .unwrap());
        assert!(repo
            .exists_by_unique_field("iso_code", "GB")
            .await
            .unwrap());
        assert!(!repo.exists_by_unique_field("name", "Spain").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_by_unknown_field_is_an_error() {
        let repo: MemoryRepo<Country> = MemoryRepo::new();

        let result = repo.exists_by_unique_field("flag_url", "x").await;
        assert!(matches!(result, Err(RepoError::UnknownField(_))));
    }
}
