//! Users service

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

use crate::cache::EntityCache;
use crate::domain::{EntityKind, User};
use crate::error::{ApiError, Result};
use crate::models::{Page, PageQuery, UpdateUserRequest, UserResponse};
use crate::repo::DynRepo;

// == Users Service ==
#[derive(Clone)]
pub struct UsersService {
    users: DynRepo<User>,
    cache: EntityCache,
}

impl UsersService {
    pub fn new(users: DynRepo<User>, cache: EntityCache) -> Self {
        Self { users, cache }
    }

    // == Reads ==
    pub async fn list(&self, query: &PageQuery) -> Result<Page<UserResponse>> {
        self.cache
            .read_through_page(EntityKind::Users, query.page, query.limit, || {
                self.load_page(query)
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<UserResponse> {
        self.cache
            .read_through(EntityKind::Users, id, || self.load_detail(id))
            .await
    }

    /// The caller's own account, resolved from the verified token.
    pub async fn profile(&self, user_id: i64) -> Result<UserResponse> {
        self.get(user_id).await
    }

    async fn load_page(&self, query: &PageQuery) -> Result<Page<UserResponse>> {
        let (users, total) = self.users.find_page(query.offset(), query.limit).await?;
        let items = users.into_iter().map(UserResponse::from).collect();
        Ok(Page::new(items, query, total))
    }

    async fn load_detail(&self, id: i64) -> Result<UserResponse> {
        let user = self.require_user(id).await?;
        Ok(UserResponse::from(user))
    }

    // == Writes ==
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<UserResponse> {
        let mut user = self.require_user(id).await?;

        if let Some(email) = request.email {
            if email != user.email {
                if self.users.exists_by_unique_field("email", &email).await? {
                    return Err(ApiError::Conflict(format!(
                        "User with email {email} already exists"
                    )));
                }
                user.email = email;
            }
        }

        match (request.new_password, request.confirm_password) {
            (Some(new_password), Some(confirm_password)) => {
                if new_password != confirm_password {
                    return Err(ApiError::BadRequest(
                        "New password and confirm password must be the same".to_string(),
                    ));
                }
                user.password_hash = hash_password(&new_password)?;
            }
            (None, None) => {}
            _ => {
                return Err(ApiError::BadRequest(
                    "New password and confirm password must be provided together".to_string(),
                ));
            }
        }

        let user = self.users.save(user).await?;
        self.cache.invalidate(EntityKind::Users).await;
        Ok(UserResponse::from(user))
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        let user = self.require_user(id).await?;
        self.users.delete(&user).await?;
        self.cache.invalidate(EntityKind::Users).await;
        Ok(())
    }

    // == Helpers ==
    async fn require_user(&self, id: i64) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User with id {id} not found")))
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ApiError::Internal(format!("Failed to hash password: {err}")))
}
