//! # User Repository
//!
//! Registration, login and admin edits of `Users` rows.
//!
//! ## Login
//! ```text
//! name + password ──► SELECT userID, type ... ORDER BY userID LIMIT 1
//!                            │
//!                ┌───────────┴───────────┐
//!                ▼                       ▼
//!          Some(Session)               None
//!   (lowest userID wins when     (no match, no lockout)
//!    several rows match)
//! ```
//!
//! Passwords are stored and compared as plaintext.

use retail_core::validation::{validate_coordinate, validate_new_user, validate_password, validate_user_name};
use retail_core::{CoreError, NewUser, Role, Session, User};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a customer.
    ///
    /// Coordinates outside `[0,100]` or an empty name/password are rejected
    /// before anything is written.
    pub async fn create(&self, user: &NewUser) -> DbResult<User> {
        validate_new_user(user).map_err(CoreError::from)?;

        debug!(name = %user.name, "Creating user");

        let result = sqlx::query(
            r#"
            INSERT INTO Users (name, password, latitude, longitude, type)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(user.name.trim())
        .bind(&user.password)
        .bind(user.latitude)
        .bind(user.longitude)
        .bind(Role::Customer)
        .execute(&self.pool)
        .await?;

        let created = User {
            user_id: result.last_insert_rowid(),
            name: user.name.trim().to_string(),
            password: user.password.clone(),
            latitude: user.latitude,
            longitude: user.longitude,
            role: Role::Customer,
        };

        info!(user_id = created.user_id, name = %created.name, "User created");
        Ok(created)
    }

    /// Looks up the session for a name/password pair.
    ///
    /// ## Returns
    /// * `Ok(Some(Session))` - Credentials matched
    /// * `Ok(None)` - No user with this name and password
    pub async fn authenticate(&self, name: &str, password: &str) -> DbResult<Option<Session>> {
        debug!(name = %name, "Authenticating user");

        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT userID, type
            FROM Users
            WHERE name = ?1 AND password = ?2
            ORDER BY userID
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, user_id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT userID, name, password, latitude, longitude, type
            FROM Users
            WHERE userID = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Lists all users ordered by role, then name.
    pub async fn list_all(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT userID, name, password, latitude, longitude, type
            FROM Users
            ORDER BY type, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Overwrites every editable field of a user.
    ///
    /// The caller resolves keep-current input first; this method writes the
    /// values it is given after re-validating them.
    pub async fn update(&self, user: &User) -> DbResult<()> {
        validate_user_name(&user.name).map_err(CoreError::from)?;
        validate_password(&user.password).map_err(CoreError::from)?;
        validate_coordinate("latitude", user.latitude).map_err(CoreError::from)?;
        validate_coordinate("longitude", user.longitude).map_err(CoreError::from)?;

        debug!(user_id = user.user_id, "Updating user");

        let result = sqlx::query(
            r#"
            UPDATE Users
            SET name = ?2, password = ?3, latitude = ?4, longitude = ?5, type = ?6
            WHERE userID = ?1
            "#,
        )
        .bind(user.user_id)
        .bind(user.name.trim())
        .bind(&user.password)
        .bind(user.latitude)
        .bind(user.longitude)
        .bind(user.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::Rejected(CoreError::UserNotFound(user.user_id)));
        }

        info!(user_id = user.user_id, role = %user.role, "User updated");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::test_support::fixture;
    use retail_core::{CoreError, NewUser, Role, ValidationError};

    use crate::error::DbError;

    fn new_user(name: &str, latitude: f64, longitude: f64) -> NewUser {
        NewUser {
            name: name.to_string(),
            password: "pw".to_string(),
            latitude,
            longitude,
        }
    }

    #[tokio::test]
    async fn test_create_and_log_in() {
        let fx = fixture().await;
        let users = fx.db.users();

        let user = users.create(&new_user("Zed", 50.0, 50.0)).await.unwrap();
        assert_eq!(user.role, Role::Customer);

        let session = users.authenticate("Zed", "pw").await.unwrap().unwrap();
        assert_eq!(session.user_id, user.user_id);
        assert_eq!(session.role, Role::Customer);

        assert!(users.authenticate("Zed", "wrong").await.unwrap().is_none());
        assert!(users.authenticate("zed", "pw").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_insert_nothing() {
        let fx = fixture().await;
        let users = fx.db.users();
        let before = users.list_all().await.unwrap().len();

        for (lat, lon) in [(100.5, 10.0), (-1.0, 10.0), (10.0, 101.0)] {
            let result = users.create(&new_user("Far", lat, lon)).await;
            assert!(matches!(
                result,
                Err(DbError::Rejected(CoreError::Validation(
                    ValidationError::OutOfRange { .. }
                )))
            ));
        }

        assert_eq!(users.list_all().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_lowest_user_id_wins_on_duplicate_credentials() {
        let fx = fixture().await;
        let users = fx.db.users();

        let first = users.create(&new_user("Twin", 1.0, 1.0)).await.unwrap();
        let second = users.create(&new_user("Twin", 2.0, 2.0)).await.unwrap();
        assert!(second.user_id > first.user_id);

        let session = users.authenticate("Twin", "pw").await.unwrap().unwrap();
        assert_eq!(session.user_id, first.user_id);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let fx = fixture().await;
        let users = fx.db.users();

        let mut user = users.get_by_id(fx.customer.user_id).await.unwrap().unwrap();
        user.role = Role::Manager;
        user.latitude = 0.0;
        users.update(&user).await.unwrap();

        let stored = users.get_by_id(user.user_id).await.unwrap().unwrap();
        assert_eq!(stored, user);

        user.longitude = 150.0;
        assert!(users.update(&user).await.is_err());

        user.longitude = 1.0;
        user.user_id = 9_999;
        assert!(matches!(
            users.update(&user).await,
            Err(DbError::Rejected(CoreError::UserNotFound(9_999)))
        ));
    }

    #[tokio::test]
    async fn test_list_all_orders_by_role_then_name() {
        let fx = fixture().await;

        let users = fx.db.users().list_all().await.unwrap();
        let keys: Vec<(String, String)> = users
            .iter()
            .map(|u| (u.role.to_string(), u.name.clone()))
            .collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
