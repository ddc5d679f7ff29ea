//! Admin panel: user table, activity logs and the contact-message inbox.
//!
//! Access checks here only spare a round trip; the backend enforces
//! authorization on every route.

use super::Handlers;
use crate::{
    api::{
        read_json,
        types::{AccessRequest, ActivityLogEntry, InboxMessage, UserRow},
        AppError,
    },
    state::{AccessLevel, StateStore},
    validation::is_valid_date_format,
};
use reqwest::Method;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

impl<S: StateStore> Handlers<S> {
    fn require_admin(&self) -> Result<AccessLevel, AppError> {
        let session = self.sync.session();
        if session.logged_in && session.access.is_admin() {
            Ok(session.access)
        } else {
            Err(AppError::Forbidden(
                "Administrator access required.".to_string(),
            ))
        }
    }

    /// # Errors
    /// `Forbidden` without admin access, `Http`/`Parse` on server trouble.
    #[instrument(skip_all)]
    pub async fn list_users(&self) -> Result<Vec<UserRow>, AppError> {
        self.require_admin()?;

        let response = self.api.send(Method::GET, "/v1/admin/users").await?;
        let response = self.authorized(response).await?;
        read_json(response).await
    }

    /// Changes a user's access level. Super admins only.
    ///
    /// # Errors
    /// `Forbidden` for anyone else, `Http` if the server refuses.
    #[instrument(skip(self))]
    pub async fn set_user_access(&self, id: Uuid, access: AccessLevel) -> Result<(), AppError> {
        if self.require_admin()? != AccessLevel::SuperAdmin {
            return Err(AppError::Forbidden(
                "Only super admins can change access levels.".to_string(),
            ));
        }

        let response = self
            .api
            .send_json(
                Method::PATCH,
                &format!("/v1/admin/users/{id}"),
                &AccessRequest { access },
            )
            .await?;
        self.authorized(response).await?;
        info!(%id, %access, "access level changed");
        Ok(())
    }

    /// # Errors
    /// `Forbidden` without admin access, `Http` if the server refuses.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        self.require_admin()?;

        let response = self
            .api
            .send(Method::DELETE, &format!("/v1/admin/users/{id}"))
            .await?;
        self.authorized(response).await?;
        info!(%id, "user deleted");
        Ok(())
    }

    /// Activity log, optionally bounded by inclusive `YYYY-MM-DD` dates.
    ///
    /// # Errors
    /// `Validation` for malformed or inverted dates.
    #[instrument(skip(self))]
    pub async fn activity_logs(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<ActivityLogEntry>, AppError> {
        self.require_admin()?;
        check_date_range(from, to)?;

        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from", from));
        }
        if let Some(to) = to {
            query.push(("to", to));
        }

        let response = self
            .api
            .send_query(Method::GET, "/v1/admin/activity", &query)
            .await?;
        let response = self.authorized(response).await?;
        read_json(response).await
    }

    /// # Errors
    /// `Forbidden` without admin access.
    #[instrument(skip_all)]
    pub async fn list_messages(&self) -> Result<Vec<InboxMessage>, AppError> {
        self.require_admin()?;

        let response = self.api.send(Method::GET, "/v1/admin/messages").await?;
        let response = self.authorized(response).await?;
        read_json(response).await
    }

    /// # Errors
    /// `Forbidden` without admin access.
    #[instrument(skip(self))]
    pub async fn mark_message_read(&self, id: Uuid) -> Result<(), AppError> {
        self.require_admin()?;

        let response = self
            .api
            .send_json(
                Method::PATCH,
                &format!("/v1/admin/messages/{id}"),
                &json!({ "read": true }),
            )
            .await?;
        self.authorized(response).await?;
        Ok(())
    }

    /// # Errors
    /// `Forbidden` without admin access.
    #[instrument(skip(self))]
    pub async fn delete_message(&self, id: Uuid) -> Result<(), AppError> {
        self.require_admin()?;

        let response = self
            .api
            .send(Method::DELETE, &format!("/v1/admin/messages/{id}"))
            .await?;
        self.authorized(response).await?;
        Ok(())
    }
}

/// Both bounds must be `YYYY-MM-DD`; with both present, `from` may not come
/// after `to`. The fixed-width format makes string order match date order.
fn check_date_range(from: Option<&str>, to: Option<&str>) -> Result<(), AppError> {
    for date in [from, to].into_iter().flatten() {
        if !is_valid_date_format(date) {
            return Err(AppError::Validation(
                "Dates must use the YYYY-MM-DD format.".to_string(),
            ));
        }
    }

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::Validation(
                "Start date must not be after end date.".to_string(),
            ));
        }
    }

    Ok(())
}
