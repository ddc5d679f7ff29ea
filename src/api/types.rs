//! Request and response payloads for the account backend.
//!
//! Session-shaped responses keep their fields as raw JSON values: some
//! upstream payloads stringify booleans, and any shape problem must reach the
//! synchronizer (which resets state) instead of failing at decode time.
//! Request types holding passwords, codes or tokens deliberately do not
//! implement `Debug`.

use crate::state::AccessLevel;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub email: Value,
    #[serde(default)]
    pub access: Value,
    #[serde(default)]
    pub acct_verified: Value,
    #[serde(default)]
    pub mfa_enabled: Value,
    #[serde(default)]
    pub preferences: Option<PreferencesPayload>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PreferencesPayload {
    #[serde(default)]
    pub mailing_list: Value,
    #[serde(default)]
    pub night_mode: Value,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecoveryPayload {
    #[serde(default)]
    pub recovery_email_added: Value,
    #[serde(default)]
    pub recovery_email_preview: Value,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NamePayload {
    #[serde(default)]
    pub name: Value,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MfaPayload {
    #[serde(default)]
    pub mfa_enabled: Value,
}

#[derive(Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub user_agent: &'a str,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub user_agent: &'a str,
}

#[derive(Serialize)]
pub struct OtpLoginRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NameRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

/// Email plus password confirmation (email change, recovery email).
#[derive(Serialize)]
pub struct ConfirmedEmailRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct PasswordChangeRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Serialize)]
pub struct PasswordResetRequest<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct OtpRequest<'a> {
    pub otp: &'a str,
}

#[derive(Serialize)]
pub struct PasswordRequest<'a> {
    pub password: &'a str,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PreferencesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_mode: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ContactRequest<'a> {
    pub email: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AccessRequest {
    pub access: AccessLevel,
}

/// One row of the admin user table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub access: AccessLevel,
    pub acct_verified: bool,
    pub mfa_enabled: bool,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub action: String,
    pub user_email: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    pub id: Uuid,
    pub email: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}
