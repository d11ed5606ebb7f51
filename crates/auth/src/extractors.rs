//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthConfig: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};
use bytes_common::crypto::constant_time_eq;

use crate::config::AuthConfig;
use crate::error::AuthError;

fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    header_str
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or(AuthError::InvalidAuthorizationFormat)
}

fn bearer_token(parts: &Parts) -> Result<String, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?;
    extract_bearer_token(header)
}

/// Who the request authenticated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Bot,
    Admin,
}

/// Authenticated as the chat-gateway bot process.
#[derive(Debug)]
pub struct BotAuth;

impl<S> FromRequestParts<S> for BotAuth
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);
        let token = bearer_token(parts)?;

        if constant_time_eq(&token, &config.bot_api_key) {
            Ok(BotAuth)
        } else {
            Err(AuthError::InvalidApiKey)
        }
    }
}

/// Authenticated as guild administration tooling.
#[derive(Debug)]
pub struct AdminAuth;

impl<S> FromRequestParts<S> for AdminAuth
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);
        let token = bearer_token(parts)?;

        if constant_time_eq(&token, &config.admin_api_key) {
            Ok(AdminAuth)
        } else {
            Err(AuthError::InsufficientPrivilege)
        }
    }
}

/// Accepts either the bot key or the admin key.
///
/// Used for read endpoints the chat-gateway and admin tooling both call.
#[derive(Debug)]
pub struct AnyAuth(pub Principal);

impl<S> FromRequestParts<S> for AnyAuth
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);
        let token = bearer_token(parts)?;

        if constant_time_eq(&token, &config.bot_api_key) {
            Ok(AnyAuth(Principal::Bot))
        } else if constant_time_eq(&token, &config.admin_api_key) {
            Ok(AnyAuth(Principal::Admin))
        } else {
            Err(AuthError::InvalidApiKey)
        }
    }
}
