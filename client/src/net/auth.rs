//! Auth service over the hosted auth API.

#![allow(clippy::unused_async)]

use async_trait::async_trait;
use frontdesk::{AuthError, AuthService, BackendConfig, Session};
#[cfg(feature = "hydrate")]
use frontdesk::wire::{self, Grant};
#[cfg(feature = "hydrate")]
use gloo_net::http::Request;

#[cfg(feature = "hydrate")]
use super::http::send;
#[cfg(feature = "hydrate")]
use crate::util::clock::now_unix;

/// Password and refresh-token grants plus logout against `/auth/v1`.
#[derive(Clone, Debug)]
pub struct RestAuth {
    config: BackendConfig,
}

impl RestAuth {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }
}

#[cfg(feature = "hydrate")]
impl RestAuth {
    async fn grant(&self, grant: Grant, body: String) -> Result<Session, AuthError> {
        let request = Request::post(&self.config.token_url(grant))
            .header("apikey", &self.config.anon_key)
            .header("Content-Type", "application/json")
            .body(body);
        let reply = send(request).await.map_err(AuthError::Transport)?;
        if !reply.ok {
            return Err(wire::auth_rejection(reply.status, &reply.body));
        }
        wire::parse_session(&reply.body, now_unix())
    }
}

#[async_trait(?Send)]
impl AuthService for RestAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            self.grant(Grant::Password, wire::password_grant_body(email, password)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.config, email, password);
            Err(AuthError::Unavailable)
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            self.grant(Grant::RefreshToken, wire::refresh_grant_body(refresh_token)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh_token;
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let request = Request::post(&self.config.logout_url())
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &wire::bearer(access_token))
                .build();
            let reply = send(request).await.map_err(AuthError::Transport)?;
            if !reply.ok {
                return Err(wire::auth_rejection(reply.status, &reply.body));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access_token;
            Err(AuthError::Unavailable)
        }
    }
}
