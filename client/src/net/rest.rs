//! Patient store over the hosted data API.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to `StoreError::Transport`, non-2xx replies to
//! `StoreError::Rejected` with the API's message. Without the `hydrate`
//! feature every call is `StoreError::Unavailable`.

#![allow(clippy::unused_async)]

use async_trait::async_trait;
use frontdesk::{BackendConfig, Patient, PatientFields, PatientId, PatientStore, StoreError};
#[cfg(feature = "hydrate")]
use frontdesk::wire;
#[cfg(feature = "hydrate")]
use gloo_net::http::{Request, RequestBuilder};

#[cfg(feature = "hydrate")]
use super::http::send;

/// Data access scoped to one signed-in session.
#[derive(Clone, Debug)]
pub struct RestPatientStore {
    config: BackendConfig,
    access_token: String,
}

impl RestPatientStore {
    #[must_use]
    pub fn new(config: BackendConfig, access_token: String) -> Self {
        Self { config, access_token }
    }
}

#[cfg(feature = "hydrate")]
impl RestPatientStore {
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &wire::bearer(&self.access_token))
    }

    fn writing(&self, builder: RequestBuilder) -> RequestBuilder {
        self.authorized(builder)
            .header("Content-Type", "application/json")
            .header("Prefer", wire::PREFER_REPRESENTATION)
    }

    /// Body of a 2xx reply.
    async fn exchange(&self, request: Result<Request, gloo_net::Error>) -> Result<String, StoreError> {
        let reply = send(request).await.map_err(StoreError::Transport)?;
        if !reply.ok {
            return Err(wire::store_rejection(reply.status, &reply.body));
        }
        Ok(reply.body)
    }
}

#[async_trait(?Send)]
impl PatientStore for RestPatientStore {
    async fn list(&self) -> Result<Vec<Patient>, StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let body = self.exchange(self.authorized(Request::get(&self.config.list_url())).build()).await?;
            wire::parse_rows(&body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.config, &self.access_token);
            Err(StoreError::Unavailable)
        }
    }

    async fn insert(&self, fields: &PatientFields) -> Result<Patient, StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self.writing(Request::post(&self.config.insert_url())).body(wire::insert_body(fields));
            let body = self.exchange(request).await?;
            wire::parse_inserted(&body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = fields;
            Err(StoreError::Unavailable)
        }
    }

    async fn update(&self, id: &PatientId, fields: &PatientFields) -> Result<Patient, StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self.writing(Request::patch(&self.config.row_url(id))).body(wire::update_body(fields));
            let body = self.exchange(request).await?;
            wire::parse_updated(&body, id)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, fields);
            Err(StoreError::Unavailable)
        }
    }

    async fn delete(&self, id: &PatientId) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            self.exchange(self.authorized(Request::delete(&self.config.row_url(id))).build()).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(StoreError::Unavailable)
        }
    }
}
