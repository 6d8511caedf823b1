use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::PartyId,
    protocol::{Acknowledgement, Envelope, Guest, NewParty, Party, Rsvp},
};
use tracing::debug;

use crate::{config::ApiConfig, error::ClientError};

const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Transport for the events API. State handling lives in [`crate::PartyPlanner`].
#[async_trait]
pub trait PartyApi: Send + Sync {
    async fn list_parties(&self) -> Result<Vec<Party>, ClientError>;
    async fn get_party(&self, party_id: PartyId) -> Result<Party, ClientError>;
    async fn list_rsvps(&self) -> Result<Vec<Rsvp>, ClientError>;
    async fn list_guests(&self) -> Result<Vec<Guest>, ClientError>;
    async fn create_party(&self, party: &NewParty) -> Result<(), ClientError>;
    async fn delete_party(&self, party_id: PartyId) -> Result<(), ClientError>;
}

pub struct HttpPartyApi {
    http: Client,
    api_root: String,
}

impl HttpPartyApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            api_root: config.api_root()?,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_root)
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, ClientError> {
        request.send().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn read_body(url: &str, response: Response) -> Result<String, ClientError> {
        response.text().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        let response = self.send(&url, self.http.get(&url)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        let body = Self::read_body(&url, response).await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|source| ClientError::Decode { url: url.clone(), source })?;
        debug!(%url, "api: fetched");
        Ok(envelope.data)
    }
}

#[async_trait]
impl PartyApi for HttpPartyApi {
    async fn list_parties(&self) -> Result<Vec<Party>, ClientError> {
        self.fetch_data("/events").await
    }

    async fn get_party(&self, party_id: PartyId) -> Result<Party, ClientError> {
        self.fetch_data(&format!("/events/{party_id}")).await
    }

    async fn list_rsvps(&self) -> Result<Vec<Rsvp>, ClientError> {
        self.fetch_data("/rsvps").await
    }

    async fn list_guests(&self) -> Result<Vec<Guest>, ClientError> {
        self.fetch_data("/guests").await
    }

    async fn create_party(&self, party: &NewParty) -> Result<(), ClientError> {
        let url = self.url("/events");
        let body = serde_json::to_vec(party)?;
        let request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(body);
        let response = self.send(&url, request).await?;
        let status = response.status();
        let body = Self::read_body(&url, response).await?;
        if status.is_success() && body.trim().is_empty() {
            return Ok(());
        }

        match serde_json::from_str::<Acknowledgement>(&body) {
            Ok(ack) if ack.is_rejected() => Err(ClientError::Rejected {
                message: ack.error_message(),
            }),
            _ if !status.is_success() => Err(ClientError::Status { url, status }),
            Ok(_) => Ok(()),
            Err(source) => Err(ClientError::Decode { url, source }),
        }
    }

    async fn delete_party(&self, party_id: PartyId) -> Result<(), ClientError> {
        let url = self.url(&format!("/events/{party_id}"));
        let response = self.send(&url, self.http.delete(&url)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
