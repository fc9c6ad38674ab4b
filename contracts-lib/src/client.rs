//! Main ContractsClient

use std::sync::Arc;
use std::time::Duration;

use chrono::SecondsFormat;
use chrono::Utc;
use log::debug;
use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::ContractQuery;
use crate::api::LoadingTracker;
use crate::auth::NoToken;
use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Contract;
use crate::model::ContractStats;
use crate::model::ContractStatus;
use crate::model::StatusChange;

const CONTRACTS_PATH: &str = "contratos";

/// Client for the contracts REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use contracts_lib::{ContractsClient, auth::StaticTokenProvider};
/// use contracts_lib::api::ContractQuery;
///
/// let client = ContractsClient::builder()
///     .url("http://localhost:3000")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build();
///
/// let contracts = client.list(&ContractQuery::new().search("limpieza")).await?;
/// ```
#[derive(Clone)]
pub struct ContractsClient {
    inner: Arc<ContractsClientInner>,
}

struct ContractsClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
    loading: LoadingTracker,
}

impl std::fmt::Debug for ContractsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractsClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl ContractsClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ContractsClientBuilder<Missing> {
        ContractsClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Tracker of this client's in-flight requests.
    pub fn loading(&self) -> &LoadingTracker {
        &self.inner.loading
    }

    /// Lists contracts.
    ///
    /// Status, end date, sort and paging are applied by the server; the
    /// search text is applied to the response locally.
    pub async fn list(&self, query: &ContractQuery) -> Result<Vec<Contract>, Error> {
        let mut url = self.endpoint(&[])?;
        let pairs = query.to_query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        let contracts: Vec<Contract> = self.send_json(Method::GET, url, None::<&()>).await?;
        Ok(query.apply_search(contracts))
    }

    /// Fetches one contract.
    pub async fn get(&self, id: &str) -> Result<Contract, Error> {
        let url = self.endpoint(&[id])?;
        self.send_json(Method::GET, url, None::<&()>).await
    }

    /// Creates a contract from a full or partial body.
    pub async fn create<T: Serialize + ?Sized>(&self, contract: &T) -> Result<Contract, Error> {
        let url = self.endpoint(&[])?;
        self.send_json(Method::POST, url, Some(contract)).await
    }

    /// Replaces a contract.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: &str,
        contract: &T,
    ) -> Result<Contract, Error> {
        let url = self.endpoint(&[id])?;
        self.send_json(Method::PUT, url, Some(contract)).await
    }

    /// Applies a partial update.
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &T,
    ) -> Result<Contract, Error> {
        let url = self.endpoint(&[id])?;
        self.send_json(Method::PATCH, url, Some(changes)).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let url = self.endpoint(&[id])?;
        self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }

    /// Moves a contract to `status`, recording `user` in its history.
    pub async fn change_status(
        &self,
        id: &str,
        status: ContractStatus,
        user: &str,
    ) -> Result<Contract, Error> {
        let body = StatusPatch {
            status,
            history: StatusChange {
                status: status.as_str().to_string(),
                date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                user: user.to_string(),
            },
        };
        self.patch(id, &body).await
    }

    /// Fetches contract counts by status.
    pub async fn stats(&self) -> Result<ContractStats, Error> {
        let url = self.endpoint(&["stats"])?;
        self.send_json(Method::GET, url, None::<&()>).await
    }

    /// Builds `<base>/contratos[/segment...]`, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.inner.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.inner.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.clone()))?
            .pop_if_empty()
            .push(CONTRACTS_PATH)
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<String, Error> {
        let _loading = self.inner.loading.start();
        debug!("{} {}", method, url);

        let mut request = self.inner.http_client.request(method, url);
        if let Some(token) = self.inner.token_provider.get_token().await? {
            request = request.bearer_auth(&token.access_token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_transport(e))?;

        if status.is_success() {
            Ok(text)
        } else {
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            Err(Error::Api(ApiError::http(status.as_u16(), message)))
        }
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, Error> {
        let text = self.send(method, url, body).await?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), text)))
    }

    fn map_transport(&self, e: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        }
    }
}

#[derive(Serialize)]
struct StatusPatch {
    #[serde(rename = "estado")]
    status: ContractStatus,
    #[serde(rename = "historial_estados")]
    history: StatusChange,
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ContractsClient`].
///
/// The base URL is required and checked at compile time. Without a token
/// provider, requests are sent unauthenticated.
pub struct ContractsClientBuilder<U> {
    url: U,
    token_provider: Option<Arc<dyn TokenProvider>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    loading: Option<LoadingTracker>,
}

impl ContractsClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
            loading: None,
        }
    }

    /// Sets the API base URL, e.g. `http://localhost:3000`.
    pub fn url(self, url: impl Into<String>) -> ContractsClientBuilder<Set<String>> {
        ContractsClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            loading: self.loading,
        }
    }
}

impl Default for ContractsClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ContractsClientBuilder<U> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(mut self, provider: T) -> Self {
        self.token_provider = Some(Arc::new(provider));
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Shares a loading tracker, e.g. one owned by the UI.
    pub fn loading_tracker(mut self, tracker: LoadingTracker) -> Self {
        self.loading = Some(tracker);
        self
    }
}

impl ContractsClientBuilder<Set<String>> {
    /// Builds the [`ContractsClient`].
    pub fn build(self) -> ContractsClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().unwrap_or_default()
        });

        ContractsClient {
            inner: Arc::new(ContractsClientInner {
                base_url: self.url.0,
                token_provider: self.token_provider.unwrap_or_else(|| Arc::new(NoToken)),
                http_client,
                timeout: self.timeout,
                loading: self.loading.unwrap_or_default(),
            }),
        }
    }
}
