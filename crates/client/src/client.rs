use std::{fmt, time::Duration};

use reqwest::{
    StatusCode, Url,
    header::{ACCEPT, CONTENT_RANGE},
};
use serde::de::DeserializeOwned;

use crate::{ClientError, ContentRange, Result};

const DEFAULT_PAGE_SIZE: u32 = 25;
const DEFAULT_MAX_ATTEMPTS: u32 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables of the paginated fetcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Records requested per page (`take`).
    pub page_size: u32,
    /// Attempts per page while the server keeps answering 429.
    pub max_attempts: u32,
    /// Pause between throttled attempts. Zero retries immediately.
    pub retry_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::ZERO,
        }
    }
}

/// Exact-match filter sent as `filter=<field>=<value>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    field: String,
    value: String,
}

impl Filter {
    pub fn eq(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

struct Page<T> {
    records: Vec<T>,
    range: Option<ContentRange>,
}

/// Authenticated client for the directory API.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
    policy: FetchPolicy,
}

impl ApiClient {
    /// Return a builder for `ApiClient`.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Returns a copy of this client that sends `token` as bearer credential.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|err| ClientError::InvalidBaseUrl(format!("{endpoint}: {err}")))
    }

    /// Fetches every record of `endpoint` matching `filter`, across all pages.
    ///
    /// Pages are requested with `skip`/`take`. The cursor of the next page is
    /// the `end + 1` reported by the previous page's `Content-Range` header,
    /// so the server decides the actual page boundaries. The stream ends when
    /// the header is missing, reports `items */<total>`, or the cursor reaches
    /// `total`. Records are returned in server order; nothing is cached.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut skip = 0u64;

        loop {
            let page = self.fetch_page::<T>(endpoint, filter, skip).await?;
            tracing::debug!(
                endpoint,
                skip,
                received = page.records.len(),
                range = ?page.range,
                total = ?page.range.map(ContentRange::total),
                "fetched page"
            );
            records.extend(page.records);

            let Some(range) = page.range else {
                break;
            };
            let Some(next) = range.next_skip() else {
                break;
            };
            if next <= skip {
                return Err(ClientError::MalformedContentRange(format!(
                    "{range} does not advance past skip {skip}"
                )));
            }
            skip = next;
        }

        Ok(records)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        filter: Option<&Filter>,
        skip: u64,
    ) -> Result<Page<T>> {
        let mut query = vec![
            ("skip", skip.to_string()),
            ("take", self.policy.page_size.to_string()),
        ];
        if let Some(filter) = filter {
            query.push(("filter", filter.to_string()));
        }

        let response = self.get_with_retry(endpoint, &query).await?;

        let range = response
            .headers()
            .get(CONTENT_RANGE)
            .map(|value| {
                value
                    .to_str()
                    .map_err(|_| ClientError::MalformedContentRange(format!("{value:?}")))?
                    .parse::<ContentRange>()
            })
            .transpose()?;

        let records = response
            .json::<Vec<T>>()
            .await
            .map_err(ClientError::Decode)?;

        Ok(Page { records, range })
    }

    /// Sends a GET, retrying while the server answers 429 Too Many Requests.
    async fn get_with_retry(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response> {
        let url = self.endpoint_url(endpoint)?;

        for attempt in 1..=self.policy.max_attempts {
            let mut request = self
                .http
                .get(url.clone())
                .header(ACCEPT, "application/json")
                .query(query);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await.map_err(ClientError::Transport)?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }
            if status != StatusCode::TOO_MANY_REQUESTS {
                return Err(ClientError::Status {
                    status,
                    endpoint: endpoint.to_string(),
                });
            }

            tracing::warn!(
                endpoint,
                attempt,
                max_attempts = self.policy.max_attempts,
                "throttled by server"
            );
            if !self.policy.retry_delay.is_zero() {
                tokio::time::sleep(self.policy.retry_delay).await;
            }
        }

        Err(ClientError::RetriesExhausted {
            endpoint: endpoint.to_string(),
            attempts: self.policy.max_attempts,
        })
    }
}

#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: String,
    token: Option<String>,
    policy: FetchPolicy,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// API root, e.g. `http://127.0.0.1:8080/api/`. A trailing `/` is added
    /// when missing so endpoints resolve below it.
    pub fn base_url(mut self, base_url: &str) -> ApiClientBuilder {
        self.base_url = base_url.to_string();
        self
    }

    pub fn token(mut self, token: &str) -> ApiClientBuilder {
        self.token = Some(token.to_string());
        self
    }

    pub fn policy(mut self, policy: FetchPolicy) -> ApiClientBuilder {
        self.policy = policy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> ApiClientBuilder {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut raw = self.base_url;
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url =
            Url::parse(&raw).map_err(|err| ClientError::InvalidBaseUrl(format!("{raw}: {err}")))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(ClientError::Transport)?;

        let policy = FetchPolicy {
            page_size: self.policy.page_size.max(1),
            max_attempts: self.policy.max_attempts.max(1),
            retry_delay: self.policy.retry_delay,
        };

        Ok(ApiClient {
            base_url,
            http,
            token: self.token,
            policy,
        })
    }
}
