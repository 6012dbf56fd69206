//! GitHub API facade using reqwest for authenticated REST calls.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::*;
use reqwest::{
    Client, Method, Response, StatusCode, Url,
    header::{HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

use crate::{
    error::{HubcapError, Result},
    github::{
        action::Action,
        config::{
            API_ACCEPT_HEADER, DEFAULT_PAGE_SIZE, REQUEST_TIMEOUT_SECS,
            RemoteConfig, USER_AGENT,
        },
        traits::RepoOps,
        types::{CommentSummary, ListKind, Summary},
    },
};

/// GitHub facade translating the action vocabulary into correctly shaped
/// REST calls. Stateless between calls; the credential handle is
/// immutable after construction, so concurrent use is safe.
pub struct GithubClient {
    config: RemoteConfig,
    base_url: Url,
    client: Client,
}

impl GithubClient {
    /// Create a client with bearer token authentication. Validates the
    /// configuration locally; no network call is made until the first
    /// action executes.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let token = config.token.expose_secret();

        let mut headers = HeaderMap::new();

        let mut token_value = HeaderValue::from_str(
            format!("Bearer {}", token).as_str(),
        )?;
        token_value.set_sensitive(true);

        headers.append("Authorization", token_value);
        headers.append("Accept", HeaderValue::from_static(API_ACCEPT_HEADER));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let base_url = Url::parse(&config.base_url)?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Fetch repository metadata. Doubles as the startup capability
    /// probe: the result (default branch, open issue count) is resolved
    /// once and handed down, never cached in mutable state.
    pub async fn repo_info(&self) -> Result<Value> {
        let url = self.base_url.join(&format!(
            "repos/{}/{}",
            self.config.owner, self.config.repo
        ))?;

        debug!("github api: GET {}", url.path());

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.rejection("repo", response).await);
        }

        decode_payload(status, response.text().await?)
    }

    fn list_url(&self, kind: ListKind) -> Result<Url> {
        let mut url = self.base_url.join(&format!(
            "repos/{}/{}/{}",
            self.config.owner,
            self.config.repo,
            kind.endpoint()
        ))?;

        url.query_pairs_mut()
            .append_pair("state", "open")
            .append_pair("per_page", &DEFAULT_PAGE_SIZE.to_string());

        Ok(url)
    }

    /// Follow `Link: rel="next"` pagination until exhausted or the cap
    /// is reached, producing one logical sequence in page order.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        action: &str,
        first: Url,
        cap: Option<usize>,
    ) -> Result<Vec<T>> {
        let mut items: Vec<T> = vec![];
        let mut next = Some(first);

        while let Some(url) = next {
            debug!("github api: GET {}", url.path());

            let response = self.client.get(url).send().await?;
            let status = response.status();

            if !status.is_success() {
                return Err(self.rejection(action, response).await);
            }

            next = next_page_url(response.headers());

            let page: Vec<T> = response.json().await?;
            items.extend(page);

            if let Some(cap) = cap
                && items.len() >= cap
            {
                items.truncate(cap);
                break;
            }
        }

        Ok(items)
    }

    async fn send(&self, action: &Action) -> Result<Response> {
        let url = self.base_url.join(&action.path(&self.config))?;
        let method = action.method();

        debug!("github api: {} {}", method, url.path());

        let mut request = self.client.request(method.clone(), url);

        let carries_body = method == Method::POST
            || method == Method::PUT
            || method == Method::PATCH;

        if carries_body && let Some(body) = action.body() {
            request = request.json(&body);
        }

        Ok(request.send().await?)
    }

    /// Classify a non-2xx response. A 403/429 with exhausted rate-limit
    /// headers is distinguished from other rejections so callers can
    /// back off until the reported reset time.
    async fn rejection(
        &self,
        action: &str,
        response: Response,
    ) -> HubcapError {
        let status = response.status();
        let headers = response.headers().clone();

        let throttled_status = status == StatusCode::FORBIDDEN
            || status == StatusCode::TOO_MANY_REQUESTS;

        let exhausted = header_value(&headers, "x-ratelimit-remaining")
            .is_some_and(|v| v == "0");

        let retry_after = header_value(&headers, "retry-after")
            .and_then(|v| v.parse::<i64>().ok());

        let rate_limited =
            throttled_status && (exhausted || retry_after.is_some());

        let reset_at = if rate_limited {
            header_value(&headers, "x-ratelimit-reset")
                .and_then(|v| v.parse::<i64>().ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .or_else(|| {
                    retry_after
                        .map(|secs| Utc::now() + chrono::Duration::seconds(secs))
                })
        } else {
            None
        };

        let message = response.text().await.unwrap_or_default();

        if rate_limited {
            warn!(
                "rate limited on {action}: reset at {:?}",
                reset_at
            );
        }

        HubcapError::Rejected {
            status: status.as_u16(),
            message,
            action: action.to_string(),
            rate_limited,
            reset_at,
        }
    }
}

#[async_trait]
impl RepoOps for GithubClient {
    async fn execute(&self, action: Action) -> Result<Value> {
        action.validate()?;

        // listings span multiple HTTP calls; everything else is atomic
        // at the single-call granularity
        if let Action::List { kind } = &action {
            let items: Vec<Value> = self
                .get_paginated(action.name(), self.list_url(*kind)?, None)
                .await?;
            return Ok(Value::Array(items));
        }

        let response = self.send(&action).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.rejection(action.name(), response).await);
        }

        decode_payload(status, response.text().await?)
    }

    async fn list_open(
        &self,
        kind: ListKind,
        cap: Option<usize>,
    ) -> Result<Vec<Summary>> {
        let mut items: Vec<Summary> = self
            .get_paginated("list", self.list_url(kind)?, cap)
            .await?;

        // the issues endpoint also returns pull requests
        if kind == ListKind::Issues {
            items.retain(|item| !item.is_pull_request());
        }

        Ok(items)
    }

    async fn list_comments(
        &self,
        number: u64,
    ) -> Result<Vec<CommentSummary>> {
        if number == 0 {
            return Err(HubcapError::invalid_request(
                "issue or pull request number must be positive",
            ));
        }

        let mut url = self.base_url.join(&format!(
            "repos/{}/{}/issues/{}/comments",
            self.config.owner, self.config.repo, number
        ))?;

        url.query_pairs_mut()
            .append_pair("per_page", &DEFAULT_PAGE_SIZE.to_string());

        self.get_paginated("comments", url, None).await
    }
}

fn header_value<'a>(
    headers: &'a HeaderMap,
    name: &str,
) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Decode a successful response body. Bodyless successes (workflow
/// dispatch returns 204) yield a small status payload instead.
fn decode_payload(status: StatusCode, text: String) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(json!({ "status": status.as_u16() }));
    }

    Ok(serde_json::from_str(&text)
        .unwrap_or_else(|_| json!({ "status": status.as_u16() })))
}

/// Extract the rel="next" target from a Link header, if present.
fn next_page_url(headers: &HeaderMap) -> Option<Url> {
    let link = header_value(headers, "link")?;

    for part in link.split(',') {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();

        let is_next = segments.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });

        if is_next {
            let target =
                target.strip_prefix('<')?.strip_suffix('>')?;
            return Url::parse(target).ok();
        }
    }

    None
}
