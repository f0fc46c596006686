//! Remote API client
//!
//! Two request shapes share one timeout policy:
//! - the informational fetch ([`ApiClient::get_info`]) that looks up a page
//!   and rebuilds its cache record
//! - mutating requests ([`ApiClient::api_transmit`]) used by the post actions
//!   in [`actions`]
//!
//! The timeout comes from the `timeoutLength` setting, read on every call.
//! No request is ever retried automatically.

pub mod actions;
pub mod schema;
pub mod transport;

pub use actions::VoteAction;
pub use schema::{Listing, MutationResponse, Submission};
pub use transport::{ApiRequest, ApiResponse, Method, Transport, UreqTransport};

use crate::badge::{BadgeController, TabId};
use crate::cache::{CacheRecord, PageCache};
use crate::config::schema::ApiConfig;
use crate::error::{HarmlessError, HarmlessResult};
use crate::i18n;
use crate::store::{Settings, Store, Stores};
use crate::util;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Characters left alone by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which lookup endpoint a page URL is sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The page is a submission's comments page; look it up by id
    ById { id: String },
    /// Any other page; look it up by URL
    ByUrl,
}

/// Client for one reddit-powered site
pub struct ApiClient {
    api: ApiConfig,
    transport: Arc<dyn Transport>,
    cache: PageCache,
    settings: Arc<Store>,
    comments_pattern: Regex,
}

impl ApiClient {
    /// Create a client for the site in `api`, backed by `stores`
    pub fn new(api: ApiConfig, transport: Arc<dyn Transport>, stores: &Stores) -> HarmlessResult<Self> {
        let pattern = format!(
            r"^https?://{}(/r/(.+?))?/comments/(.+?)/.*",
            util::regex_escape(&api.domain)
        );
        let comments_pattern = Regex::new(&pattern)
            .map_err(|e| HarmlessError::User(format!("Invalid API domain {}: {}", api.domain, e)))?;

        Ok(Self {
            api,
            transport,
            cache: PageCache::new(Arc::clone(&stores.cache)),
            settings: Arc::clone(&stores.settings),
            comments_pattern,
        })
    }

    /// Page cache this client writes to
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Site configuration
    pub fn api_config(&self) -> &ApiConfig {
        &self.api
    }

    /// Current settings snapshot
    pub fn settings(&self) -> HarmlessResult<Settings> {
        Settings::load(&self.settings)
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api.origin(), path)
    }

    /// Decide how `page_url` is looked up
    pub fn route(&self, page_url: &str) -> Route {
        match self.comments_pattern.captures(page_url) {
            Some(caps) => Route::ById {
                id: caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_default(),
            },
            None => Route::ByUrl,
        }
    }

    /// Lookup request for `page_url`
    pub fn lookup_request(&self, page_url: &str) -> ApiRequest {
        match self.route(page_url) {
            Route::ById { id } => ApiRequest::get(self.endpoint(&format!("/by_id/t3_{}.json", id))),
            Route::ByUrl => ApiRequest::get(self.endpoint(&format!(
                "/api/info.json?url={}",
                encode_uri_component(page_url)
            ))),
        }
    }

    /// Look up `page_url`, cache the result and update the badge for `tab_id`.
    ///
    /// The badge shows `Loading` while the request is in flight, then the
    /// populated state on success or `Error` on failure. The error is also
    /// returned to the caller.
    pub async fn get_info(
        &self,
        page_url: &str,
        tab_id: TabId,
        badge: &BadgeController,
    ) -> HarmlessResult<CacheRecord> {
        badge.set_loading(tab_id);

        match self.fetch(page_url).await {
            Ok(record) => {
                badge.set_for(page_url, tab_id)?;
                Ok(record)
            }
            Err(e) => {
                warn!("Lookup failed for {}: {}", page_url, e);
                badge.set_error(tab_id, &error_text(&e));
                Err(e)
            }
        }
    }

    async fn fetch(&self, page_url: &str) -> HarmlessResult<CacheRecord> {
        let request = self.lookup_request(page_url);
        let is_comments_page = matches!(self.route(page_url), Route::ById { .. });
        info!("Looking up {}", page_url);

        let response = self.execute(request).await?;
        if response.status != 200 {
            return Err(HarmlessError::Http {
                status: response.status,
            });
        }

        let listing: Listing = schema::parse_object(&response.body)?;
        self.cache.set_modhash(listing.data.modhash.as_deref())?;

        let record = CacheRecord::from_listing(page_url, listing, is_comments_page, util::epoch());
        self.cache.put_record(page_url, &record)?;

        debug!("Cached {} submission(s) for {}", record.count, page_url);
        Ok(record)
    }

    /// Send a mutating request and validate its response.
    ///
    /// A 200 response that says the user is not logged in is
    /// [`HarmlessError::AuthRequired`]; any other status is
    /// [`HarmlessError::Http`].
    pub async fn api_transmit(
        &self,
        method: Method,
        url: &str,
        form: Vec<(String, String)>,
    ) -> HarmlessResult<MutationResponse> {
        let request = ApiRequest {
            method,
            url: url.to_string(),
            form,
            timeout: None,
        };

        let response = self.execute(request).await?;
        if response.status != 200 {
            return Err(HarmlessError::Http {
                status: response.status,
            });
        }

        let parsed: MutationResponse = schema::parse_object(&response.body)?;
        if parsed.login_required() {
            return Err(HarmlessError::AuthRequired);
        }
        Ok(parsed)
    }

    /// Run one request under the configured timeout
    async fn execute(&self, mut request: ApiRequest) -> HarmlessResult<ApiResponse> {
        let settings = self.settings()?;

        match settings.request_timeout() {
            Some(limit) => {
                request.timeout = Some(limit);
                tokio::time::timeout(limit, self.transport.send(request))
                    .await
                    .map_err(|_| HarmlessError::Timeout {
                        secs: settings.timeout_length,
                    })?
            }
            None => self.transport.send(request).await,
        }
    }

    /// Form fields shared by every mutating request
    fn token_field(&self) -> (String, String) {
        let modhash = self.cache.modhash().unwrap_or_else(|| {
            warn!("No modhash cached yet; sending request without a session token");
            String::new()
        });
        ("uh".to_string(), modhash)
    }
}

/// Percent-encode `s` the way `encodeURIComponent` does
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// User-facing text for an API error
pub fn error_text(err: &HarmlessError) -> String {
    match err {
        HarmlessError::Http { status } => i18n::message("api_error", &[&status.to_string()]),
        HarmlessError::Timeout { secs } => i18n::message("api_timeout", &[&secs.to_string()]),
        HarmlessError::AuthRequired => i18n::message("login", &[]),
        other => other.to_string(),
    }
}
