use crate::config::ApiConfig;
use crate::cookies::CookieSource;
use crate::error::ApiError;
use crate::query::{QueryParams, build_query_string, encode_component};
use crate::response::{Category, Difficulty, SearchResponse, SentenceDetail, ServiceStatus};
use once_cell::sync::OnceCell;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

static GLOBAL: OnceCell<VocaApi> = OnceCell::new();

/// Filters accepted by the `forms/` and `sentences/` endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormsQuery {
    pub inflect: bool,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
}

impl FormsQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if self.inflect {
            params.insert("inflect", "true");
        }
        if let Some(difficulty) = self.difficulty {
            params.insert("difficulty", difficulty.level());
        }
        if let Some(category) = self.category {
            params.insert("category", category);
        }
        params
    }
}

/// HTTP client for the Voca API.
///
/// Every request reads the `csrftoken` cookie from the configured source at
/// the moment it is prepared and carries it as `X-CSRFToken`, so a rotated
/// token is picked up without rebuilding the client. Cloning is cheap.
#[derive(Clone)]
pub struct VocaApi {
    http: Client,
    config: ApiConfig,
    cookies: Arc<dyn CookieSource>,
}

impl fmt::Debug for VocaApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VocaApi")
            .field("base_url", &self.config.base_url.as_str())
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}

impl VocaApi {
    pub fn new(config: ApiConfig, cookies: impl CookieSource + 'static) -> Result<Self, ApiError> {
        Self::with_shared_cookies(config, Arc::new(cookies))
    }

    pub fn with_shared_cookies(
        config: ApiConfig,
        cookies: Arc<dyn CookieSource>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            config,
            cookies,
        })
    }

    /// Stores `api` as the process-wide client. Only the first call succeeds.
    pub fn install(api: VocaApi) -> Result<&'static VocaApi, ApiError> {
        let base = api.config.base_url.to_string();
        GLOBAL.set(api).map_err(|_| ApiError::AlreadyInstalled)?;
        info!(%base, "Installed global API client");
        GLOBAL.get().ok_or(ApiError::AlreadyInstalled)
    }

    pub fn global() -> Option<&'static VocaApi> {
        GLOBAL.get()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Resolves `path` against the base URL with exactly one `/` between them.
    pub fn url_for(&self, path: &str) -> String {
        join_url(self.config.base_url.as_str(), path)
    }

    pub fn prepare_get(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<Request, ApiError> {
        let mut url = self.url_for(path);
        let query = build_query_string(params);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        Ok(self.decorate(self.http.get(url)).build()?)
    }

    pub fn prepare_post<B>(&self, path: &str, body: &B) -> Result<Request, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.http.post(self.url_for(path)).json(body);
        Ok(self.decorate(builder).build()?)
    }

    pub async fn get(&self, path: &str, params: Option<&QueryParams>) -> Result<Response, ApiError> {
        let request = self.prepare_get(path, params)?;
        self.dispatch(request).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.prepare_post(path, body)?;
        self.dispatch(request).await
    }

    pub async fn status(&self) -> Result<ServiceStatus, ApiError> {
        let response = self.get("", None).await?;
        decode(response).await
    }

    /// Sentences for `word` and, with `inflect`, each of its inflected forms.
    pub async fn sentence_forms(
        &self,
        language: &str,
        word: &str,
        query: &FormsQuery,
    ) -> Result<SearchResponse, ApiError> {
        let path = format!(
            "forms/{}/{}/",
            encode_component(language),
            encode_component(word)
        );
        let response = self.get(&path, Some(&query.to_params())).await?;
        decode(response).await
    }

    pub async fn sentence_list(
        &self,
        language: &str,
        word: &str,
        query: &FormsQuery,
    ) -> Result<SearchResponse, ApiError> {
        let path = format!(
            "sentences/{}/{}/",
            encode_component(language),
            encode_component(word)
        );
        let response = self.get(&path, Some(&query.to_params())).await?;
        decode(response).await
    }

    pub async fn sentence(&self, id: &str) -> Result<SentenceDetail, ApiError> {
        let response = self.get(&format!("{}/", encode_component(id)), None).await?;
        decode(response).await
    }

    /// Flags a sentence as bad. The server answers with an empty 2xx.
    pub async fn report_sentence(&self, id: &str) -> Result<(), ApiError> {
        let response = self.post("report/", &json!({ "id": id })).await?;
        ensure_success(response).await.map(|_| ())
    }

    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        let mut builder = builder;
        if let Some(token) = self.cookies.csrf_token() {
            match HeaderValue::from_str(&token) {
                Ok(value) => builder = builder.header(CSRF_HEADER, value),
                Err(_) => warn!("csrftoken cookie is not a valid header value; skipping"),
            }
        }
        if let Some(cookies) = self.cookies.cookie_header() {
            if let Ok(value) = HeaderValue::from_str(&cookies) {
                builder = builder.header(COOKIE, value);
            }
        }
        builder
    }

    async fn dispatch(&self, request: Request) -> Result<Response, ApiError> {
        debug!(
            method = %request.method(),
            url = %request.url(),
            csrf = request.headers().contains_key(&CSRF_HEADER),
            "Dispatching request"
        );
        Ok(self.http.execute(request).await?)
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!(%status, %url, "API request failed");
    Err(ApiError::Status {
        status,
        body: body.chars().take(200).collect(),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    Ok(response.json().await?)
}
