//! Client-side helpers for the Voca word-search API: query-string building,
//! POS and word-type labels, result checks, and a CSRF-aware HTTP client.

mod client;
mod config;
mod cookies;
mod error;
mod pos;
mod query;
mod response;
mod word_type;

pub use client::{CSRF_HEADER, FormsQuery, VocaApi};
pub use config::{ApiConfig, BASE_URL_VAR, ENV_VAR, Environment};
pub use cookies::{CSRF_COOKIE, CookieSource, NoCookies, SharedCookieJar};
pub use error::{ApiError, ConfigError, ResponseShapeError};
pub use pos::{PosCategory, pos_tag_to_readable};
pub use query::{QueryParams, build_query_string, encode_component};
pub use response::{
    Category, Difficulty, SearchResponse, Sentence, SentenceDetail, SentenceGroup, ServiceStatus,
    no_results, no_results_in_value,
};
pub use word_type::{base_word_type, specific_word_type};
