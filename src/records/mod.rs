//! Purpose: Declare every domain record of the REST API as schema data.
//! Exports: Record modules, `CatalogEntry`, `Canonical`, `catalog`, `find`, `prepare_all`.
//! Role: Name-indexed catalog used by startup validation and the CLI.
//! Invariants: Every record reachable from an endpoint response is catalogued.
//! Invariants: Catalog names are snake_case and unique.

pub mod account;
pub mod help;
pub mod lists;
pub mod messages;
pub mod places;
pub mod search;
pub mod trends;
pub mod tweets;
pub mod users;

use crate::core::codec::{AbsorbedFailure, DecodeOptions, decode_reported, encode};
use crate::core::error::Error;
use crate::core::page::{decode_page_reported, encode_page};
use crate::core::record::Record;
use crate::core::schema::RecordSchema;
use serde_json::Value;

/// A canonical re-encoding plus the failures absorbed while decoding it.
#[derive(Clone, Debug, PartialEq)]
pub struct Canonical {
    pub value: Value,
    pub absorbed: Vec<AbsorbedFailure>,
}

pub struct CatalogEntry {
    pub name: &'static str,
    pub record: &'static str,
    pub schema: fn() -> Result<&'static RecordSchema, Error>,
    pub canonicalize: fn(&Value, &DecodeOptions) -> Result<Canonical, Error>,
    pub canonicalize_page: fn(&Value, &str, &DecodeOptions) -> Result<Canonical, Error>,
}

fn canonicalize<T: Record>(value: &Value, options: &DecodeOptions) -> Result<Canonical, Error> {
    let decoded = decode_reported::<T>(value, options)?;
    Ok(Canonical {
        value: encode(&decoded.value)?,
        absorbed: decoded.absorbed,
    })
}

fn canonicalize_page<T: Record + crate::core::field::WireValue>(
    value: &Value,
    element_key: &str,
    options: &DecodeOptions,
) -> Result<Canonical, Error> {
    let decoded = decode_page_reported::<T>(value, element_key, options)?;
    Ok(Canonical {
        value: encode_page(&decoded.value, element_key)?,
        absorbed: decoded.absorbed,
    })
}

macro_rules! catalog {
    ($($name:literal => $ty:ty),* $(,)?) => {
        static CATALOG: &[CatalogEntry] = &[
            $(
                CatalogEntry {
                    name: $name,
                    record: <$ty as Record>::NAME,
                    schema: <$ty as Record>::schema,
                    canonicalize: canonicalize::<$ty>,
                    canonicalize_page: canonicalize_page::<$ty>,
                },
            )*
        ];
    };
}

catalog! {
    "user" => users::User,
    "user_entities" => users::UserEntities,
    "url_entity_group" => users::UrlEntityGroup,
    "relationship_envelope" => users::RelationshipEnvelope,
    "relationship" => users::Relationship,
    "relationship_source" => users::RelationshipSource,
    "relationship_target" => users::RelationshipTarget,
    "friendship" => users::Friendship,
    "suggestion_category" => users::SuggestionCategory,
    "profile_banner" => users::ProfileBanner,
    "banner_sizes" => users::BannerSizes,
    "banner_size" => users::BannerSize,
    "tweet" => tweets::Tweet,
    "tweet_ref" => tweets::TweetRef,
    "entities" => tweets::Entities,
    "extended_entities" => tweets::ExtendedEntities,
    "hashtag_entity" => tweets::HashtagEntity,
    "url_entity" => tweets::UrlEntity,
    "user_mention_entity" => tweets::UserMentionEntity,
    "media_entity" => tweets::MediaEntity,
    "media_sizes" => tweets::MediaSizes,
    "media_size" => tweets::MediaSize,
    "oembed" => tweets::Oembed,
    "direct_message" => messages::DirectMessage,
    "search_result" => search::SearchResult,
    "result_metadata" => search::ResultMetadata,
    "search_results" => search::SearchResults,
    "status_search" => search::StatusSearch,
    "search_metadata" => search::SearchMetadata,
    "saved_search" => search::SavedSearch,
    "place" => places::Place,
    "place_attributes" => places::PlaceAttributes,
    "geo_search" => places::GeoSearch,
    "geo_result" => places::GeoResult,
    "geo_query" => places::GeoQuery,
    "geo_query_params" => places::GeoQueryParams,
    "list" => lists::List,
    "rate_limit_status" => account::RateLimitStatus,
    "photo_rate_limit" => account::PhotoRateLimit,
    "account_settings" => account::AccountSettings,
    "sleep_time" => account::SleepTime,
    "time_zone" => account::TimeZone,
    "configuration" => help::Configuration,
    "language" => help::Language,
    "privacy_policy" => help::PrivacyPolicy,
    "terms_of_service" => help::TermsOfService,
    "trend" => trends::Trend,
    "trend_snapshot" => trends::TrendSnapshot,
    "trend_location" => trends::TrendLocation,
    "trend_place_type" => trends::TrendPlaceType,
}

pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

/// Looks up an entry by catalog name or Rust record name.
pub fn find(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|entry| entry.name == name || entry.record.eq_ignore_ascii_case(name))
}

/// Derives every catalogued schema, failing on the first defect.
/// Binaries call this at startup so declaration mistakes never reach a request.
pub fn prepare_all() -> Result<usize, Error> {
    for entry in CATALOG {
        (entry.schema)()?;
    }
    tracing::debug!(records = CATALOG.len(), "all record schemas derived");
    Ok(CATALOG.len())
}
