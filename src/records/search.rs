// Search responses: the legacy search endpoint (its own date-time profile),
// the status search endpoint, and saved searches.
use crate::core::convert::geometry::Geometry;
use crate::core::convert::uri::Uri;
use crate::core::schema::{DateProfile, TypeTag};
use crate::records::tweets::Tweet;
use crate::{closed_enum, record};
use time::OffsetDateTime;

closed_enum! {
    pub enum ResultType {
        Recent = "recent",
        Popular = "popular",
        Mixed = "mixed",
    }
}

record! {
    pub struct SearchResult {
        id: String => "id_str", required;
        text: String => "text", required;
        created_at: OffsetDateTime => "created_at"
            as TypeTag::DateTime(DateProfile::SearchResult), required;
        from_user: String => "from_user";
        from_user_id: String => "from_user_id_str";
        from_user_name: String => "from_user_name";
        to_user: String => "to_user";
        to_user_id: String => "to_user_id_str";
        to_user_name: String => "to_user_name";
        profile_image_url: Option<Uri> => "profile_image_url";
        profile_image_url_https: Option<Uri> => "profile_image_url_https";
        source: String => "source";
        iso_language_code: String => "iso_language_code";
        geo: Option<Geometry> => "geo";
        metadata: Option<ResultMetadata> => "metadata";
    }
}

record! {
    pub struct ResultMetadata {
        result_type: Option<ResultType> => "result_type";
        iso_language_code: String => "iso_language_code";
        recent_retweets: i64 => "recent_retweets";
    }
}

record! {
    /// Envelope of the legacy search endpoint.
    pub struct SearchResults {
        results: Vec<SearchResult> => "results";
        max_id: String => "max_id_str";
        since_id: String => "since_id_str";
        query: String => "query";
        next_page: String => "next_page";
        refresh_url: String => "refresh_url";
        completed_in: f64 => "completed_in";
        page: i64 => "page";
        results_per_page: i64 => "results_per_page";
    }
}

record! {
    /// Envelope of `search/tweets`.
    pub struct StatusSearch {
        statuses: Vec<Tweet> => "statuses";
        search_metadata: Option<SearchMetadata> => "search_metadata";
    }
}

record! {
    pub struct SearchMetadata {
        max_id: String => "max_id_str";
        since_id: String => "since_id_str";
        query: String => "query";
        count: i64 => "count";
        completed_in: f64 => "completed_in";
        next_results: String => "next_results";
        refresh_url: String => "refresh_url";
    }
}

record! {
    pub struct SavedSearch {
        id: String => "id_str", required;
        query: String => "query", required;
        name: String => "name";
        position: String => "position";
        created_at: OffsetDateTime => "created_at";
    }
}
