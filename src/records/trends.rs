use crate::core::convert::uri::Uri;
use crate::record;

record! {
    pub struct Trend {
        name: String => "name", required;
        query: String => "query";
        url: Option<Uri> => "url";
        promoted_content: String => "promoted_content";
        events: String => "events";
    }
}

record! {
    /// One entry of `trends/place`. `as_of` and `created_at` use ISO-8601,
    /// which is neither date-time profile, so they stay text.
    pub struct TrendSnapshot {
        trends: Vec<Trend> => "trends";
        as_of: String => "as_of";
        created_at: String => "created_at";
        locations: Vec<TrendLocation> => "locations";
    }
}

record! {
    pub struct TrendLocation {
        name: String => "name", required;
        woeid: i64 => "woeid";
        country: String => "country";
        country_code: String => "countryCode";
        url: Option<Uri> => "url";
        parent_id: i64 => "parentid";
        place_type: Option<TrendPlaceType> => "placeType";
    }
}

record! {
    pub struct TrendPlaceType {
        code: i64 => "code";
        name: String => "name";
    }
}
