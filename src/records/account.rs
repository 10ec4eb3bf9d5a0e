// Account-level state: rate limits and settings.
use crate::records::trends::TrendLocation;
use crate::{closed_enum, record};
use time::OffsetDateTime;

closed_enum! {
    pub enum DirectMessagePolicy {
        All = "all",
        Following = "following",
    }
}

record! {
    /// Response of the hourly `account/rate_limit_status` endpoint.
    pub struct RateLimitStatus {
        remaining_hits: i64 => "remaining_hits";
        hourly_limit: i64 => "hourly_limit";
        reset_time_in_seconds: i64 => "reset_time_in_seconds";
        reset_time: OffsetDateTime => "reset_time";
        photos: Option<PhotoRateLimit> => "photos";
    }
}

record! {
    pub struct PhotoRateLimit {
        remaining_hits: i64 => "remaining_hits";
        daily_limit: i64 => "daily_limit";
        reset_time_in_seconds: i64 => "reset_time_in_seconds";
        reset_time: OffsetDateTime => "reset_time";
    }
}

record! {
    pub struct AccountSettings {
        screen_name: String => "screen_name", required;
        protected: bool => "protected";
        geo_enabled: bool => "geo_enabled";
        language: String => "language";
        always_use_https: bool => "always_use_https";
        discoverable_by_email: bool => "discoverable_by_email";
        discoverable_by_mobile_phone: bool => "discoverable_by_mobile_phone";
        use_cookie_personalization: bool => "use_cookie_personalization";
        allow_contributor_request: String => "allow_contributor_request";
        allow_dms_from: Option<DirectMessagePolicy> => "allow_dms_from";
        sleep_time: Option<SleepTime> => "sleep_time";
        time_zone: Option<TimeZone> => "time_zone";
        trend_location: Vec<TrendLocation> => "trend_location";
    }
}

record! {
    pub struct SleepTime {
        enabled: bool => "enabled";
        /// Hour of day, 0-23.
        start_time: i64 => "start_time";
        end_time: i64 => "end_time";
    }
}

record! {
    pub struct TimeZone {
        name: String => "name";
        tzinfo_name: String => "tzinfo_name";
        utc_offset: i64 => "utc_offset";
    }
}
