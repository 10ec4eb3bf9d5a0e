// Accounts, relationships between accounts, and profile media.
use crate::core::convert::color::Rgb;
use crate::core::convert::flags::FlagSet;
use crate::core::convert::geometry::Geometry;
use crate::core::convert::uri::Uri;
use crate::records::tweets::{Tweet, UrlEntity};
use crate::{closed_enum, record};
use time::OffsetDateTime;

closed_enum! {
    /// How the authenticated account is connected to another account.
    pub enum Connection {
        Following = "following",
        FollowingRequested = "following_requested",
        FollowedBy = "followed_by",
        None = "none",
        Blocking = "blocking",
        Muting = "muting",
    }
}

record! {
    pub struct User {
        id: String => "id_str", required;
        screen_name: String => "screen_name", required;
        created_at: OffsetDateTime => "created_at", required;
        name: String => "name";
        description: String => "description";
        location: String => "location";
        url: Option<Uri> => "url";
        protected: bool => "protected";
        verified: bool => "verified";
        followers_count: i64 => "followers_count";
        friends_count: i64 => "friends_count";
        listed_count: i64 => "listed_count";
        favourites_count: i64 => "favourites_count";
        statuses_count: i64 => "statuses_count";
        /// Seconds east of UTC.
        utc_offset: i64 => "utc_offset";
        time_zone: String => "time_zone";
        lang: String => "lang";
        geo_enabled: bool => "geo_enabled";
        contributors_enabled: bool => "contributors_enabled";
        is_translator: bool => "is_translator";
        profile_background_color: Option<Rgb> => "profile_background_color";
        profile_text_color: Option<Rgb> => "profile_text_color";
        profile_link_color: Option<Rgb> => "profile_link_color";
        profile_sidebar_fill_color: Option<Rgb> => "profile_sidebar_fill_color";
        profile_sidebar_border_color: Option<Rgb> => "profile_sidebar_border_color";
        profile_background_image_url: Option<Uri> => "profile_background_image_url";
        profile_background_image_url_https: Option<Uri> => "profile_background_image_url_https";
        profile_background_tile: bool => "profile_background_tile";
        profile_image_url: Option<Uri> => "profile_image_url";
        profile_image_url_https: Option<Uri> => "profile_image_url_https";
        profile_banner_url: Option<Uri> => "profile_banner_url";
        profile_use_background_image: bool => "profile_use_background_image";
        default_profile: bool => "default_profile";
        default_profile_image: bool => "default_profile_image";
        following: bool => "following";
        follow_request_sent: bool => "follow_request_sent";
        notifications: bool => "notifications";
        geo: Option<Geometry> => "geo";
        status: Option<Box<Tweet>> => "status";
        entities: Option<UserEntities> => "entities";
        withheld_in_countries: Vec<String> => "withheld_in_countries";
    }
}

record! {
    pub struct UserEntities {
        url: Option<UrlEntityGroup> => "url";
        description: Option<UrlEntityGroup> => "description";
    }
}

record! {
    pub struct UrlEntityGroup {
        urls: Vec<UrlEntity> => "urls";
    }
}

record! {
    /// Envelope of `friendships/show`.
    pub struct RelationshipEnvelope {
        relationship: Option<Relationship> => "relationship", required;
    }
}

record! {
    pub struct Relationship {
        source: Option<RelationshipSource> => "source", required;
        target: Option<RelationshipTarget> => "target", required;
    }
}

record! {
    pub struct RelationshipSource {
        id: String => "id_str", required;
        screen_name: String => "screen_name", required;
        following: bool => "following";
        followed_by: bool => "followed_by";
        following_received: bool => "following_received";
        following_requested: bool => "following_requested";
        can_dm: bool => "can_dm";
        blocking: bool => "blocking";
        muting: bool => "muting";
        marked_spam: bool => "marked_spam";
        all_replies: bool => "all_replies";
        want_retweets: bool => "want_retweets";
        notifications_enabled: bool => "notifications_enabled";
    }
}

record! {
    pub struct RelationshipTarget {
        id: String => "id_str", required;
        screen_name: String => "screen_name", required;
        following: bool => "following";
        followed_by: bool => "followed_by";
        following_received: bool => "following_received";
        following_requested: bool => "following_requested";
    }
}

record! {
    /// One row of `friendships/lookup`.
    pub struct Friendship {
        id: String => "id_str", required;
        screen_name: String => "screen_name", required;
        name: String => "name";
        connections: FlagSet<Connection> => "connections";
    }
}

record! {
    pub struct SuggestionCategory {
        name: String => "name", required;
        slug: String => "slug", required;
        size: i64 => "size";
        users: Vec<User> => "users";
    }
}

record! {
    pub struct ProfileBanner {
        sizes: Option<BannerSizes> => "sizes", required;
    }
}

record! {
    pub struct BannerSizes {
        web: Option<BannerSize> => "web";
        web_retina: Option<BannerSize> => "web_retina";
        ipad: Option<BannerSize> => "ipad";
        ipad_retina: Option<BannerSize> => "ipad_retina";
        mobile: Option<BannerSize> => "mobile";
        mobile_retina: Option<BannerSize> => "mobile_retina";
        small: Option<BannerSize> => "300x100";
        medium: Option<BannerSize> => "600x200";
        large: Option<BannerSize> => "1500x500";
    }
}

record! {
    pub struct BannerSize {
        h: i64 => "h";
        w: i64 => "w";
        url: Option<Uri> => "url";
    }
}
