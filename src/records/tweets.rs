// Statuses and the entities extracted from their text.
use crate::core::convert::geometry::Geometry;
use crate::core::convert::uri::Uri;
use crate::records::places::Place;
use crate::records::users::User;
use crate::{closed_enum, record};
use time::OffsetDateTime;

closed_enum! {
    pub enum MediaKind {
        Photo = "photo",
        Video = "video",
        AnimatedGif = "animated_gif",
    }
}

closed_enum! {
    pub enum ResizeMode {
        Fit = "fit",
        Crop = "crop",
    }
}

closed_enum! {
    pub enum FilterLevel {
        None = "none",
        Low = "low",
        Medium = "medium",
    }
}

record! {
    pub struct Tweet {
        id: String => "id_str", required;
        text: String => "text", required;
        created_at: OffsetDateTime => "created_at", required;
        source: String => "source";
        truncated: bool => "truncated";
        in_reply_to_status_id: String => "in_reply_to_status_id_str";
        in_reply_to_user_id: String => "in_reply_to_user_id_str";
        in_reply_to_screen_name: String => "in_reply_to_screen_name";
        user: Option<Box<User>> => "user";
        /// GeoJSON point, longitude first.
        coordinates: Option<Geometry> => "coordinates";
        place: Option<Place> => "place";
        retweeted_status: Option<Box<Tweet>> => "retweeted_status";
        quoted_status_id: String => "quoted_status_id_str";
        quoted_status: Option<Box<Tweet>> => "quoted_status";
        retweet_count: i64 => "retweet_count";
        favorite_count: i64 => "favorite_count";
        favorited: bool => "favorited";
        retweeted: bool => "retweeted";
        possibly_sensitive: bool => "possibly_sensitive";
        lang: String => "lang";
        filter_level: Option<FilterLevel> => "filter_level";
        entities: Option<Entities> => "entities";
        extended_entities: Option<ExtendedEntities> => "extended_entities";
        current_user_retweet: Option<TweetRef> => "current_user_retweet";
        withheld_in_countries: Vec<String> => "withheld_in_countries";
    }
}

record! {
    pub struct TweetRef {
        id: String => "id_str", required;
    }
}

record! {
    pub struct Entities {
        hashtags: Vec<HashtagEntity> => "hashtags";
        symbols: Vec<HashtagEntity> => "symbols";
        urls: Vec<UrlEntity> => "urls";
        user_mentions: Vec<UserMentionEntity> => "user_mentions";
        media: Vec<MediaEntity> => "media";
    }
}

record! {
    pub struct ExtendedEntities {
        media: Vec<MediaEntity> => "media";
    }
}

record! {
    /// Hashtag or cashtag; `indices` are code-point offsets into the text.
    pub struct HashtagEntity {
        text: String => "text", required;
        indices: Vec<i64> => "indices";
    }
}

record! {
    pub struct UrlEntity {
        url: Option<Uri> => "url", required;
        expanded_url: Option<Uri> => "expanded_url";
        display_url: String => "display_url";
        indices: Vec<i64> => "indices";
    }
}

record! {
    pub struct UserMentionEntity {
        id: String => "id_str", required;
        screen_name: String => "screen_name", required;
        name: String => "name";
        indices: Vec<i64> => "indices";
    }
}

record! {
    pub struct MediaEntity {
        id: String => "id_str", required;
        kind: Option<MediaKind> => "type";
        media_url: Option<Uri> => "media_url";
        media_url_https: Option<Uri> => "media_url_https";
        url: Option<Uri> => "url";
        display_url: String => "display_url";
        expanded_url: Option<Uri> => "expanded_url";
        sizes: Option<MediaSizes> => "sizes";
        source_status_id: String => "source_status_id_str";
        indices: Vec<i64> => "indices";
    }
}

record! {
    pub struct MediaSizes {
        thumb: Option<MediaSize> => "thumb";
        small: Option<MediaSize> => "small";
        medium: Option<MediaSize> => "medium";
        large: Option<MediaSize> => "large";
    }
}

record! {
    pub struct MediaSize {
        w: i64 => "w";
        h: i64 => "h";
        resize: Option<ResizeMode> => "resize";
    }
}

record! {
    /// Response of `statuses/oembed`.
    pub struct Oembed {
        html: String => "html", required;
        url: Option<Uri> => "url";
        author_name: String => "author_name";
        author_url: Option<Uri> => "author_url";
        provider_name: String => "provider_name";
        provider_url: Option<Uri> => "provider_url";
        cache_age: String => "cache_age";
        kind: String => "type";
        version: String => "version";
        width: i64 => "width";
        height: i64 => "height";
    }
}
