use crate::record;
use crate::records::tweets::MediaSizes;

record! {
    /// Response of `help/configuration`.
    pub struct Configuration {
        characters_reserved_per_media: i64 => "characters_reserved_per_media";
        max_media_per_upload: i64 => "max_media_per_upload";
        photo_size_limit: i64 => "photo_size_limit";
        short_url_length: i64 => "short_url_length";
        short_url_length_https: i64 => "short_url_length_https";
        non_username_paths: Vec<String> => "non_username_paths";
        photo_sizes: Option<MediaSizes> => "photo_sizes";
    }
}

record! {
    pub struct Language {
        code: String => "code", required;
        name: String => "name";
        status: String => "status";
    }
}

record! {
    pub struct PrivacyPolicy {
        privacy: String => "privacy", required;
    }
}

record! {
    pub struct TermsOfService {
        tos: String => "tos", required;
    }
}
