use crate::records::users::User;
use crate::{closed_enum, record};
use time::OffsetDateTime;

closed_enum! {
    pub enum ListMode {
        Public = "public",
        Private = "private",
    }
}

record! {
    pub struct List {
        id: String => "id_str", required;
        name: String => "name", required;
        full_name: String => "full_name";
        slug: String => "slug";
        description: String => "description";
        mode: Option<ListMode> => "mode";
        /// Site-relative path such as `/jack/lists/team`.
        uri: String => "uri";
        member_count: i64 => "member_count";
        subscriber_count: i64 => "subscriber_count";
        following: bool => "following";
        created_at: OffsetDateTime => "created_at";
        user: Option<Box<User>> => "user";
    }
}
