use crate::record;
use crate::records::tweets::Entities;
use crate::records::users::User;
use time::OffsetDateTime;

record! {
    pub struct DirectMessage {
        id: String => "id_str", required;
        text: String => "text", required;
        created_at: OffsetDateTime => "created_at", required;
        sender_id: String => "sender_id_str";
        sender_screen_name: String => "sender_screen_name";
        sender: Option<Box<User>> => "sender";
        recipient_id: String => "recipient_id_str";
        recipient_screen_name: String => "recipient_screen_name";
        recipient: Option<Box<User>> => "recipient";
        entities: Option<Entities> => "entities";
    }
}
