//! Purpose: Contract tests for mapping real endpoint payloads through the public API.
//! Exports: Integration tests only.
//! Role: Pin decode/encode behavior of the catalogued records as callers see it.
//! Invariants: Tests use `tweetshape::api` and `tweetshape::records` only.

use serde_json::{Value, json};
use std::error::Error as _;
use tweetshape::api::{
    CursorPage, DateFallback, DecodeOptions, ErrorKind, FlagSet, Geometry, Position, Rgb, decode,
    decode_page, decode_reported, encode, encode_page, find, prepare_all, read_response,
};
use tweetshape::records::places::Place;
use tweetshape::records::search::{SavedSearch, SearchResult};
use tweetshape::records::tweets::Tweet;
use tweetshape::records::users::{Connection, Friendship, User};

fn options() -> DecodeOptions {
    DecodeOptions::new()
}

fn user_payload() -> Value {
    json!({
        "id_str": "6253282",
        "screen_name": "twitterapi",
        "created_at": "Wed May 23 06:01:13 +0000 2007",
        "name": "Twitter API",
        "url": "https://dev.twitter.com",
        "followers_count": 1_000_000,
        "verified": true,
        "profile_background_color": "C0DEED",
        "geo": {"type": "Point", "coordinates": [-122.4, 37.8]},
        "status": {
            "id_str": "240859602684612608",
            "text": "Introducing the Twitter Certified Products Program",
            "created_at": "Wed Aug 29 17:12:58 +0000 2012"
        },
        "some_future_field": {"nested": [1, 2, 3]}
    })
}

#[test]
fn catalog_derives_before_use() {
    let count = prepare_all().expect("catalog derives");
    assert!(count > 40);
    assert!(find("user").is_some());
}

#[test]
fn user_decodes_nested_status_color_and_geometry() {
    let user: User = decode(&user_payload(), &options()).expect("user");
    assert_eq!(user.id, "6253282");
    assert_eq!(user.followers_count, 1_000_000);
    assert!(user.verified);
    assert_eq!(user.profile_background_color, Some(Rgb::new(0xc0, 0xde, 0xed)));
    assert_eq!(
        user.geo,
        Some(Geometry::Point(Position::new(-122.4, 37.8)))
    );
    let status = user.status.as_deref().expect("status");
    assert_eq!(status.id, "240859602684612608");
    assert_eq!(status.created_at.year(), 2012);
    assert!(status.user.is_none());
}

#[test]
fn unknown_fields_are_ignored_and_not_re_emitted() {
    let user: User = decode(&user_payload(), &options()).expect("user");
    let encoded = encode(&user).expect("encode");
    assert!(encoded.get("some_future_field").is_none());
}

#[test]
fn user_round_trips_and_encodes_deterministically() {
    let user: User = decode(&user_payload(), &options()).expect("user");
    let first = encode(&user).expect("encode");
    let second = encode(&user).expect("encode");
    assert_eq!(
        serde_json::to_string(&first).expect("text"),
        serde_json::to_string(&second).expect("text")
    );
    let again: User = decode(&first, &options()).expect("re-decode");
    assert_eq!(again, user);

    assert_eq!(first.get("profile_background_color"), Some(&json!("c0deed")));
    assert_eq!(
        first.get("created_at"),
        Some(&json!("Wed May 23 06:01:13 +0000 2007"))
    );
    assert_eq!(
        first.get("geo"),
        Some(&json!({"type": "Point", "coordinates": [-122.4, 37.8]}))
    );
}

#[test]
fn encoding_follows_declaration_order() {
    let user: User = decode(&user_payload(), &options()).expect("user");
    let encoded = encode(&user).expect("encode");
    let keys: Vec<&str> = encoded
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(&keys[..3], &["id_str", "screen_name", "created_at"]);
    let url_pos = keys.iter().position(|key| *key == "url").expect("url");
    let status_pos = keys.iter().position(|key| *key == "status").expect("status");
    assert!(url_pos < status_pos);
}

#[test]
fn missing_required_field_names_the_key() {
    let mut payload = user_payload();
    payload
        .as_object_mut()
        .expect("object")
        .remove("screen_name");
    let err = decode::<User>(&payload, &options()).expect_err("missing");
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert_eq!(err.field(), Some("screen_name"));
    assert_eq!(err.record(), Some("User"));
}

#[test]
fn nested_failure_carries_the_full_path() {
    let mut payload = user_payload();
    payload["status"]["created_at"] = json!("not a date");
    let err = decode::<User>(&payload, &options()).expect_err("required date");
    assert_eq!(err.kind(), ErrorKind::ValueFormat);
    assert_eq!(err.field(), Some("status.created_at"));
}

#[test]
fn type_mismatch_reports_both_shapes() {
    let mut payload = user_payload();
    payload["followers_count"] = json!("many");
    let err = decode::<User>(&payload, &options()).expect_err("mismatch");
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.expected(), Some("integer"));
    assert_eq!(err.actual(), Some("string"));
}

#[test]
fn unknown_geometry_discriminator_is_rejected() {
    let mut payload = user_payload();
    payload["geo"] = json!({"type": "Line", "coordinates": [[0.0, 0.0], [1.0, 1.0]]});
    let err = decode::<User>(&payload, &options()).expect_err("line");
    assert_eq!(err.kind(), ErrorKind::UnknownDiscriminator);
    assert_eq!(err.field(), Some("geo"));
}

#[test]
fn friendship_connections_are_canonicalized() {
    let payload = json!({
        "id_str": "783214",
        "screen_name": "twitter",
        "connections": ["followed_by", "following", "made_up_state"]
    });
    let friendship: Friendship = decode(&payload, &options()).expect("friendship");
    let expected: FlagSet<Connection> = [Connection::Following, Connection::FollowedBy]
        .into_iter()
        .collect();
    assert_eq!(friendship.connections, expected);
    assert_eq!(friendship.connections.len(), 2);

    let encoded = encode(&friendship).expect("encode");
    assert_eq!(
        encoded.get("connections"),
        Some(&json!(["following", "followed_by"]))
    );
}

#[test]
fn id_page_reads_string_cursors() {
    let payload = json!({
        "next_cursor_str": "0",
        "previous_cursor_str": "0",
        "ids": ["1", "2", "3"]
    });
    let page: CursorPage<String> = decode_page(&payload, "ids", &options()).expect("page");
    assert_eq!(page.elements, vec!["1", "2", "3"]);
    assert_eq!(page.next_cursor, "0");
    assert_eq!(page.previous_cursor, "0");
    assert!(!page.has_next());
}

#[test]
fn user_page_round_trips() {
    let payload = json!({
        "users": [user_payload()],
        "next_cursor": 1374004777531007833_i64,
        "next_cursor_str": "1374004777531007833",
        "previous_cursor": 0,
        "previous_cursor_str": "0"
    });
    let page: CursorPage<User> = decode_page(&payload, "users", &options()).expect("page");
    assert_eq!(page.len(), 1);
    assert!(page.has_next());
    assert_eq!(page.next_cursor, "1374004777531007833");

    let encoded = encode_page(&page, "users").expect("encode");
    assert_eq!(
        encoded.get("next_cursor_str"),
        Some(&json!("1374004777531007833"))
    );
    let again: CursorPage<User> = decode_page(&encoded, "users", &options()).expect("again");
    assert_eq!(again, page);
}

#[test]
fn tweet_coordinates_keep_longitude_first() {
    let payload = json!({
        "id_str": "20",
        "text": "just setting up my twttr",
        "created_at": "Tue Mar 21 20:50:14 +0000 2006",
        "coordinates": {"type": "Point", "coordinates": [-122.4, 37.8]},
        "retweeted_status": {
            "id_str": "19",
            "text": "earlier",
            "created_at": "Tue Mar 21 20:00:00 +0000 2006"
        }
    });
    let tweet: Tweet = decode(&payload, &options()).expect("tweet");
    let Some(Geometry::Point(position)) = tweet.coordinates else {
        panic!("expected point");
    };
    assert_eq!(position.longitude, -122.4);
    assert_eq!(position.latitude, 37.8);
    assert_eq!(
        tweet.retweeted_status.as_deref().map(|status| status.id.as_str()),
        Some("19")
    );

    let encoded = encode(&tweet).expect("encode");
    assert_eq!(encoded["coordinates"]["coordinates"], json!([-122.4, 37.8]));
}

#[test]
fn search_results_use_their_own_date_profile() {
    let payload = json!({
        "id_str": "1",
        "text": "hello",
        "from_user": "jack",
        "created_at": "Fri, 05 Nov 2010 09:30:00 +0000"
    });
    let result: SearchResult = decode(&payload, &options()).expect("search result");
    assert_eq!(result.created_at.day(), 5);
    let encoded = encode(&result).expect("encode");
    assert_eq!(
        encoded.get("created_at"),
        Some(&json!("Fri, 05 Nov 2010 09:30:00 +0000"))
    );
}

#[test]
fn optional_date_failures_are_absorbed_and_reported() {
    let payload = json!({"id_str": "9", "query": "rust", "created_at": "yesterday"});
    let decoded = decode_reported::<SavedSearch>(&payload, &options()).expect("lenient");
    assert_eq!(decoded.value.created_at, time::OffsetDateTime::UNIX_EPOCH);
    assert_eq!(decoded.absorbed.len(), 1);
    assert_eq!(decoded.absorbed[0].field, "created_at");
    assert_eq!(decoded.absorbed[0].raw, "yesterday");

    let strict = DecodeOptions {
        date_fallback: DateFallback::Strict,
        ..DecodeOptions::new()
    };
    let err = decode::<SavedSearch>(&payload, &strict).expect_err("strict");
    assert_eq!(err.kind(), ErrorKind::ValueFormat);
    assert_eq!(err.field(), Some("created_at"));
}

#[test]
fn depth_guard_trips_on_deep_retweet_chains() {
    let mut payload = json!({
        "id_str": "0",
        "text": "root",
        "created_at": "Tue Mar 21 20:50:14 +0000 2006"
    });
    for idx in 1..6 {
        payload = json!({
            "id_str": idx.to_string(),
            "text": "rt",
            "created_at": "Tue Mar 21 20:50:14 +0000 2006",
            "retweeted_status": payload
        });
    }
    let shallow = DecodeOptions {
        max_depth: 3,
        ..DecodeOptions::new()
    };
    let err = decode::<Tweet>(&payload, &shallow).expect_err("too deep");
    assert_eq!(err.kind(), ErrorKind::DepthLimit);

    decode::<Tweet>(&payload, &options()).expect("default depth is enough");
}

#[test]
fn place_bounding_box_polygon_round_trips() {
    let payload = json!({
        "id": "5a110d312052166f",
        "name": "San Francisco",
        "place_type": "city",
        "bounding_box": {
            "type": "Polygon",
            "coordinates": [[[-122.51, 37.70], [-122.35, 37.70], [-122.35, 37.83], [-122.51, 37.83]]]
        }
    });
    let place: Place = decode(&payload, &options()).expect("place");
    let Some(Geometry::Polygon(rings)) = &place.bounding_box else {
        panic!("expected polygon");
    };
    assert_eq!(rings[0].len(), 4);
    assert_eq!(rings[0][0], Position::new(-122.51, 37.70));
    let encoded = encode(&place).expect("encode");
    assert_eq!(encoded["bounding_box"], payload["bounding_box"]);
}

#[test]
fn read_response_wraps_failures_with_the_payload() {
    let payload = json!({"id_str": "6253282", "created_at": "Wed May 23 06:01:13 +0000 2007"});
    let err = read_response::<User>(payload.clone(), &options()).expect_err("unreadable");
    assert_eq!(err.kind(), ErrorKind::UnreadableResponse);
    assert_eq!(err.payload(), Some(&payload));
    assert!(err.source().is_some());
}
