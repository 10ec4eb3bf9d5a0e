// Date-time text in the two profiles the upstream API emits.
use crate::core::error::{Error, ErrorKind};
use crate::core::schema::DateProfile;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const STANDARD: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
);

const SEARCH_RESULT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

fn layout(profile: DateProfile) -> &'static [BorrowedFormatItem<'static>] {
    match profile {
        DateProfile::Standard => STANDARD,
        DateProfile::SearchResult => SEARCH_RESULT,
    }
}

pub fn parse(text: &str, profile: DateProfile) -> Result<OffsetDateTime, Error> {
    OffsetDateTime::parse(text.trim(), layout(profile)).map_err(|err| {
        Error::new(ErrorKind::ValueFormat)
            .with_message(format!(
                "`{text}` is not a {} date-time",
                profile.name()
            ))
            .with_source(err)
    })
}

pub fn format(value: OffsetDateTime, profile: DateProfile) -> Result<String, Error> {
    value.format(layout(profile)).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("date-time format failed")
            .with_source(err)
    })
}
