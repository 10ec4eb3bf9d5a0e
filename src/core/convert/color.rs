use crate::core::error::{Error, ErrorKind};
use std::fmt;

/// Profile color carried on the wire as six hex digits without a `#`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse_hex(text: &str) -> Result<Self, Error> {
        if text.len() != 6 || !text.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(Error::new(ErrorKind::ValueFormat)
                .with_message(format!("`{text}` is not a six-digit hex color")));
        }
        let channel = |start: usize| {
            u8::from_str_radix(&text[start..start + 2], 16).map_err(|err| {
                Error::new(ErrorKind::ValueFormat)
                    .with_message(format!("`{text}` is not a six-digit hex color"))
                    .with_source(err)
            })
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
