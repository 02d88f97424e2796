use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// An sRGB color with 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        red: 255,
        green: 255,
        blue: 255,
    };

    pub const BLACK: Color = Color {
        red: 0,
        green: 0,
        blue: 0,
    };

    pub fn new(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Color {
        Color {
            red: rgb[0],
            green: rgb[1],
            blue: rgb[2],
        }
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> [u8; 3] {
        [color.red, color.green, color.blue]
    }
}

// Scripts are allowed to write colors either as {red, green, blue} maps or as
// plain [r, g, b] arrays, so deserialization accepts both. The seq arm also
// covers the binary wire format, which lays structs out as field sequences.
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        const FIELDS: &[&str] = &["red", "green", "blue"];

        struct ColorVisitor;

        impl<'de> Visitor<'de> for ColorVisitor {
            type Value = Color;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a {red, green, blue} map or an [r, g, b] array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Color, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let red = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let green = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let blue = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                Ok(Color { red, green, blue })
            }

            fn visit_map<A>(self, mut map: A) -> Result<Color, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut red = None;
                let mut green = None;
                let mut blue = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "red" => red = Some(map.next_value()?),
                        "green" => green = Some(map.next_value()?),
                        "blue" => blue = Some(map.next_value()?),
                        unknown => return Err(de::Error::unknown_field(unknown, FIELDS)),
                    }
                }
                Ok(Color {
                    red: red.ok_or_else(|| de::Error::missing_field("red"))?,
                    green: green.ok_or_else(|| de::Error::missing_field("green"))?,
                    blue: blue.ok_or_else(|| de::Error::missing_field("blue"))?,
                })
            }
        }

        deserializer.deserialize_struct("Color", FIELDS, ColorVisitor)
    }
}
