use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, DeckResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS color string (`#rrggbb` or `rgba(...)`), which is what
/// chart backends consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(input: &str) -> DeckResult<Self> {
        let invalid = || DeckError::InvalidData(format!("invalid hex color `{input}`"));
        let hex = input.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(invalid)
        };

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (index, slot) in channels.iter_mut().enumerate() {
                    *slot = channel(index..index + 1)? * 17;
                }
                Ok(Self::rgb8(channels[0], channels[1], channels[2]))
            }
            6 | 8 => {
                let color = Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?);
                if hex.len() == 8 {
                    Ok(Self {
                        alpha: f64::from(channel(6..8)?) / 255.0,
                        ..color
                    })
                } else {
                    Ok(color)
                }
            }
            _ => Err(invalid()),
        }
    }

    pub fn validate(self) -> DeckResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DeckError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn to_css(self) -> String {
        let [red, green, blue] = [self.red, self.green, self.blue].map(to_byte);
        if self.alpha >= 1.0 {
            format!("#{red:02x}{green:02x}{blue:02x}")
        } else {
            format!("rgba({red}, {green}, {blue}, {})", self.alpha)
        }
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

impl TryFrom<String> for Color {
    type Error = DeckError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(body) = value
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgba(body).ok_or_else(|| {
                DeckError::InvalidData(format!("invalid rgba color `{value}`"))
            });
        }
        Self::from_hex(&value)
    }
}

fn parse_rgba(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let [red, green, blue, alpha] = parts.as_slice() else {
        return None;
    };
    let color = Color::rgba(
        f64::from(red.parse::<u8>().ok()?) / 255.0,
        f64::from(green.parse::<u8>().ok()?) / 255.0,
        f64::from(blue.parse::<u8>().ok()?) / 255.0,
        alpha.parse::<f64>().ok()?,
    );
    color.validate().ok().map(|()| color)
}
