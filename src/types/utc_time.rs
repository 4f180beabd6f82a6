use crate::{
    BerView, DecodeView, ErrorKind, FixedId, Identified, Identifier, Length,
    LengthAndContentContainer, Result, UniversalId,
};
use core::{
    fmt::{self, Write},
    marker::PhantomData,
};

/// `UTCTime`, held as its validated ASCII content.
///
/// The year is two digits; [`UTCTime::year`] resolves it with the usual
/// pivot, `00..=49` as `20xx` and `50..=99` as `19xx`. All four layouts
/// carry a zone, either the `Z` terminator or a `+HHMM`/`-HHMM` offset,
/// and seconds are optional.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UtcTime<I: FixedId = UniversalId<23>> {
    payload: LengthAndContentContainer,
    seconds_present: bool,
    _id: PhantomData<I>,
}

impl UtcTime {
    /// A `UTCTime` under the universal tag.
    pub fn new(text: &str) -> Result<Self> {
        Self::from_text(text)
    }

    /// A UTC timestamp with seconds, `YYMMDDHHMMSSZ`.
    ///
    /// `year` is the full year and must fall in the representable range
    /// 1950 to 2049.
    pub fn universal(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        if !(1950..=2049).contains(&year) {
            return Err(ErrorKind::InvalidTime.into());
        }

        let mut text = heapless::String::<32>::new();
        write!(
            &mut text,
            "{:02}{:02}{:02}{:02}{:02}{:02}Z",
            year % 100,
            month,
            day,
            hour,
            minute,
            second
        )
        .map_err(|_| ErrorKind::InvalidTime)?;
        Self::from_text(&text)
    }
}

impl<I: FixedId> UtcTime<I> {
    pub fn from_text(text: &str) -> Result<Self> {
        let seconds_present = validate(text.as_bytes())?;
        let mut payload = LengthAndContentContainer::new();
        payload.assign_content(text.as_bytes())?;
        Ok(UtcTime {
            payload,
            seconds_present,
            _id: PhantomData,
        })
    }

    /// The content text, e.g. `260830120000Z`.
    pub fn as_str(&self) -> &str {
        // content is validated ASCII
        core::str::from_utf8(self.payload.content()).unwrap_or_default()
    }

    /// The full year, two digits resolved against the 1950/2049 pivot.
    pub fn year(&self) -> u16 {
        let two_digit = self.number(0) as u16;
        if two_digit < 50 {
            2000 + two_digit
        } else {
            1900 + two_digit
        }
    }

    pub fn month(&self) -> u8 {
        self.number(2) as u8
    }

    pub fn day(&self) -> u8 {
        self.number(4) as u8
    }

    pub fn hour(&self) -> u8 {
        self.number(6) as u8
    }

    pub fn minute(&self) -> u8 {
        self.number(8) as u8
    }

    /// Seconds, `0` when the layout omits them.
    pub fn second(&self) -> u8 {
        if self.seconds_present {
            self.number(10) as u8
        } else {
            0
        }
    }

    /// The UTC offset in signed minutes, `0` for the `Z` layouts.
    pub fn offset_minutes(&self) -> i16 {
        let zone = if self.seconds_present { 12 } else { 10 };
        let content = self.payload.content();
        match content[zone] {
            b'Z' => 0,
            sign => {
                let magnitude = (self.number(zone + 1) * 60 + self.number(zone + 3)) as i16;
                if sign == b'-' {
                    -magnitude
                } else {
                    magnitude
                }
            }
        }
    }

    /// Two validated ASCII digits at `at`, as a number.
    fn number(&self, at: usize) -> u32 {
        let content = self.payload.content();
        (content[at] - b'0') as u32 * 10 + (content[at + 1] - b'0') as u32
    }
}

/// Check the content octets against the four supported layouts, returning
/// whether seconds are present.
fn validate(content: &[u8]) -> Result<bool> {
    let (seconds_present, zone) = match content.len() {
        11 if content[10] == b'Z' => (false, None),
        13 if content[12] == b'Z' => (true, None),
        15 if content[10] == b'+' || content[10] == b'-' => (false, Some(11)),
        17 if content[12] == b'+' || content[12] == b'-' => (true, Some(13)),
        _ => return Err(ErrorKind::InvalidTime.into()),
    };

    let digits = |range: core::ops::Range<usize>| -> Result<u32> {
        let mut value = 0u32;
        for octet in &content[range] {
            if !octet.is_ascii_digit() {
                return Err(ErrorKind::InvalidTime.into());
            }
            value = value * 10 + (octet - b'0') as u32;
        }
        Ok(value)
    };

    digits(0..2)?;
    let month = digits(2..4)?;
    let day = digits(4..6)?;
    let hour = digits(6..8)?;
    let minute = digits(8..10)?;
    let second = if seconds_present { digits(10..12)? } else { 0 };

    let in_range = (1..=12).contains(&month)
        && (1..=31).contains(&day)
        && hour < 24
        && minute < 60
        && second < 60;
    if !in_range {
        return Err(ErrorKind::InvalidTime.into());
    }

    if let Some(at) = zone {
        let offset_hour = digits(at..at + 2)?;
        let offset_minute = digits(at + 2..at + 4)?;
        if offset_hour >= 24 || offset_minute >= 60 {
            return Err(ErrorKind::InvalidTime.into());
        }
    }

    Ok(seconds_present)
}

impl<I: FixedId> Default for UtcTime<I> {
    fn default() -> Self {
        let mut payload = LengthAndContentContainer::new();
        // the literal is a valid timestamp, always fits
        let _ = payload.assign_content(b"500101000000Z");
        UtcTime {
            payload,
            seconds_present: true,
            _id: PhantomData,
        }
    }
}

impl<I: FixedId> fmt::Display for UtcTime<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<I: FixedId> Identified for UtcTime<I> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId> crate::EncodableContent for UtcTime<I> {
    fn content_length(&self) -> Result<Length> {
        Ok(self.payload.content_length())
    }

    fn encode_content(&self, encoder: &mut crate::Encoder<'_>) -> Result<()> {
        encoder.bytes(self.payload.content())
    }
}

impl<I: FixedId> DecodeView for UtcTime<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content = view.expect(id, crate::Construction::Primitive)?;
        let seconds_present = validate(content.content())?;

        let mut payload = LengthAndContentContainer::new();
        payload.assign_content(content.content())?;
        Ok(UtcTime {
            payload,
            seconds_present,
            _id: PhantomData,
        })
    }
}
