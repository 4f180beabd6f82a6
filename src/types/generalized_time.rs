use crate::{
    BerView, DecodeView, ErrorKind, FixedId, Identified, Identifier, Length,
    LengthAndContentContainer, Result, UniversalId,
};
use core::{
    fmt::{self, Write},
    marker::PhantomData,
};

/// The three time layouts `GeneralizedTime` content may use.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimeFormat {
    /// `YYYYMMDDHHMMSSZ`
    Universal,
    /// `YYYYMMDDHHMMSS+HHMM` or `YYYYMMDDHHMMSS-HHMM`
    UniversalWithOffset,
    /// `YYYYMMDDHHMMSS`
    Local,
}

/// `GeneralizedTime`, held as its validated ASCII content.
///
/// Fractional seconds are not supported; the three whole-second layouts are.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneralizedTime<I: FixedId = UniversalId<24>> {
    payload: LengthAndContentContainer,
    format: TimeFormat,
    _id: PhantomData<I>,
}

impl GeneralizedTime {
    /// A `GeneralizedTime` under the universal tag.
    pub fn new(text: &str) -> Result<Self> {
        Self::from_text(text)
    }

    /// A UTC timestamp, `YYYYMMDDHHMMSSZ`.
    pub fn universal(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        let mut text = render(year, month, day, hour, minute, second)?;
        text.push('Z').map_err(|_| ErrorKind::InvalidTime)?;
        Self::from_text(&text)
    }

    /// A timestamp with a UTC offset, `YYYYMMDDHHMMSS±HHMM`.
    ///
    /// The offset is given in signed minutes, e.g. `330` for `+0530`.
    pub fn universal_with_offset(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        offset_minutes: i16,
    ) -> Result<Self> {
        let mut text = render(year, month, day, hour, minute, second)?;
        let sign = if offset_minutes < 0 { '-' } else { '+' };
        let magnitude = offset_minutes.unsigned_abs();
        write!(&mut text, "{}{:02}{:02}", sign, magnitude / 60, magnitude % 60)
            .map_err(|_| ErrorKind::InvalidTime)?;
        Self::from_text(&text)
    }

    /// A timestamp in unspecified local time, `YYYYMMDDHHMMSS`.
    pub fn local(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        let text = render(year, month, day, hour, minute, second)?;
        Self::from_text(&text)
    }
}

impl<I: FixedId> GeneralizedTime<I> {
    pub fn from_text(text: &str) -> Result<Self> {
        let format = validate(text.as_bytes())?;
        let mut payload = LengthAndContentContainer::new();
        payload.assign_content(text.as_bytes())?;
        Ok(GeneralizedTime {
            payload,
            format,
            _id: PhantomData,
        })
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    /// The content text, e.g. `20260830120000Z`.
    pub fn as_str(&self) -> &str {
        // content is validated ASCII
        core::str::from_utf8(self.payload.content()).unwrap_or_default()
    }

    pub fn year(&self) -> u16 {
        (self.number(0) * 100 + self.number(2)) as u16
    }

    pub fn month(&self) -> u8 {
        self.number(4) as u8
    }

    pub fn day(&self) -> u8 {
        self.number(6) as u8
    }

    pub fn hour(&self) -> u8 {
        self.number(8) as u8
    }

    pub fn minute(&self) -> u8 {
        self.number(10) as u8
    }

    pub fn second(&self) -> u8 {
        self.number(12) as u8
    }

    /// The UTC offset in signed minutes. `Some(0)` for the universal layout,
    /// `None` for local time.
    pub fn offset_minutes(&self) -> Option<i16> {
        match self.format {
            TimeFormat::Universal => Some(0),
            TimeFormat::Local => None,
            TimeFormat::UniversalWithOffset => {
                let magnitude = (self.number(15) * 60 + self.number(17)) as i16;
                match self.payload.content()[14] {
                    b'-' => Some(-magnitude),
                    _ => Some(magnitude),
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

/// Format the date and time fields common to all three layouts.
fn render(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<heapless::String<32>> {
    let mut text = heapless::String::new();
    write!(
        &mut text,
        "{:04}{:02}{:02}{:02}{:02}{:02}",
        year, month, day, hour, minute, second
    )
    .map_err(|_| ErrorKind::InvalidTime)?;
    Ok(text)
}

/// Check the content octets against the three supported layouts, detected
/// from the trailing bytes: `Z` terminator, `+`/`-` offset, or neither.
fn validate(content: &[u8]) -> Result<TimeFormat> {
    let format = match content.len() {
        15 if content[14] == b'Z' => TimeFormat::Universal,
        19 if content[14] == b'+' || content[14] == b'-' => TimeFormat::UniversalWithOffset,
        14 => TimeFormat::Local,
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

    digits(0..4)?;
    let month = digits(4..6)?;
    let day = digits(6..8)?;
    let hour = digits(8..10)?;
    let minute = digits(10..12)?;
    let second = digits(12..14)?;

    let in_range = (1..=12).contains(&month)
        && (1..=31).contains(&day)
        && hour < 24
        && minute < 60
        && second < 60;
    if !in_range {
        return Err(ErrorKind::InvalidTime.into());
    }

    if format == TimeFormat::UniversalWithOffset {
        let offset_hour = digits(15..17)?;
        let offset_minute = digits(17..19)?;
        if offset_hour >= 24 || offset_minute >= 60 {
            return Err(ErrorKind::InvalidTime.into());
        }
    }

    Ok(format)
}

impl<I: FixedId> Default for GeneralizedTime<I> {
    fn default() -> Self {
        let mut payload = LengthAndContentContainer::new();
        // the literal is a valid universal timestamp, always fits
        let _ = payload.assign_content(b"00010101000000Z");
        GeneralizedTime {
            payload,
            format: TimeFormat::Universal,
            _id: PhantomData,
        }
    }
}

impl<I: FixedId> fmt::Display for GeneralizedTime<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<I: FixedId> Identified for GeneralizedTime<I> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId> crate::EncodableContent for GeneralizedTime<I> {
    fn content_length(&self) -> Result<Length> {
        Ok(self.payload.content_length())
    }

    fn encode_content(&self, encoder: &mut crate::Encoder<'_>) -> Result<()> {
        encoder.bytes(self.payload.content())
    }
}

impl<I: FixedId> DecodeView for GeneralizedTime<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content = view.expect(id, crate::Construction::Primitive)?;
        let format = validate(content.content())?;

        let mut payload = LengthAndContentContainer::new();
        payload.assign_content(content.content())?;
        Ok(GeneralizedTime {
            payload,
            format,
            _id: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneralizedTime, TimeFormat};
    use crate::{Decodable, Encodable, ErrorKind};

    #[test]
    fn universal_time() {
        let time = GeneralizedTime::new("20260830120000Z").unwrap();
        assert_eq!(time.format(), TimeFormat::Universal);

        let mut buffer = [0u8; 32];
        let encoded = time.encode_to_slice(&mut buffer).unwrap();
        assert_eq!(encoded, b"\x18\x0F20260830120000Z");

        let decoded = <GeneralizedTime>::from_bytes(encoded).unwrap();
        assert_eq!(decoded.as_str(), "20260830120000Z");
        assert_eq!(decoded, time);
    }

    #[test]
    fn offset_time() {
        let time = GeneralizedTime::new("20260830120000+0530").unwrap();
        assert_eq!(time.format(), TimeFormat::UniversalWithOffset);

        let negative = GeneralizedTime::new("19991231235959-0800").unwrap();
        assert_eq!(negative.format(), TimeFormat::UniversalWithOffset);
    }

    #[test]
    fn local_time() {
        let time = GeneralizedTime::new("20260830120000").unwrap();
        assert_eq!(time.format(), TimeFormat::Local);
        assert_eq!(time.as_str(), "20260830120000");
    }

    #[test]
    fn numeric_constructors() {
        let time = GeneralizedTime::universal(2026, 8, 30, 12, 0, 0).unwrap();
        assert_eq!(time.as_str(), "20260830120000Z");

        let ahead = GeneralizedTime::universal_with_offset(2026, 8, 30, 12, 0, 0, 330).unwrap();
        assert_eq!(ahead.as_str(), "20260830120000+0530");

        let behind = GeneralizedTime::universal_with_offset(1999, 12, 31, 23, 59, 59, -480).unwrap();
        assert_eq!(behind.as_str(), "19991231235959-0800");

        let local = GeneralizedTime::local(2026, 8, 30, 12, 0, 0).unwrap();
        assert_eq!(local.as_str(), "20260830120000");

        assert_eq!(
            GeneralizedTime::universal(2026, 13, 1, 0, 0, 0)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidTime
        );
        assert_eq!(
            GeneralizedTime::universal(10000, 1, 1, 0, 0, 0)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidTime
        );
    }

    #[test]
    fn component_accessors() {
        let time = GeneralizedTime::new("20260830235910+0530").unwrap();
        assert_eq!(time.year(), 2026);
        assert_eq!(time.month(), 8);
        assert_eq!(time.day(), 30);
        assert_eq!(time.hour(), 23);
        assert_eq!(time.minute(), 59);
        assert_eq!(time.second(), 10);
        assert_eq!(time.offset_minutes(), Some(330));

        let utc = GeneralizedTime::new("20260830120000Z").unwrap();
        assert_eq!(utc.offset_minutes(), Some(0));

        let local = GeneralizedTime::new("20260830120000").unwrap();
        assert_eq!(local.offset_minutes(), None);
    }

    #[test]
    fn rejects_malformed_text() {
        for text in [
            "",
            "2026",
            "20260830120000X",      // bad terminator
            "2026083012000Z",       // too short for universal
            "20261330120000Z",      // month 13
            "20260800120000Z",      // day 0
            "20260830240000Z",      // hour 24
            "20260830126000Z",      // minute 60
            "20260830120060Z",      // second 60
            "20260830120000+2500",  // offset hour 25
            "20260830120000+0060",  // offset minute 60
            "2026083012000AZ",      // non-digit
            "20260830120000.5Z",    // fractional seconds unsupported
        ] {
            assert_eq!(
                GeneralizedTime::new(text).unwrap_err().kind(),
                ErrorKind::InvalidTime,
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn rejects_malformed_wire_content() {
        let err = <GeneralizedTime>::from_bytes(b"\x18\x0E2026083012000Z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTime);
    }
}
