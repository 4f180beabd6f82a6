use crate::{
    BerView, DecodeView, ErrorKind, FixedId, Identified, Identifier, Result,
    SmallFixedIdBerContainer, UniversalId,
};

/// `INTEGER`, limited to the range of `i64`.
///
/// Content octets are the minimal two's complement form required by X.690:
/// a leading `0x00` appears only to keep a positive value positive, and
/// redundant leading sign octets are never emitted. Decoding tolerates
/// non-minimal input and re-canonicalizes it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Integer<I: FixedId = UniversalId<2>> {
    container: SmallFixedIdBerContainer<I, 8>,
}

/// `ENUMERATED`. Content rules are those of [`Integer`], under tag 10.
pub type Enumerated = Integer<UniversalId<10>>;

impl Integer {
    /// An `INTEGER` under the universal tag. Retagged integers are built
    /// through `From`, e.g. `Integer::<ContextId<0>>::from(5)`.
    pub fn new(value: i64) -> Self {
        Self::from(value)
    }
}

impl<I: FixedId> Integer<I> {
    pub fn value(&self) -> i64 {
        let content = self.container.content();
        let mut value: i64 = match content.first() {
            Some(octet) if octet & 0x80 != 0 => -1,
            Some(_) => 0,
            None => return 0,
        };
        for octet in content {
            value = (value << 8) | *octet as i64;
        }
        value
    }

    pub fn assign(&mut self, value: i64) {
        *self = Self::from(value);
    }
}

impl<I: FixedId> Default for Integer<I> {
    fn default() -> Self {
        Self::from(0)
    }
}

impl<I: FixedId> From<i64> for Integer<I> {
    fn from(value: i64) -> Self {
        let bytes = value.to_be_bytes();
        let mut skip = 0;
        while skip < 7 {
            let redundant = (bytes[skip] == 0x00 && bytes[skip + 1] & 0x80 == 0)
                || (bytes[skip] == 0xFF && bytes[skip + 1] & 0x80 != 0);
            if !redundant {
                break;
            }
            skip += 1;
        }

        let mut container = SmallFixedIdBerContainer::new();
        // at most 8 octets, always fits
        let _ = container.assign_content(&bytes[skip..]);
        Integer { container }
    }
}

impl<I: FixedId> From<i32> for Integer<I> {
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl<I: FixedId> Identified for Integer<I> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId> crate::EncodableContent for Integer<I> {
    fn content_length(&self) -> Result<crate::Length> {
        Ok(self.container.content_length())
    }

    fn encode_content(&self, encoder: &mut crate::Encoder<'_>) -> Result<()> {
        encoder.bytes(self.container.content())
    }
}

impl<I: FixedId> DecodeView for Integer<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content_view = view.expect(id, crate::Construction::Primitive)?;
        let content = content_view.content();
        if content.is_empty() {
            return Err(ErrorKind::Length {
                tag: content_view.tag(),
            }
            .into());
        }

        // strip redundant sign octets so oversized-but-in-range input decodes
        let mut octets = content;
        while octets.len() > 1
            && ((octets[0] == 0x00 && octets[1] & 0x80 == 0)
                || (octets[0] == 0xFF && octets[1] & 0x80 != 0))
        {
            octets = &octets[1..];
        }
        if octets.len() > 8 {
            return Err(ErrorKind::Overlength.into());
        }

        let mut value: i64 = if octets[0] & 0x80 != 0 { -1 } else { 0 };
        for octet in octets {
            value = (value << 8) | *octet as i64;
        }
        Ok(Self::from(value))
    }
}
