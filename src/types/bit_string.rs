use crate::{
    BerView, DecodeView, ErrorKind, FixedId, Identified, Identifier, Length, Result, UniversalId,
};
use crate::{Encodable, Encoder, FixedIdBerContainer};
use alloc::vec::Vec;

/// `BIT STRING`.
///
/// The first content octet counts the unused trailing bits of the last data
/// octet; an empty bit string is the single octet `0x00`. Unused bits are
/// carried verbatim, no masking is applied.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitString<I: FixedId = UniversalId<3>> {
    container: FixedIdBerContainer<I>,
}

impl BitString {
    /// A `BIT STRING` under the universal tag.
    pub fn new(bits: &[u8], unused_bits: u8) -> Result<Self> {
        Self::from_bits(bits, unused_bits)
    }
}

impl<I: FixedId> BitString<I> {
    pub fn from_bits(bits: &[u8], unused_bits: u8) -> Result<Self> {
        if unused_bits > 7 || (bits.is_empty() && unused_bits != 0) {
            return Err(ErrorKind::InvalidBitString.into());
        }

        let mut content = Vec::with_capacity(bits.len() + 1);
        content.push(unused_bits);
        content.extend_from_slice(bits);

        let mut container = FixedIdBerContainer::default();
        container.assign_content(&content)?;
        Ok(BitString { container })
    }

    /// The data octets, without the leading unused-bits octet.
    pub fn as_bytes(&self) -> &[u8] {
        &self.container.content()[1..]
    }

    pub fn unused_bits(&self) -> u8 {
        self.container.content()[0]
    }

    /// Count of bits held, the unused tail excluded.
    pub fn bit_length(&self) -> usize {
        self.as_bytes().len() * 8 - self.unused_bits() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// The complete encoding.
    pub fn ber(&self) -> &[u8] {
        self.container.ber()
    }
}

impl<I: FixedId> Default for BitString<I> {
    fn default() -> Self {
        let mut container = FixedIdBerContainer::default();
        // the single unused-bits octet, always fits
        let _ = container.assign_content(&[0x00]);
        BitString { container }
    }
}

impl<I: FixedId> Identified for BitString<I> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId> Encodable for BitString<I> {
    fn encoded_length(&self) -> Result<Length> {
        self.container.encoded_length()
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.container.encode(encoder)
    }
}

impl<I: FixedId> DecodeView for BitString<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let container = FixedIdBerContainer::decode_view_with(view, id)?;
        match container.content() {
            [] => Err(ErrorKind::InvalidBitString.into()),
            [unused] if *unused != 0 => Err(ErrorKind::InvalidBitString.into()),
            [unused, ..] if *unused > 7 => Err(ErrorKind::InvalidBitString.into()),
            _ => Ok(BitString { container }),
        }
    }
}
