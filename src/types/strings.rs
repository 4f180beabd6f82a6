use crate::{
    BerView, DecodeView, Encodable, Encoder, FixedId, FixedIdBerContainer, Identified, Identifier,
    Length, Result, UniversalId,
};

/// An owned string-like element over a [`FixedIdBerContainer`].
///
/// Content octets are held verbatim; no character set validation is applied,
/// matching BER practice where the abstract syntax owns that concern. The
/// aliases below pin the universal tags of the common string types.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BerString<I: FixedId> {
    container: FixedIdBerContainer<I>,
}

/// `OCTET STRING`.
pub type OctetString = BerString<UniversalId<4>>;

/// `UTF8String`.
pub type Utf8String = BerString<UniversalId<12>>;

/// `PrintableString`.
pub type PrintableString = BerString<UniversalId<19>>;

/// `VisibleString`.
pub type VisibleString = BerString<UniversalId<26>>;

impl<I: FixedId> BerString<I> {
    pub fn new(content: &[u8]) -> Result<Self> {
        let mut string = BerString {
            container: FixedIdBerContainer::default(),
        };
        string.set(content)?;
        Ok(string)
    }

    pub fn from_str_content(content: &str) -> Result<Self> {
        Self::new(content.as_bytes())
    }

    /// Replace the content octets.
    pub fn set(&mut self, content: &[u8]) -> Result<()> {
        self.container.assign_content(content)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.container.content()
    }

    /// The content as UTF-8 text, if it is any.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.container.content()).ok()
    }

    pub fn len(&self) -> Length {
        self.container.content_length()
    }

    pub fn is_empty(&self) -> bool {
        self.container.content().is_empty()
    }

    /// The complete encoding.
    pub fn ber(&self) -> &[u8] {
        self.container.ber()
    }
}

impl<I: FixedId> PartialEq<[u8]> for BerString<I> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<I: FixedId> PartialEq<str> for BerString<I> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<I: FixedId> Identified for BerString<I> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId> Encodable for BerString<I> {
    fn encoded_length(&self) -> Result<Length> {
        self.container.encoded_length()
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.container.encode(encoder)
    }
}

impl<I: FixedId> DecodeView for BerString<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        Ok(BerString {
            container: FixedIdBerContainer::decode_view_with(view, id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BerString, OctetString, Utf8String};
    use crate::{ContextId, Decodable, Encodable, ErrorKind};
    use hex_literal::hex;

    #[test]
    fn octet_string_round_trip() {
        let value = OctetString::new(&hex!("DE AD BE EF")).unwrap();
        assert_eq!(value.ber(), &hex!("04 04 DE AD BE EF"));

        let decoded = OctetString::from_bytes(&hex!("04 04 DE AD BE EF")).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(decoded.as_bytes(), &hex!("DE AD BE EF"));
    }

    #[test]
    fn utf8_string_text() {
        let value = Utf8String::from_str_content("hello").unwrap();
        assert_eq!(value.ber(), b"\x0C\x05hello");
        assert_eq!(value.as_str(), Some("hello"));

        let binary = OctetString::new(&hex!("FF FE")).unwrap();
        assert_eq!(binary.as_str(), None);
    }

    #[test]
    fn empty_string() {
        let value = OctetString::new(&[]).unwrap();
        assert!(value.is_empty());
        assert_eq!(value.ber(), &hex!("04 00"));
        assert_eq!(value, OctetString::default());
    }

    #[test]
    fn tag_mismatch_between_string_types() {
        // UTF8String wire bytes under the OCTET STRING decoder
        let err = OctetString::from_bytes(b"\x0C\x05hello").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnexpectedTag { .. }));
    }

    #[test]
    fn retagged_string() {
        let value = BerString::<ContextId<7>>::new(b"key").unwrap();
        assert_eq!(value.ber(), b"\x87\x03key");

        let mut buffer = [0u8; 8];
        assert_eq!(value.encode_to_slice(&mut buffer).unwrap(), b"\x87\x03key");
    }

    #[test]
    fn long_content_uses_long_form_length() {
        let content = [0x41u8; 200];
        let value = OctetString::new(&content).unwrap();
        assert_eq!(&value.ber()[..3], &hex!("04 81 C8"));
        assert_eq!(value.ber().len(), 203);
    }
}
