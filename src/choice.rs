//! Choice dispatch.
//!
//! A choice type is an ordinary Rust enum whose variants hold the
//! alternatives. The enum declares [`Identifier::TagSet`] as its identifier
//! (or a `Single`/`Nested` identifier when the choice carries a wrapper tag
//! of its own), and its [`DecodeView`](crate::DecodeView) impl matches the
//! inbound tag against the alternatives in declaration order.
//!
//! [`unwrap_choice`] is the shared entry point: it validates a view against
//! the choice's identifier and strips wrapper headers, leaving the view of
//! the chosen alternative for the enum to dispatch on.

use crate::{BerView, Construction, ErrorKind, Id, Identifier, Result};

#[cfg(feature = "alloc")]
use crate::{
    universal, BitString, Boolean, DecodeView, Encodable, Encoder, Enumerated, GeneralizedTime,
    Identified, Integer, Length, Null, ObjectIdentifier, OctetString, PrintableString, UtcTime,
    Utf8String, VisibleString,
};

/// Validate `view` against a choice identifier and return the view of the
/// chosen alternative.
///
/// For a [`Identifier::TagSet`] the element itself is one of the
/// alternatives, so the view is returned unchanged once its tag is a member
/// of the set. `Single` and `Nested` identifiers describe wrapper tags whose
/// content is exactly one nested element holding the alternative; the
/// wrapper layers are validated and stripped.
pub fn unwrap_choice<'a>(view: BerView<'a>, id: &Identifier) -> Result<BerView<'a>> {
    match id {
        Identifier::TagSet(_) => {
            if id.matches(view.tag()) {
                Ok(view)
            } else {
                Err(ErrorKind::NoAlternative { actual: view.tag() }.into())
            }
        }
        Identifier::Single(outer) => {
            check_wrapper(&view, *outer)?;
            sole_child(&view)
        }
        Identifier::Nested { outer, inner } => {
            check_wrapper(&view, *outer)?;
            let middle = sole_child(&view)?;
            check_wrapper(&middle, *inner)?;
            sole_child(&middle)
        }
    }
}

fn check_wrapper(view: &BerView<'_>, wrapper: Id) -> Result<()> {
    if wrapper.matches(view.tag()) && view.construction() == Construction::Constructed {
        Ok(())
    } else {
        Err(ErrorKind::UnexpectedTag {
            expected: Some(wrapper.tag(Construction::Constructed)),
            actual: view.tag(),
        }
        .into())
    }
}

/// Parse the wrapper's content as exactly one element.
fn sole_child<'a>(view: &BerView<'a>) -> Result<BerView<'a>> {
    let child = BerView::parse(view.content())?;
    if child.ber().len() != view.content().len() {
        return Err(ErrorKind::Length { tag: view.tag() }.into());
    }
    Ok(child)
}

/// Open type over the universal-class leaf types of this crate.
///
/// Alternatives are tried in declaration order on decode; an element whose
/// tag matches none of them fails with [`ErrorKind::NoAlternative`].
#[cfg(feature = "alloc")]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Any {
    Boolean(Boolean),
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null(Null),
    ObjectIdentifier(ObjectIdentifier),
    Enumerated(Enumerated),
    Utf8String(Utf8String),
    PrintableString(PrintableString),
    VisibleString(VisibleString),
    UtcTime(UtcTime),
    GeneralizedTime(GeneralizedTime),
}

#[cfg(feature = "alloc")]
impl Any {
    /// Identifier of the alternative held in this value.
    pub fn identifier(&self) -> Identifier {
        let number = match self {
            Any::Boolean(_) => universal::BOOLEAN,
            Any::Integer(_) => universal::INTEGER,
            Any::BitString(_) => universal::BIT_STRING,
            Any::OctetString(_) => universal::OCTET_STRING,
            Any::Null(_) => universal::NULL,
            Any::ObjectIdentifier(_) => universal::OBJECT_IDENTIFIER,
            Any::Enumerated(_) => universal::ENUMERATED,
            Any::Utf8String(_) => universal::UTF8_STRING,
            Any::PrintableString(_) => universal::PRINTABLE_STRING,
            Any::VisibleString(_) => universal::VISIBLE_STRING,
            Any::UtcTime(_) => universal::UTC_TIME,
            Any::GeneralizedTime(_) => universal::GENERALIZED_TIME,
        };
        Identifier::Single(Id::universal(number))
    }
}

#[cfg(feature = "alloc")]
impl Identified for Any {
    const IDENTIFIER: Identifier = Identifier::TagSet(&[
        Identifier::Single(Id::universal(universal::BOOLEAN)),
        Identifier::Single(Id::universal(universal::INTEGER)),
        Identifier::Single(Id::universal(universal::BIT_STRING)),
        Identifier::Single(Id::universal(universal::OCTET_STRING)),
        Identifier::Single(Id::universal(universal::NULL)),
        Identifier::Single(Id::universal(universal::OBJECT_IDENTIFIER)),
        Identifier::Single(Id::universal(universal::ENUMERATED)),
        Identifier::Single(Id::universal(universal::UTF8_STRING)),
        Identifier::Single(Id::universal(universal::PRINTABLE_STRING)),
        Identifier::Single(Id::universal(universal::VISIBLE_STRING)),
        Identifier::Single(Id::universal(universal::UTC_TIME)),
        Identifier::Single(Id::universal(universal::GENERALIZED_TIME)),
    ]);
}

#[cfg(feature = "alloc")]
impl DecodeView for Any {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let view = unwrap_choice(view, id)?;
        let tag = view.tag();

        if tag.class == crate::Class::Universal {
            match tag.number {
                universal::BOOLEAN => return <Boolean>::decode_view(view).map(Any::Boolean),
                universal::INTEGER => return <Integer>::decode_view(view).map(Any::Integer),
                universal::BIT_STRING => {
                    return <BitString>::decode_view(view).map(Any::BitString)
                }
                universal::OCTET_STRING => {
                    return OctetString::decode_view(view).map(Any::OctetString)
                }
                universal::NULL => return <Null>::decode_view(view).map(Any::Null),
                universal::OBJECT_IDENTIFIER => {
                    return <ObjectIdentifier>::decode_view(view).map(Any::ObjectIdentifier)
                }
                universal::ENUMERATED => {
                    return Enumerated::decode_view(view).map(Any::Enumerated)
                }
                universal::UTF8_STRING => {
                    return Utf8String::decode_view(view).map(Any::Utf8String)
                }
                universal::PRINTABLE_STRING => {
                    return PrintableString::decode_view(view).map(Any::PrintableString)
                }
                universal::VISIBLE_STRING => {
                    return VisibleString::decode_view(view).map(Any::VisibleString)
                }
                universal::UTC_TIME => return <UtcTime>::decode_view(view).map(Any::UtcTime),
                universal::GENERALIZED_TIME => {
                    return <GeneralizedTime>::decode_view(view).map(Any::GeneralizedTime)
                }
                _ => {}
            }
        }

        debug!("no Any alternative for tag {}", tag);
        Err(ErrorKind::NoAlternative { actual: tag }.into())
    }
}

#[cfg(feature = "alloc")]
impl Encodable for Any {
    fn encoded_length(&self) -> Result<Length> {
        match self {
            Any::Boolean(v) => v.encoded_length(),
            Any::Integer(v) => v.encoded_length(),
            Any::BitString(v) => v.encoded_length(),
            Any::OctetString(v) => v.encoded_length(),
            Any::Null(v) => v.encoded_length(),
            Any::ObjectIdentifier(v) => v.encoded_length(),
            Any::Enumerated(v) => v.encoded_length(),
            Any::Utf8String(v) => v.encoded_length(),
            Any::PrintableString(v) => v.encoded_length(),
            Any::VisibleString(v) => v.encoded_length(),
            Any::UtcTime(v) => v.encoded_length(),
            Any::GeneralizedTime(v) => v.encoded_length(),
        }
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        match self {
            Any::Boolean(v) => v.encode(encoder),
            Any::Integer(v) => v.encode(encoder),
            Any::BitString(v) => v.encode(encoder),
            Any::OctetString(v) => v.encode(encoder),
            Any::Null(v) => v.encode(encoder),
            Any::ObjectIdentifier(v) => v.encode(encoder),
            Any::Enumerated(v) => v.encode(encoder),
            Any::Utf8String(v) => v.encode(encoder),
            Any::PrintableString(v) => v.encode(encoder),
            Any::VisibleString(v) => v.encode(encoder),
            Any::UtcTime(v) => v.encode(encoder),
            Any::GeneralizedTime(v) => v.encode(encoder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::unwrap_choice;
    use crate::{BerView, ErrorKind, Id, Identifier, Tag};
    use hex_literal::hex;

    const SET: Identifier = Identifier::TagSet(&[
        Identifier::Single(Id::universal(2)),
        Identifier::Single(Id::context(0)),
    ]);

    #[test]
    fn tag_set_passes_members_through() {
        let bytes = hex!("02 01 05");
        let view = BerView::parse(&bytes).unwrap();
        assert_eq!(unwrap_choice(view, &SET).unwrap(), view);
    }

    #[test]
    fn tag_set_rejects_non_members() {
        let bytes = hex!("04 01 05");
        let view = BerView::parse(&bytes).unwrap();
        assert_eq!(
            unwrap_choice(view, &SET).unwrap_err().kind(),
            ErrorKind::NoAlternative {
                actual: Tag::universal(4)
            }
        );
    }

    #[test]
    fn single_wrapper_is_stripped() {
        let bytes = hex!("A0 03 02 01 05");
        let view = BerView::parse(&bytes).unwrap();
        let inner = unwrap_choice(view, &Identifier::Single(Id::context(0))).unwrap();
        assert_eq!(inner.ber(), &hex!("02 01 05"));
    }

    #[test]
    fn wrapper_must_hold_exactly_one_element() {
        let bytes = hex!("A0 06 02 01 05 02 01 06");
        let view = BerView::parse(&bytes).unwrap();
        let err = unwrap_choice(view, &Identifier::Single(Id::context(0))).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::Length {
                tag: Tag::context(0).constructed()
            }
        );
    }

    #[test]
    fn nested_wrapper_is_stripped_twice() {
        let bytes = hex!("A1 07 A2 05 04 03 61 62 63");
        let view = BerView::parse(&bytes).unwrap();
        let id = Identifier::Nested {
            outer: Id::context(1),
            inner: Id::context(2),
        };
        let inner = unwrap_choice(view, &id).unwrap();
        assert_eq!(inner.content(), b"abc");
    }

    #[test]
    fn primitive_wrapper_is_rejected() {
        let bytes = hex!("80 01 05");
        let view = BerView::parse(&bytes).unwrap();
        let err = unwrap_choice(view, &Identifier::Single(Id::context(0))).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::UnexpectedTag {
                expected: Some(Tag::context(0).constructed()),
                actual: Tag::context(0),
            }
        );
    }

    #[cfg(feature = "alloc")]
    mod any {
        use super::super::Any;
        use crate::{Decodable, Encodable, ErrorKind, Tag};
        use hex_literal::hex;

        #[test]
        fn decodes_each_alternative() {
            let cases: &[(&[u8], fn(&Any) -> bool)] = &[
                (&hex!("01 01 FF"), |a| matches!(a, Any::Boolean(_))),
                (&hex!("02 01 2A"), |a| matches!(a, Any::Integer(_))),
                (&hex!("03 02 04 F0"), |a| matches!(a, Any::BitString(_))),
                (&hex!("04 02 AB CD"), |a| matches!(a, Any::OctetString(_))),
                (&hex!("05 00"), |a| matches!(a, Any::Null(_))),
                (&hex!("06 03 2A 03 04"), |a| {
                    matches!(a, Any::ObjectIdentifier(_))
                }),
                (&hex!("0A 01 02"), |a| matches!(a, Any::Enumerated(_))),
                (&hex!("0C 02 68 69"), |a| matches!(a, Any::Utf8String(_))),
                (&hex!("13 02 68 69"), |a| matches!(a, Any::PrintableString(_))),
                (&hex!("1A 02 68 69"), |a| matches!(a, Any::VisibleString(_))),
                (&hex!("17 0D 32 35 31 32 33 31 32 33 35 39 35 39 5A"), |a| {
                    matches!(a, Any::UtcTime(_))
                }),
                (&hex!("18 0F 32 30 32 35 31 32 33 31 32 33 35 39 35 39 5A"), |a| {
                    matches!(a, Any::GeneralizedTime(_))
                }),
            ];

            for (bytes, is_expected) in cases {
                let any = Any::from_bytes(bytes).unwrap();
                assert!(is_expected(&any));
                assert_eq!(any.to_vec().unwrap(), *bytes);
            }
        }

        #[test]
        fn rejects_unlisted_tags() {
            // IA5String has no built-in type here
            let err = Any::from_bytes(&hex!("16 02 68 69")).unwrap_err();
            assert_eq!(
                err.kind(),
                ErrorKind::NoAlternative {
                    actual: Tag::universal(22)
                }
            );
        }

        #[test]
        fn integer_wins_over_later_alternatives() {
            let any = Any::from_bytes(&hex!("02 01 00")).unwrap();
            assert!(matches!(any, Any::Integer(_)));
        }
    }
}
