//! A hand-written `SEQUENCE` exercising the field machinery end to end.

use hex_literal::hex;
use microber::{
    decode_fields, universal, BerView, Boolean, ContextId, Decodable, DecodeView, Encodable,
    ErrorKind, Id, Identified, Identifier, Integer, Result, Sequence, SequenceOf,
};

// SEQUENCE {
//     version   [0] IMPLICIT INTEGER,
//     serial        INTEGER,
//     critical  [1] IMPLICIT BOOLEAN OPTIONAL,
//     retries       INTEGER DEFAULT 3,
// }
#[derive(Clone, Debug, Eq, PartialEq)]
struct Access {
    version: Integer<ContextId<0>>,
    serial: Integer,
    critical: Option<Boolean<ContextId<1>>>,
    retries: Integer,
}

impl Identified for Access {
    const IDENTIFIER: Identifier = Identifier::Single(Id::universal(universal::SEQUENCE));
}

impl Sequence for Access {
    fn fields<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&[&dyn Encodable]) -> Result<T>,
    {
        match &self.critical {
            Some(critical) => f(&[&self.version, &self.serial, critical, &self.retries]),
            None => f(&[&self.version, &self.serial, &self.retries]),
        }
    }
}

impl DecodeView for Access {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        decode_fields(view, id, |fields| {
            Ok(Self {
                version: fields.required()?,
                serial: fields.required()?,
                critical: fields.optional()?,
                retries: fields.default_or(Integer::new(3))?,
            })
        })
    }
}

fn sample(critical: Option<bool>) -> Access {
    Access {
        version: 2i64.into(),
        serial: 1000i64.into(),
        critical: critical.map(Boolean::from),
        retries: Integer::new(3),
    }
}

#[test]
fn reconstruct() {
    let access = sample(Some(true));
    let mut buf = [0u8; 64];

    let encoded = access.encode_to_slice(&mut buf).unwrap();
    assert_eq!(
        encoded,
        &hex!("30 0D 80 01 02 02 02 03 E8 81 01 FF 02 01 03")
    );

    assert_eq!(Access::from_bytes(encoded).unwrap(), access);
}

#[test]
fn optional_field_is_skipped_when_absent() {
    let access = sample(None);
    let mut buf = [0u8; 64];

    let encoded = access.encode_to_slice(&mut buf).unwrap();
    assert_eq!(encoded, &hex!("30 0A 80 01 02 02 02 03 E8 02 01 03"));

    let decoded = Access::from_bytes(encoded).unwrap();
    assert_eq!(decoded.critical, None);
}

#[test]
fn defaulted_field_substitutes_when_absent() {
    let decoded = Access::from_bytes(&hex!("30 07 80 01 02 02 02 03 E8")).unwrap();
    assert_eq!(decoded.retries.value(), 3);
    assert_eq!(decoded.critical, None);
}

#[test]
fn missing_required_field_is_truncated() {
    let err = Access::from_bytes(&hex!("30 03 80 01 02")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn trailing_fields_are_ignored() {
    // a trailing NULL no declared field consumes, as an extended
    // peer would send
    let decoded =
        Access::from_bytes(&hex!("30 0C 80 01 02 02 02 03 E8 02 01 03 05 00")).unwrap();
    assert_eq!(decoded, sample(None));
}

#[test]
fn wrong_outer_tag_is_rejected() {
    let err = Access::from_bytes(&hex!("31 0A 80 01 02 02 02 03 E8 02 01 03")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnexpectedTag { .. }));
}

#[test]
fn collection_stops_at_the_first_non_matching_child() {
    // INTEGER 1 followed by a NULL the element type does not cover
    let values = SequenceOf::<Integer>::from_bytes(&hex!("30 05 02 01 01 05 00")).unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value(), 1);

    // a matching tag whose content is invalid still fails
    assert!(SequenceOf::<Integer>::from_bytes(&hex!("30 04 02 00 05 00")).is_err());
}

#[test]
fn every_short_buffer_fails_to_encode() {
    let access = sample(Some(true));
    let full = access.to_vec().unwrap();
    for len in 0..full.len() {
        let mut buf = vec![0u8; len];
        assert!(access.encode_to_slice(&mut buf).is_err(), "buffer {}", len);
    }
}

#[test]
fn sequences_nest_in_collections() {
    let accesses: SequenceOf<Access> = [sample(None), sample(Some(false))]
        .into_iter()
        .collect();

    let encoded = accesses.to_vec().unwrap();
    assert_eq!(
        encoded,
        hex!("30 1B 30 0A 80 01 02 02 02 03 E8 02 01 03 30 0D 80 01 02 02 02 03 E8 81 01 00 02 01 03")
    );

    let decoded = SequenceOf::<Access>::from_bytes(&encoded).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[1].critical.as_ref().map(|b| b.value()), Some(false));
}
