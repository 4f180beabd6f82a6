//! # microber
//!
//! Runtime encoding and decoding of BER-TLV as described in ITU-T X.690,
//! without a schema compiler.
//!
//! The layers, bottom up:
//! - [`Tag`], [`Length`] and [`Header`]: the identifier and length octets.
//! - [`Decoder`] and [`Encoder`]: cursors over byte slices which taint
//!   themselves on the first error.
//! - [`BerView`]: a zero-copy parse of one element, with [`BerView::children`]
//!   for walking constructed content.
//! - Containers: owned elements, either re-tagging raw bytes
//!   ([`BerContainer`]) or holding content under a compile-time identifier
//!   ([`FixedIdBerContainer`], [`SmallFixedIdBerContainer`]).
//! - Typed values: [`Boolean`], [`Integer`], [`Null`], [`ObjectIdentifier`],
//!   [`GeneralizedTime`], the string types, [`SequenceOf`] and the
//!   [`Sequence`]/[`decode_fields`] machinery for struct-shaped messages,
//!   [`unwrap_choice`] and [`Any`] for enum-shaped ones.
//!
//! Identifiers are carried in the type system: `Integer` is a universal-class
//! `INTEGER`, `Integer<ContextId<3>>` the same content implicitly retagged as
//! `[3]`, and `Integer<ExplicitId<ContextId<3>, UniversalId<2>>>` the
//! explicitly tagged pair. Runtime retagging goes through [`Implicit`] and
//! [`Explicit`].
//!
//! Indefinite lengths are not accepted, and encoding always emits definite
//! lengths in minimal form.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
extern crate delog;
generate_macros!();

mod choice;
mod container;
mod decoder;
mod encoder;
mod error;
mod header;
mod identifier;
mod length;
mod sequence;
mod tag;
mod tagged;
mod traits;
mod types;
mod view;

pub use choice::unwrap_choice;
pub use container::SmallFixedIdBerContainer;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, ErrorKind, Result};
pub use header::Header;
pub use identifier::{
    ApplicationId, ContextId, ExplicitId, FixedId, Id, Identifier, PrivateId, SingleId,
    UniversalId,
};
pub use length::Length;
pub use sequence::{decode_fields, encode_fields, fields_length, Fields, Sequence};
pub use tag::{universal, Class, Construction, Tag};
pub use tagged::{Explicit, Implicit};
pub use traits::{Decodable, DecodeView, Encodable, EncodableContent, Identified};
pub use types::{Boolean, Enumerated, Integer, Null};
pub use view::{BerChildren, BerView};

#[cfg(feature = "alloc")]
pub use choice::Any;
#[cfg(feature = "alloc")]
pub use container::{BerContainer, FixedIdBerContainer, LengthAndContentContainer};
#[cfg(feature = "alloc")]
pub use sequence::{SequenceOf, SetOf};
#[cfg(feature = "alloc")]
pub use types::{
    BerString, BitString, Components, GeneralizedTime, ObjectIdentifier, OctetString,
    PrintableString, TimeFormat, UtcTime, Utf8String, VisibleString,
};
