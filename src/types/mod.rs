//! Typed wrappers over the containers, one per supported universal type.
//!
//! Every type takes a [`FixedId`](crate::FixedId) parameter defaulting to its
//! universal tag, so implicit retagging is `Integer<ContextId<0>>` and
//! explicit retagging is `Integer<ExplicitId<ContextId<0>, UniversalId<2>>>`.

mod boolean;
mod integer;
mod null;

#[cfg(feature = "alloc")]
mod bit_string;
#[cfg(feature = "alloc")]
mod generalized_time;
#[cfg(feature = "alloc")]
mod object_identifier;
#[cfg(feature = "alloc")]
mod strings;
#[cfg(feature = "alloc")]
mod utc_time;

pub use boolean::Boolean;
pub use integer::{Enumerated, Integer};
pub use null::Null;

#[cfg(feature = "alloc")]
pub use bit_string::BitString;
#[cfg(feature = "alloc")]
pub use generalized_time::{GeneralizedTime, TimeFormat};
#[cfg(feature = "alloc")]
pub use utc_time::UtcTime;
#[cfg(feature = "alloc")]
pub use object_identifier::{Components, ObjectIdentifier};
#[cfg(feature = "alloc")]
pub use strings::{BerString, OctetString, PrintableString, Utf8String, VisibleString};
