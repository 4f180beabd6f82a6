use crate::{
    BerView, DecodeView, ErrorKind, FixedId, Identified, Identifier, Length,
    LengthAndContentContainer, Result, UniversalId,
};
use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};

/// `OBJECT IDENTIFIER`.
///
/// Stored in wire form: the first two components packed into one
/// subidentifier, every subidentifier in minimal base-128. Both construction
/// paths validate, so a held value always walks cleanly.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ObjectIdentifier<I: FixedId = UniversalId<6>> {
    payload: LengthAndContentContainer,
    _id: PhantomData<I>,
}

impl ObjectIdentifier {
    /// An `OBJECT IDENTIFIER` under the universal tag.
    pub fn new(components: &[u64]) -> Result<Self> {
        Self::from_components(components)
    }
}

impl<I: FixedId> ObjectIdentifier<I> {
    /// Build from numeric components, e.g. `&[1, 2, 840, 113549]`.
    ///
    /// At least two components are required; the first must be 0, 1 or 2 and
    /// the second below 40 when the first is 0 or 1.
    pub fn from_components(components: &[u64]) -> Result<Self> {
        let mut oid = ObjectIdentifier {
            payload: LengthAndContentContainer::new(),
            _id: PhantomData,
        };
        oid.assign(components)?;
        Ok(oid)
    }

    /// Replace the held value with the given numeric components.
    pub fn assign(&mut self, components: &[u64]) -> Result<()> {
        let (first, second, rest) = match components {
            [first, second, rest @ ..] => (*first, *second, rest),
            _ => return Err(ErrorKind::InvalidOid.into()),
        };
        if first > 2 || (first < 2 && second >= 40) {
            return Err(ErrorKind::InvalidOid.into());
        }
        let packed = first
            .checked_mul(40)
            .and_then(|n| n.checked_add(second))
            .ok_or(ErrorKind::InvalidOid)?;

        let mut content = Vec::new();
        push_subidentifier(&mut content, packed);
        for component in rest {
            push_subidentifier(&mut content, *component);
        }

        self.payload.assign_content(&content)
    }

    /// Iterate over the numeric components without materializing them.
    pub fn components(&self) -> Components<'_> {
        Components::new(self.payload.content())
    }

    /// The component at the given index.
    pub fn component(&self, index: usize) -> Option<u64> {
        self.components().nth(index)
    }

    /// Count of numeric components.
    pub fn num_components(&self) -> usize {
        self.components().count()
    }

    /// The numeric components, collected.
    pub fn value(&self) -> Vec<u64> {
        self.components().collect()
    }

    /// The content octets.
    pub fn as_bytes(&self) -> &[u8] {
        self.payload.content()
    }
}

/// Iterator over the components of a held [`ObjectIdentifier`].
///
/// The backing content was validated on construction, so iteration is
/// infallible. The packed first subidentifier is handed out as two
/// components.
#[derive(Clone, Debug)]
pub struct Components<'a> {
    remaining: &'a [u8],
    first_pair: bool,
    pending: Option<u64>,
}

impl<'a> Components<'a> {
    fn new(content: &'a [u8]) -> Self {
        Components {
            remaining: content,
            first_pair: true,
            pending: None,
        }
    }
}

impl Iterator for Components<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if let Some(second) = self.pending.take() {
            return Some(second);
        }

        let mut value = 0u64;
        loop {
            let (octet, rest) = match self.remaining.split_first() {
                Some((octet, rest)) => (*octet, rest),
                None => return None,
            };
            self.remaining = rest;
            value = (value << 7) | (octet & 0x7F) as u64;
            if octet & 0x80 == 0 {
                break;
            }
        }

        if self.first_pair {
            self.first_pair = false;
            let (first, second) = match value {
                0..=39 => (0, value),
                40..=79 => (1, value - 40),
                _ => (2, value - 80),
            };
            self.pending = Some(second);
            Some(first)
        } else {
            Some(value)
        }
    }
}

fn push_subidentifier(content: &mut Vec<u8>, value: u64) {
    let bits = 64 - value.leading_zeros();
    let mut shift = if bits > 7 { ((bits + 6) / 7 - 1) * 7 } else { 0 };
    while shift > 0 {
        content.push(0x80 | ((value >> shift) & 0x7F) as u8);
        shift -= 7;
    }
    content.push((value & 0x7F) as u8);
}

/// Check that `content` is a well-formed run of base-128 subidentifiers.
fn validate_content(content: &[u8]) -> Result<()> {
    if content.is_empty() {
        return Err(ErrorKind::InvalidOid.into());
    }

    let mut octets = content.iter();
    loop {
        let mut octet = match octets.next() {
            Some(octet) => *octet,
            None => return Ok(()),
        };
        // a subidentifier must not start with a padding octet
        if octet == 0x80 {
            return Err(ErrorKind::InvalidOid.into());
        }

        let mut value = 0u64;
        loop {
            if value > u64::MAX >> 7 {
                return Err(ErrorKind::InvalidOid.into());
            }
            value = (value << 7) | (octet & 0x7F) as u64;
            if octet & 0x80 == 0 {
                break;
            }
            octet = match octets.next() {
                Some(octet) => *octet,
                // continuation bit set at end of content
                None => return Err(ErrorKind::InvalidOid.into()),
            };
        }
    }
}

impl<I: FixedId> fmt::Display for ObjectIdentifier<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

impl<I: FixedId> Identified for ObjectIdentifier<I> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId> crate::EncodableContent for ObjectIdentifier<I> {
    fn content_length(&self) -> Result<Length> {
        Ok(self.payload.content_length())
    }

    fn encode_content(&self, encoder: &mut crate::Encoder<'_>) -> Result<()> {
        encoder.bytes(self.payload.content())
    }
}

impl<I: FixedId> DecodeView for ObjectIdentifier<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content = view.expect(id, crate::Construction::Primitive)?;
        validate_content(content.content())?;

        let mut payload = LengthAndContentContainer::new();
        payload.assign_content(content.content())?;
        Ok(ObjectIdentifier {
            payload,
            _id: PhantomData,
        })
    }
}
