//! nom parsers for the textual form of message components
//!
//! Grammar follows RFC 3261 section 25.1 for the subset the registrar
//! reads: SIP/SIPS URIs, name-addr and addr-spec values, generic
//! parameters and Via hops. Whole-message parsing is not done here.

mod address;
mod common;
mod uri;
mod via;

pub(crate) use address::{contact_value, name_addr_or_addr_spec};
pub(crate) use common::{generic_param, token};
pub(crate) use uri::parse_uri;
pub(crate) use via::via_parm;

use nom::combinator::all_consuming;
use nom::sequence::delimited;
use nom::IResult;

use common::sws;

// Type alias for parser result
pub type ParseResult<'a, O> = IResult<&'a [u8], O>;

/// Runs `parser` over all of `input`, allowing surrounding whitespace.
/// Trailing text the grammar does not cover is an error.
pub(crate) fn parse_complete<'a, O, F>(input: &'a str, parser: F) -> Option<O>
where
    F: FnMut(&'a [u8]) -> ParseResult<'a, O>,
{
    all_consuming(delimited(sws, parser, sws))(input.as_bytes())
        .ok()
        .map(|(_, value)| value)
}
