use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, map_res, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, terminated, tuple},
};

use super::ParseResult;
use super::common::{lws, quoted_string, semicolon_separated_params0, sws, token, utf8};
use super::uri::parse_uri;
use crate::types::address::Address;
use crate::types::contact::Contact;
use crate::types::uri::Uri;

// display-name = *(token LWS) / quoted-string
fn display_name(input: &[u8]) -> ParseResult<String> {
    alt((
        quoted_string,
        map_res(recognize(pair(token, many0(pair(lws, token)))), utf8),
    ))(input)
}

// name-addr = [ display-name ] LAQUOT addr-spec RAQUOT
pub(crate) fn name_addr(input: &[u8]) -> ParseResult<(Option<String>, Uri)> {
    map(
        tuple((
            opt(terminated(display_name, sws)),
            delimited(tag("<"), parse_uri, tag(">")),
        )),
        |(display, uri)| (display.filter(|name| !name.is_empty()), uri),
    )(input)
}

/// `name-addr` or bare `addr-spec`, each followed by header parameters.
///
/// In the addr-spec form everything after the URI belongs to the header
/// (RFC 3261 section 20.10), so URI parameters are moved over.
pub(crate) fn name_addr_or_addr_spec(input: &[u8]) -> ParseResult<Address> {
    alt((
        map(
            pair(name_addr, semicolon_separated_params0),
            |((display_name, uri), params)| Address {
                display_name,
                uri,
                params,
            },
        ),
        map(
            pair(parse_uri, semicolon_separated_params0),
            |(mut uri, rest)| {
                let mut params = std::mem::take(&mut uri.params);
                params.extend(rest);
                Address {
                    display_name: None,
                    uri,
                    params,
                }
            },
        ),
    ))(input)
}

// Contact value: "*" or a single contact-param
pub(crate) fn contact_value(input: &[u8]) -> ParseResult<Contact> {
    alt((
        value(Contact::Wildcard, tag("*")),
        map(name_addr_or_addr_spec, Contact::Address),
    ))(input)
}
