use std::str;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1, take_while_m_n},
    character::complete::digit1,
    combinator::{map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use super::ParseResult;
use super::common::{is_alphanum, is_unreserved, utf8};
use crate::types::param::Param;
use crate::types::uri::{Scheme, Uri};

// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn scheme(input: &[u8]) -> ParseResult<Scheme> {
    map_res(
        recognize(pair(
            take_while_m_n(1, 1, |c: u8| c.is_ascii_alphabetic()),
            take_while(|c: u8| is_alphanum(c) || b"+-.".contains(&c)),
        )),
        |bytes: &[u8]| str::from_utf8(bytes).map_err(|_| ()).and_then(|s| s.parse().map_err(|_| ())),
    )(input)
}

// user = 1*( unreserved / escaped / user-unreserved ); empty tolerated
fn is_user_char(c: u8) -> bool {
    is_unreserved(c) || c == b'%' || b"&=+$,;?/".contains(&c)
}

// password = *( unreserved / escaped / "&" / "=" / "+" / "$" / "," )
fn is_password_char(c: u8) -> bool {
    is_unreserved(c) || c == b'%' || b"&=+$,".contains(&c)
}

// userinfo = user [ ":" password ] "@"
fn userinfo(input: &[u8]) -> ParseResult<Option<String>> {
    map_res(
        terminated(
            pair(
                take_while(is_user_char),
                opt(preceded(tag(":"), take_while(is_password_char))),
            ),
            tag("@"),
        ),
        |(user, _password): (&[u8], Option<&[u8]>)| {
            utf8(user).map(|user| Some(user).filter(|u| !u.is_empty()))
        },
    )(input)
}

// IPv6reference = "[" IPv6address "]"
fn ipv6_reference(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(delimited(
        tag("["),
        take_while1(|c: u8| c.is_ascii_hexdigit() || c == b':' || c == b'.'),
        tag("]"),
    ))(input)
}

// hostname / IPv4address; "+" admitted for telephone-subscriber hosts
fn hostname(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(|c: u8| is_alphanum(c) || b"-._+".contains(&c))(input)
}

// host = hostname / IPv4address / IPv6reference
pub(crate) fn host(input: &[u8]) -> ParseResult<String> {
    map_res(alt((ipv6_reference, hostname)), utf8)(input)
}

// port = 1*DIGIT
pub(crate) fn port(input: &[u8]) -> ParseResult<u16> {
    map_res(digit1, |digits: &[u8]| {
        str::from_utf8(digits).map_err(|_| ()).and_then(|s| s.parse::<u16>().map_err(|_| ()))
    })(input)
}

// hostport = host [ ":" port ]
pub(crate) fn hostport(input: &[u8]) -> ParseResult<(String, Option<u16>)> {
    pair(host, opt(preceded(tag(":"), port)))(input)
}

// paramchar = param-unreserved / unreserved / escaped
fn is_paramchar(c: u8) -> bool {
    is_unreserved(c) || c == b'%' || b"[]/:&+$".contains(&c)
}

// uri-parameter = pname [ "=" pvalue ]
fn uri_parameter(input: &[u8]) -> ParseResult<Param> {
    map_res(
        pair(
            take_while1(is_paramchar),
            opt(preceded(tag("="), take_while1(is_paramchar))),
        ),
        |(name, value): (&[u8], Option<&[u8]>)| -> Result<Param, str::Utf8Error> {
            let value = value.map(utf8).transpose()?;
            Ok(Param::new(utf8(name)?, value))
        },
    )(input)
}

// headers = "?" header *( "&" header ); not modelled, consumed and dropped
fn uri_headers(input: &[u8]) -> ParseResult<&[u8]> {
    preceded(
        tag("?"),
        take_while(|c: u8| is_unreserved(c) || c == b'%' || b"[]/?:+$=&".contains(&c)),
    )(input)
}

// SIP-URI = "sip:" [ userinfo ] hostport uri-parameters [ headers ]
pub(crate) fn parse_uri(input: &[u8]) -> ParseResult<Uri> {
    map(
        tuple((
            scheme,
            tag(":"),
            opt(userinfo),
            hostport,
            many0(preceded(tag(";"), uri_parameter)),
            opt(uri_headers),
        )),
        |(scheme, _, user, (host, port), params, _)| Uri {
            scheme,
            user: user.flatten(),
            host,
            port,
            params,
        },
    )(input)
}
