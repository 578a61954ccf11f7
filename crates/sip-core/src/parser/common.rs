use std::str;

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, tag, take, take_while, take_while1},
    combinator::{map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
};

use super::ParseResult;
use crate::types::param::Param;

pub(crate) fn is_alphanum(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

// token = 1*(alphanum / "-" / "." / "!" / "%" / "*" / "_" / "+" / "`" / "'" / "~")
pub(crate) fn is_token_char(c: u8) -> bool {
    is_alphanum(c) || b"-.!%*_+`'~".contains(&c)
}

// unreserved = alphanum / "-" / "_" / "." / "!" / "~" / "*" / "'" / "(" / ")"
pub(crate) fn is_unreserved(c: u8) -> bool {
    is_alphanum(c) || b"-_.!~*'()".contains(&c)
}

fn is_wsp(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

pub(crate) fn utf8(bytes: &[u8]) -> Result<String, str::Utf8Error> {
    str::from_utf8(bytes).map(str::to_string)
}

/// LWS without line folding; headers reach this layer unfolded
pub(crate) fn lws(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(is_wsp)(input)
}

/// SWS = [LWS]
pub(crate) fn sws(input: &[u8]) -> ParseResult<&[u8]> {
    take_while(is_wsp)(input)
}

// SEMI = SWS ";" SWS
pub(crate) fn semi(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(";"), sws)))(input)
}

// EQUAL = SWS "=" SWS
pub(crate) fn equal(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag("="), sws)))(input)
}

// SLASH = SWS "/" SWS
pub(crate) fn slash(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag("/"), sws)))(input)
}

pub(crate) fn token(input: &[u8]) -> ParseResult<String> {
    map_res(take_while1(is_token_char), utf8)(input)
}

fn is_qdtext(c: u8) -> bool {
    c != b'"' && c != b'\\' && c != b'\r' && c != b'\n'
}

/// quoted-string = SWS DQUOTE *(qdtext / quoted-pair) DQUOTE, unescaped
pub(crate) fn quoted_string(input: &[u8]) -> ParseResult<String> {
    map_res(
        delimited(
            tag("\""),
            opt(escaped_transform(take_while1(is_qdtext), '\\', take(1usize))),
            tag("\""),
        ),
        |content: Option<Vec<u8>>| String::from_utf8(content.unwrap_or_default()),
    )(input)
}

// quoted-string kept verbatim, quotes included
fn quoted_string_raw(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(quoted_string)(input)
}

// gen-value = token / host / quoted-string
fn gen_value(input: &[u8]) -> ParseResult<String> {
    map_res(
        alt((
            quoted_string_raw,
            take_while1(|c| is_token_char(c) || c == b':' || c == b'[' || c == b']'),
        )),
        utf8,
    )(input)
}

// generic-param = token [ EQUAL gen-value ]
pub(crate) fn generic_param(input: &[u8]) -> ParseResult<Param> {
    map(
        pair(token, opt(preceded(equal, gen_value))),
        |(name, value)| Param::new(name, value),
    )(input)
}

/// *( SEMI generic-param )
pub(crate) fn semicolon_separated_params0(input: &[u8]) -> ParseResult<Vec<Param>> {
    many0(preceded(semi, generic_param))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_string_unescapes_pairs() {
        let (rem, text) = quoted_string(br#""A \"quoted\" <name>" rest"#).unwrap();
        assert_eq!(text, r#"A "quoted" <name>"#);
        assert_eq!(rem, b" rest");

        let (_, empty) = quoted_string(b"\"\"").unwrap();
        assert_eq!(empty, "");
    }

    #[test]
    fn test_param_list_allows_spaces_around_separators() {
        let (rem, params) = semicolon_separated_params0(b";transport=udp ; lr; expires = 60").unwrap();
        assert!(rem.is_empty());
        assert_eq!(params.len(), 3);
        assert_eq!(params[0], Param::new("transport", Some("udp")));
        assert!(params[1].is_flag());
        assert_eq!(params[2].value(), Some("60"));
    }

    #[test]
    fn test_param_value_stops_at_comma() {
        let (rem, param) = generic_param(b"q=0.7, <sip:alice@10.0.0.6>").unwrap();
        assert_eq!(param.value(), Some("0.7"));
        assert_eq!(rem, b", <sip:alice@10.0.0.6>");
    }
}
