use nom::{
    bytes::complete::tag,
    combinator::{map, opt, verify},
    sequence::{preceded, tuple},
};

use super::ParseResult;
use super::common::{lws, semicolon_separated_params0, slash, token};
use super::uri::{host, port};
use crate::types::via::ViaHeader;

// sent-protocol = protocol-name SLASH protocol-version SLASH transport
fn sent_protocol(input: &[u8]) -> ParseResult<String> {
    map(
        tuple((
            verify(token, |name: &str| name.eq_ignore_ascii_case("SIP")),
            slash,
            token,
            slash,
            token,
        )),
        |(_, _, _, _, transport)| transport.to_ascii_uppercase(),
    )(input)
}

// via-parm = sent-protocol LWS sent-by *( SEMI via-params )
pub(crate) fn via_parm(input: &[u8]) -> ParseResult<ViaHeader> {
    map(
        tuple((
            sent_protocol,
            lws,
            host,
            opt(preceded(tag(":"), port)),
            semicolon_separated_params0,
        )),
        |(transport, _, host, port, params)| ViaHeader {
            transport,
            host,
            port,
            params,
        },
    )(input)
}
