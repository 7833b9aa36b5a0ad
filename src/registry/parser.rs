// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for registry lines of the form `name = domain`.

use nom::bytes::complete::{take_till1, take_while1};
use nom::character::complete::{char, space0};
use nom::combinator::{eof, opt, recognize, verify};
use nom::multi::separated_list1;
use nom::sequence::pair;
use nom::IResult;

pub(crate) fn parsed_dnsbl_entry(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = space0(input)?;
    let (input, name) = verify(take_till1(|c| c == '='), |x: &str| !x.trim().is_empty())(input)?;
    let (input, _) = char('=')(input)?;
    let (input, _) = space0(input)?;
    let (input, domain) = domain_name(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = eof(input)?;

    Ok((input, (name.trim(), domain)))
}

fn domain_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(separated_list1(char('.'), label), opt(char('.'))))(input)
}

fn label(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}
