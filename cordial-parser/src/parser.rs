use nom::{
    bytes::complete::{take_till, take_while},
    character::complete::char,
    combinator::{cut, opt},
    sequence::{preceded, terminated},
    IResult,
};

use crate::{
    escape::unescape_tag_value, fields::split_fields, Message, ParseError, Prefix, Tags,
};

fn is_space(c: char) -> bool {
    c == ' '
}

// once the marker is seen, the block has to be terminated by a space,
// the spaces after it are skipped
fn block(marker: char) -> impl FnMut(&str) -> IResult<&str, Option<&str>> {
    move |buf| {
        opt(preceded(
            char(marker),
            cut(terminated(
                take_till(is_space),
                terminated(char(' '), take_while(is_space)),
            )),
        ))(buf)
    }
}

fn parse_tags(tags: &str) -> Tags {
    let mut out = Tags::with_capacity(tags.matches(';').count() + 1);
    for pair in tags.split_terminator(';') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        out.insert(key.to_owned(), unescape_tag_value(value).into_owned());
    }
    out
}

// name ::= <servername> / ( <nickname> [ [ "!" <user> ] "@" <host> ] )
fn parse_prefix(prefix: &str) -> Prefix {
    // a separator in first position does not count, the name cannot be empty
    let find = |s: &str, c: char| s.find(c).filter(|&i| i > 0);

    if let Some(i) = find(prefix, '!') {
        let (name, user) = (&prefix[..i], &prefix[i + 1..]);
        let (user, host) = user.split_once('@').unwrap_or((user, ""));
        return Prefix::new(name).with_user(user).with_host(host);
    }

    if let Some(i) = find(prefix, '@') {
        return Prefix::new(&prefix[..i]).with_host(&prefix[i + 1..]);
    }

    Prefix::new(prefix)
}

fn parse_command(buf: &str) -> IResult<&str, &str> {
    let (buf, command) = take_till(is_space)(buf)?;
    let (buf, _) = opt(char(' '))(buf)?;
    Ok((buf, command))
}

fn parse_params_and_trailing(buf: &str, message: &mut Message) {
    let params = match buf.split_once(':') {
        Some((params, trailing)) => {
            message.trailing = trailing.to_owned();
            message.forced_trailing = trailing.is_empty();
            params
        }
        None => buf,
    };

    message.params = split_fields(params, b' ')
        .into_iter()
        .map(str::to_owned)
        .collect();
}

// message ::= ['@' <tags> SPACE] [':' <source> SPACE] <command> <parameters>
pub fn parse_message(raw: &str) -> Result<Message, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let invalid = |_| ParseError::InvalidMessage;
    let mut message = Message {
        raw: raw.to_owned(),
        ..Default::default()
    };

    let (buf, tags) = block('@')(raw).map_err(invalid)?;
    match tags {
        Some("") => message.forced_tags = true,
        Some(tags) => message.tags = parse_tags(tags),
        None => {}
    }

    let (buf, prefix) = block(':')(buf).map_err(invalid)?;
    // a prefix without a name is dropped
    message.prefix = prefix.map(parse_prefix).filter(|p| !p.name.is_empty());

    let (buf, command) = parse_command(buf).map_err(invalid)?;
    if command.is_empty() {
        return Err(ParseError::InvalidMessage);
    }
    message.command = command.to_owned();

    if !buf.is_empty() {
        parse_params_and_trailing(buf, &mut message);
    }

    Ok(message)
}

impl std::str::FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_message(s)
    }
}
