use std::collections::HashMap;

pub type Tags = HashMap<String, String>;

/// Source of a message: `name[!user][@host]`.
///
/// An empty `user` or `host` is considered absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Prefix {
    pub name: String,
    pub user: String,
    pub host: String,
}

impl Prefix {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }
}

/// A parsed IRC message.
///
/// See: https://modern.ircdocs.horse/#message-format
///
/// `forced_tags` and `forced_trailing` record the empty-but-present sections of the wire
/// form (`@ CMD` and `CMD :`), they make the encoder emit the section even when it is empty.
///
/// Two messages are equal when their structured fields are, the raw line is not compared.
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub tags: Tags,
    pub prefix: Option<Prefix>,
    pub command: String,
    pub params: Vec<String>,
    pub trailing: String,
    pub forced_tags: bool,
    pub forced_trailing: bool,
    pub(crate) raw: String,
}

impl Message {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// The line this message was parsed from, empty for a message built by hand.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn first_parameter(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }

    pub fn has_trailing(&self) -> bool {
        !self.trailing.is_empty() || self.forced_trailing
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn with_trailing(mut self, trailing: impl Into<String>) -> Self {
        self.trailing = trailing.into();
        self
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.tags == other.tags
            && self.prefix == other.prefix
            && self.command == other.command
            && self.params == other.params
            && self.trailing == other.trailing
            && self.forced_tags == other.forced_tags
            && self.forced_trailing == other.forced_trailing
    }
}

impl Eq for Message {}
