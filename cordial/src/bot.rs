use cordial_core::{MessageSink, Mux, MuxError};
use cordial_parser::{encode_ctcp, parse_ctcp, Message};

use crate::config::Config;

/// Messages to send right after connecting.
pub fn registration(config: &Config) -> Vec<Message> {
    let mut messages = Vec::with_capacity(3);
    if let Some(password) = &config.password {
        messages.push(Message::new("PASS").with_param(password.as_str()));
    }
    messages.push(Message::new("NICK").with_param(config.nickname.as_str()));
    messages.push(
        Message::new("USER")
            .with_param(config.username.as_str())
            .with_param("0")
            .with_param("*")
            .with_trailing(config.realname.as_str()),
    );
    messages
}

fn send(sink: &dyn MessageSink, message: Message) {
    if let Err(err) = sink.send(message) {
        log::warn!("could not send message: {err}");
    }
}

pub fn mux(config: &Config) -> Result<Mux, MuxError> {
    let mut mux = Mux::new();

    mux.handle_fn("PING", |sink: &dyn MessageSink, message: &Message| {
        let mut pong = Message::new("PONG");
        pong.params.clone_from(&message.params);
        pong.trailing.clone_from(&message.trailing);
        pong.forced_trailing = message.forced_trailing;
        send(sink, pong);
    })?;

    let channels = config.channels.clone();
    mux.handle_fn("001", move |sink: &dyn MessageSink, _: &Message| {
        log::info!("registered, joining {} channels", channels.len());
        for channel in &channels {
            send(sink, Message::new("JOIN").with_param(channel.as_str()));
        }
    })?;

    let version = config.ctcp_version.clone();
    mux.handle_fn("PRIVMSG", move |sink: &dyn MessageSink, message: &Message| {
        let sender = message.prefix.as_ref().map_or("", |p| p.name.as_str());
        let target = message.first_parameter().unwrap_or_default();

        let Some(ctcp) = parse_ctcp(&message.trailing) else {
            log::info!("{target} <{sender}> {}", message.trailing);
            return;
        };
        if sender.is_empty() {
            log::debug!("CTCP {} without a sender", ctcp.command);
            return;
        }

        let reply = match (ctcp.command, &version) {
            ("VERSION", Some(version)) => encode_ctcp("VERSION", version),
            ("PING", _) => encode_ctcp("PING", ctcp.args),
            (command, _) => {
                log::debug!("ignoring CTCP {command} from {sender}");
                return;
            }
        };
        match reply {
            Ok(reply) => send(
                sink,
                Message::new("NOTICE").with_param(sender).with_trailing(reply),
            ),
            Err(err) => log::warn!("could not encode CTCP reply: {err}"),
        }
    })?;

    mux.not_found_fn(|_: &dyn MessageSink, message: &Message| {
        log::debug!("unhandled: {}", message.raw());
    });

    Ok(mux)
}
