use cordial_parser::Message;

use crate::{Handler, MessageSink, Middleware, SendError};

/// Shortens the trailing parameter of the messages that are longer than `limit` bytes
/// once encoded (line terminator excluded).
pub struct Truncator<'s> {
    limit: usize,
    inner: &'s dyn MessageSink,
}

impl<'s> Truncator<'s> {
    pub fn new(limit: usize, inner: &'s dyn MessageSink) -> Self {
        Self { limit, inner }
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    (0..=index.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

impl MessageSink for Truncator<'_> {
    fn send(&self, mut message: Message) -> Result<(), SendError> {
        let length = message.encoded_len();
        if length <= self.limit {
            return self.inner.send(message);
        }

        let overflow = length - self.limit;
        let keep = message.trailing.len().saturating_sub(overflow);
        let keep = floor_char_boundary(&message.trailing, keep);
        if keep == 0 {
            return Err(SendError::MessageTooLong {
                length,
                limit: self.limit,
            });
        }

        log::debug!(
            "truncating {} by {} bytes",
            message.command,
            message.trailing.len() - keep
        );
        message.trailing.truncate(keep);
        self.inner.send(message)
    }
}

struct Truncate {
    limit: usize,
    handler: Box<dyn Handler>,
}

impl Handler for Truncate {
    fn handle_message(&self, sink: &dyn MessageSink, message: &Message) {
        let sink = Truncator::new(self.limit, sink);
        self.handler.handle_message(&sink, message);
    }
}

/// Middleware giving the handler a sink that truncates to `limit` bytes.
pub fn truncate(limit: usize) -> Middleware {
    Box::new(move |handler: Box<dyn Handler>| -> Box<dyn Handler> {
        Box::new(Truncate { limit, handler })
    })
}

#[cfg(test)]
mod tests {
    use cordial_parser::Message;
    use rstest::rstest;

    use super::{truncate, Truncator};
    use crate::sink::testing::Recorder;
    use crate::{chain, handler_fn, MessageSink, SendError};

    #[rstest]
    #[case(100, "hi", "hi")]
    #[case(20, "hello", "hello")]
    #[case(20, "hello world", "hello")]
    #[case(19, "aébc", "aéb")]
    #[case(18, "aéé", "aé")]
    #[case(17, "aéé", "a")]
    fn cut_trailing(#[case] limit: usize, #[case] trailing: &str, #[case] expected: &str) {
        // "PRIVMSG #chan :" takes 15 bytes
        let recorder = Recorder::default();
        let truncator = Truncator::new(limit, &recorder);
        let message = Message::new("PRIVMSG")
            .with_param("#chan")
            .with_trailing(trailing);

        truncator.send(message).unwrap();
        let sent = recorder.take();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].trailing, expected);
        assert!(sent[0].encoded_len() <= limit);
    }

    #[test]
    fn too_long() {
        let recorder = Recorder::default();
        let truncator = Truncator::new(10, &recorder);

        let err = truncator
            .send(Message::new("PRIVMSG").with_param("#channel").with_trailing("hi"))
            .unwrap_err();
        assert_eq!(
            err,
            SendError::MessageTooLong {
                length: 20,
                limit: 10
            }
        );

        let err = truncator
            .send(Message::new("PRIVMSG").with_param("#channel"))
            .unwrap_err();
        assert!(matches!(err, SendError::MessageTooLong { .. }));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn as_middleware() {
        let base = Box::new(handler_fn(|sink: &dyn MessageSink, message: &Message| {
            let reply = Message::new("PRIVMSG")
                .with_param("#chan")
                .with_trailing(message.trailing.repeat(100));
            let _ = sink.send(reply);
        }));
        let handler = chain(base, vec![truncate(512)]);

        let recorder = Recorder::default();
        handler.handle_message(&recorder, &Message::new("PRIVMSG").with_trailing("spam "));
        let sent = recorder.take();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].encoded_len(), 512);
    }
}
