use cordial_parser::Message;

use crate::MessageSink;

/// Reacts to a received message, replies go through `sink`.
pub trait Handler: Send + Sync {
    fn handle_message(&self, sink: &dyn MessageSink, message: &Message);
}

/// Adapter to use a closure as a [`Handler`].
pub struct HandlerFn<F>(F);

pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&dyn MessageSink, &Message) + Send + Sync,
{
    HandlerFn(f)
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&dyn MessageSink, &Message) + Send + Sync,
{
    fn handle_message(&self, sink: &dyn MessageSink, message: &Message) {
        (self.0)(sink, message);
    }
}

impl<F> std::fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HandlerFn")
    }
}

#[cfg(test)]
mod tests {
    use cordial_parser::Message;

    use super::{handler_fn, Handler};
    use crate::sink::testing::Recorder;
    use crate::MessageSink;

    #[test]
    fn closure() {
        let handler = handler_fn(|sink: &dyn MessageSink, message: &Message| {
            let _ = sink.send(Message::new("PONG").with_trailing(message.trailing.clone()));
        });

        let recorder = Recorder::default();
        handler.handle_message(&recorder, &Message::new("PING").with_trailing("t"));
        assert_eq!(recorder.take(), [Message::new("PONG").with_trailing("t")]);
    }
}
