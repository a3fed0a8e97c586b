use crate::Handler;

/// Wraps a handler into another one.
pub type Middleware = Box<dyn FnOnce(Box<dyn Handler>) -> Box<dyn Handler>>;

/// Applies the middlewares to `base`, the first one ends up being the outermost.
pub fn chain(base: Box<dyn Handler>, middlewares: Vec<Middleware>) -> Box<dyn Handler> {
    middlewares
        .into_iter()
        .rev()
        .fold(base, |handler, middleware| middleware(handler))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cordial_parser::Message;
    use parking_lot::Mutex;

    use super::{chain, Middleware};
    use crate::sink::testing::Recorder;
    use crate::{handler_fn, Handler, MessageSink};

    type Trace = Arc<Mutex<Vec<&'static str>>>;

    fn traced(name: &'static str, trace: &Trace) -> Middleware {
        let trace = Arc::clone(trace);
        Box::new(move |inner: Box<dyn Handler>| -> Box<dyn Handler> {
            Box::new(handler_fn(move |sink: &dyn MessageSink, message: &Message| {
                trace.lock().push(name);
                inner.handle_message(sink, message);
            }))
        })
    }

    #[test]
    fn order() {
        let trace = Trace::default();
        let base_trace = Arc::clone(&trace);
        let base = Box::new(handler_fn(move |_: &dyn MessageSink, _: &Message| {
            base_trace.lock().push("base");
        }));

        let handler = chain(base, vec![traced("a", &trace), traced("b", &trace)]);
        handler.handle_message(&Recorder::default(), &Message::new("TEST"));

        assert_eq!(*trace.lock(), ["a", "b", "base"]);
    }

    #[test]
    fn no_middleware() {
        let recorder = Recorder::default();
        let base = Box::new(handler_fn(|sink: &dyn MessageSink, message: &Message| {
            let _ = sink.send(message.clone());
        }));

        let handler = chain(base, vec![]);
        handler.handle_message(&recorder, &Message::new("TEST"));
        assert_eq!(recorder.take(), [Message::new("TEST")]);
    }
}
