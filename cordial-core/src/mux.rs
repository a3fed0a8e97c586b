use std::collections::HashMap;

use cordial_parser::Message;

use crate::{handler_fn, Handler, MessageSink, MuxError};

/// Routes messages to a handler by command name.
///
/// Commands are matched exactly (case-sensitive). Messages without a handler go to the
/// `not_found` handler if there is one, and are dropped otherwise.
#[derive(Default)]
pub struct Mux {
    handlers: HashMap<String, Box<dyn Handler>>,
    not_found: Option<Box<dyn Handler>>,
}

impl Mux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle<H>(&mut self, command: impl Into<String>, handler: H) -> Result<&mut Self, MuxError>
    where
        H: Handler + 'static,
    {
        let command = command.into();
        if self.handlers.contains_key(&command) {
            return Err(MuxError::DuplicateCommand { command });
        }
        self.handlers.insert(command, Box::new(handler));
        Ok(self)
    }

    pub fn handle_fn<F>(&mut self, command: impl Into<String>, f: F) -> Result<&mut Self, MuxError>
    where
        F: Fn(&dyn MessageSink, &Message) + Send + Sync + 'static,
    {
        self.handle(command, handler_fn(f))
    }

    pub fn not_found<H>(&mut self, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.not_found = Some(Box::new(handler));
        self
    }

    pub fn not_found_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&dyn MessageSink, &Message) + Send + Sync + 'static,
    {
        self.not_found(handler_fn(f))
    }
}

impl Handler for Mux {
    fn handle_message(&self, sink: &dyn MessageSink, message: &Message) {
        let handler = self
            .handlers
            .get(&message.command)
            .or(self.not_found.as_ref());

        match handler {
            Some(handler) => handler.handle_message(sink, message),
            None => log::debug!("no handler for {}", message.command),
        }
    }
}

impl std::fmt::Debug for Mux {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mux")
            .field("commands", &self.handlers.keys().collect::<Vec<_>>())
            .field("not_found", &self.not_found.is_some())
            .finish()
    }
}
