//! Typed publish/dispatch bus for state-mutation commands.
//!
//! Commands are identified by a two-part `(namespace, name)` id and
//! carry statically typed payloads. Application logic dispatches a
//! command; every handler subscribed to that id runs in subscription
//! order, and one handler's failure never prevents delivery to the
//! rest. The bus itself performs no rendering; it is the mechanism
//! through which higher-level logic eventually reaches the viewer's
//! scene mutations.

/// Data-state command vocabulary.
pub mod state;

use std::fmt;

use rustc_hash::FxHashMap;

/// Two-part command identity: `(namespace, command-name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId {
    /// Namespace the command belongs to, e.g. `"data-state"`.
    pub namespace: &'static str,
    /// Command name within the namespace.
    pub name: &'static str,
}

impl CommandId {
    /// Build an id from its two parts.
    #[must_use]
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self { namespace, name }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A dispatchable command value: a tagged payload that knows its id.
pub trait BusCommand {
    /// The identity this payload dispatches under.
    fn id(&self) -> CommandId;
}

/// Registration and dispatch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The command id has not been registered on this bus.
    UnknownCommand(CommandId),
    /// The command id was registered a second time.
    AlreadyRegistered(CommandId),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(id) => {
                write!(f, "unknown command: {id}")
            }
            Self::AlreadyRegistered(id) => {
                write!(f, "command registered twice: {id}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Error a handler reports for one delivery.
///
/// Isolated per handler: it is logged and recorded in the
/// [`DispatchReport`] without aborting delivery to other subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Build an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HandlerError {}

/// Identifies one handler subscription on a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// One isolated handler failure recorded during dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// The failing handler.
    pub handler: HandlerId,
    /// What it reported.
    pub error: HandlerError,
}

/// Outcome of one dispatch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers that completed successfully.
    pub delivered: usize,
    /// Handlers that failed, in invocation order.
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    /// Whether every handler completed successfully.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

type Handler<C> = Box<dyn FnMut(&C) -> Result<(), HandlerError>>;

struct HandlerEntry<C> {
    id: HandlerId,
    handler: Handler<C>,
}

/// A named, typed publish point.
///
/// Each command id is registered exactly once; handlers subscribe per
/// id and are invoked in subscription order on dispatch.
pub struct CommandBus<C: BusCommand> {
    registry: FxHashMap<CommandId, Vec<HandlerEntry<C>>>,
    next_handler: u64,
}

impl<C: BusCommand> Default for CommandBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BusCommand> CommandBus<C> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: FxHashMap::default(),
            next_handler: 0,
        }
    }

    /// Declare a command id on this bus.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::AlreadyRegistered`] when the id was
    /// registered before; each command type is registered once.
    pub fn register(&mut self, id: CommandId) -> Result<(), CommandError> {
        match self.registry.entry(id) {
            std::collections::hash_map::Entry::Occupied(_) => {
                Err(CommandError::AlreadyRegistered(id))
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                let _ = entry.insert(Vec::new());
                Ok(())
            }
        }
    }

    /// Whether the id has been registered.
    #[must_use]
    pub fn is_registered(&self, id: CommandId) -> bool {
        self.registry.contains_key(&id)
    }

    /// Subscribe a handler to a registered command id.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownCommand`] when the id has not
    /// been registered.
    pub fn subscribe(
        &mut self,
        id: CommandId,
        handler: impl FnMut(&C) -> Result<(), HandlerError> + 'static,
    ) -> Result<HandlerId, CommandError> {
        let handlers = self
            .registry
            .get_mut(&id)
            .ok_or(CommandError::UnknownCommand(id))?;
        let handler_id = HandlerId(self.next_handler);
        self.next_handler += 1;
        handlers.push(HandlerEntry {
            id: handler_id,
            handler: Box::new(handler),
        });
        Ok(handler_id)
    }

    /// Remove a handler subscription. Returns `false` when the handler
    /// is not (or no longer) subscribed under that id.
    pub fn unsubscribe(&mut self, id: CommandId, handler: HandlerId) -> bool {
        let Some(handlers) = self.registry.get_mut(&id) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|entry| entry.id != handler);
        handlers.len() != before
    }

    /// Dispatch a command to every subscribed handler, in subscription
    /// order.
    ///
    /// A handler failure is logged and recorded without preventing
    /// delivery to the remaining handlers.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownCommand`] when the command's id
    /// has not been registered; no handler runs in that case.
    pub fn dispatch(
        &mut self,
        command: &C,
    ) -> Result<DispatchReport, CommandError> {
        let id = command.id();
        let handlers = self
            .registry
            .get_mut(&id)
            .ok_or(CommandError::UnknownCommand(id))?;

        let mut report = DispatchReport::default();
        for entry in &mut *handlers {
            match (entry.handler)(command) {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    log::warn!(
                        "handler {:?} failed for {id}: {error}",
                        entry.id
                    );
                    report.failures.push(HandlerFailure {
                        handler: entry.id,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }
}
