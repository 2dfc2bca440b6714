//! The data-state command vocabulary.
//!
//! Every mutation of the external state tree is requested through one
//! of these commands. The payload types here are boundary handles: the
//! state tree, its nodes, and its actions live in the external
//! data-model subsystem and are only referenced, never introspected.
//!
//! ```ignore
//! bus.dispatch(&StateCommand::SetCurrentObject(SetCurrentObject {
//!     state: StateRef::new(0),
//!     target: TransformRef::new("root.model.repr"),
//! }))?;
//! ```

use super::{BusCommand, CommandBus, CommandError, CommandId};

/// Namespace of the data-state commands.
pub const DATA_STATE: &str = "data-state";

/// Identity of [`SetCurrentObject`].
pub const SET_CURRENT_OBJECT: CommandId =
    CommandId::new(DATA_STATE, "set-current-object");
/// Identity of [`ApplyAction`].
pub const APPLY_ACTION: CommandId = CommandId::new(DATA_STATE, "apply-action");
/// Identity of [`UpdateTree`].
pub const UPDATE: CommandId = CommandId::new(DATA_STATE, "update");
/// Identity of [`RemoveObject`].
pub const REMOVE_OBJECT: CommandId =
    CommandId::new(DATA_STATE, "remove-object");

// ── Boundary handles ─────────────────────────────────────────────────────

/// Handle identifying a state tree instance owned by the external
/// data-model subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateRef(u64);

impl StateRef {
    /// Wrap a raw state id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Reference to a node (transform) within a state tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransformRef(String);

impl TransformRef {
    /// Wrap a node reference string.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Descriptor of a state action, resolved and executed by the external
/// subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateAction {
    /// The action's registered name.
    pub name: String,
}

impl StateAction {
    /// Describe the action with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Opaque serialized snapshot of a full state tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTree(String);

impl StateTree {
    /// Wrap a serialized tree.
    #[must_use]
    pub fn new(serialized: impl Into<String>) -> Self {
        Self(serialized.into())
    }
}

/// Opaque serialized incremental tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeBuilder(String);

impl TreeBuilder {
    /// Wrap a serialized builder.
    #[must_use]
    pub fn new(serialized: impl Into<String>) -> Self {
        Self(serialized.into())
    }
}

/// What an [`UpdateTree`] carries: a full replacement tree or an
/// incremental builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeUpdate {
    /// Replace with a complete tree snapshot.
    Tree(StateTree),
    /// Apply an incremental builder.
    Builder(TreeBuilder),
}

// ── Payloads ─────────────────────────────────────────────────────────────

/// Make `target` the current object of `state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCurrentObject {
    /// The state tree to mutate.
    pub state: StateRef,
    /// The node to select.
    pub target: TransformRef,
}

/// Apply a state action, optionally rooted at `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyAction {
    /// The state tree to mutate.
    pub state: StateRef,
    /// The action to apply.
    pub action: StateAction,
    /// Node the action is applied at; the tree root when absent.
    pub target: Option<TransformRef>,
}

/// Replace or incrementally update a state tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTree {
    /// The state tree to mutate.
    pub state: StateRef,
    /// Full tree or incremental builder.
    pub update: TreeUpdate,
}

/// Remove the object at `target` from `state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveObject {
    /// The state tree to mutate.
    pub state: StateRef,
    /// The node to remove.
    pub target: TransformRef,
}

// ── Command ──────────────────────────────────────────────────────────────

/// The data-state commands, one variant per registered identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateCommand {
    /// `data-state/set-current-object`
    SetCurrentObject(SetCurrentObject),
    /// `data-state/apply-action`
    ApplyAction(ApplyAction),
    /// `data-state/update`
    Update(UpdateTree),
    /// `data-state/remove-object`
    RemoveObject(RemoveObject),
}

impl BusCommand for StateCommand {
    fn id(&self) -> CommandId {
        match self {
            Self::SetCurrentObject(_) => SET_CURRENT_OBJECT,
            Self::ApplyAction(_) => APPLY_ACTION,
            Self::Update(_) => UPDATE,
            Self::RemoveObject(_) => REMOVE_OBJECT,
        }
    }
}

/// Register all data-state command identities on `bus`.
///
/// # Errors
///
/// Returns [`CommandError::AlreadyRegistered`] when any of them was
/// registered before.
pub fn register_state_commands(
    bus: &mut CommandBus<StateCommand>,
) -> Result<(), CommandError> {
    bus.register(SET_CURRENT_OBJECT)?;
    bus.register(APPLY_ACTION)?;
    bus.register(UPDATE)?;
    bus.register(REMOVE_OBJECT)?;
    Ok(())
}
