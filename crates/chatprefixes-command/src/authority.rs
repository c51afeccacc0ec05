//! Validation and application of prefix commands.
//!
//! Every command goes through the same gate, in this order:
//!
//! 1. the invoker is a player, not the console
//! 2. the invoker is privileged
//! 3. a target name was given and resolves to an online player
//! 4. the argument count is right
//! 5. the arguments themselves are valid
//!
//! Steps 1-3 come before any argument is looked at, so an unprivileged
//! caller can't probe which arguments would have been accepted.

use std::sync::Arc;

use chatprefixes_protocol::{BorderPair, Component, HexColor};
use chatprefixes_registry::{PrefixRegistry, RegistryError};

use crate::{CommandError, Invoker, OnlinePlayer, PlayerDirectory};

/// Label of the command that assigns a prefix.
pub const PREFIX_ADD: &str = "prefix-add";

/// Label of the command that removes a prefix.
pub const PREFIX_REMOVE: &str = "prefix-remove";

/// A confirmation to show the invoker, or why the command was refused.
pub type CommandOutcome = Result<Component, CommandError>;

/// Applies administrative prefix commands to a shared registry.
pub struct CommandAuthority<D: PlayerDirectory> {
    registry: Arc<PrefixRegistry>,
    directory: D,
    border: BorderPair,
}

impl<D: PlayerDirectory> CommandAuthority<D> {
    pub fn new(registry: Arc<PrefixRegistry>, directory: D, border: BorderPair) -> Self {
        Self {
            registry,
            directory,
            border,
        }
    }

    /// Routes a command by label.
    ///
    /// `args` are the words after the label, target first.
    pub fn dispatch<S: AsRef<str>>(
        &self,
        label: &str,
        invoker: &Invoker,
        args: &[S],
    ) -> CommandOutcome {
        match label {
            PREFIX_ADD => self.handle_add(invoker, args),
            PREFIX_REMOVE => self.handle_remove(invoker, args),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// `prefix-add <target> <tag-name> <#RRGGBB>`
    pub fn handle_add<S: AsRef<str>>(&self, invoker: &Invoker, args: &[S]) -> CommandOutcome {
        const EXPECTED: usize = 3;

        let target = self.authorize(invoker, args, EXPECTED)?;
        check_arity(args, EXPECTED)?;

        let tag_name = args[1].as_ref();
        let colour = args[2].as_ref();
        let color = HexColor::parse(colour)
            .map_err(|_| CommandError::InvalidColor(colour.to_string()))?;

        self.registry
            .add(target.id, tag_name, colour)
            .map_err(|e| registry_error(e, &target))?;

        tracing::info!(
            invoker = invoker_name(invoker),
            target = %target.name,
            player_id = %target.id,
            tag = tag_name,
            "prefix assigned"
        );

        Ok(Component::text(format!(
            "{} has been successfully assigned the prefix ",
            target.name
        ))
        .append(Component::text(self.border.wrap(tag_name)).color(color)))
    }

    /// `prefix-remove <target>`
    pub fn handle_remove<S: AsRef<str>>(&self, invoker: &Invoker, args: &[S]) -> CommandOutcome {
        const EXPECTED: usize = 1;

        let target = self.authorize(invoker, args, EXPECTED)?;
        check_arity(args, EXPECTED)?;

        self.registry
            .remove(target.id)
            .map_err(|e| registry_error(e, &target))?;

        tracing::info!(
            invoker = invoker_name(invoker),
            target = %target.name,
            player_id = %target.id,
            "prefix removed"
        );

        Ok(Component::text(format!(
            "{} has had their prefix successfully removed",
            target.name
        )))
    }

    pub fn border(&self) -> BorderPair {
        self.border
    }

    /// Steps 1-3: player invoker, privilege, resolvable target.
    fn authorize<S: AsRef<str>>(
        &self,
        invoker: &Invoker,
        args: &[S],
        expected: usize,
    ) -> Result<OnlinePlayer, CommandError> {
        let Invoker::Player { player, privileged } = invoker else {
            return Err(CommandError::PlayersOnly);
        };

        if !privileged {
            tracing::debug!(invoker = %player.name, "unprivileged prefix command refused");
            return Err(CommandError::PermissionDenied);
        }

        let target_name = args
            .first()
            .map(AsRef::as_ref)
            .ok_or(CommandError::InvalidArgumentCount { expected, got: 0 })?;

        self.directory
            .resolve(target_name)
            .ok_or_else(|| CommandError::TargetOffline(target_name.to_string()))
    }
}

fn check_arity<S>(args: &[S], expected: usize) -> Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::InvalidArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn registry_error(err: RegistryError, target: &OnlinePlayer) -> CommandError {
    match err {
        RegistryError::AlreadyExists(_) => CommandError::AlreadyAssigned(target.name.clone()),
        RegistryError::NotFound(_) => CommandError::Unassigned(target.name.clone()),
        RegistryError::InvalidColor(e) => CommandError::InvalidColor(e.to_string()),
        RegistryError::Store(e) => {
            tracing::error!(player_id = %target.id, error = %e, "failed to persist prefix change");
            CommandError::StoreFailed(e)
        }
    }
}

fn invoker_name(invoker: &Invoker) -> &str {
    match invoker {
        Invoker::Player { player, .. } => &player.name,
        Invoker::Console => "console",
    }
}
