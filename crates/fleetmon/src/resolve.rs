//! Conflict resolvers for `fleetmon import`.

use dialoguer::Select;

use fleetmon_core::{ConflictAction, ConflictDecision, ConflictResolver, Device};

use crate::cli::ConflictPolicy;

/// Interactive resolver backed by a `dialoguer` menu.
///
/// Prompt failures (closed stdin, ctrl-c) resolve to `None`, which the
/// merge engine treats as a cancel for that record.
pub struct PromptResolver;

impl ConflictResolver for PromptResolver {
    fn resolve(&mut self, existing: &Device, incoming: &Device) -> Option<ConflictDecision> {
        eprintln!(
            "Serial '{}' already exists: '{}' (stored) vs '{}' (incoming)",
            existing.serial_number, existing.name, incoming.name
        );

        let choices = &[
            "Overwrite the stored device",
            "Keep both",
            "Skip the incoming record",
            "Overwrite all remaining conflicts",
            "Keep both for all remaining conflicts",
            "Skip all remaining conflicts",
            "Cancel this record",
        ];
        let selection = Select::new()
            .with_prompt("Resolve conflict")
            .items(choices)
            .default(0)
            .interact()
            .ok()?;

        match selection {
            0 => Some(ConflictDecision::once(ConflictAction::Overwrite)),
            1 => Some(ConflictDecision::once(ConflictAction::KeepBoth)),
            2 => Some(ConflictDecision::once(ConflictAction::Skip)),
            3 => Some(ConflictDecision::for_rest(ConflictAction::Overwrite)),
            4 => Some(ConflictDecision::for_rest(ConflictAction::KeepBoth)),
            5 => Some(ConflictDecision::for_rest(ConflictAction::Skip)),
            _ => None,
        }
    }
}

/// Resolver for a `--on-conflict` policy; `Ask` maps to the prompt.
pub enum PolicyResolver {
    Prompt(PromptResolver),
    Fixed(fleetmon_core::FixedPolicy),
}

impl PolicyResolver {
    pub fn from_policy(policy: &ConflictPolicy) -> Self {
        match policy {
            ConflictPolicy::Ask => Self::Prompt(PromptResolver),
            ConflictPolicy::Overwrite => {
                Self::Fixed(fleetmon_core::FixedPolicy(ConflictAction::Overwrite))
            }
            ConflictPolicy::KeepBoth => {
                Self::Fixed(fleetmon_core::FixedPolicy(ConflictAction::KeepBoth))
            }
            ConflictPolicy::Skip => Self::Fixed(fleetmon_core::FixedPolicy(ConflictAction::Skip)),
        }
    }
}

impl ConflictResolver for PolicyResolver {
    fn resolve(&mut self, existing: &Device, incoming: &Device) -> Option<ConflictDecision> {
        match self {
            Self::Prompt(r) => r.resolve(existing, incoming),
            Self::Fixed(r) => r.resolve(existing, incoming),
        }
    }
}
