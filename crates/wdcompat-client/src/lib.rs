//! # wdcompat Client Library
//!
//! Entry point for installing the legacy WD.js-style vocabulary on a command
//! API. Ties together the interface, core and legacy crates.
//!
//! Most callers only need `apply_to` (or `command` to wrap an engine directly);
//! `Installer` builds tables from explicit configuration.

// Re-export the engine contract for implementors
pub use wdcompat_interfaces::{
    ApiError, Arg, CommandContext, CommandEngine, ElementHandle, LocatorStrategy, Method, Reply,
    SessionInfo, Target, default_strategies,
};

pub use serde_json::Value;

pub use wdcompat_core::{Config, load_config};

pub use wdcompat_legacy::{
    CommandPrototype, DeprecationEvent, DeprecationNotifier, DeprecationSubscriber,
    LegacyCommand, Member, MethodTable, RecipientSubscriber, SubscriptionId,
};

mod error;
mod install;

pub use error::ClientError;
pub use install::{Installer, apply_to, command, default_table};
