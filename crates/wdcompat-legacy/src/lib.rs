//! # wdcompat Legacy
//!
//! The pre-2.0 command vocabulary, rebuilt on top of a `CommandEngine`.
//!
//! `AliasRegistry` knows every legacy name and what it maps to; `build` resolves
//! it into a `MethodTable` that can be installed on any `CommandPrototype`.
//! Each legacy symbol publishes one `DeprecationEvent` on first use through the
//! `DeprecationNotifier` it was built with.

pub mod behaviors;
pub mod deprecation;
pub mod dispatch;
pub mod installer;
pub mod member;
pub mod poll;
pub mod registry;
pub mod scoped;
pub mod strategies;

pub use behaviors::LegacyEnv;
pub use deprecation::{
    DeprecationEvent, DeprecationNotifier, DeprecationSubscriber, LogSubscriber,
    RecipientSubscriber, SubscriptionId,
};
pub use installer::{CommandPrototype, LegacyCommand, MethodTable};
pub use member::{Invocation, LegacyGetter, LegacyMethod, Member};
pub use registry::{AliasRegistry, Behavior, BehaviorKind, LegacyMethodEntry, SESSION_ID_PROPERTY};
pub use strategies::{StrategyExpander, StrategyFamily};
