//! Signature disambiguation for legacy calls.
//!
//! Many legacy methods accepted an optional leading element handle: with it they
//! acted on that element, without it on the command's current context.

use wdcompat_interfaces::{Arg, ElementHandle};

/// Which call shape a legacy invocation used.
#[derive(Debug, Clone, PartialEq)]
pub enum Signature {
    /// First argument was an element handle; `rest` holds the remaining arguments.
    Element {
        element: ElementHandle,
        rest: Vec<Arg>,
    },
    /// No leading element; all arguments are kept in order.
    Context(Vec<Arg>),
}

/// Splits off a leading element handle, if there is one.
pub fn split_leading_element(args: Vec<Arg>) -> Signature {
    let mut remaining = args.into_iter();
    match remaining.next() {
        Some(Arg::Element(element)) => Signature::Element {
            element,
            rest: remaining.collect(),
        },
        Some(first) => Signature::Context(std::iter::once(first).chain(remaining).collect()),
        None => Signature::Context(Vec::new()),
    }
}

/// Rewrites the legacy `(a, b, handle)` window-command order into `(handle, a, b)`.
///
/// Only exactly three arguments with a numeric first one are rotated. Returns the
/// arguments and whether a rotation took place.
pub fn rotate_trailing_handle(mut args: Vec<Arg>) -> (Vec<Arg>, bool) {
    if args.len() == 3 && args[0].is_number() {
        args.rotate_right(1);
        (args, true)
    } else {
        (args, false)
    }
}
