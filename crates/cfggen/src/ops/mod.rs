/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Operator implementations, one module per operator.
//!
//! Every operator has the signature `apply(args, ctx) -> Result<Value>` and
//! receives its arguments unevaluated.

pub(crate) mod concat;
pub(crate) mod env;
pub(crate) mod product;
pub(crate) mod range;
pub(crate) mod reference;
pub(crate) mod zip;

use crate::error::{Error, Result};
use crate::value::Value;

/// Unwrap a resolved value into its elements, or fail with an argument error.
pub(crate) fn expect_items(operator: &'static str, what: &str, value: Value) -> Result<Vec<Value>> {
    value.into_items().map_err(|other| {
        Error::argument(
            operator,
            format!("{} must be a sequence, got {}", what, other.kind()),
        )
    })
}
