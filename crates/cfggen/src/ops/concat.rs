/*
 * concat.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `$+`: concatenation of sequences, in argument order, keeping duplicates.

use crate::context::Context;
use crate::error::Result;
use crate::evaluator::resolve;
use crate::ops::expect_items;
use crate::value::Value;

const NAME: &str = "$+";

pub(crate) fn apply(args: &Value, ctx: &Context<'_>) -> Result<Value> {
    let parts = expect_items(NAME, "argument", resolve(args, ctx)?)?;
    let mut items = Vec::new();
    for (i, part) in parts.into_iter().enumerate() {
        items.extend(expect_items(NAME, &format!("argument {}", i), part)?);
    }
    Ok(Value::Sequence(items))
}
