/*
 * zip.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `$zip`: positional pairing of sequences into tuples.
//!
//! The result is as long as the shortest input. Trailing elements of longer
//! inputs are dropped without an error.

use tracing::debug;

use crate::context::Context;
use crate::error::Result;
use crate::evaluator::resolve;
use crate::ops::expect_items;
use crate::value::Value;

const NAME: &str = "$zip";

pub(crate) fn apply(args: &Value, ctx: &Context<'_>) -> Result<Value> {
    let inputs = expect_items(NAME, "argument", resolve(args, ctx)?)?
        .into_iter()
        .enumerate()
        .map(|(i, input)| expect_items(NAME, &format!("argument {}", i), input))
        .collect::<Result<Vec<_>>>()?;

    let len = inputs.iter().map(Vec::len).min().unwrap_or(0);
    let longest = inputs.iter().map(Vec::len).max().unwrap_or(0);
    if longest > len {
        debug!(kept = len, longest, "$zip truncated longer inputs");
    }

    let mut columns: Vec<_> = inputs.into_iter().map(Vec::into_iter).collect();
    let rows = (0..len)
        .map(|_| {
            Value::Tuple(columns.iter_mut().filter_map(|column| column.next()).collect())
        })
        .collect();
    Ok(Value::Sequence(rows))
}
