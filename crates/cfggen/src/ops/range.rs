/*
 * range.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `$range`: half-open, step-strided integer sequences.
//!
//! Accepts `n` (`0..n`) or a list `[stop]`, `[start, stop]` or
//! `[start, stop, step]`. Steps may be negative but never zero.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::evaluator::resolve;
use crate::value::Value;

const NAME: &str = "$range";

pub(crate) fn apply(args: &Value, ctx: &Context<'_>) -> Result<Value> {
    let args = resolve(args, ctx)?;
    let (start, stop, step) = match &args {
        Value::Int(stop) => (0, *stop, 1),
        other => match other.as_items() {
            Some(items) => bounds(items)?,
            None => {
                return Err(Error::argument(
                    NAME,
                    format!(
                        "expected an integer or a list of 1 to 3 integers, got {}",
                        other.kind()
                    ),
                ));
            }
        },
    };
    let values = int_range(start, stop, step)?;
    Ok(Value::Sequence(values.into_iter().map(Value::Int).collect()))
}

fn bounds(items: &[Value]) -> Result<(i64, i64, i64)> {
    let ints = items
        .iter()
        .map(|item| {
            item.as_i64().ok_or_else(|| {
                Error::argument(NAME, format!("bounds must be integers, got {}", item.kind()))
            })
        })
        .collect::<Result<Vec<i64>>>()?;

    match ints.as_slice() {
        [stop] => Ok((0, *stop, 1)),
        [start, stop] => Ok((*start, *stop, 1)),
        [start, stop, step] => Ok((*start, *stop, *step)),
        _ => Err(Error::argument(
            NAME,
            format!("expected 1 to 3 bounds, got {}", ints.len()),
        )),
    }
}

/// Integers from `start` (inclusive) towards `stop` (exclusive) by `step`.
///
/// The result has `max(0, ceil((stop - start) / step))` elements. Fails
/// when that many elements cannot be allocated.
pub fn int_range(start: i64, stop: i64, step: i64) -> Result<Vec<i64>> {
    if step == 0 {
        return Err(Error::argument(NAME, "step must not be zero"));
    }

    // Widen so that spans like i64::MIN..i64::MAX do not overflow.
    let (start, stop, step) = (start as i128, stop as i128, step as i128);
    let span = if step > 0 { stop - start } else { start - stop };
    let stride = step.abs();
    let len = if span > 0 { (span + stride - 1) / stride } else { 0 };

    let too_long = || Error::argument(NAME, format!("range of {} elements is too large", len));
    let capacity = usize::try_from(len).map_err(|_| too_long())?;
    let mut values = Vec::new();
    values.try_reserve_exact(capacity).map_err(|_| too_long())?;
    values.extend((0..len).map(|i| (start + i * step) as i64));
    Ok(values)
}
