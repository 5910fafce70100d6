/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template evaluation engine.
//!
//! Evaluation is a single depth-first pass. Plain sequences and mappings are
//! rebuilt with each element resolved; operator invocations are handed to
//! their implementation together with their raw arguments, and each operator
//! decides when to resolve those arguments.

use tracing::debug;

use crate::context::Context;
use crate::environment::{Environment, ProcessEnvironment};
use crate::error::Result;
use crate::operator::{Invocation, Operator};
use crate::ops;
use crate::value::Value;

/// Evaluate a template against a snapshot of the process environment.
///
/// The snapshot is taken when this function is called; `$env` never reads
/// the live environment afterwards.
pub fn evaluate(template: &Value) -> Result<Value> {
    let environment = ProcessEnvironment::snapshot();
    evaluate_with(template, &environment)
}

/// Evaluate a template with an explicit environment.
pub fn evaluate_with(template: &Value, environment: &dyn Environment) -> Result<Value> {
    let ctx = Context::new(template, environment);
    resolve(template, &ctx)
}

/// Resolve a single node in the given context.
pub fn resolve(node: &Value, ctx: &Context<'_>) -> Result<Value> {
    if let Some(invocation) = Invocation::detect(node)? {
        return apply(invocation, ctx);
    }

    match node {
        Value::Sequence(items) => Ok(Value::Sequence(resolve_all(items, ctx)?)),
        Value::Tuple(items) => Ok(Value::Tuple(resolve_all(items, ctx)?)),
        Value::Mapping(entries) => {
            let resolved = entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), resolve(value, ctx)?)))
                .collect::<Result<_>>()?;
            Ok(Value::Mapping(resolved))
        }
        scalar => Ok(scalar.clone()),
    }
}

/// Resolve every element of a list, preserving order.
pub(crate) fn resolve_all(items: &[Value], ctx: &Context<'_>) -> Result<Vec<Value>> {
    items.iter().map(|item| resolve(item, ctx)).collect()
}

/// Dispatch an invocation to its operator.
pub(crate) fn apply(invocation: Invocation<'_>, ctx: &Context<'_>) -> Result<Value> {
    debug!(operator = %invocation.operator, "applying operator");
    let args = invocation.args;
    match invocation.operator {
        Operator::Range => ops::range::apply(args, ctx),
        Operator::Ref => ops::reference::apply(args, ctx),
        Operator::Product => ops::product::apply(args, ctx),
        Operator::Env => ops::env::apply(args, ctx),
        Operator::Concat => ops::concat::apply(args, ctx),
        Operator::Zip => ops::zip::apply(args, ctx),
    }
}
