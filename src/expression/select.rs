//! Resolution of the selection expression kinds.
//!
//! These bridge the expression tree to the shadow-probe pipeline: a target
//! component plus quoted pattern arguments become a `TextItemCollection` the
//! write commands consume.

use crate::expression::node::{ExprKind, Expression, Resolved, ResolveContext};
use crate::foundation::core::ComponentId;
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::selection::probe;
use crate::selection::unit::{TextItem, TextItemCollection};

pub(crate) fn resolve(
    kind: &ExprKind,
    origin: &str,
    args: &[Expression],
    ctx: &mut ResolveContext<'_>,
) -> ChalkResult<Resolved> {
    match kind {
        ExprKind::SelectOnly => {
            let (id, patterns) = target_and_patterns(origin, args)?;
            let session = &mut *ctx.session;
            let component = session.component(id).ok_or_else(|| {
                ChalkError::script(origin, "selection target is not a live component")
            })?;
            let matched = probe::resolve_matches(ctx.engine, component, &patterns)?;
            let items = matched
                .into_iter()
                .map(|m| TextItem::new(id, m.unit, Some(m.bounds)))
                .collect();
            Ok(Resolved::Selection(TextItemCollection::new(items)))
        }
        ExprKind::SelectWithout => {
            let (id, patterns) = target_and_patterns(origin, args)?;
            let session = &mut *ctx.session;
            let component = session.component(id).ok_or_else(|| {
                ChalkError::script(origin, "selection target is not a live component")
            })?;
            let unit = probe::resolve_complement(ctx.engine, component, &patterns)?;
            // A complement has no single enclosing rectangle.
            let item = TextItem::new(id, unit, None);
            Ok(Resolved::Selection(TextItemCollection::new(vec![item])))
        }
        ExprKind::Item(index) => {
            let collection = collection_arg(origin, args)?;
            let item = collection.get(*index).cloned().ok_or_else(|| {
                ChalkError::script(
                    origin,
                    format!(
                        "item index {index} out of range for a selection of {} items",
                        collection.len()
                    ),
                )
            })?;
            Ok(Resolved::Selection(TextItemCollection::new(vec![item])))
        }
        ExprKind::Write => {
            let target = args.first().ok_or_else(|| {
                ChalkError::script(origin, "expected a selection or component to write")
            })?;
            match target.resolved() {
                Some(Resolved::Selection(collection)) => {
                    Ok(Resolved::Selection(collection.clone()))
                }
                Some(Resolved::Component(id)) => Ok(Resolved::Component(*id)),
                _ => Err(ChalkError::script(
                    origin,
                    format!("`{}` is not writable", target.name()),
                )),
            }
        }
        other => Err(ChalkError::script(
            origin,
            format!("{other:?} is not a selection operation"),
        )),
    }
}

/// First argument must resolve to a component; the rest are quoted patterns.
fn target_and_patterns(
    origin: &str,
    args: &[Expression],
) -> ChalkResult<(ComponentId, Vec<String>)> {
    let (target, rest) = args.split_first().ok_or_else(|| {
        ChalkError::script(origin, "expected a component argument, got none")
    })?;
    let id = match target.resolved() {
        Some(Resolved::Component(id)) => *id,
        _ => {
            return Err(ChalkError::script(
                origin,
                format!("`{}` is not a typeset component", target.name()),
            ));
        }
    };
    let mut patterns = Vec::with_capacity(rest.len());
    for arg in rest {
        match arg.resolved() {
            Some(Resolved::Text(pattern)) => patterns.push(pattern.clone()),
            _ => {
                return Err(ChalkError::script(
                    origin,
                    format!("`{}` is not a quoted pattern string", arg.name()),
                ));
            }
        }
    }
    Ok((id, patterns))
}

fn collection_arg<'a>(
    origin: &str,
    args: &'a [Expression],
) -> ChalkResult<&'a TextItemCollection> {
    let first = args.first().ok_or_else(|| {
        ChalkError::script(origin, "expected a selection argument, got none")
    })?;
    match first.resolved() {
        Some(Resolved::Selection(collection)) => Ok(collection),
        _ => Err(ChalkError::script(
            origin,
            format!("`{}` is not a selection", first.name()),
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/select.rs"]
mod tests;
