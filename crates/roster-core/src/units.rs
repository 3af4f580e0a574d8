//! Parent-before-child unit creation.

use roster_model::{NewUnit, UnitPair};

use crate::cancel::CancelFlag;
use crate::directory::Directory;
use crate::error::{ImportError, MutationKind};
use crate::progress::Reporter;
use crate::registry::Registry;

/// Result of the unit-creation loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitOutcome {
    /// Pairs left uncreated because their parent never resolved.
    pub unresolved: Vec<UnitPair>,
    /// Passes run over the pending list.
    pub passes: usize,
}

/// Creates every missing unit in `pairs`, each only once its parent exists.
///
/// Runs passes over the pending list until it is empty, a pass creates
/// nothing, or `max_passes` is reached. Pairs with dangling or cyclic
/// parents stay pending and are returned, not raised.
pub async fn create_units<D: Directory + ?Sized>(
    directory: &D,
    registry: &mut Registry,
    reporter: &mut Reporter<'_>,
    cancel: &CancelFlag,
    pairs: &[UnitPair],
    max_passes: usize,
    description: Option<&str>,
) -> Result<UnitOutcome, ImportError> {
    let mut pending: Vec<&UnitPair> = pairs
        .iter()
        .filter(|pair| {
            registry
                .resolve_unit(pair.parent.as_deref(), &pair.name)
                .is_none()
        })
        .collect();
    let mut passes = 0;

    while !pending.is_empty() && passes < max_passes {
        passes += 1;
        let before = pending.len();
        let mut deferred = Vec::with_capacity(before);

        for pair in pending {
            let parent_id = match pair.parent.as_deref() {
                None => None,
                Some(parent) => match registry.unit_id_by_name(parent) {
                    Some(id) => Some(id),
                    None => {
                        deferred.push(pair);
                        continue;
                    }
                },
            };
            cancel.check()?;
            let request = NewUnit {
                name: pair.name.clone(),
                parent_id,
                description: description.map(str::to_string),
            };
            let unit = directory.create_unit(&request).await.map_err(|source| {
                ImportError::mutation(MutationKind::CreateUnit, &pair.name, source)
            })?;
            tracing::debug!(id = unit.id, ?parent_id, "created unit");
            match pair.parent.as_deref() {
                Some(parent) => reporter.info(format!(
                    "created unit \"{}\" under \"{parent}\" (id {})",
                    unit.name, unit.id
                )),
                None => reporter.info(format!("created unit \"{}\" (id {})", unit.name, unit.id)),
            }
            reporter.counts_mut().units_created += 1;
            reporter.advance();
            registry.insert_unit(unit);
        }

        let progressed = deferred.len() < before;
        pending = deferred;
        if !progressed {
            break;
        }
    }

    if !pending.is_empty() {
        tracing::warn!(
            unresolved = pending.len(),
            passes,
            "units left uncreated, parents never resolved"
        );
    }
    Ok(UnitOutcome {
        unresolved: pending.into_iter().cloned().collect(),
        passes,
    })
}
