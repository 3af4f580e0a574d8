//! Person creation.

use roster_model::{NewPerson, NormalizedRow};

use crate::cancel::CancelFlag;
use crate::directory::Directory;
use crate::error::{ImportError, MutationKind};
use crate::plan::distinct_people;
use crate::progress::Reporter;
use crate::registry::Registry;

/// Creates a person for every distinct name the registry does not know.
///
/// Known names cost no remote call. Each distinct name advances progress
/// once, whether it was created or already present.
pub async fn create_people<D: Directory + ?Sized>(
    directory: &D,
    registry: &mut Registry,
    reporter: &mut Reporter<'_>,
    cancel: &CancelFlag,
    rows: &[NormalizedRow],
) -> Result<(), ImportError> {
    for row in distinct_people(rows) {
        if registry.person_id(&row.full_name).is_some() {
            reporter.counts_mut().people_existing += 1;
            reporter.advance();
            continue;
        }
        cancel.check()?;
        let person = directory
            .create_person(&new_person(row))
            .await
            .map_err(|source| {
                ImportError::mutation(MutationKind::CreatePerson, &row.full_name, source)
            })?;
        tracing::debug!(id = person.id, "created person");
        reporter.info(format!(
            "created person \"{}\" (id {})",
            person.full_name, person.id
        ));
        reporter.counts_mut().people_created += 1;
        reporter.advance();
        registry.insert_person(&person);
    }
    Ok(())
}

fn new_person(row: &NormalizedRow) -> NewPerson {
    NewPerson {
        full_name: row.full_name.clone(),
        phone: row.phone.clone(),
        email: row.email.clone(),
        role: row.role.clone(),
        rank: row.rank.clone(),
    }
}
