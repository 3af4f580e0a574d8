//! Team creation and full-replacement membership sync.

use std::collections::HashSet;

use roster_model::NewTeam;

use crate::cancel::CancelFlag;
use crate::directory::Directory;
use crate::error::{ImportError, MutationKind};
use crate::plan::TeamGroup;
use crate::progress::Reporter;
use crate::registry::Registry;

/// Makes every group's team hold exactly the group's members.
///
/// Existing teams get their member list replaced, not merged. Groups whose
/// unit cannot be resolved are skipped with a warning. Teams already
/// holding the right members are left alone.
pub async fn sync_teams<D: Directory + ?Sized>(
    directory: &D,
    registry: &mut Registry,
    reporter: &mut Reporter<'_>,
    cancel: &CancelFlag,
    groups: &[TeamGroup],
) -> Result<(), ImportError> {
    for group in groups {
        let (unit, team) = (&group.pair.unit, &group.pair.team);
        let Some(unit_id) = registry.resolve_unit(group.pair.parent.as_deref(), unit) else {
            tracing::warn!("skipping team group, unit not found");
            reporter.warn(format!("skipped team \"{team}\": unit \"{unit}\" not found"));
            reporter.counts_mut().groups_skipped += 1;
            reporter.advance();
            continue;
        };

        let member_ids = resolve_members(registry, &group.members);
        let existing = registry
            .team(unit_id, team)
            .map(|existing| (existing.id, same_members(&existing.member_ids, &member_ids)));

        match existing {
            Some((_, true)) => {
                reporter.info(format!(
                    "team \"{team}\" in \"{unit}\" is up to date (members: {})",
                    member_ids.len()
                ));
                reporter.counts_mut().teams_unchanged += 1;
            }
            Some((team_id, false)) => {
                cancel.check()?;
                let updated = directory
                    .replace_team_members(team_id, &member_ids)
                    .await
                    .map_err(|source| {
                        ImportError::mutation(MutationKind::ReplaceTeamMembers, team, source)
                    })?;
                tracing::debug!(id = team_id, members = member_ids.len(), "replaced team members");
                reporter.info(format!(
                    "replaced members of team \"{team}\" in \"{unit}\" (members: {})",
                    member_ids.len()
                ));
                reporter.counts_mut().teams_replaced += 1;
                registry.insert_team(unit_id, updated);
            }
            None => {
                cancel.check()?;
                let request = NewTeam {
                    name: team.clone(),
                    unit_id,
                    member_ids: member_ids.clone(),
                };
                let created = directory.create_team(&request).await.map_err(|source| {
                    ImportError::mutation(MutationKind::CreateTeam, team, source)
                })?;
                tracing::debug!(id = created.id, members = member_ids.len(), "created team");
                reporter.info(format!(
                    "created team \"{team}\" in \"{unit}\" (id {}, members: {})",
                    created.id,
                    member_ids.len()
                ));
                reporter.counts_mut().teams_created += 1;
                registry.insert_team(unit_id, created);
            }
        }
        reporter.advance();
    }
    Ok(())
}

/// Person ids for `names` in row order, without repeats. Names that do not
/// resolve are left out.
fn resolve_members(registry: &Registry, names: &[String]) -> Vec<i64> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter_map(|name| registry.person_id(name))
        .filter(|id| seen.insert(*id))
        .collect()
}

fn same_members(current: &[i64], desired: &[i64]) -> bool {
    let current: HashSet<i64> = current.iter().copied().collect();
    let desired: HashSet<i64> = desired.iter().copied().collect();
    current == desired
}
