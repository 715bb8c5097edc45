use lms_core::model::{Session, UserId};
use remote::{RemoteError, TeamRepository};

/// Whether `session` may read data owned by `target`.
///
/// Team leads only get a roster lookup when the target is someone else;
/// the lookup resolves the target's team.
pub(crate) async fn may_view_user(
    session: &Session,
    target: UserId,
    team: &dyn TeamRepository,
) -> Result<bool, RemoteError> {
    if session.is_self(target) || session.role().can_view_all_members() {
        return Ok(true);
    }
    let Some(team_id) = session
        .team_id()
        .filter(|_| session.role().can_view_team_roster())
    else {
        return Ok(false);
    };
    let members = team.list_members(Some(team_id)).await?;
    let target_team = members
        .iter()
        .find(|member| member.id == target)
        .and_then(|member| member.team_id);
    Ok(session.can_view_user(target, target_team))
}
