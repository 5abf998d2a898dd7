//! Greedy introduction suggestions

use crate::data::MemberId;
use crate::error::Result;
use crate::graph::CommunityGraph;

/// Suggest pairs of members to introduce.
///
/// Two greedy passes over members in insertion order:
///
/// 1. each isolated member is paired with the first other member whose
///    boundary score is at most `well_connected_cap` and who shares a course
///    or an interest with them;
/// 2. for each hole of three or more members, the first outside member
///    sharing a course with at least two hole members is paired with the
///    last hole member matched during that scan.
///
/// Neither pass looks for an optimal matching.
pub fn suggest_introductions(
    graph: &CommunityGraph,
    holes: &[Vec<MemberId>],
    isolated: &[MemberId],
    well_connected_cap: f32,
) -> Result<Vec<(MemberId, MemberId)>> {
    let mut intros = Vec::new();

    for &iso_id in isolated {
        let iso = graph.member(iso_id)?;

        let partner = graph.members().iter().find(|m| {
            m.id != iso_id
                && m.boundary_score <= well_connected_cap
                && (iso.shares_course_with(m) || iso.shares_interest_with(m))
        });

        if let Some(partner) = partner {
            intros.push((iso_id, partner.id));
        }
    }

    for hole in holes.iter().filter(|h| h.len() >= 3) {
        let hole_members = hole
            .iter()
            .map(|&id| graph.member(id))
            .collect::<Result<Vec<_>>>()?;

        for candidate in graph.members() {
            if hole.contains(&candidate.id) {
                continue;
            }

            let mut matches = 0;
            let mut connect_to = None;
            for hole_member in &hole_members {
                if candidate.shares_course_with(hole_member) {
                    matches += 1;
                    connect_to = Some(hole_member.id);
                }
            }

            match connect_to {
                Some(target) if matches >= 2 => {
                    intros.push((candidate.id, target));
                    break;
                }
                _ => {}
            }
        }
    }

    log::debug!("Suggested {} introductions", intros.len());

    Ok(intros)
}
