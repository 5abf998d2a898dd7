//! Results persistence module

use anyhow::Result;
use crate::analysis::CommunityAnalysis;
use crate::graph::CommunityGraph;
use crate::topology::DecompositionResult;
use serde::Serialize;
use serde_json::{json, to_string_pretty};
use statrs::statistics::Statistics;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save analysis results to the specified directory
pub fn save_results(
    analysis: &CommunityAnalysis,
    graph: &CommunityGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving analysis of {} members to {}", graph.member_count(), output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(analysis, graph, output_dir)?;
    write_json(output_dir, "decomposition.json", &analysis.decomposition)?;
    write_json(output_dir, "filtration.json", &analysis.filtration)?;
    write_json(output_dir, "event_times.json", &analysis.event_times)?;
    save_priorities(analysis, graph, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save one decomposition per subgroup pair
pub fn save_pair_results(pairs: &[DecompositionResult], output_dir: &str) -> Result<()> {
    log::info!("Saving {} subgroup decompositions", pairs.len());

    let pairs_dir = Path::new(output_dir).join("pairs");
    fs::create_dir_all(&pairs_dir)?;

    for result in pairs {
        let Some(split) = &result.split else {
            continue;
        };
        let name = format!("{}__{}.json", split.subgroup_a, split.subgroup_b);
        let mut file = File::create(pairs_dir.join(sanitize(&name)))?;
        file.write_all(to_string_pretty(result)?.as_bytes())?;
    }

    Ok(())
}

fn write_json<T: Serialize>(output_dir: &str, name: &str, value: &T) -> Result<()> {
    let path = Path::new(output_dir).join(name);
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

/// Mean and sample standard deviation, 0 when undefined
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let mean = if values.is_empty() { 0.0 } else { values.iter().mean() };
    let std_dev = if values.len() < 2 { 0.0 } else { values.iter().std_dev() };
    (mean, std_dev)
}

/// Save summary information
fn save_summary(
    analysis: &CommunityAnalysis,
    graph: &CommunityGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let centrality: Vec<f64> = graph.members().iter().map(|m| m.centrality as f64).collect();
    let boundary: Vec<f64> = graph.members().iter().map(|m| m.boundary_score as f64).collect();
    let (centrality_mean, centrality_std) = mean_and_std(&centrality);
    let (boundary_mean, boundary_std) = mean_and_std(&boundary);

    let summary = json!({
        "community_id": graph.community_id,
        "graph_stats": {
            "member_count": graph.member_count(),
            "relationship_count": graph.relationship_count(),
            "components": analysis.decomposition.components,
            "cycles": analysis.decomposition.cycles,
            "centrality_mean": centrality_mean,
            "centrality_std_dev": centrality_std,
            "boundary_mean": boundary_mean,
            "boundary_std_dev": boundary_std,
        },
        "health": {
            "score": analysis.health_score,
            "formula": analysis.decomposition.health_formula,
            "is_cohesive": analysis.decomposition.is_cohesive,
        },
        "risk": {
            "isolation_count": analysis.isolation_count,
            "bridge_count": analysis.bridge_count,
            "hole_count": analysis.hole_count,
            "introduction_count": analysis.decomposition.suggested_introductions.len(),
        },
        "filtration": {
            "barcode_count": analysis.filtration.barcodes.len(),
            "stable_groups": analysis.filtration.stable_groups.len(),
            "fragile_groups": analysis.filtration.fragile_groups.len(),
        },
        "diagnosis": analysis.decomposition.diagnosis,
    });

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the follow-up list with member names resolved
fn save_priorities(
    analysis: &CommunityAnalysis,
    graph: &CommunityGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving follow-up priorities");

    let entries = analysis
        .priorities
        .iter()
        .map(|&(id, priority)| {
            let member = graph.member(id)?;
            Ok(json!({
                "id": id,
                "name": member.name,
                "room": member.room,
                "priority": priority,
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    write_json(output_dir, "priorities.json", &entries)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' { c } else { '_' })
        .collect()
}
