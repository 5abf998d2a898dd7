//! Visualization export module

use anyhow::Result;
use crate::analysis::CommunityAnalysis;
use crate::graph::CommunityGraph;
use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::UnGraph;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Generate visualization files from analysis results
pub fn generate_visualizations(
    analysis: &CommunityAnalysis,
    graph: &CommunityGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Generating visualizations for {} members", graph.member_count());

    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    generate_dot(graph, &viz_dir)?;
    generate_node_table(graph, &viz_dir)?;
    generate_hole_table(analysis, &viz_dir)?;

    log::info!("Visualizations generated successfully");

    Ok(())
}

/// Graph with member names on nodes and strengths on edges
fn labelled_graph(graph: &CommunityGraph) -> UnGraph<String, String> {
    graph.to_petgraph().map(
        |_, &id| {
            graph
                .member(id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|_| id.to_string())
        },
        |_, strength| format!("{strength:.1}"),
    )
}

/// Write a Graphviz DOT file of the whole community
fn generate_dot(graph: &CommunityGraph, viz_dir: &Path) -> Result<()> {
    log::info!("Generating DOT network file");

    let labelled = labelled_graph(graph);
    let dot = Dot::with_config(&labelled, &[DotConfig::GraphContentOnly]);

    let mut file = File::create(viz_dir.join("community.dot"))?;
    writeln!(file, "graph community {{")?;
    write!(file, "{dot}")?;
    writeln!(file, "}}")?;

    Ok(())
}

/// Per-member derived scores for external plotting tools
fn generate_node_table(graph: &CommunityGraph, viz_dir: &Path) -> Result<()> {
    log::info!("Generating node table");

    let mut file = File::create(viz_dir.join("nodes.csv"))?;
    writeln!(file, "id,name,component,centrality,boundary_score,is_bridge")?;

    for m in graph.members() {
        let component = m.component_id.map(|c| c.to_string()).unwrap_or_default();
        writeln!(
            file,
            "{},{},{},{:.4},{:.4},{}",
            m.id,
            m.name.replace(',', " "),
            component,
            m.centrality,
            m.boundary_score,
            m.is_bridge
        )?;
    }

    Ok(())
}

fn generate_hole_table(analysis: &CommunityAnalysis, viz_dir: &Path) -> Result<()> {
    let mut file = File::create(viz_dir.join("holes.csv"))?;
    writeln!(file, "hole,size,members")?;

    for (i, hole) in analysis.decomposition.holes.iter().enumerate() {
        let members: Vec<String> = hole.iter().map(|id| id.to_string()).collect();
        writeln!(file, "{},{},{}", i, hole.len(), members.join(" "))?;
    }

    Ok(())
}
