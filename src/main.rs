use anyhow::{anyhow, Result};
use clap::Parser;
use community_topology::topology::exact_betti_numbers;
use community_topology::{
    storage, viz, CommunityAnalyzer, CommunityGraph, Config, DecompositionEngine,
    DecompositionResult,
};
use itertools::Itertools;
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[clap(
    name = "community-topology",
    about = "Topological health analysis of residential communities"
)]
struct Cli {
    /// Path to input roster (JSON array of members)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: String,

    /// Community identifier used in reports
    #[clap(long, default_value = "community")]
    community_id: String,

    /// Minimum relationship strength (overrides the config file)
    #[clap(long)]
    min_strength: Option<f32>,

    /// Decompose over one subgroup pair, e.g. "north,south"
    #[clap(long)]
    subgroups: Option<String>,

    /// Decompose over every pair of subgroups
    #[clap(long)]
    all_pairs: bool,

    /// Optional JSON config file
    #[clap(long)]
    config: Option<String>,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting community topology analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(min_strength) = args.min_strength {
        config.min_strength = min_strength;
    }

    std::fs::create_dir_all(&args.output_dir)?;

    // 1. Load roster
    let members = community_topology::data::roster::load_members(&args.input)?;
    let mut graph = CommunityGraph::from_members(args.community_id.clone(), members)?;

    // 2. Whole-community analysis
    let analyzer = CommunityAnalyzer::new(config.clone());
    let analysis = analyzer.analyze(&mut graph)?;

    log::info!(
        "Built graph with {} members and {} relationships",
        graph.member_count(),
        graph.relationship_count()
    );

    let (b0, b1) = exact_betti_numbers(&graph);
    if (b0, b1) != (analysis.decomposition.components, analysis.decomposition.cycles) {
        log::warn!(
            "Rank computation disagrees with union-find: b0={} b1={} vs components={} cycles={}",
            b0,
            b1,
            analysis.decomposition.components,
            analysis.decomposition.cycles
        );
    }

    // 3. Subgroup decompositions
    let pairs = subgroup_pairs(&graph, args.subgroups.as_deref(), args.all_pairs)?;
    if !pairs.is_empty() {
        let engine = DecompositionEngine::new(&config);
        let results = pairs
            .par_iter()
            .map(|(a, b)| engine.compute(&graph, a, b))
            .collect::<community_topology::Result<Vec<DecompositionResult>>>()?;

        log::info!("Computed {} subgroup decompositions", results.len());
        storage::save_pair_results(&results, &args.output_dir)?;
    }

    // 4. Save results
    storage::save_results(&analysis, &graph, &args.output_dir)?;

    // 5. Generate visualizations if requested
    if !args.skip_viz {
        viz::generate_visualizations(&analysis, &graph, &args.output_dir)?;
    }

    log::info!(
        "Analysis complete (health {:.1}). Results saved to {}",
        analysis.health_score,
        args.output_dir
    );

    Ok(())
}

fn subgroup_pairs(
    graph: &CommunityGraph,
    requested: Option<&str>,
    all_pairs: bool,
) -> Result<Vec<(String, String)>> {
    if all_pairs {
        return Ok(graph
            .subgroup_labels()
            .map(str::to_string)
            .tuple_combinations()
            .collect());
    }

    match requested {
        Some(pair) => {
            let (a, b) = pair
                .split_once(',')
                .ok_or_else(|| anyhow!("Expected two comma-separated subgroups, got {}", pair))?;
            Ok(vec![(a.trim().to_string(), b.trim().to_string())])
        }
        None => Ok(Vec::new()),
    }
}
