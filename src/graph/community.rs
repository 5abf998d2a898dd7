//! Community graph: members, synthesized relationships and structural invariants

use crate::data::{Member, MemberId, Relationship};
use crate::error::{Error, Result};
use crate::graph::algorithms::{back_edge_cycles, count_components, cycle_rank, DisjointSets};
use crate::graph::scoring::{score_pair, STRONG_TIE_THRESHOLD};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Owns every member and relationship of one population
#[derive(Debug, Clone, Default)]
pub struct CommunityGraph {
    /// Population label, e.g. "Floor 3 East"
    pub community_id: String,

    /// Members in insertion order
    members: Vec<Member>,

    /// Member id to position in `members`
    index: HashMap<MemberId, usize>,

    relationships: Vec<Relationship>,

    /// Neighbours over every relationship
    adjacency: HashMap<MemberId, Vec<MemberId>>,

    /// Neighbours over relationships with strength >= STRONG_TIE_THRESHOLD
    strong_adjacency: HashMap<MemberId, Vec<MemberId>>,

    /// Subgroup label to member ids, in insertion order
    subgroups: BTreeMap<String, Vec<MemberId>>,
}

impl CommunityGraph {
    pub fn new(community_id: impl Into<String>) -> Self {
        Self {
            community_id: community_id.into(),
            ..Default::default()
        }
    }

    /// Build a graph from a member list
    pub fn from_members<I>(community_id: impl Into<String>, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = Member>,
    {
        let mut graph = Self::new(community_id);
        for member in members {
            graph.add_member(member)?;
        }
        Ok(graph)
    }

    /// Append a member and index it under every subgroup it declares.
    ///
    /// Ids must be unique and every time block valid.
    pub fn add_member(&mut self, member: Member) -> Result<()> {
        if self.index.contains_key(&member.id) {
            return Err(Error::DuplicateMember(member.id));
        }
        member.validate_schedule()?;

        self.insert_member(member);
        Ok(())
    }

    fn insert_member(&mut self, member: Member) {
        for label in &member.subgroups {
            self.subgroups
                .entry(label.clone())
                .or_default()
                .push(member.id);
        }

        self.index.insert(member.id, self.members.len());
        self.members.push(member);
    }

    /// Append an externally supplied relationship.
    ///
    /// The relationship is renumbered to the next sequence id. Its shared
    /// subgroups must be a subset of what the endpoints actually share.
    pub fn add_relationship(&mut self, mut relationship: Relationship) -> Result<()> {
        let source = self.member(relationship.source)?;
        let target = self.member(relationship.target)?;

        if source.id == target.id {
            return Err(Error::SelfLoop(source.id));
        }
        if !relationship.strength.is_finite() || relationship.strength < 0.0 {
            return Err(Error::InvalidStrength {
                strength: relationship.strength,
            });
        }
        let spans_endpoints = relationship
            .shared_subgroups
            .iter()
            .all(|s| source.subgroups.contains(s) && target.subgroups.contains(s));
        if !spans_endpoints {
            return Err(Error::SubgroupMismatch {
                source_id: source.id,
                target_id: target.id,
            });
        }

        relationship.id = self.relationships.len() as u32;
        self.insert_relationship(relationship);
        Ok(())
    }

    fn insert_relationship(&mut self, relationship: Relationship) {
        let (a, b) = (relationship.source, relationship.target);
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);

        if relationship.strength >= STRONG_TIE_THRESHOLD {
            self.strong_adjacency.entry(a).or_default().push(b);
            self.strong_adjacency.entry(b).or_default().push(a);
        }

        self.relationships.push(relationship);
    }

    /// Look up a member by id
    pub fn member(&self, id: MemberId) -> Result<&Member> {
        self.index
            .get(&id)
            .map(|&pos| &self.members[pos])
            .ok_or(Error::UnknownMember(id))
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Neighbours of a member over all relationships
    pub fn neighbors(&self, id: MemberId) -> Result<&[MemberId]> {
        self.member(id)?;
        Ok(self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Neighbours of a member over strong relationships only
    pub fn strong_neighbors(&self, id: MemberId) -> Result<&[MemberId]> {
        self.member(id)?;
        Ok(self.strong_adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Members of a subgroup in insertion order; empty for unknown labels
    pub fn subgroup_members(&self, label: &str) -> &[MemberId] {
        self.subgroups.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every subgroup label, sorted
    pub fn subgroup_labels(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.subgroups.keys().map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Edge synthesis
    // ------------------------------------------------------------------

    /// Rebuild every relationship from member attributes.
    ///
    /// Clears all relationships (including appended ones) and both adjacency
    /// mappings, then scores each unordered pair in insertion order.
    pub fn synthesize_edges(&mut self, min_strength: f32) {
        log::debug!(
            "Synthesizing relationships for {} members (min strength {})",
            self.members.len(),
            min_strength
        );

        self.relationships.clear();
        self.adjacency.clear();
        self.strong_adjacency.clear();

        let mut created = Vec::new();
        for i in 0..self.members.len() {
            for j in (i + 1)..self.members.len() {
                let a = &self.members[i];
                let b = &self.members[j];

                let score = score_pair(a, b);
                if !score.qualifies(min_strength) {
                    continue;
                }
                let Some(kind) = score.primary_kind() else {
                    continue;
                };

                let shared = score.shared_subgroups.len();
                created.push(Relationship {
                    id: created.len() as u32,
                    source: a.id,
                    target: b.id,
                    kind,
                    strength: score.total,
                    is_bridge_edge: shared < a.subgroups.len() || shared < b.subgroups.len(),
                    shared_subgroups: score.shared_subgroups,
                });
            }
        }

        for relationship in created {
            self.insert_relationship(relationship);
        }

        log::debug!("Synthesized {} relationships", self.relationships.len());
    }

    /// Full recomputation: edge synthesis, boundary scoring, bridge detection
    pub fn recompute(&mut self, min_strength: f32) -> Result<()> {
        self.synthesize_edges(min_strength);
        self.compute_boundary_scores();
        self.compute_bridges()?;
        self.assign_components();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------

    /// Relationship endpoints as member positions
    fn index_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.relationships.iter().filter_map(|r| {
            let source = *self.index.get(&r.source)?;
            let target = *self.index.get(&r.target)?;
            Some((source, target))
        })
    }

    fn index_adjacency(&self) -> Vec<Vec<usize>> {
        self.members
            .iter()
            .map(|m| {
                self.adjacency
                    .get(&m.id)
                    .map(|ns| ns.iter().filter_map(|n| self.index.get(n).copied()).collect())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Number of connected components (0 for an empty graph)
    pub fn component_count(&self) -> usize {
        count_components(self.members.len(), self.index_edges())
    }

    /// Number of independent cycles: E - V + components
    pub fn cycle_count(&self) -> usize {
        cycle_rank(
            self.relationships.len(),
            self.members.len(),
            self.component_count(),
        )
    }

    /// One representative cycle per DFS back edge, as member ids.
    ///
    /// These are structural holes worth looking at, not a cycle basis; the
    /// list can be longer than `cycle_count`.
    pub fn find_cycles(&self) -> Vec<Vec<MemberId>> {
        back_edge_cycles(&self.index_adjacency())
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|pos| self.members[pos].id).collect())
            .collect()
    }

    /// Number each member's connected component, in first-appearance order
    pub fn assign_components(&mut self) {
        let mut sets = DisjointSets::new(self.members.len());
        let edges: Vec<(usize, usize)> = self.index_edges().collect();
        for (source, target) in edges {
            sets.union(target, source);
        }

        let mut numbering: HashMap<usize, usize> = HashMap::new();
        for pos in 0..self.members.len() {
            let root = sets.find(pos);
            let next = numbering.len();
            let component = *numbering.entry(root).or_insert(next);
            self.members[pos].component_id = Some(component);
        }
    }

    // ------------------------------------------------------------------
    // Boundary and bridge scoring
    // ------------------------------------------------------------------

    /// Degree centrality and its complement, the boundary score
    pub fn compute_boundary_scores(&mut self) {
        if self.members.is_empty() {
            return;
        }

        let mut degree: HashMap<MemberId, usize> = HashMap::new();
        for r in &self.relationships {
            *degree.entry(r.source).or_insert(0) += 1;
            *degree.entry(r.target).or_insert(0) += 1;
        }

        let max_degree = degree.values().copied().max().unwrap_or(0);

        for member in &mut self.members {
            let d = degree.get(&member.id).copied().unwrap_or(0);
            member.centrality = if max_degree > 0 {
                d as f32 / max_degree as f32
            } else {
                0.0
            };
            member.boundary_score = 1.0 - member.centrality;
        }
    }

    /// Flag members in two or more subgroups whose neighbours together span
    /// two or more subgroups.
    ///
    /// This is a membership-diversity heuristic, not a cut-vertex test.
    pub fn compute_bridges(&mut self) -> Result<()> {
        let mut flags = Vec::with_capacity(self.members.len());

        for member in &self.members {
            if member.subgroups.len() < 2 {
                flags.push(false);
                continue;
            }

            let mut reached: BTreeSet<&str> = BTreeSet::new();
            for &neighbor in self.adjacency.get(&member.id).map(Vec::as_slice).unwrap_or(&[]) {
                reached.extend(self.member(neighbor)?.subgroups.iter().map(String::as_str));
            }
            flags.push(reached.len() >= 2);
        }

        for (member, flag) in self.members.iter_mut().zip(flags) {
            member.is_bridge = flag;
        }
        Ok(())
    }

    /// Members whose boundary score is at least `threshold`
    pub fn boundary_members(&self, threshold: f32) -> Vec<MemberId> {
        self.members
            .iter()
            .filter(|m| m.boundary_score >= threshold)
            .map(|m| m.id)
            .collect()
    }

    pub fn bridge_members(&self) -> Vec<MemberId> {
        self.members
            .iter()
            .filter(|m| m.is_bridge)
            .map(|m| m.id)
            .collect()
    }

    // ------------------------------------------------------------------
    // Derived graphs
    // ------------------------------------------------------------------

    /// Vertex-induced subgraph over one subgroup.
    ///
    /// Member ids are kept; relationships between two subgroup members are
    /// copied and renumbered. Unknown labels give an empty graph.
    pub fn induced_subgraph(&self, label: &str) -> CommunityGraph {
        let mut sub = CommunityGraph::new(label);

        for &id in self.subgroup_members(label) {
            if let Ok(member) = self.member(id) {
                sub.insert_member(member.clone());
            }
        }

        for relationship in &self.relationships {
            if sub.contains(relationship.source) && sub.contains(relationship.target) {
                let mut copy = relationship.clone();
                copy.id = sub.relationships.len() as u32;
                sub.insert_relationship(copy);
            }
        }

        sub
    }

    /// Undirected petgraph view: node weights are member ids, edge weights strengths
    pub fn to_petgraph(&self) -> UnGraph<MemberId, f32> {
        let mut graph = UnGraph::with_capacity(self.members.len(), self.relationships.len());
        let nodes: Vec<NodeIndex> = self.members.iter().map(|m| graph.add_node(m.id)).collect();
        for r in &self.relationships {
            let endpoints = (self.index.get(&r.source), self.index.get(&r.target));
            if let (Some(&source), Some(&target)) = endpoints {
                graph.add_edge(nodes[source], nodes[target], r.strength);
            }
        }
        graph
    }
}
