//! Connectivity and cycle algorithms over index-based graphs

/// Union-Find over a flat parent array
///
/// `find` compresses paths iteratively, so arbitrarily long chains never
/// recurse. `union` is directional: the second argument's set is always
/// absorbed into the first's, which callers rely on to know which component
/// disappears in a merge.
#[derive(Debug, Clone)]
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<usize>,

    /// Member count of each set, valid at roots only
    size: Vec<usize>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Point every node on the path directly at the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the set containing `absorbed` into the set containing `keep`.
    ///
    /// Returns the root of the absorbed set, or None when both were already
    /// in the same set.
    pub fn union(&mut self, keep: usize, absorbed: usize) -> Option<usize> {
        let root_keep = self.find(keep);
        let root_absorbed = self.find(absorbed);

        if root_keep == root_absorbed {
            return None;
        }

        self.parent[root_absorbed] = root_keep;
        self.size[root_keep] += self.size[root_absorbed];
        Some(root_absorbed)
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }

    /// Elements whose root is `root`, in ascending order
    pub fn members_of(&mut self, root: usize) -> Vec<usize> {
        (0..self.parent.len())
            .filter(|&i| self.find(i) == root)
            .collect()
    }

    /// Number of distinct sets
    pub fn count_sets(&mut self) -> usize {
        (0..self.parent.len()).filter(|&i| self.find(i) == i).count()
    }
}

/// Count connected components of a graph with `vertex_count` vertices.
///
/// Edges referencing vertices outside `0..vertex_count` are ignored.
/// An empty vertex set has zero components.
pub fn count_components<I>(vertex_count: usize, edges: I) -> usize
where
    I: IntoIterator<Item = (usize, usize)>,
{
    if vertex_count == 0 {
        return 0;
    }

    let mut sets = DisjointSets::new(vertex_count);
    for (source, target) in edges {
        if source < vertex_count && target < vertex_count {
            sets.union(target, source);
        }
    }

    sets.count_sets()
}

/// First Betti number of a 1-dimensional complex: E - V + components
pub fn cycle_rank(edge_count: usize, vertex_count: usize, components: usize) -> usize {
    (edge_count + components).saturating_sub(vertex_count)
}

struct Frame {
    vertex: usize,
    parent: Option<usize>,
    next: usize,
}

/// Enumerate one cycle per DFS back edge.
///
/// Vertices are explored in index order and neighbours in adjacency order.
/// When a neighbour other than the DFS parent has already been visited at a
/// shallower depth, the cycle is read off by walking parent links from the
/// current vertex up to that ancestor. The result is a set of representative
/// cycles, not a cycle basis: cycles can share vertices and their count can
/// exceed the first Betti number.
pub fn back_edge_cycles(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adjacency.len();
    let mut cycles = Vec::new();
    let mut visited = vec![false; n];
    let mut parent_of: Vec<Option<usize>> = vec![None; n];
    let mut depth = vec![0usize; n];
    let mut stack: Vec<Frame> = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }

        visited[start] = true;
        stack.push(Frame {
            vertex: start,
            parent: None,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let v = frame.vertex;
            let Some(&u) = adjacency[v].get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            if frame.parent == Some(u) || u >= n {
                continue;
            }

            if visited[u] {
                if depth[u] < depth[v] {
                    let mut cycle = Vec::new();
                    let mut current = v;
                    while current != u {
                        cycle.push(current);
                        match parent_of[current] {
                            Some(p) => current = p,
                            None => break,
                        }
                    }
                    cycle.push(u);
                    cycles.push(cycle);
                }
            } else {
                visited[u] = true;
                parent_of[u] = Some(v);
                depth[u] = depth[v] + 1;
                stack.push(Frame {
                    vertex: u,
                    parent: Some(v),
                    next: 0,
                });
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); n];
        for &(a, b) in edges {
            adj[a].push(b);
            adj[b].push(a);
        }
        adj
    }

    #[test]
    fn union_absorbs_second_argument() {
        let mut sets = DisjointSets::new(4);
        assert_eq!(sets.union(0, 1), Some(1));
        assert_eq!(sets.find(1), 0);
        assert_eq!(sets.union(3, 0), Some(0));
        assert_eq!(sets.find(1), 3);
        assert_eq!(sets.size(1), 3);
        assert_eq!(sets.union(1, 3), None);
        assert_eq!(sets.members_of(3), vec![0, 1, 3]);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let n = 200_000;
        let mut sets = DisjointSets::new(n);
        for i in 1..n {
            sets.union(i, i - 1);
        }
        assert_eq!(sets.find(0), n - 1);
        assert_eq!(sets.count_sets(), 1);
    }

    #[test]
    fn components_of_empty_and_edgeless() {
        assert_eq!(count_components(0, Vec::new()), 0);
        assert_eq!(count_components(5, Vec::new()), 5);
        assert_eq!(count_components(5, vec![(0, 1), (3, 4)]), 3);
    }

    #[test]
    fn out_of_range_edges_are_ignored() {
        assert_eq!(count_components(2, vec![(0, 7)]), 2);
    }

    #[test]
    fn triangle_has_one_cycle() {
        let adj = adjacency(3, &[(0, 1), (0, 2), (1, 2)]);
        let cycles = back_edge_cycles(&adj);
        assert_eq!(cycles.len(), 1);
        let mut cycle = cycles[0].clone();
        cycle.sort();
        assert_eq!(cycle, vec![0, 1, 2]);
    }

    #[test]
    fn tree_has_no_cycles() {
        let adj = adjacency(5, &[(0, 1), (1, 2), (1, 3), (3, 4)]);
        assert!(back_edge_cycles(&adj).is_empty());
    }

    #[test]
    fn cycle_walks_from_deeper_endpoint() {
        // Square 0-1-2-3-0: DFS goes 0,1,2,3 then 3 sees 0
        let adj = adjacency(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let cycles = back_edge_cycles(&adj);
        assert_eq!(cycles, vec![vec![3, 2, 1, 0]]);
    }

    #[test]
    fn cycle_rank_identity() {
        assert_eq!(cycle_rank(3, 3, 1), 1);
        assert_eq!(cycle_rank(0, 4, 4), 0);
        assert_eq!(cycle_rank(0, 0, 0), 0);
    }
}
