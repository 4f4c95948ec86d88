use crate::error::GraphError;
use crate::matrix::AdjacencyMatrix;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Write};

/// Identifier of a node, equal to its row/column in the connectivity matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vertex with its outgoing neighbors and the position assigned by the sort
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    neighbors: Vec<NodeId>,
    position: Option<usize>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            neighbors: vec![],
            position: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Outgoing neighbors in matrix column order
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Overwrites the position tag. The sort is the only writer.
    pub fn set_position(&mut self, position: usize) {
        self.position = Some(position);
    }

    /// `None` until the sort has ordered this node
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

/// Directed graph stored as an arena of nodes.
///
/// Neighbors are indices into the arena, so every neighbor is a member of the
/// same graph for as long as the graph exists.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn from_matrix(matrix: &AdjacencyMatrix) -> Self {
        let n = matrix.size();
        let mut nodes: Vec<Node> = (0..n).map(|i| Node::new(NodeId(i))).collect();

        for (i, node) in nodes.iter_mut().enumerate() {
            for j in 0..n {
                if matrix.has_edge(i, j) {
                    node.neighbors.push(NodeId(j));
                }
            }
        }

        Graph { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.neighbors.len()).sum()
    }

    /// All `(from, to)` pairs, row by row in neighbor-list order
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .iter()
            .flat_map(|node| node.neighbors.iter().map(move |&to| (node.id, to)))
    }

    /// Number of incoming edges per node, indexed by node id
    pub fn indegrees(&self) -> Vec<usize> {
        let mut indegree = vec![0; self.nodes.len()];

        for node in &self.nodes {
            for neighbor in &node.neighbors {
                indegree[neighbor.index()] += 1;
            }
        }

        indegree
    }

    /// Writes one `Node <id> connects to: ...` line per node
    pub fn write_structure<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for node in &self.nodes {
            write!(out, "Node {} connects to:", node.id())?;
            for neighbor in node.neighbors() {
                write!(out, " {}", neighbor)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Kahn's algorithm.
    ///
    /// Zero-indegree nodes are seeded in ascending id order and the queue is
    /// FIFO, so ties always resolve towards the smaller id that became ready
    /// first. Every ordered node gets its position tag set. If some nodes never
    /// reach indegree zero the graph has a cycle and they are reported instead
    /// of an order.
    pub fn topological_sort(&mut self) -> Result<TopologicalOrder, GraphError> {
        for node in &mut self.nodes {
            node.position = None;
        }

        let mut indegree = self.indegrees();
        let mut queue: VecDeque<NodeId> = self
            .nodes
            .iter()
            .filter(|node| indegree[node.id.index()] == 0)
            .map(|node| node.id)
            .collect();

        let mut counter = 0;
        while let Some(v) = queue.pop_front() {
            let node = &mut self.nodes[v.index()];
            node.set_position(counter);
            counter += 1;

            for &neighbor in &node.neighbors {
                indegree[neighbor.index()] -= 1;
                if indegree[neighbor.index()] == 0 {
                    queue.push_back(neighbor);
                }
            }
        }

        if counter < self.nodes.len() {
            let unordered = self
                .nodes
                .iter()
                .filter(|node| node.position.is_none())
                .map(|node| node.id)
                .collect();
            return Err(GraphError::cycle(unordered));
        }

        let mut sorted: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        for node in &self.nodes {
            if let Some(position) = node.position {
                sorted[position] = Some(node.id);
            }
        }

        Ok(TopologicalOrder {
            nodes: sorted.into_iter().flatten().collect(),
        })
    }

    /// Enumerates distinct topological orders, at most `limit` of them.
    ///
    /// Orders come out lexicographically by node id. A cyclic graph has none.
    pub fn all_topological_orders(&self, limit: usize) -> Vec<Vec<NodeId>> {
        let n = self.nodes.len();
        let mut indegree = self.indegrees();
        let mut discovered = vec![false; n];
        let mut path = Vec::with_capacity(n);
        let mut all_paths = vec![];

        if limit > 0 {
            self.find_orders(
                &mut indegree,
                &mut path,
                &mut discovered,
                &mut all_paths,
                limit,
            );
        }

        all_paths
    }

    fn find_orders(
        &self,
        indegree: &mut [usize],
        path: &mut Vec<NodeId>,
        discovered: &mut [bool],
        all_paths: &mut Vec<Vec<NodeId>>,
        limit: usize,
    ) {
        if path.len() == self.nodes.len() {
            all_paths.push(path.clone());
            return;
        }

        for v in 0..self.nodes.len() {
            if all_paths.len() >= limit {
                return;
            }
            if indegree[v] != 0 || discovered[v] {
                continue;
            }

            for u in &self.nodes[v].neighbors {
                indegree[u.index()] -= 1;
            }
            path.push(NodeId(v));
            discovered[v] = true;

            self.find_orders(indegree, path, discovered, all_paths, limit);

            for u in &self.nodes[v].neighbors {
                indegree[u.index()] += 1;
            }
            path.pop();
            discovered[v] = false;
        }
    }
}

/// Nodes indexed by their assigned position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologicalOrder {
    nodes: Vec<NodeId>,
}

impl TopologicalOrder {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == id)
    }

    /// `(position, node)` pairs in ascending position
    pub fn iter(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.nodes.iter().copied().enumerate()
    }
}
