use std::{cmp::Ordering, collections::BinaryHeap, sync::Arc};

pub type VertexId = usize;
pub type EdgeId = usize;

/// A directed edge carrying the metadata needed to decode itineraries: the
/// route or stop name it belongs to and the number of stop-to-stop legs it
/// spans (0 marks a wait edge).
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    /// Travel time in minutes.
    pub weight: f64,
    pub name: Arc<str>,
    pub span_count: u32,
}

#[derive(Debug, Default)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    /// adjacency[v] = ids of the edges leaving v.
    adjacency: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        let id = self.edges.len();
        self.adjacency[edge.from].push(id);
        self.edges.push(edge);
        id
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Single-source shortest path from `from` to `to` via Dijkstra over a
    /// binary min-heap. Returns the total weight and the edge ids in
    /// traversal order, or `None` when `to` is unreachable.
    pub fn shortest_path(&self, from: VertexId, to: VertexId) -> Option<(f64, Vec<EdgeId>)> {
        if from == to {
            return Some((0.0, Vec::new()));
        }

        let mut dist = vec![f64::INFINITY; self.vertex_count()];
        let mut prev_edge: Vec<Option<EdgeId>> = vec![None; self.vertex_count()];
        dist[from] = 0.0;

        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry {
            cost: 0.0,
            vertex: from,
        });

        while let Some(HeapEntry { cost, vertex }) = heap.pop() {
            if vertex == to {
                return Some((cost, self.reconstruct(&prev_edge, to)));
            }
            // Skip stale heap entries.
            if cost > dist[vertex] {
                continue;
            }
            for &edge_id in &self.adjacency[vertex] {
                let edge = &self.edges[edge_id];
                let next_cost = cost + edge.weight;
                if next_cost < dist[edge.to] {
                    dist[edge.to] = next_cost;
                    prev_edge[edge.to] = Some(edge_id);
                    heap.push(HeapEntry {
                        cost: next_cost,
                        vertex: edge.to,
                    });
                }
            }
        }
        None
    }

    fn reconstruct(&self, prev_edge: &[Option<EdgeId>], to: VertexId) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        let mut current = to;
        while let Some(edge_id) = prev_edge[current] {
            edges.push(edge_id);
            current = self.edges[edge_id].from;
        }
        edges.reverse();
        edges
    }
}

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the cheapest
/// vertex first; the vertex id breaks cost ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    cost: f64,
    vertex: VertexId,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
