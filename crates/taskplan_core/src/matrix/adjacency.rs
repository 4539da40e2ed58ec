//! Adjacency matrix builder.
//!
//! Cell `[i][j]` is `1` iff task `j` is a successor of task `i`. Successors
//! that are not part of the input list (for example tasks of another
//! project) contribute nothing.

use crate::model::task::{Task, TaskId};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Square 0/1 matrix over a fixed task ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    cells: Vec<Vec<u8>>,
}

impl AdjacencyMatrix {
    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cell at `row`, `column`, or `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        self.cells.get(row).and_then(|cells| cells.get(column)).copied()
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    /// Number of `1` cells.
    pub fn edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| **cell == 1).count())
            .sum()
    }

    pub fn into_rows(self) -> Vec<Vec<u8>> {
        self.cells
    }
}

impl Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line = row
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Builds the adjacency matrix of `tasks`.
///
/// Positions are looked up through an id -> index map, so the cost is
/// O(n + e). When one node appears twice in `tasks`, its first position is
/// used for every edge pointing at it.
pub fn build_adjacency_matrix(tasks: &[Task]) -> AdjacencyMatrix {
    let size = tasks.len();
    let mut positions: HashMap<TaskId, usize> = HashMap::with_capacity(size);
    for (index, task) in tasks.iter().enumerate() {
        positions.entry(task.id()).or_insert(index);
    }

    let mut cells = vec![vec![0_u8; size]; size];
    for (row, task) in tasks.iter().enumerate() {
        for successor in task.successors() {
            if let Some(&column) = positions.get(&successor.id()) {
                cells[row][column] = 1;
            }
        }
    }

    AdjacencyMatrix { cells }
}

#[cfg(test)]
mod tests {
    use super::build_adjacency_matrix;
    use crate::model::task::Task;

    #[test]
    fn empty_input_gives_empty_matrix() {
        let matrix = build_adjacency_matrix(&[]);
        assert_eq!(matrix.size(), 0);
        assert_eq!(matrix.edge_count(), 0);
    }

    #[test]
    fn repeated_node_uses_first_position() {
        let a = Task::new("a", 1).unwrap();
        let b = Task::new("b", 1).unwrap();
        b.add_successor(&a);

        let matrix = build_adjacency_matrix(&[a.clone(), b, a]);
        assert_eq!(
            matrix.into_rows(),
            vec![vec![0, 0, 0], vec![1, 0, 0], vec![0, 0, 0]]
        );
    }

    #[test]
    fn display_renders_one_line_per_row() {
        let a = Task::new("a", 1).unwrap();
        let b = Task::new("b", 1).unwrap();
        a.add_successor(&b);

        let rendered = build_adjacency_matrix(&[a, b]).to_string();
        assert_eq!(rendered, "0 1\n0 0\n");
    }
}
