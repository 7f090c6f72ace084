use anyhow::Result;

use geom::Pt2D;
use map_model::{Graph, Segment};

/// Lays out `size` by `size` points and connects every horizontal and vertical neighbor.
pub fn run(size: usize, spacing: f64, output: String) -> Result<()> {
    if size < 2 {
        bail!("A grid needs at least 2 points per side, not {}", size);
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        bail!("Grid spacing must be positive, not {}", spacing);
    }

    let graph = grid(size, spacing);
    info!(
        "Grid has {} points and {} segments",
        graph.num_points(),
        graph.segments().len()
    );
    abstutil::write_json(&output, &graph.to_snapshot())?;
    println!("Wrote {}", output);
    Ok(())
}

fn grid(size: usize, spacing: f64) -> Graph {
    let mut graph = Graph::new();
    let mut ids = Vec::new();
    for row in 0..size {
        for col in 0..size {
            ids.push(graph.add_point(Pt2D::new(
                col as f64 * spacing,
                row as f64 * spacing,
            )));
        }
    }
    for row in 0..size {
        for col in 0..size {
            let here = ids[row * size + col];
            if col + 1 < size {
                graph.add_segment(Segment::new(here, ids[row * size + col + 1]));
            }
            if row + 1 < size {
                graph.add_segment(Segment::new(here, ids[(row + 1) * size + col]));
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts() {
        let graph = grid(3, 100.0);
        assert_eq!(graph.num_points(), 9);
        // 2 rows of 3 vertical segments, 3 rows of 2 horizontal ones
        assert_eq!(graph.segments().len(), 12);
        assert!(graph.contains_point(Pt2D::new(200.0, 200.0)));
    }
}
