//! Snapshots of the stepped field and the renderers that consume them
//!
//! The simulation never lends its live buffer. A [`Snapshot`] is an owned copy
//! taken between steps, so a renderer only ever sees completed steps with
//! values index-matched to the grid coordinates.

use crate::error::RenderError;
use crate::physics::grid::Grid;
use crate::physics::math::Scalar;
use std::io::Write;

/// The field after a completed step
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    step: usize,
    time: Scalar,
    values: Vec<Scalar>,
}

impl Snapshot {
    pub fn new(step: usize, time: Scalar, values: Vec<Scalar>) -> Self {
        Self { step, time, values }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn time(&self) -> Scalar {
        self.time
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }
}

/// Consumer of snapshots, e.g. a plot or an animation frame writer
pub trait Renderer {
    fn render(&mut self, grid: &Grid, snapshot: &Snapshot) -> Result<(), RenderError>;

    /// Called once after the last snapshot of a run
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

fn check_len(grid: &Grid, snapshot: &Snapshot) -> Result<(), RenderError> {
    if snapshot.values().len() != grid.len() {
        return Err(RenderError::Mismatch {
            expected: grid.len(),
            actual: snapshot.values().len(),
        });
    }
    Ok(())
}

/// Keeps every snapshot it is given
#[derive(Debug, Default, Clone)]
pub struct SnapshotRecorder {
    frames: Vec<Snapshot>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Snapshot] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    pub fn into_frames(self) -> Vec<Snapshot> {
        self.frames
    }
}

impl Renderer for SnapshotRecorder {
    fn render(&mut self, grid: &Grid, snapshot: &Snapshot) -> Result<(), RenderError> {
        check_len(grid, snapshot)?;
        self.frames.push(snapshot.clone());
        Ok(())
    }
}

/// Character plot of each snapshot written to any `io::Write`
///
/// Columns sample the grid evenly; rows span the snapshot's own value range.
pub struct TextPlot<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> TextPlot<W> {
    pub const DEFAULT_WIDTH: usize = 72;
    pub const DEFAULT_HEIGHT: usize = 15;

    pub fn new(out: W) -> Self {
        Self::with_size(out, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }

    pub fn with_size(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            width: width.max(1),
            height: height.max(2),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn row_of(&self, value: Scalar, min: Scalar, max: Scalar) -> usize {
        if max <= min {
            return self.height / 2;
        }
        let fraction = (max - value) / (max - min);
        ((fraction * (self.height - 1) as Scalar).round() as usize).min(self.height - 1)
    }
}

impl<W: Write> Renderer for TextPlot<W> {
    fn render(&mut self, grid: &Grid, snapshot: &Snapshot) -> Result<(), RenderError> {
        check_len(grid, snapshot)?;

        let values = snapshot.values();
        let columns = self.width.min(values.len());
        let (min, max) = values
            .iter()
            .fold((Scalar::INFINITY, Scalar::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let mut canvas = vec![vec![' '; columns]; self.height];
        for column in 0..columns {
            let index = column * values.len() / columns;
            let row = self.row_of(values[index], min, max);
            canvas[row][column] = '*';
        }

        writeln!(
            self.out,
            "step {} t = {:.6}  range [{:.4}, {:.4}]  L = {}",
            snapshot.step(),
            snapshot.time(),
            min,
            max,
            grid.length()
        )?;
        for row in canvas {
            let line: String = row.into_iter().collect();
            writeln!(self.out, "|{}", line.trim_end())?;
        }
        writeln!(self.out, "+{}", "-".repeat(columns))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_copies() {
        let grid = Grid::new(1.0, 5).unwrap();
        let mut recorder = SnapshotRecorder::new();
        let mut values = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        recorder
            .render(&grid, &Snapshot::new(0, 0.0, values.clone()))
            .unwrap();
        values[0] = 99.0;
        recorder
            .render(&grid, &Snapshot::new(1, 0.1, values))
            .unwrap();

        assert_eq!(recorder.frames().len(), 2);
        assert_eq!(recorder.frames()[0].values()[0], 0.0);
        assert_eq!(recorder.last().unwrap().step(), 1);
    }

    #[test]
    fn test_recorder_rejects_wrong_length() {
        let grid = Grid::new(1.0, 5).unwrap();
        let mut recorder = SnapshotRecorder::new();
        let result = recorder.render(&grid, &Snapshot::new(0, 0.0, vec![0.0; 4]));
        assert!(matches!(
            result,
            Err(RenderError::Mismatch {
                expected: 5,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_text_plot_layout() {
        let grid = Grid::new(1.0, 6).unwrap();
        let mut plot = TextPlot::with_size(Vec::new(), 6, 3);
        plot.render(
            &grid,
            &Snapshot::new(3, 0.25, vec![1.0, 0.0, -1.0, 0.0, 1.0, 0.0]),
        )
        .unwrap();
        plot.finish().unwrap();

        let text = String::from_utf8(plot.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("step 3 t = 0.250000"));
        assert_eq!(lines[1], "|*   *");
        assert_eq!(lines[2], "| * * *");
        assert_eq!(lines[3], "|  *");
        assert_eq!(lines[4], "+------");
    }

    #[test]
    fn test_text_plot_flat_field() {
        let grid = Grid::new(1.0, 5).unwrap();
        let mut plot = TextPlot::with_size(Vec::new(), 5, 3);
        plot.render(&grid, &Snapshot::new(0, 0.0, vec![2.0; 5]))
            .unwrap();
        let text = String::from_utf8(plot.into_inner()).unwrap();
        assert_eq!(text.lines().nth(2), Some("|*****"));
    }
}
