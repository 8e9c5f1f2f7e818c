use crate::camera::CameraState;
use crate::grid::{Cell, Grid};
use anyhow::Context;
use glam::DVec2;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

/// A grid loaded from a map file, plus where the camera starts.
#[derive(Clone, PartialEq, Debug)]
pub struct MapFile {
    pub grid: Grid,
    pub spawn: CameraState,
}

#[derive(Default)]
struct Parser {
    heading: Option<f64>,
    rows: Option<Vec<Vec<Cell>>>,
    spawn: Option<(usize, usize)>,
}

impl MapFile {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("loading map at {}", path.display());
        let file = read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&file).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a map from text.
    ///
    /// ```text
    /// !!!!META
    /// spawn,heading=1.57
    ///
    /// !!!!MAIN
    /// #####
    /// #.*.#
    /// #####
    /// ```
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut lines = text.lines();
        let mut parser = Parser::default();

        while let Some(line) = lines.by_ref().next() {
            match line {
                "" => continue,
                "!!!!META" => parser.parse_meta(&mut lines)?,
                "!!!!MAIN" => parser.parse_main(&mut lines)?,
                other => anyhow::bail!("unrecognized directive: {other}"),
            }
        }

        parser.finish()
    }
}

impl Parser {
    fn parse_meta<'lines>(
        &mut self,
        lines: impl Iterator<Item = &'lines str>,
    ) -> anyhow::Result<()> {
        for line in lines {
            if line.is_empty() {
                break;
            }

            let mut chunks = line.split(',');
            let directive = chunks.by_ref().next().unwrap_or_default();
            let params = chunks
                .map(|param| param.split_once('='))
                .collect::<Option<HashMap<_, _>>>()
                .context("incorrectly formatted meta")?;
            match directive {
                "spawn" => {
                    self.heading = params
                        .get("heading")
                        .map(|heading| heading.parse())
                        .transpose()
                        .context("spawn heading is not a number")?;
                }
                other => anyhow::bail!("unrecognized meta directive: {other}"),
            }
        }

        Ok(())
    }

    fn parse_main<'lines>(
        &mut self,
        lines: impl Iterator<Item = &'lines str>,
    ) -> anyhow::Result<()> {
        if self.rows.is_some() {
            anyhow::bail!("map has more than one main section");
        }

        let mut rows = vec![];
        for (y, line) in lines.enumerate() {
            if line.is_empty() {
                break;
            }

            let mut row = Vec::with_capacity(line.len());
            for (x, tile) in line.chars().enumerate() {
                row.push(match tile {
                    '#' | '1' => Cell::Solid,
                    '.' | ' ' | '0' => Cell::Empty,
                    '*' => {
                        if let Some((sx, sy)) = self.spawn.replace((x, y)) {
                            anyhow::bail!("second spawn at ({x}, {y}), first at ({sx}, {sy})");
                        }
                        Cell::Empty
                    }
                    other => anyhow::bail!("invalid tile in map: {other:?}"),
                });
            }
            rows.push(row);
        }

        self.rows = Some(rows);
        Ok(())
    }

    fn finish(self) -> anyhow::Result<MapFile> {
        let grid = Grid::new(self.rows.context("map has no main section")?)?;
        log::debug!("map is {}x{}", grid.width(), grid.height());

        let position = match self.spawn {
            Some((x, y)) => DVec2::new(x as f64 + 0.5, y as f64 + 0.5),
            None => DVec2::new(grid.width() as f64 / 2., grid.height() as f64 / 2.),
        };

        Ok(MapFile {
            grid,
            spawn: CameraState::new(position, self.heading.unwrap_or(0.)),
        })
    }
}
