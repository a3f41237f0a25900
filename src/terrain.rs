use serde::{Deserialize, Serialize};

use crate::sentence::{SentenceSignals, MAX_TERRAIN_HEIGHT};
use crate::tokenize::split_sentences;

#[derive(Debug, Clone, PartialEq)]
pub struct TerrainCell {
    pub text: String,
    pub diversity: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub text: String,
    pub diversity: f64,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainBand {
    VeryFlat,
    Flat,
    Neutral,
    Diverse,
    VeryDiverse,
}

impl TerrainBand {
    pub fn for_height(y: f64) -> Self {
        let normalized = (y / MAX_TERRAIN_HEIGHT).min(1.0);
        if normalized > 0.7 {
            Self::VeryDiverse
        } else if normalized > 0.5 {
            Self::Diverse
        } else if normalized > 0.35 {
            Self::Neutral
        } else if normalized > 0.2 {
            Self::Flat
        } else {
            Self::VeryFlat
        }
    }

    pub fn hex(self) -> u32 {
        match self {
            Self::VeryFlat => 0xff3b30,
            Self::Flat => 0xff9500,
            Self::Neutral => 0xffcc00,
            Self::Diverse => 0x34c759,
            Self::VeryDiverse => 0x007aff,
        }
    }

    /// Colour as linear `[r, g, b]` in `0.0..=1.0`.
    pub fn rgb(self) -> [f32; 3] {
        let hex = self.hex();
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ]
    }
}

pub fn grid_side(count: usize) -> usize {
    (count as f64).sqrt().ceil() as usize
}

pub fn grid_position(index: usize, count: usize) -> (f64, f64) {
    let side = grid_side(count);
    if side == 0 {
        return (0.0, 0.0);
    }
    let half = side as f64 / 2.0;
    ((index % side) as f64 - half, (index / side) as f64 - half)
}

/// Place caller-supplied cells on the grid, preserving order.
pub fn layout(cells: Vec<TerrainCell>) -> Vec<TerrainPoint> {
    let count = cells.len();
    cells
        .into_iter()
        .enumerate()
        .map(|(index, cell)| {
            let (x, z) = grid_position(index, count);
            TerrainPoint {
                x,
                y: cell.height,
                z,
                text: cell.text,
                diversity: cell.diversity,
                index,
            }
        })
        .collect()
}

pub fn from_text(text: &str) -> Vec<TerrainPoint> {
    let cells = split_sentences(text)
        .into_iter()
        .map(|sentence| {
            let signals = SentenceSignals::measure(&sentence);
            TerrainCell {
                diversity: signals.local_diversity,
                height: signals.height(),
                text: sentence,
            }
        })
        .collect();
    layout(cells)
}

// ---------------------------------------------------------------------------
// Mesh
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainMesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn from_points(points: &[TerrainPoint]) -> Self {
        let positions = points
            .iter()
            .map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect();
        let colors = points
            .iter()
            .map(|p| TerrainBand::for_height(p.y).rgb())
            .collect();
        Self {
            positions,
            colors,
            indices: triangle_indices(points.len()),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Two triangles per grid cell, dropping any that reference a missing vertex.
pub fn triangle_indices(count: usize) -> Vec<u32> {
    let side = grid_side(count);
    let mut indices = Vec::new();
    for i in 0..side.saturating_sub(1) {
        for j in 0..side - 1 {
            let a = i * side + j;
            let b = a + 1;
            let c = a + side;
            let d = c + 1;
            if c < count {
                indices.extend([a as u32, b as u32, c as u32]);
            }
            if d < count {
                indices.extend([b as u32, d as u32, c as u32]);
            }
        }
    }
    indices
}
