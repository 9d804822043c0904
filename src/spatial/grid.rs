//! Generic tile grid

use crate::core::types::TilePos;

/// Generic 2D grid addressed by integer tiles
#[derive(Debug, Clone)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    #[inline]
    pub fn in_bounds(&self, tile: TilePos) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as usize) < self.width && (tile.y as usize) < self.height
    }

    #[inline]
    pub fn get(&self, tile: TilePos) -> Option<&T> {
        if self.in_bounds(tile) {
            Some(&self.data[tile.y as usize * self.width + tile.x as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, tile: TilePos) -> Option<&mut T> {
        if self.in_bounds(tile) {
            Some(&mut self.data[tile.y as usize * self.width + tile.x as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, tile: TilePos, value: T) {
        if let Some(cell) = self.get_mut(tile) {
            *cell = value;
        }
    }

    /// Inclusive bounds of the window around `center`, clipped to the grid
    pub fn area(&self, center: TilePos, radius_x: i32, radius_y: i32) -> (TilePos, TilePos) {
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        (
            TilePos::new((center.x - radius_x).clamp(0, max_x.max(0)), (center.y - radius_y).clamp(0, max_y.max(0))),
            TilePos::new((center.x + radius_x).clamp(0, max_x.max(0)), (center.y + radius_y).clamp(0, max_y.max(0))),
        )
    }
}
