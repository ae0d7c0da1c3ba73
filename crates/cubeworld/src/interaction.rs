//! # Block Interaction
//!
//! Break and place blocks at whatever the camera ray hit. Ray casting
//! belongs to the host; this module only consumes its answer.
//!
//! ```text
//! host raycast ──► TargetResolver ──► BlockInteraction ──► VoxelGrid
//!                                         │
//!                                         └──► highlighted block
//! ```

use cubeworld_core::{GridCoord, VoxelGrid};

/// What the camera ray hit: a block and the face normal it entered through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockTarget {
    /// The block that was hit.
    pub block: GridCoord,
    /// Unit normal of the hit face, in grid steps.
    pub normal: [i32; 3],
}

impl BlockTarget {
    /// The empty cell in front of the hit face.
    #[must_use]
    pub const fn adjacent(&self) -> GridCoord {
        self.block.offset(self.normal)
    }
}

/// Source of the current ray hit.
pub trait TargetResolver {
    /// The block under the crosshair, if any.
    fn resolve_target(&self) -> Option<BlockTarget>;
}

impl TargetResolver for Option<BlockTarget> {
    fn resolve_target(&self) -> Option<BlockTarget> {
        *self
    }
}

impl TargetResolver for BlockTarget {
    fn resolve_target(&self) -> Option<BlockTarget> {
        Some(*self)
    }
}

/// Mouse actions on a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockAction {
    /// Remove the target block (primary button).
    Break,
    /// Add a block against the hit face (secondary button).
    Place,
}

/// Applies block actions and tracks the highlighted block.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockInteraction {
    highlighted: Option<GridCoord>,
}

impl BlockInteraction {
    /// Creates an interaction with nothing highlighted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` to the resolved target.
    ///
    /// Nothing happens unless input is captured and the resolver has a
    /// target. Returns the cell that changed. Placing into an occupied cell
    /// or breaking an already-missing block changes nothing.
    pub fn apply<R: TargetResolver + ?Sized>(
        &self,
        grid: &mut VoxelGrid,
        action: BlockAction,
        captured: bool,
        resolver: &R,
    ) -> Option<GridCoord> {
        if !captured {
            return None;
        }
        let target = resolver.resolve_target()?;

        let (coord, changed) = match action {
            BlockAction::Break => (target.block, grid.erase(target.block)),
            BlockAction::Place => {
                let cell = target.adjacent();
                (cell, grid.insert(cell))
            }
        };

        if changed {
            tracing::debug!("{:?} at {:?}", action, coord);
            Some(coord)
        } else {
            None
        }
    }

    /// Refreshes the highlight from the resolver and returns it.
    pub fn highlight<R: TargetResolver + ?Sized>(&mut self, resolver: &R) -> Option<GridCoord> {
        self.highlighted = resolver.resolve_target().map(|t| t.block);
        self.highlighted
    }

    /// Block outlined this frame.
    #[must_use]
    pub fn highlighted(&self) -> Option<GridCoord> {
        self.highlighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> BlockTarget {
        BlockTarget {
            block: GridCoord::new(2, 0, 3),
            normal: [0, 1, 0],
        }
    }

    #[test]
    fn test_break_removes_target() {
        let mut grid = VoxelGrid::new();
        grid.insert(GridCoord::new(2, 0, 3));

        let changed = BlockInteraction::new().apply(&mut grid, BlockAction::Break, true, &target());
        assert_eq!(changed, Some(GridCoord::new(2, 0, 3)));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_place_adds_against_face() {
        let mut grid = VoxelGrid::new();
        grid.insert(GridCoord::new(2, 0, 3));

        let changed = BlockInteraction::new().apply(&mut grid, BlockAction::Place, true, &target());
        assert_eq!(changed, Some(GridCoord::new(2, 1, 3)));
        assert!(grid.contains(GridCoord::new(2, 1, 3)));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_ignored_without_capture_or_target() {
        let mut grid = VoxelGrid::new();
        grid.insert(GridCoord::new(2, 0, 3));
        let interaction = BlockInteraction::new();

        assert_eq!(interaction.apply(&mut grid, BlockAction::Break, false, &target()), None);
        let nothing: Option<BlockTarget> = None;
        assert_eq!(interaction.apply(&mut grid, BlockAction::Place, true, &nothing), None);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_place_into_occupied_cell_changes_nothing() {
        let mut grid = VoxelGrid::new();
        grid.insert(GridCoord::new(2, 0, 3));
        grid.insert(GridCoord::new(2, 1, 3));

        let changed = BlockInteraction::new().apply(&mut grid, BlockAction::Place, true, &target());
        assert_eq!(changed, None);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_place_at_world_edge_does_not_overflow() {
        let edge = GridCoord::new(i32::MAX, 0, 0);
        let mut grid = VoxelGrid::new();
        grid.insert(edge);
        let target = BlockTarget {
            block: edge,
            normal: [1, 0, 0],
        };

        // The neighbor saturates back onto the occupied edge cell.
        assert_eq!(target.adjacent(), edge);
        let changed = BlockInteraction::new().apply(&mut grid, BlockAction::Place, true, &target);
        assert_eq!(changed, None);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_highlight_follows_resolver() {
        let mut interaction = BlockInteraction::new();
        assert_eq!(interaction.highlight(&Some(target())), Some(GridCoord::new(2, 0, 3)));
        assert_eq!(interaction.highlighted(), Some(GridCoord::new(2, 0, 3)));

        assert_eq!(interaction.highlight(&None::<BlockTarget>), None);
        assert_eq!(interaction.highlighted(), None);
    }
}
