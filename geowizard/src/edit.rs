//! Undoable editing of a geometry.

use std::collections::VecDeque;
use std::sync::Arc;

use geowizard_types::{validate, Coordinate, CoordinateConverter};

use crate::config::Settings;
use crate::error::EditError;
use crate::geometry::{Geometry, Vertex};

/// Single change of a geometry. Replaying the inverse of an applied operation restores the
/// previous snapshot exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
enum EditOperation {
    Move { index: usize, vertex: Vertex },
    Insert { index: usize, vertex: Vertex },
    Remove { index: usize },
}

impl EditOperation {
    /// Applies the operation, returning the new snapshot and the operation that reverts it.
    fn apply(&self, geometry: &Geometry) -> Result<(Geometry, EditOperation), EditError> {
        let (updated, inverse) = match *self {
            Self::Move { index, vertex } => {
                let previous = *geometry.vertex(index).ok_or(EditError::IndexOutOfBounds {
                    index,
                    len: geometry.len(),
                })?;
                (
                    geometry.with_vertex_moved(index, vertex)?,
                    Self::Move {
                        index,
                        vertex: previous,
                    },
                )
            }
            Self::Insert { index, vertex } => (
                geometry.with_vertex_inserted(index, vertex)?,
                Self::Remove { index },
            ),
            Self::Remove { index } => {
                let previous = *geometry.vertex(index).ok_or(EditError::IndexOutOfBounds {
                    index,
                    len: geometry.len(),
                })?;
                (
                    geometry.with_vertex_removed(index)?,
                    Self::Insert {
                        index,
                        vertex: previous,
                    },
                )
            }
        };

        Ok((updated, inverse))
    }
}

/// Editing session over a geometry.
///
/// Each successful edit replaces the current snapshot with a new one and records the inverse
/// operation for [`EditSession::undo`]. A failed edit leaves the snapshot and the history
/// untouched.
///
/// ```
/// use geowizard::{Coordinate, EditSession, Geometry, GeometryKind};
///
/// let line = Geometry::new(
///     GeometryKind::Polyline,
///     &[Coordinate::latlon(0.0, 0.0), Coordinate::latlon(1.0, 1.0)],
/// ).unwrap();
///
/// let mut session = EditSession::new(line);
/// session.add_vertex(2, &Coordinate::latlon(2.0, 2.0)).unwrap();
/// assert_eq!(session.snapshot().len(), 3);
///
/// assert!(session.undo().unwrap());
/// assert_eq!(session.snapshot().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EditSession {
    geometry: Arc<Geometry>,
    converter: CoordinateConverter,
    undo_stack: VecDeque<EditOperation>,
    redo_stack: Vec<EditOperation>,
    max_undo_depth: usize,
}

impl EditSession {
    /// Creates a session with default settings.
    pub fn new(geometry: impl Into<Arc<Geometry>>) -> Self {
        Self::with_settings(geometry, &Settings::default())
    }

    /// Creates a session keeping at most `settings.max_undo_depth` undoable operations.
    pub fn with_settings(geometry: impl Into<Arc<Geometry>>, settings: &Settings) -> Self {
        Self {
            geometry: geometry.into(),
            converter: CoordinateConverter::default(),
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo_depth: settings.max_undo_depth,
        }
    }

    /// Current snapshot of the geometry.
    pub fn snapshot(&self) -> Arc<Geometry> {
        self.geometry.clone()
    }

    /// Moves the vertex at `index` to `coord`.
    pub fn move_vertex(&mut self, index: usize, coord: &Coordinate) -> Result<(), EditError> {
        let vertex = self.vertex(coord)?;
        self.execute(EditOperation::Move { index, vertex })
    }

    /// Inserts a vertex before `index`. `index` equal to the number of vertices appends.
    pub fn add_vertex(&mut self, index: usize, coord: &Coordinate) -> Result<(), EditError> {
        let vertex = self.vertex(coord)?;
        self.execute(EditOperation::Insert { index, vertex })
    }

    /// Removes the vertex at `index`.
    pub fn remove_vertex(&mut self, index: usize) -> Result<(), EditError> {
        self.execute(EditOperation::Remove { index })
    }

    /// Reverts the last applied operation. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EditError> {
        let Some(operation) = self.undo_stack.pop_back() else {
            return Ok(false);
        };

        match operation.apply(&self.geometry) {
            Ok((geometry, inverse)) => {
                log::debug!("Undo {operation:?}");
                self.geometry = Arc::new(geometry);
                self.redo_stack.push(inverse);
                Ok(true)
            }
            Err(err) => {
                self.undo_stack.push_back(operation);
                Err(err)
            }
        }
    }

    /// Re-applies the last undone operation. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool, EditError> {
        let Some(operation) = self.redo_stack.pop() else {
            return Ok(false);
        };

        match operation.apply(&self.geometry) {
            Ok((geometry, inverse)) => {
                log::debug!("Redo {operation:?}");
                self.geometry = Arc::new(geometry);
                self.push_undo(inverse);
                Ok(true)
            }
            Err(err) => {
                self.redo_stack.push(operation);
                Err(err)
            }
        }
    }

    /// Whether there is an operation to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is an operation to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of operations that can be undone.
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    fn vertex(&self, coord: &Coordinate) -> Result<Vertex, EditError> {
        validate(coord).into_result().inspect_err(|err| {
            log::warn!("Rejected vertex {coord}: {err}");
        })?;
        Ok(Vertex::from_coordinate(coord, &self.converter)?)
    }

    fn execute(&mut self, operation: EditOperation) -> Result<(), EditError> {
        let (geometry, inverse) = operation.apply(&self.geometry)?;
        log::debug!("Applied {operation:?}");

        self.geometry = Arc::new(geometry);
        self.redo_stack.clear();
        self.push_undo(inverse);
        Ok(())
    }

    fn push_undo(&mut self, operation: EditOperation) {
        if self.max_undo_depth == 0 {
            return;
        }

        while self.undo_stack.len() >= self.max_undo_depth {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(operation);
    }
}
