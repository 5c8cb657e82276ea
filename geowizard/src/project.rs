//! Collection of features sharing a display frame.

use std::collections::BTreeMap;
use std::sync::Arc;

use geowizard_types::{BoundingBox, ConversionError, Coordinate, CoordinateFrame};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{MeasureError, ProjectError};
use crate::geometry::Geometry;
use crate::measure::{Measurement, MeasurementEngine, MeasurementPolicy};

/// Geometry identified within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    id: u32,
    geometry: Arc<Geometry>,
}

impl Feature {
    /// Identifier of the feature. Always positive.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Current snapshot of the geometry.
    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }
}

/// Set of features displayed in a single active frame.
#[derive(Debug, Clone)]
pub struct Project {
    display_frame: CoordinateFrame,
    features: BTreeMap<u32, Feature>,
    engine: MeasurementEngine,
}

impl Default for Project {
    fn default() -> Self {
        Self::with_settings(&Settings::default())
    }
}

impl Project {
    /// Creates an empty project.
    pub fn new(display_frame: CoordinateFrame) -> Self {
        Self {
            display_frame,
            features: BTreeMap::new(),
            engine: MeasurementEngine::default(),
        }
    }

    /// Creates an empty project with the display frame of the settings.
    pub fn with_settings(settings: &Settings) -> Self {
        Self::new(settings.display_frame)
    }

    /// Active display frame.
    pub fn display_frame(&self) -> CoordinateFrame {
        self.display_frame
    }

    /// Changes the active display frame. Stored geometries are not touched.
    pub fn set_display_frame(&mut self, frame: CoordinateFrame) {
        log::info!("Display frame changed to {frame}");
        self.display_frame = frame;
    }

    /// Adds a feature. Ids must be positive and unique.
    pub fn add_feature(
        &mut self,
        id: u32,
        geometry: impl Into<Arc<Geometry>>,
    ) -> Result<(), ProjectError> {
        if id == 0 {
            return Err(ProjectError::InvalidId);
        }
        if self.features.contains_key(&id) {
            return Err(ProjectError::DuplicateId(id));
        }

        let geometry = geometry.into();
        log::info!("Added {} feature {id}", geometry.kind());
        self.features.insert(id, Feature { id, geometry });
        Ok(())
    }

    /// Replaces the geometry of an existing feature, e.g. with a snapshot of an edit session.
    pub fn update_feature(
        &mut self,
        id: u32,
        geometry: impl Into<Arc<Geometry>>,
    ) -> Result<(), ProjectError> {
        let feature = self
            .features
            .get_mut(&id)
            .ok_or(ProjectError::NotFound(id))?;
        feature.geometry = geometry.into();
        Ok(())
    }

    /// Smallest unused id.
    pub fn next_id(&self) -> u32 {
        self.features.keys().next_back().map_or(1, |id| id + 1)
    }

    /// Removes a feature and returns it.
    pub fn remove_feature(&mut self, id: u32) -> Result<Feature, ProjectError> {
        let feature = self
            .features
            .remove(&id)
            .ok_or(ProjectError::NotFound(id))?;
        log::info!("Removed feature {id}");
        Ok(feature)
    }

    /// Feature with the id.
    pub fn feature(&self, id: u32) -> Option<&Feature> {
        self.features.get(&id)
    }

    /// Features ordered by id.
    pub fn features(&self) -> impl Iterator<Item = &Feature> + '_ {
        self.features.values()
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the project has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Vertices of a feature in the active display frame, honoring per-vertex overrides.
    pub fn display_vertices(
        &self,
        id: u32,
    ) -> Result<Vec<Result<Coordinate, ConversionError>>, ProjectError> {
        let feature = self.feature(id).ok_or(ProjectError::NotFound(id))?;
        Ok(feature.geometry.display_vertices(self.display_frame))
    }

    /// Measures every feature. A failure of one feature does not affect the others.
    pub fn measure_all(
        &self,
        policy: MeasurementPolicy,
    ) -> Vec<(u32, Result<Measurement, MeasureError>)> {
        self.features
            .values()
            .map(|feature| {
                let result = self.engine.measure(&feature.geometry, policy);
                if let Err(err) = &result {
                    log::warn!("Failed to measure feature {}: {err}", feature.id);
                }
                (feature.id, result)
            })
            .collect()
    }

    /// Extent of all features, `None` for an empty project.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.features
            .values()
            .map(|feature| feature.geometry.bounds())
            .reduce(|aggr, bbox| aggr.merge(bbox))
    }
}
