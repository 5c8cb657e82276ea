//! Geometry model: ordered vertex collections stored in the canonical frame.

use std::fmt::{Display, Formatter};

use geowizard_types::{
    validate, BoundingBox, ConversionError, Coordinate, CoordinateConverter, CoordinateFrame,
    GeoPoint2d,
};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Type of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// Exactly one vertex.
    Point,
    /// Open line through two or more vertices.
    Polyline,
    /// Implicitly closed ring of three or more distinct vertices.
    Polygon,
}

impl GeometryKind {
    /// Minimum number of vertices.
    pub fn min_vertices(&self) -> usize {
        match self {
            Self::Point => 1,
            Self::Polyline => 2,
            Self::Polygon => 3,
        }
    }

    /// Maximum number of vertices, if limited.
    pub fn max_vertices(&self) -> Option<usize> {
        match self {
            Self::Point => Some(1),
            Self::Polyline | Self::Polygon => None,
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Point => write!(f, "Point"),
            Self::Polyline => write!(f, "Polyline"),
            Self::Polygon => write!(f, "Polygon"),
        }
    }
}

/// A single vertex of a geometry.
///
/// The position is stored in the canonical frame only, so switching display frames never
/// accumulates conversion drift. The frame the vertex was entered in is remembered for
/// presentation and for choosing a planar measurement zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    position: GeoPoint2d,
    authored_in: CoordinateFrame,
    display_frame: Option<CoordinateFrame>,
}

impl Vertex {
    /// Creates a vertex at a canonical position.
    pub fn new(position: GeoPoint2d, authored_in: CoordinateFrame) -> Self {
        Self {
            position,
            authored_in,
            display_frame: None,
        }
    }

    /// Converts a coordinate into a canonical vertex.
    pub fn from_coordinate(
        coord: &Coordinate,
        converter: &CoordinateConverter,
    ) -> Result<Self, ConversionError> {
        Ok(Self::new(converter.to_canonical(coord)?, coord.frame()))
    }

    /// Canonical position.
    pub fn position(&self) -> &GeoPoint2d {
        &self.position
    }

    /// Frame the vertex was entered in.
    pub fn authored_in(&self) -> CoordinateFrame {
        self.authored_in
    }

    /// Display frame override, if any.
    pub fn display_frame(&self) -> Option<CoordinateFrame> {
        self.display_frame
    }

    /// Returns a copy with a display frame override.
    pub fn with_display_frame(mut self, frame: Option<CoordinateFrame>) -> Self {
        self.display_frame = frame;
        self
    }
}

/// Immutable snapshot of a point, polyline or polygon.
///
/// Vertex order is significant: it defines polyline direction and polygon winding. Polygons are
/// never stored closed: the first vertex is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct Geometry {
    kind: GeometryKind,
    vertices: Vec<Vertex>,
}

#[derive(Deserialize)]
struct RawGeometry {
    kind: GeometryKind,
    vertices: Vec<Vertex>,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = GeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        Self::from_vertices(raw.kind, raw.vertices)
    }
}

impl Geometry {
    /// Validates coordinates, converts them into the canonical frame and builds a geometry.
    ///
    /// A polygon whose last coordinate repeats the first one is treated as explicitly closed
    /// and the closing coordinate is dropped.
    pub fn new(kind: GeometryKind, coords: &[Coordinate]) -> Result<Self, GeometryError> {
        Self::with_converter(kind, coords, &CoordinateConverter::default())
    }

    /// Same as [`Geometry::new`] with a custom converter.
    pub fn with_converter(
        kind: GeometryKind,
        coords: &[Coordinate],
        converter: &CoordinateConverter,
    ) -> Result<Self, GeometryError> {
        let mut vertices = Vec::with_capacity(coords.len());
        for (index, coord) in coords.iter().enumerate() {
            validate(coord)
                .into_result()
                .map_err(|source| GeometryError::InvalidVertex { index, source })?;
            let vertex = Vertex::from_coordinate(coord, converter)
                .map_err(|source| GeometryError::Conversion { index, source })?;
            vertices.push(vertex);
        }

        if kind == GeometryKind::Polygon && vertices.len() > kind.min_vertices() {
            if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
                if first.position == last.position {
                    log::debug!("Dropping explicit closing vertex of a polygon");
                    vertices.pop();
                }
            }
        }

        Self::from_vertices(kind, vertices)
    }

    /// Builds a geometry from canonical vertices, checking the vertex count of the kind.
    pub fn from_vertices(kind: GeometryKind, vertices: Vec<Vertex>) -> Result<Self, GeometryError> {
        let actual = match kind {
            GeometryKind::Polygon => distinct_count(&vertices),
            _ => vertices.len(),
        };

        if actual < kind.min_vertices() {
            return Err(GeometryError::InsufficientVertices {
                kind,
                required: kind.min_vertices(),
                actual,
            });
        }

        if let Some(allowed) = kind.max_vertices() {
            if vertices.len() > allowed {
                return Err(GeometryError::TooManyVertices {
                    kind,
                    allowed,
                    actual: vertices.len(),
                });
            }
        }

        Ok(Self { kind, vertices })
    }

    /// Kind of the geometry.
    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex at `index`.
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Number of stored vertices. Never less than the minimum of the kind.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`: every geometry has at least one vertex.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Canonical positions in insertion order.
    pub fn positions(&self) -> impl Iterator<Item = &GeoPoint2d> + '_ {
        self.vertices.iter().map(|v| &v.position)
    }

    /// Re-projects all vertices into `frame`. The geometry itself is not modified.
    pub fn vertices_in(&self, frame: CoordinateFrame) -> Result<Vec<Coordinate>, ConversionError> {
        self.vertices_in_with(frame, &CoordinateConverter::default())
    }

    /// Same as [`Geometry::vertices_in`] with a custom converter.
    pub fn vertices_in_with(
        &self,
        frame: CoordinateFrame,
        converter: &CoordinateConverter,
    ) -> Result<Vec<Coordinate>, ConversionError> {
        self.positions()
            .map(|p| converter.from_canonical(p, frame))
            .collect()
    }

    /// Re-projects every vertex into its own display frame override, or into `default_frame`.
    pub fn display_vertices(
        &self,
        default_frame: CoordinateFrame,
    ) -> Vec<Result<Coordinate, ConversionError>> {
        let converter = CoordinateConverter::default();
        self.vertices
            .iter()
            .map(|v| {
                converter.from_canonical(&v.position, v.display_frame.unwrap_or(default_frame))
            })
            .collect()
    }

    /// Extent of the canonical positions.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.positions())
            .unwrap_or_else(|| BoundingBox::from_point(&GeoPoint2d::default()))
    }

    /// Mean of the canonical positions.
    ///
    /// Longitudes are averaged along the shorter way around the globe, so a geometry straddling
    /// the antimeridian has its centroid next to it rather than near the prime meridian.
    pub fn centroid(&self) -> GeoPoint2d {
        mean_position(self.positions())
    }

    /// UTM frame shared by all vertices, if every vertex was entered in the same zone.
    pub fn common_utm_frame(&self) -> Option<CoordinateFrame> {
        let first = self.vertices.first()?.authored_in;
        first.utm_zone()?;
        self.vertices
            .iter()
            .all(|v| v.authored_in == first)
            .then_some(first)
    }

    /// Returns a new geometry with the vertex at `index` replaced.
    pub fn with_vertex_moved(&self, index: usize, vertex: Vertex) -> Result<Self, GeometryError> {
        self.check_index(index, self.len())?;
        let mut vertices = self.vertices.clone();
        vertices[index] = vertex;
        Self::from_vertices(self.kind, vertices)
    }

    /// Returns a new geometry with `vertex` inserted before `index`. `index == len` appends.
    pub fn with_vertex_inserted(
        &self,
        index: usize,
        vertex: Vertex,
    ) -> Result<Self, GeometryError> {
        self.check_index(index, self.len() + 1)?;
        let mut vertices = self.vertices.clone();
        vertices.insert(index, vertex);
        Self::from_vertices(self.kind, vertices)
    }

    /// Returns a new geometry without the vertex at `index`.
    pub fn with_vertex_removed(&self, index: usize) -> Result<Self, GeometryError> {
        self.check_index(index, self.len())?;
        let mut vertices = self.vertices.clone();
        vertices.remove(index);
        Self::from_vertices(self.kind, vertices)
    }

    fn check_index(&self, index: usize, bound: usize) -> Result<(), GeometryError> {
        if index < bound {
            Ok(())
        } else {
            Err(GeometryError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
        }
    }
}

fn distinct_count(vertices: &[Vertex]) -> usize {
    let mut positions: Vec<&GeoPoint2d> = vertices.iter().map(|v| &v.position).collect();
    positions.sort_unstable_by(|a, b| {
        a.lat()
            .total_cmp(&b.lat())
            .then_with(|| a.lon().total_cmp(&b.lon()))
    });
    positions.dedup_by(|a, b| a == b);
    positions.len()
}

/// Mean position of a set of points, with each longitude taken within 180° of the first one.
pub(crate) fn mean_position<'a>(points: impl IntoIterator<Item = &'a GeoPoint2d>) -> GeoPoint2d {
    let mut points = points.into_iter();
    let Some(first) = points.next() else {
        return GeoPoint2d::default();
    };

    let (count, lat, lon) = points.fold((1.0, first.lat(), first.lon()), |(n, lat, lon), p| {
        (
            n + 1.0,
            lat + p.lat(),
            lon + first.lon() + wrap_degrees(p.lon() - first.lon()),
        )
    });

    let lon = lon / count;
    let lon = if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    };

    GeoPoint2d::latlon(lat / count, lon)
}

/// Wraps an angle difference in degrees into `[-180, 180]`.
pub(crate) fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && angle > 0.0 {
        180.0
    } else {
        wrapped
    }
}
