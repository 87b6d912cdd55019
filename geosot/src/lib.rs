//! GeoSOT is a discrete global grid that subdivides the earth surface (and, with GeoSOT-3D, the
//! space around it) into a quadtree/octree of cells aligned with degrees, minutes and seconds.
//! This crate encodes geographic positions into cell codes and decodes them back, and works with
//! codes directly: parents and children, neighbors and relationships between cells.
//!
//! # Quick start
//!
//! ```
//! use geosot::{GeoSot3dCodec, Axis, TopologicalRelationship};
//!
//! let codec = GeoSot3dCodec::default();
//! let code = codec.encode(116.315228, 39.91028, 100.0, 26).unwrap();
//! assert_eq!(code.to_octal().as_str(), "00175432623067035031215450");
//!
//! let neighbor = code.translate(Axis::Lon, 1);
//! assert_eq!(code.relationship(&neighbor), TopologicalRelationship::SurfaceAdjacent);
//! assert_eq!(code.parent().unwrap().relationship(&code), TopologicalRelationship::Contain);
//!
//! let corner = codec.decode(&code);
//! assert!((corner.height() - 100.0).abs() < 1.0);
//! ```
//!
//! 2d codes use the [`geosot2d`] module:
//!
//! ```
//! use geosot::geosot2d::GeoSot2dCodec;
//!
//! let code = GeoSot2dCodec::default().encode(116.315228, 39.91028, 15).unwrap();
//! assert_eq!(code.to_string(), "G001310322-230230");
//! assert_eq!((code.tile().x(), code.tile().y()), (7442, 2550));
//! ```

pub mod degree;
pub mod ellipsoid;
pub mod error;
pub mod geosot2d;
pub mod geosot3d;
pub mod grid;
mod hierarchy;
pub mod morton;
mod offset;
pub mod point;
mod topology;

pub use degree::{DegreeCode, DegreeCodec, RangeCheck};
pub use ellipsoid::Ellipsoid;
pub use error::{GeoSotError, Result};
pub use geosot3d::{Axis, GeoSot1dCode, GeoSot3dCode, GeoSot3dCodec, OctalCode};
pub use offset::Offset;
pub use point::{GeoBbox, GeoPoint, GeoPoint2d, GeoPoint3d, NewGeoPoint};
pub use topology::{classify, TopologicalRelationship};
