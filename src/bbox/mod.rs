//! Bounding box geometry for CCPD → YOLO conversion.
//!
//! CCPD filenames carry a box in pixel XYXY form; YOLO label files expect a
//! normalized center/size box. The two live in different coordinate spaces,
//! tracked at compile time with the [`Pixel`] and [`Normalized`] markers.
//!
//! ```
//! use ccpd_yolo::bbox::{BBoxXYXY, Pixel};
//!
//! let plate = BBoxXYXY::<Pixel>::from_xyxy(154.0, 383.0, 386.0, 473.0);
//! let yolo = plate.to_yolo(720.0, 1160.0);
//! assert_eq!(yolo.cx, 0.375);
//! ```

mod coord;
mod space;
mod xyxy;
mod yolo;

pub use coord::Coord;
pub use space::{Normalized, Pixel};
pub use xyxy::BBoxXYXY;
pub use yolo::YoloBox;
