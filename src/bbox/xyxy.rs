//! Bounding boxes in XYXY (corner) form.

use super::coord::Coord;
use super::yolo::YoloBox;
use super::Pixel;

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// The constructor does NOT enforce min < max. CCPD boxes are taken as
/// published, so an inverted box still converts; use [`is_ordered`]
/// to check.
///
/// [`is_ordered`]: BBoxXYXY::is_ordered
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (xmax < xmin).
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (ymax < ymin).
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl BBoxXYXY<Pixel> {
    /// Converts the box to a YOLO center/size box relative to the image.
    ///
    /// The pixel center is computed first and divided by the image extent
    /// afterwards. Label values depend on this order down to the last bit.
    pub fn to_yolo(&self, image_width: f64, image_height: f64) -> YoloBox {
        YoloBox {
            cx: (self.min.x + self.max.x) / 2.0 / image_width,
            cy: (self.min.y + self.max.y) / 2.0 / image_height,
            w: (self.max.x - self.min.x) / image_width,
            h: (self.max.y - self.min.y) / image_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_dimensions() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(154.0, 383.0, 386.0, 473.0);
        assert_eq!(bbox.width(), 232.0);
        assert_eq!(bbox.height(), 90.0);
        assert!(bbox.is_finite());
    }

    #[test]
    fn bbox_ordering() {
        let ordered: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert!(ordered.is_ordered());

        let unordered: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(100.0, 80.0, 10.0, 20.0);
        assert!(!unordered.is_ordered());
    }

    #[test]
    fn to_yolo_matches_center_then_divide() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(154.0, 383.0, 386.0, 473.0);
        let yolo = bbox.to_yolo(720.0, 1160.0);

        assert_eq!(yolo.cx, 0.375);
        assert_eq!(yolo.cy, 0.3689655172413793);
        assert_eq!(yolo.w, 0.32222222222222224);
        assert_eq!(yolo.h, 0.07758620689655173);
    }

    #[test]
    fn inverted_box_still_converts() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(30.0, 40.0, 10.0, 20.0);
        let yolo = bbox.to_yolo(40.0, 80.0);
        assert_eq!(yolo.w, -0.5);
        assert_eq!(yolo.h, -0.25);
    }
}
