//! Normalized YOLO boxes (center x, center y, width, height).

use super::{BBoxXYXY, Normalized};

/// A bounding box in YOLO center/size form, normalized to the image extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoloBox {
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl YoloBox {
    /// Returns the four values in label-file order.
    #[inline]
    pub fn values(&self) -> [f64; 4] {
        [self.cx, self.cy, self.w, self.h]
    }

    /// Returns true if every value lies in `[0, 1]`.
    pub fn is_within_unit_range(&self) -> bool {
        self.values().iter().all(|v| (0.0..=1.0).contains(v))
    }

    /// Returns the corner form of this box.
    pub fn to_xyxy(&self) -> BBoxXYXY<Normalized> {
        BBoxXYXY::from_xyxy(
            self.cx - self.w / 2.0,
            self.cy - self.h / 2.0,
            self.cx + self.w / 2.0,
            self.cy + self.h / 2.0,
        )
    }

    /// Returns true if the box lies entirely inside the image.
    ///
    /// A box that pokes out of the image still produces a label; this is only
    /// used to flag suspicious annotations in the logs.
    pub fn is_inside_image(&self) -> bool {
        let corners = self.to_xyxy();
        corners.is_ordered()
            && corners.xmin() >= 0.0
            && corners.ymin() >= 0.0
            && corners.xmax() <= 1.0
            && corners.ymax() <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_range_check() {
        let inside = YoloBox {
            cx: 0.5,
            cy: 0.5,
            w: 1.0,
            h: 0.2,
        };
        assert!(inside.is_within_unit_range());

        let outside = YoloBox {
            cx: 0.5,
            cy: 1.2,
            w: 0.1,
            h: 0.1,
        };
        assert!(!outside.is_within_unit_range());
    }

    #[test]
    fn box_crossing_the_border_is_not_inside_image() {
        let crossing = YoloBox {
            cx: 0.95,
            cy: 0.5,
            w: 0.2,
            h: 0.2,
        };
        assert!(crossing.is_within_unit_range());
        assert!(!crossing.is_inside_image());
    }
}
