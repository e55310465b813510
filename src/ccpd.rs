//! CCPD2019 filename decoding.
//!
//! CCPD stores each plate annotation in the image filename itself:
//!
//! ```text
//! 025-95_113-154&383_386&473-386&473_177&454_154&383_363&402-0_0_22_27_27_33_16-37-15.jpg
//! ^area ^tilt  ^bounding box  ^four vertices                 ^plate number       ^brightness, blur
//! ```
//!
//! Only the bounding box (third `-`-separated field) is needed for YOLO
//! labels. The remaining fields are not inspected, so a filename is accepted
//! as long as that field is well formed.

use std::path::Path;

use crate::bbox::{BBoxXYXY, Pixel};
use crate::error::FilenameError;

/// The file-name suffix every CCPD image carries.
pub const IMAGE_SUFFIX: &str = ".jpg";

/// The extension used for YOLO label files.
pub const LABEL_EXTENSION: &str = "txt";

const FIELD_SEPARATOR: char = '-';
const CORNER_SEPARATOR: char = '_';
const VALUE_SEPARATOR: char = '&';
const BOX_FIELD_INDEX: usize = 2;

/// Decode the plate bounding box from a CCPD filename.
///
/// ```
/// use ccpd_yolo::ccpd::parse_plate_box;
///
/// let bbox = parse_plate_box("xx-xx-154&383_386&473-xx.jpg").unwrap();
/// assert_eq!(bbox.xmin(), 154.0);
/// assert_eq!(bbox.ymax(), 473.0);
/// ```
pub fn parse_plate_box(file_name: &str) -> Result<BBoxXYXY<Pixel>, FilenameError> {
    let field = file_name
        .split(FIELD_SEPARATOR)
        .nth(BOX_FIELD_INDEX)
        .ok_or_else(|| FilenameError::MissingBoxField {
            fields: file_name.split(FIELD_SEPARATOR).count(),
        })?;

    let corners: Vec<&str> = field.split(CORNER_SEPARATOR).collect();
    let [top_left, bottom_right] = corners[..] else {
        return Err(FilenameError::MalformedBox {
            field: field.to_string(),
        });
    };

    let (xmin, ymin) = parse_corner(top_left)?;
    let (xmax, ymax) = parse_corner(bottom_right)?;

    Ok(BBoxXYXY::from_xyxy(
        xmin as f64,
        ymin as f64,
        xmax as f64,
        ymax as f64,
    ))
}

fn parse_corner(corner: &str) -> Result<(i64, i64), FilenameError> {
    let values: Vec<&str> = corner.split(VALUE_SEPARATOR).collect();
    let [x, y] = values[..] else {
        return Err(FilenameError::MalformedCorner {
            corner: corner.to_string(),
        });
    };

    Ok((parse_int(x)?, parse_int(y)?))
}

fn parse_int(raw: &str) -> Result<i64, FilenameError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| FilenameError::InvalidInteger {
            value: raw.to_string(),
        })
}

/// Returns true if `path` names a CCPD image (case-sensitive `.jpg` suffix).
pub fn is_ccpd_image(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(IMAGE_SUFFIX))
}

/// Returns the label file name for a CCPD image name.
///
/// ```
/// use ccpd_yolo::ccpd::label_file_name;
///
/// assert_eq!(label_file_name("a-b-1&2_3&4.jpg"), "a-b-1&2_3&4.txt");
/// ```
pub fn label_file_name(image_name: &str) -> String {
    let stem = image_name.strip_suffix(IMAGE_SUFFIX).unwrap_or(image_name);
    format!("{stem}.{LABEL_EXTENSION}")
}

/// Fuzz-only entrypoint for filename decoding.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_plate_box(input: &str) -> Result<(), FilenameError> {
    let _ = parse_plate_box(input)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_NAME: &str =
        "025-95_113-154&383_386&473-386&473_177&454_154&383_363&402-0_0_22_27_27_33_16-37-15.jpg";

    #[test]
    fn parses_full_ccpd_name() {
        let bbox = parse_plate_box(FULL_NAME).expect("parse full name");
        assert_eq!(bbox.xmin(), 154.0);
        assert_eq!(bbox.ymin(), 383.0);
        assert_eq!(bbox.xmax(), 386.0);
        assert_eq!(bbox.ymax(), 473.0);
    }

    #[test]
    fn parses_minimal_name() {
        let bbox = parse_plate_box("xx-xx-154&383_386&473-xx.jpg").expect("parse");
        assert_eq!(bbox.width(), 232.0);
        assert_eq!(bbox.height(), 90.0);
    }

    #[test]
    fn box_may_be_last_field() {
        let bbox = parse_plate_box("a-b-1&2_3&4").expect("parse");
        assert_eq!(bbox.xmax(), 3.0);
        assert_eq!(bbox.ymax(), 4.0);
    }

    #[test]
    fn rejects_names_with_too_few_fields() {
        let err = parse_plate_box("broken-name.jpg").unwrap_err();
        assert_eq!(err, FilenameError::MissingBoxField { fields: 2 });

        let err = parse_plate_box("nodashes.jpg").unwrap_err();
        assert_eq!(err, FilenameError::MissingBoxField { fields: 1 });
    }

    #[test]
    fn rejects_box_without_two_corners() {
        let err = parse_plate_box("a-b-154&383-c.jpg").unwrap_err();
        assert!(matches!(err, FilenameError::MalformedBox { .. }));

        let err = parse_plate_box("a-b-1&2_3&4_5&6-c.jpg").unwrap_err();
        assert!(matches!(err, FilenameError::MalformedBox { .. }));

        let err = parse_plate_box("a-b--c.jpg").unwrap_err();
        assert!(matches!(err, FilenameError::MalformedBox { .. }));
    }

    #[test]
    fn rejects_malformed_corner() {
        let err = parse_plate_box("a-b-154_386&473-c.jpg").unwrap_err();
        assert_eq!(
            err,
            FilenameError::MalformedCorner {
                corner: "154".to_string()
            }
        );
    }

    #[test]
    fn rejects_non_integer_values() {
        let err = parse_plate_box("a-b-15.4&383_386&473-c.jpg").unwrap_err();
        assert_eq!(
            err,
            FilenameError::InvalidInteger {
                value: "15.4".to_string()
            }
        );
    }

    #[test]
    fn accepts_signed_values() {
        let bbox = parse_plate_box("a-b-+1&2_3&4-c.jpg").expect("parse");
        assert_eq!(bbox.xmin(), 1.0);
    }

    #[test]
    fn image_suffix_is_case_sensitive() {
        assert!(is_ccpd_image(Path::new("dir/a-b-1&2_3&4.jpg")));
        assert!(!is_ccpd_image(Path::new("dir/a-b-1&2_3&4.JPG")));
        assert!(!is_ccpd_image(Path::new("dir/a-b-1&2_3&4.png")));
        assert!(!is_ccpd_image(Path::new("dir/")));
    }

    #[test]
    fn label_name_swaps_extension() {
        assert_eq!(label_file_name(FULL_NAME).len(), FULL_NAME.len());
        assert!(label_file_name(FULL_NAME).ends_with("-37-15.txt"));
        assert_eq!(label_file_name("no_extension"), "no_extension.txt");
    }
}
