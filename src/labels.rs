use log::debug;

use crate::types::{BoundingBox, PoseRecord};

/// Parse one YOLO box line `class_id cx cy w h`.
///
/// Returns `None` unless the line has exactly five whitespace separated
/// fields that parse as an integer class and four floats.
pub fn parse_label_line(line: &str) -> Option<BoundingBox> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return None;
    }

    let class_id = fields[0].parse::<u32>().ok()?;
    let cx = fields[1].parse::<f64>().ok()?;
    let cy = fields[2].parse::<f64>().ok()?;
    let w = fields[3].parse::<f64>().ok()?;
    let h = fields[4].parse::<f64>().ok()?;

    Some(BoundingBox::new(class_id, cx, cy, w, h))
}

/// Parse the content of a YOLO label file.
///
/// Returns the boxes in file order and the number of malformed lines that
/// were skipped. Blank lines are ignored.
pub fn parse_labels(content: &str) -> (Vec<BoundingBox>, usize) {
    let mut boxes = Vec::new();
    let mut skipped = 0;

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_label_line(line) {
            Some(bbox) => boxes.push(bbox),
            None => {
                debug!("Skipping malformed label line {}: {:?}", line_no + 1, line);
                skipped += 1;
            }
        }
    }

    (boxes, skipped)
}

/// Format a pose record as
/// `class_id cx cy w h top_x top_y left_x left_y right_x right_y`
pub fn format_pose_record(record: &PoseRecord) -> String {
    let bbox = &record.bbox;
    let mut line = String::with_capacity(96);
    line.push_str(&format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        bbox.class_id, bbox.cx, bbox.cy, bbox.w, bbox.h
    ));
    for keypoint in &record.keypoints {
        line.push_str(&format!(" {:.6} {:.6}", keypoint.x, keypoint.y));
    }
    line
}

/// Join formatted records with newlines, without a trailing newline
pub fn format_pose_records(records: &[PoseRecord]) -> String {
    records
        .iter()
        .map(format_pose_record)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Keypoint;

    #[test]
    fn test_parse_label_line() {
        let bbox = parse_label_line("3 0.25 0.5 0.1 0.2").unwrap();
        assert_eq!(bbox, BoundingBox::new(3, 0.25, 0.5, 0.1, 0.2));

        assert!(parse_label_line("3 0.25 0.5").is_none());
        assert!(parse_label_line("3 0.25 0.5 0.1 0.2 0.7").is_none());
        assert!(parse_label_line("cone 0.25 0.5 0.1 0.2").is_none());
    }

    #[test]
    fn test_parse_labels_counts_skipped_lines() {
        let content = "0 0.5 0.5 0.2 0.2\n\n1 0.1 0.1\n2 0.3 0.3 0.1 0.1\n";
        let (boxes, skipped) = parse_labels(content);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1].class_id, 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_format_pose_records_has_no_trailing_newline() {
        let record = PoseRecord::new(
            BoundingBox::new(0, 0.5, 0.5, 0.2, 0.2),
            [
                Keypoint::new(0.5, 0.4),
                Keypoint::new(0.4, 0.6),
                Keypoint::new(0.6, 0.6),
            ],
        );
        let text = format_pose_records(&[record, record]);
        assert_eq!(text.lines().count(), 2);
        assert!(!text.ends_with('\n'));
        assert_eq!(format_pose_records(&[]), "");
    }
}
