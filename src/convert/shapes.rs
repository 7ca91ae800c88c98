//! groups scattered shape points by shape key, orders each group by its
//! explicit sequence number, and encodes the result as a precision-5
//! polyline. shape indices are assigned in first-encounter order of the
//! shape key, concurrent with emission.

use std::collections::HashMap;

use itertools::Itertools;

use super::dense::DenseShape;
use super::index::EntityIndexTable;
use super::polyline;
use super::rows::ShapeRow;
use super::summary::ConvertSummary;

/// turns raw shape rows into encoded shape records. sequence numbers are
/// not assumed contiguous or zero-based; the sort is stable, so ties keep
/// their arrival order. a key grouping to zero points is dropped with a
/// warning rather than emitted.
pub fn encode_shapes(
    rows: &[ShapeRow],
    shapes: &mut EntityIndexTable,
    summary: &mut ConvertSummary,
) -> Vec<DenseShape> {
    let mut grouped: HashMap<&str, Vec<&ShapeRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.shape_id.as_str()).or_default().push(row);
    }

    let mut encoded = Vec::with_capacity(grouped.len());
    for shape_id in rows.iter().map(|row| row.shape_id.as_str()).unique() {
        let mut points = grouped.remove(shape_id).unwrap_or_default();
        if points.is_empty() {
            log::warn!("shape {shape_id} has no points; dropping");
            summary.empty_shapes += 1;
            continue;
        }
        points.sort_by_key(|point| point.shape_pt_sequence);
        let path = points
            .iter()
            .map(|point| (point.shape_pt_lat, point.shape_pt_lon))
            .collect::<Vec<_>>();
        shapes.assign(shape_id);
        encoded.push(DenseShape {
            shape_id: shape_id.to_string(),
            encoded_polyline: polyline::encode(&path),
        });
    }
    encoded
}

#[cfg(test)]
mod test {
    use super::*;

    fn shape_row(shape_id: &str, lat: f64, lon: f64, sequence: u32) -> ShapeRow {
        ShapeRow {
            shape_id: shape_id.to_string(),
            shape_pt_lat: lat,
            shape_pt_lon: lon,
            shape_pt_sequence: sequence,
        }
    }

    #[test]
    fn test_points_sort_by_sequence_not_file_order() {
        let rows = vec![
            shape_row("A", 43.252, -126.453, 30),
            shape_row("A", 38.5, -120.2, 10),
            shape_row("A", 40.7, -120.95, 20),
        ];
        let mut shapes = EntityIndexTable::new();
        let mut summary = ConvertSummary::default();
        let encoded = encode_shapes(&rows, &mut shapes, &mut summary);

        assert_eq!(encoded.len(), 1);
        let decoded = polyline::decode(&encoded[0].encoded_polyline);
        assert!((decoded[0].0 - 38.5).abs() < 1e-5);
        assert!((decoded[1].0 - 40.7).abs() < 1e-5);
        assert!((decoded[2].0 - 43.252).abs() < 1e-5);
    }

    #[test]
    fn test_sequence_ties_keep_arrival_order() {
        let rows = vec![
            shape_row("A", 1.0, 1.0, 5),
            shape_row("A", 2.0, 2.0, 5),
            shape_row("A", 0.0, 0.0, 1),
        ];
        let mut shapes = EntityIndexTable::new();
        let mut summary = ConvertSummary::default();
        let encoded = encode_shapes(&rows, &mut shapes, &mut summary);
        let decoded = polyline::decode(&encoded[0].encoded_polyline);
        assert!((decoded[0].0 - 0.0).abs() < 1e-5);
        assert!((decoded[1].0 - 1.0).abs() < 1e-5);
        assert!((decoded[2].0 - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_index_follows_first_encounter_of_key() {
        let rows = vec![
            shape_row("B", 1.0, 1.0, 1),
            shape_row("A", 2.0, 2.0, 1),
            shape_row("B", 3.0, 3.0, 2),
        ];
        let mut shapes = EntityIndexTable::new();
        let mut summary = ConvertSummary::default();
        let encoded = encode_shapes(&rows, &mut shapes, &mut summary);

        assert_eq!(shapes.lookup("B"), Some(0));
        assert_eq!(shapes.lookup("A"), Some(1));
        assert_eq!(encoded[0].shape_id, "B");
        assert_eq!(encoded[1].shape_id, "A");
        assert_eq!(polyline::decode(&encoded[0].encoded_polyline).len(), 2);
    }
}
