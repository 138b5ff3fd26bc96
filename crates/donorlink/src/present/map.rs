//! Map view contract and an in-memory implementation.

use serde::Serialize;

use super::card::{format_date, heading};
use crate::config::MapConfig;
use crate::record::{Coordinates, DonorRecord, FormData};

/// A map surface that can show point markers.
pub trait MapView {
    /// Centre the visible region on `center` at `zoom`.
    fn set_center(&mut self, center: Coordinates, zoom: u8);

    /// Plot a marker with popup text.
    fn add_marker(&mut self, at: Coordinates, popup: String);

    /// Remove every marker.
    fn clear_markers(&mut self);

    /// Fit the visible region to the plotted markers, padded by `padding`
    /// of the bounds' size on each side. No-op without markers.
    fn fit_to_markers(&mut self, padding: f64);
}

/// A latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// Southern edge.
    pub south: f64,
    /// Western edge.
    pub west: f64,
    /// Northern edge.
    pub north: f64,
    /// Eastern edge.
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every point; `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    south: p.lat,
                    west: p.lng,
                    north: p.lat,
                    east: p.lng,
                },
                Some(b) => Self {
                    south: b.south.min(p.lat),
                    west: b.west.min(p.lng),
                    north: b.north.max(p.lat),
                    east: b.east.max(p.lng),
                },
            })
        })
    }

    /// Grow the box by `ratio` of its height and width on every side.
    #[must_use]
    pub fn pad(self, ratio: f64) -> Self {
        let dlat = (self.north - self.south).abs() * ratio;
        let dlng = (self.east - self.west).abs() * ratio;
        Self {
            south: self.south - dlat,
            west: self.west - dlng,
            north: self.north + dlat,
            east: self.east + dlng,
        }
    }

    /// Centre point of the box.
    #[must_use]
    pub fn center(&self) -> Coordinates {
        Coordinates {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }
}

/// One plotted marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Marker position.
    pub at: Coordinates,
    /// Popup text.
    pub popup: String,
}

/// In-memory map view: records what a rendering surface would show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerBoard {
    center: Coordinates,
    zoom: u8,
    markers: Vec<Marker>,
    viewport: Option<Bounds>,
}

impl MarkerBoard {
    /// Create a board centred per the map configuration.
    #[must_use]
    pub fn new(config: &MapConfig) -> Self {
        Self {
            center: Coordinates {
                lat: config.center_lat,
                lng: config.center_lng,
            },
            zoom: config.zoom,
            markers: Vec::new(),
            viewport: None,
        }
    }

    /// Current centre.
    #[must_use]
    pub fn center(&self) -> Coordinates {
        self.center
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Plotted markers in plot order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Region last fitted to the markers, if any.
    #[must_use]
    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }
}

impl MapView for MarkerBoard {
    fn set_center(&mut self, center: Coordinates, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
        self.viewport = None;
    }

    fn add_marker(&mut self, at: Coordinates, popup: String) {
        self.markers.push(Marker { at, popup });
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn fit_to_markers(&mut self, padding: f64) {
        if let Some(bounds) = Bounds::from_points(self.markers.iter().map(|m| m.at)) {
            let padded = bounds.pad(padding);
            self.center = padded.center();
            self.viewport = Some(padded);
        }
    }
}

/// Popup text for a record's marker.
#[must_use]
pub fn popup(record: &DonorRecord) -> String {
    let mut lines = vec![
        heading(record),
        record.hospital().name.clone(),
        format!("Blood Type: {}", record.blood_type()),
    ];
    if let DonorRecord::Deceased(r) = record {
        lines.push(format!("Donated: {}", format_date(r.donation_date)));
    }
    lines.push(format!("Available: {}", record.organs().join(", ")));
    lines.join("\n")
}

/// Write a map click into a form's coordinates field.
///
/// Returns `false`, leaving the form alone, if the click is off the map.
pub fn fill_from_click(form: &mut FormData, field: &str, lat: f64, lng: f64) -> bool {
    match Coordinates::new(lat, lng) {
        Some(c) => {
            form.set(field, c.to_field_text());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::living_fields;
    use crate::record::testing::{deceased, living};
    use crate::record::BloodType;

    fn at(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    #[test]
    fn test_board_starts_at_configured_center() {
        let board = MarkerBoard::new(&MapConfig::default());
        assert!((board.center().lat - 40.7128).abs() < 1e-9);
        assert_eq!(board.zoom(), 10);
        assert!(board.markers().is_empty());
    }

    #[test]
    fn test_bounds_from_points() {
        assert!(Bounds::from_points(Vec::new()).is_none());

        let b = Bounds::from_points([at(10.0, -20.0), at(30.0, 40.0), at(20.0, 0.0)]).unwrap();
        assert_eq!(
            b,
            Bounds {
                south: 10.0,
                west: -20.0,
                north: 30.0,
                east: 40.0
            }
        );
    }

    #[test]
    fn test_bounds_pad() {
        let b = Bounds {
            south: 10.0,
            west: 0.0,
            north: 20.0,
            east: 40.0,
        }
        .pad(0.1);
        assert!((b.south - 9.0).abs() < 1e-9);
        assert!((b.north - 21.0).abs() < 1e-9);
        assert!((b.west + 4.0).abs() < 1e-9);
        assert!((b.east - 44.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_without_markers_is_noop() {
        let mut board = MarkerBoard::new(&MapConfig::default());
        let before = board.clone();
        board.fit_to_markers(0.1);
        assert_eq!(board, before);
    }

    #[test]
    fn test_fit_to_markers() {
        let mut board = MarkerBoard::new(&MapConfig::default());
        board.add_marker(at(10.0, 10.0), String::new());
        board.add_marker(at(20.0, 30.0), String::new());
        board.fit_to_markers(0.0);

        let viewport = board.viewport().unwrap();
        assert!((viewport.north - 20.0).abs() < 1e-9);
        assert!((board.center().lat - 15.0).abs() < 1e-9);
        assert!((board.center().lng - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_center_drops_fitted_view() {
        let mut board = MarkerBoard::new(&MapConfig::default());
        board.add_marker(at(10.0, 10.0), String::new());
        board.fit_to_markers(0.1);
        assert!(board.viewport().is_some());

        board.set_center(at(51.5, -0.12), 12);
        assert!(board.viewport().is_none());
        assert_eq!(board.zoom(), 12);
        assert!((board.center().lat - 51.5).abs() < 1e-9);
        assert_eq!(board.markers().len(), 1);
    }

    #[test]
    fn test_clear_markers() {
        let mut board = MarkerBoard::new(&MapConfig::default());
        board.add_marker(at(1.0, 1.0), "x".to_string());
        board.clear_markers();
        assert!(board.markers().is_empty());
    }

    #[test]
    fn test_popup_by_kind() {
        let l: DonorRecord = living("Ann", &["heart", "liver"], BloodType::OPositive, "Albany").into();
        assert_eq!(
            popup(&l),
            "Ann\nCity General Hospital\nBlood Type: O+\nAvailable: heart, liver"
        );

        let d: DonorRecord = deceased("Bob", &["kidney"], BloodType::ANegative, "Miami").into();
        let text = popup(&d);
        assert!(text.starts_with("Bob (Deceased)\nMemorial Hospital"));
        assert!(text.contains("Donated: 1/15/2024"));
    }

    #[test]
    fn test_fill_from_click() {
        let mut form = FormData::new();
        assert!(fill_from_click(&mut form, living_fields::COORDINATES, 40.7128, -74.006));
        assert_eq!(
            form.get(living_fields::COORDINATES),
            Some("40.712800, -74.006000")
        );

        assert!(!fill_from_click(&mut form, living_fields::COORDINATES, 95.0, 0.0));
        assert_eq!(
            form.get(living_fields::COORDINATES),
            Some("40.712800, -74.006000")
        );
    }
}
