//! Presentation of search results.
//!
//! A [`SearchResult`] becomes one [`ResultCard`] per record plus one map
//! marker per record with usable coordinates. Selecting a card yields a
//! [`RecordDetail`].

mod card;
mod detail;
mod map;
mod notice;
pub mod render;

use serde::Serialize;
use tracing::debug;

use crate::config::MapConfig;
use crate::search::SearchResult;

pub use card::{badge, format_date, ResultCard};
pub use detail::RecordDetail;
pub use map::{fill_from_click, popup, Bounds, MapView, Marker, MarkerBoard};
pub use notice::{Notice, NoticeLevel};

/// What a search produced on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    /// One card per matched record, in result order.
    pub cards: Vec<ResultCard>,
    /// Shown instead of cards when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    /// Number of markers plotted.
    pub plotted: usize,
}

/// Renders search results onto cards and a map view.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    fit_padding: f64,
}

impl Presenter {
    /// Create a presenter using the map settings from configuration.
    #[must_use]
    pub fn new(config: &MapConfig) -> Self {
        Self {
            fit_padding: config.fit_padding,
        }
    }

    /// Build cards for `result` and replot `map`.
    ///
    /// Previous markers are cleared. Records without parseable coordinates
    /// get a card but no marker.
    pub fn present<M>(&self, result: &SearchResult, map: &mut M) -> Presentation
    where
        M: MapView + ?Sized,
    {
        map.clear_markers();

        let mut plotted = 0;
        for record in &result.records {
            if let Some(at) = record.coordinates() {
                map.add_marker(at, popup(record));
                plotted += 1;
            }
        }
        if plotted > 0 {
            map.fit_to_markers(self.fit_padding);
        }
        debug!(cards = result.len(), plotted, "Presented search result");

        Presentation {
            cards: result.records.iter().map(ResultCard::new).collect(),
            notice: result
                .is_empty()
                .then(|| Notice::no_results(result.total_records)),
            plotted,
        }
    }

    /// Detail disclosure for the result record with identity `id`.
    #[must_use]
    pub fn select(&self, result: &SearchResult, id: &str) -> Option<RecordDetail> {
        result
            .records
            .iter()
            .find(|r| r.id().is_some_and(|rid| rid.as_str() == id))
            .map(RecordDetail::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::{deceased, living};
    use crate::record::{BloodType, DonorRecord, RecordId};

    fn result(records: Vec<DonorRecord>, total_records: usize) -> SearchResult {
        SearchResult {
            records,
            total_records,
        }
    }

    #[test]
    fn test_present_plots_both_kinds() {
        let records = vec![
            living("Ann", &["heart"], BloodType::OPositive, "Albany").into(),
            deceased("Bob", &["heart"], BloodType::ONegative, "Miami").into(),
        ];
        let presenter = Presenter::new(&MapConfig::default());
        let mut board = MarkerBoard::new(&MapConfig::default());

        let shown = presenter.present(&result(records, 2), &mut board);

        assert_eq!(shown.cards.len(), 2);
        assert_eq!(shown.plotted, 2);
        assert!(shown.notice.is_none());
        assert_eq!(board.markers().len(), 2);
        assert!(board.markers()[1].popup.contains("(Deceased)"));

        let viewport = board.viewport().unwrap();
        assert!(viewport.south < 25.7617);
        assert!(viewport.north > 40.7589);
    }

    #[test]
    fn test_records_without_coordinates_get_card_only() {
        let mut ann = living("Ann", &["heart"], BloodType::OPositive, "Albany");
        ann.coordinates = Some("somewhere".to_string());
        let mut bob = deceased("Bob", &["heart"], BloodType::ONegative, "Miami");
        bob.coordinates = None;

        let presenter = Presenter::new(&MapConfig::default());
        let mut board = MarkerBoard::new(&MapConfig::default());
        let shown = presenter.present(&result(vec![ann.into(), bob.into()], 2), &mut board);

        assert_eq!(shown.cards.len(), 2);
        assert_eq!(shown.plotted, 0);
        assert!(board.viewport().is_none());
    }

    #[test]
    fn test_empty_result_shows_notice_and_clears_map() {
        let presenter = Presenter::new(&MapConfig::default());
        let mut board = MarkerBoard::new(&MapConfig::default());
        board.add_marker(
            crate::record::Coordinates::new(1.0, 1.0).unwrap(),
            "stale".to_string(),
        );

        let shown = presenter.present(&result(Vec::new(), 5), &mut board);

        assert!(shown.cards.is_empty());
        assert_eq!(shown.notice, Some(Notice::no_results(5)));
        assert!(board.markers().is_empty());
    }

    #[test]
    fn test_select_by_id() {
        let records = vec![
            living("Ann", &["heart"], BloodType::OPositive, "Albany")
                .with_id(RecordId::new("a"))
                .into(),
            deceased("Bob", &["heart"], BloodType::ONegative, "Miami")
                .with_id(RecordId::new("b"))
                .into(),
        ];
        let presenter = Presenter::new(&MapConfig::default());
        let r = result(records, 2);

        let detail = presenter.select(&r, "b").unwrap();
        assert_eq!(detail.title, "Deceased Donor Information");
        assert!(presenter.select(&r, "zzz").is_none());
    }
}
