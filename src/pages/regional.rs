//! Regional Analysis page: Region × State heatmap, state choropleth and region totals.

use crate::charts::{ChoroplethSpec, ColorScale, HeatmapSpec};
use crate::data::SalesTable;
use crate::stats::{RankedItem, SalesAggregator, StatsError};

#[derive(Debug, Clone, PartialEq)]
pub struct RegionalView {
    pub title: String,
    pub heatmap: HeatmapSpec,
    pub choropleth: ChoroplethSpec,
    pub region_totals: Vec<RankedItem>,
}

pub fn render(filtered: &SalesTable) -> Result<RegionalView, StatsError> {
    let matrix = SalesAggregator::region_state_matrix(filtered)?;
    // The map only gets the states present in the data; absent states are not zero-filled
    let state_totals = SalesAggregator::state_totals(filtered)?;
    let region_totals = SalesAggregator::region_totals(filtered)?;

    Ok(RegionalView {
        title: "Regional Sales Analysis".to_string(),
        heatmap: HeatmapSpec {
            title: "Sales Heatmap by Region and State".to_string(),
            x_label: "State".to_string(),
            y_label: "Region".to_string(),
            rows: matrix.rows,
            columns: matrix.columns,
            values: matrix.values,
            scale: ColorScale::YlGnBu,
        },
        choropleth: ChoroplethSpec::new(
            "Sales by State",
            "Total Sales ($)",
            state_totals.into_iter().map(|item| (item.name, item.value)),
            ColorScale::Blues,
        ),
        region_totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{sample_table, Row};

    fn rows() -> Vec<Row> {
        vec![
            Row::new("A1", "01/01/2020", "West", "California", "Chairs", 100.0, 1),
            Row::new("A2", "01/01/2020", "East", "New York", "Chairs", 40.0, 1),
            Row::new("A3", "01/01/2020", "East", "Pennsylvania", "Chairs", 60.0, 1),
        ]
    }

    #[test]
    fn heatmap_fills_missing_pairs_with_zero() {
        let view = render(&sample_table(&rows())).unwrap();
        let heatmap = &view.heatmap;
        assert_eq!(heatmap.rows, ["East", "West"]);
        assert_eq!(heatmap.columns, ["California", "New York", "Pennsylvania"]);
        assert_eq!(heatmap.values, [vec![0.0, 40.0, 60.0], vec![100.0, 0.0, 0.0]]);
    }

    #[test]
    fn choropleth_lists_only_states_with_sales() {
        let view = render(&sample_table(&rows())).unwrap();
        let codes: Vec<Option<&str>> = view.choropleth.entries.iter().map(|e| e.code).collect();
        assert_eq!(codes, [Some("CA"), Some("NY"), Some("PA")]);
        assert!(view.choropleth.entry_for_code("TX").is_none());
    }

    #[test]
    fn region_totals_sum_states() {
        let view = render(&sample_table(&rows())).unwrap();
        assert_eq!(view.region_totals[0], RankedItem { name: "East".into(), value: 100.0 });
    }
}
