//! Chart aggregators.
//!
//! Both functions are pure: the output depends only on the table and the
//! current control values. Unknown sites and inverted payload ranges produce
//! empty charts rather than errors.

use std::collections::BTreeMap;

use tracing::debug;

use crate::chart::{ChartSpec, PieChart, PieSlice, ScatterChart, ScatterPoint, ScatterSeries};
use crate::record::{Outcome, PayloadRange, SiteSelection};
use crate::table::LaunchTable;

/// Slice color for successful launches.
pub const SUCCESS_COLOR: &str = "green";

/// Slice color for failed launches.
pub const FAILURE_COLOR: &str = "red";

/// Pie chart of launch outcomes.
///
/// For [`SiteSelection::All`] there is one slice per site whose value is the
/// number of successful launches there (a sum of outcome flags, not a rate),
/// ordered by site name. For a single site there is one slice per outcome
/// observed at that site, labelled `1`/`0` and colored green/red, largest
/// first.
#[must_use]
pub fn site_outcome_pie(table: &LaunchTable, selection: &SiteSelection) -> ChartSpec {
    let pie = match selection {
        SiteSelection::All => {
            let mut successes: BTreeMap<&str, u64> = BTreeMap::new();
            for record in table {
                *successes.entry(record.site.as_str()).or_default() +=
                    u64::from(record.outcome.flag());
            }

            PieChart {
                title: "Total Success Launches by Site".to_string(),
                slices: successes
                    .into_iter()
                    .map(|(site, total)| PieSlice::new(site, total))
                    .collect(),
            }
        }
        SiteSelection::Site(site) => {
            let mut counts: BTreeMap<Outcome, u64> = BTreeMap::new();
            for record in table.iter().filter(|r| r.site == *site) {
                *counts.entry(record.outcome).or_default() += 1;
            }

            let mut counts: Vec<(Outcome, u64)> = counts.into_iter().collect();
            // Largest count first; on a tie success comes first.
            counts.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

            PieChart {
                title: format!("Success vs Failure for site {site}"),
                slices: counts
                    .into_iter()
                    .map(|(outcome, count)| {
                        PieSlice::new(outcome.to_string(), count).with_color(outcome_color(outcome))
                    })
                    .collect(),
            }
        }
    };

    debug!(site = %selection, slices = pie.slices.len(), "Built outcome pie");
    ChartSpec::Pie(pie)
}

/// Scatter plot of payload mass against outcome.
///
/// Keeps records whose payload lies in the closed `range` and whose site
/// passes `selection`, grouping points by booster category in
/// first-appearance order.
#[must_use]
pub fn payload_outcome_scatter(
    table: &LaunchTable,
    selection: &SiteSelection,
    range: PayloadRange,
) -> ChartSpec {
    let mut series: Vec<ScatterSeries> = Vec::new();
    for record in table
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .filter(|r| selection.matches(&r.site))
    {
        let point = ScatterPoint {
            x: record.payload_mass_kg,
            y: f64::from(record.outcome.flag()),
            site: record.site.clone(),
        };
        match series.iter_mut().find(|s| s.name == record.booster_category) {
            Some(group) => group.points.push(point),
            None => series.push(ScatterSeries {
                name: record.booster_category.clone(),
                points: vec![point],
            }),
        }
    }

    let title = match selection {
        SiteSelection::All => "Correlation between Payload and Success for All Sites".to_string(),
        SiteSelection::Site(site) => {
            format!("Correlation between Payload and Success for site {site}")
        }
    };

    let chart = ScatterChart {
        title,
        x_title: "Payload Mass (kg)".to_string(),
        y_title: "class".to_string(),
        series,
    };

    debug!(
        site = %selection,
        low = range.low,
        high = range.high,
        points = chart.point_count(),
        "Built payload scatter"
    );
    ChartSpec::Scatter(chart)
}

fn outcome_color(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => SUCCESS_COLOR,
        Outcome::Failure => FAILURE_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LaunchRecord;

    fn record(site: &str, outcome: Outcome, kg: f64, booster: &str) -> LaunchRecord {
        LaunchRecord::new(site, outcome, kg, booster)
    }

    fn table() -> LaunchTable {
        use Outcome::{Failure, Success};
        LaunchTable::from_records(vec![
            record("CCAFS LC-40", Failure, 0.0, "v1.0"),
            record("CCAFS LC-40", Success, 525.0, "v1.0"),
            record("CCAFS LC-40", Success, 677.0, "v1.0"),
            record("VAFB SLC-4E", Failure, 500.0, "v1.1"),
            record("CCAFS LC-40", Failure, 3170.0, "v1.1"),
            record("KSC LC-39A", Success, 2490.0, "FT"),
            record("CCAFS LC-40", Success, 4535.0, "FT"),
            record("VAFB SLC-4E", Success, 9600.0, "FT"),
            record("KSC LC-39A", Success, 5300.0, "FT"),
            record("CCAFS SLC-40", Failure, 6070.0, "B4"),
            record("KSC LC-39A", Failure, 3600.0, "B4"),
        ])
        .unwrap()
    }

    fn pie(spec: &ChartSpec) -> &PieChart {
        spec.as_pie().expect("pie chart")
    }

    fn scatter(spec: &ChartSpec) -> &ScatterChart {
        spec.as_scatter().expect("scatter chart")
    }

    #[test]
    fn test_all_sites_pie_sums_successes() {
        let spec = site_outcome_pie(&table(), &SiteSelection::All);
        let pie = pie(&spec);

        assert_eq!(pie.title, "Total Success Launches by Site");
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
        );
        assert_eq!(pie.slice("CCAFS LC-40").unwrap().value, 3);
        assert_eq!(pie.slice("CCAFS SLC-40").unwrap().value, 0);
        assert_eq!(pie.slice("KSC LC-39A").unwrap().value, 2);
        assert_eq!(pie.slice("VAFB SLC-4E").unwrap().value, 1);
        assert!(pie.slices.iter().all(|s| s.color.is_none()));
    }

    #[test]
    fn test_all_sites_pie_matches_manual_sum() {
        let table = table();
        let spec = site_outcome_pie(&table, &SiteSelection::All);
        let pie = pie(&spec);

        assert_eq!(pie.slices.len(), table.sites().len());
        for site in table.sites() {
            let manual: u64 = table
                .iter()
                .filter(|r| &r.site == site)
                .map(|r| u64::from(r.outcome.flag()))
                .sum();
            assert_eq!(pie.slice(site).unwrap().value, manual, "site {site}");
        }
    }

    #[test]
    fn test_single_site_pie_counts_outcomes() {
        let spec = site_outcome_pie(&table(), &SiteSelection::from("CCAFS LC-40"));
        let pie = pie(&spec);

        assert_eq!(pie.title, "Success vs Failure for site CCAFS LC-40");
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0], PieSlice::new("1", 3).with_color("green"));
        assert_eq!(pie.slices[1], PieSlice::new("0", 2).with_color("red"));
    }

    #[test]
    fn test_single_site_pie_tie_puts_success_first() {
        let spec = site_outcome_pie(&table(), &SiteSelection::from("VAFB SLC-4E"));
        let pie = pie(&spec);

        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0].label, "1");
        assert_eq!(pie.slices[1].label, "0");
    }

    #[test]
    fn test_single_site_pie_with_one_outcome() {
        let spec = site_outcome_pie(&table(), &SiteSelection::from("CCAFS SLC-40"));
        let pie = pie(&spec);

        assert_eq!(pie.slices, vec![PieSlice::new("0", 1).with_color("red")]);
    }

    #[test]
    fn test_unknown_site_pie_is_empty() {
        let spec = site_outcome_pie(&table(), &SiteSelection::from("Boca Chica"));
        let pie = pie(&spec);

        assert!(pie.slices.is_empty());
        assert_eq!(pie.title, "Success vs Failure for site Boca Chica");
    }

    #[test]
    fn test_empty_table_pie() {
        let table = LaunchTable::from_records(Vec::new()).unwrap();
        let spec = site_outcome_pie(&table, &SiteSelection::All);
        assert!(pie(&spec).slices.is_empty());
    }

    #[test]
    fn test_pie_is_idempotent() {
        let table = table();
        for selection in [SiteSelection::All, SiteSelection::from("KSC LC-39A")] {
            assert_eq!(
                site_outcome_pie(&table, &selection),
                site_outcome_pie(&table, &selection)
            );
        }
    }

    #[test]
    fn test_scatter_full_range_returns_every_record() {
        let table = table();
        let range = table.payload_range().unwrap();
        let spec = payload_outcome_scatter(&table, &SiteSelection::All, range);
        let chart = scatter(&spec);

        assert_eq!(chart.point_count(), table.len());
        assert_eq!(
            chart.title,
            "Correlation between Payload and Success for All Sites"
        );
        assert_eq!(chart.x_title, "Payload Mass (kg)");
        assert_eq!(chart.y_title, "class");
    }

    #[test]
    fn test_scatter_groups_by_booster_in_first_appearance_order() {
        let table = table();
        let spec = payload_outcome_scatter(&table, &SiteSelection::All, PayloadRange::new(0.0, 10_000.0));
        let chart = scatter(&spec);

        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["v1.0", "v1.1", "FT", "B4"]);
        let ft = chart.series("FT").unwrap();
        let xs: Vec<f64> = ft.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, [2490.0, 4535.0, 9600.0, 5300.0]);
    }

    #[test]
    fn test_scatter_y_is_outcome_flag() {
        let spec = payload_outcome_scatter(
            &table(),
            &SiteSelection::All,
            PayloadRange::new(500.0, 500.0),
        );
        let chart = scatter(&spec);

        assert_eq!(chart.point_count(), 1);
        let point = &chart.series[0].points[0];
        assert!((point.y - 0.0).abs() < f64::EPSILON);
        assert_eq!(point.site, "VAFB SLC-4E");
    }

    #[test]
    fn test_scatter_range_is_inclusive() {
        let spec = payload_outcome_scatter(
            &table(),
            &SiteSelection::All,
            PayloadRange::new(525.0, 2490.0),
        );
        let chart = scatter(&spec);

        let mut xs: Vec<f64> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.x))
            .collect();
        xs.sort_by(f64::total_cmp);
        assert_eq!(xs, [525.0, 677.0, 2490.0]);
    }

    #[test]
    fn test_scatter_filters_site() {
        let spec = payload_outcome_scatter(
            &table(),
            &SiteSelection::from("KSC LC-39A"),
            PayloadRange::new(0.0, 10_000.0),
        );
        let chart = scatter(&spec);

        assert_eq!(chart.point_count(), 3);
        assert!(chart
            .series
            .iter()
            .flat_map(|s| &s.points)
            .all(|p| p.site == "KSC LC-39A"));
        assert_eq!(
            chart.title,
            "Correlation between Payload and Success for site KSC LC-39A"
        );
    }

    #[test]
    fn test_scatter_zero_range_without_zero_payload_is_empty() {
        let table = LaunchTable::from_records(vec![
            record("A", Outcome::Success, 100.0, "FT"),
            record("B", Outcome::Failure, 200.0, "FT"),
        ])
        .unwrap();
        let spec = payload_outcome_scatter(&table, &SiteSelection::All, PayloadRange::new(0.0, 0.0));

        assert_eq!(scatter(&spec).point_count(), 0);
        assert!(scatter(&spec).series.is_empty());
    }

    #[test]
    fn test_scatter_range_outside_observed_values_is_empty() {
        let spec = payload_outcome_scatter(
            &table(),
            &SiteSelection::All,
            PayloadRange::new(9601.0, 20_000.0),
        );
        assert_eq!(scatter(&spec).point_count(), 0);
    }

    #[test]
    fn test_scatter_inverted_range_is_empty() {
        let spec = payload_outcome_scatter(
            &table(),
            &SiteSelection::All,
            PayloadRange::new(10_000.0, 0.0),
        );
        assert_eq!(scatter(&spec).point_count(), 0);
    }

    #[test]
    fn test_scatter_unknown_site_is_empty() {
        let spec = payload_outcome_scatter(
            &table(),
            &SiteSelection::from("Boca Chica"),
            PayloadRange::new(0.0, 10_000.0),
        );
        assert_eq!(scatter(&spec).point_count(), 0);
    }

    #[test]
    fn test_scatter_is_idempotent() {
        let table = table();
        let range = PayloadRange::new(0.0, 5000.0);
        let selection = SiteSelection::from("CCAFS LC-40");
        assert_eq!(
            payload_outcome_scatter(&table, &selection, range),
            payload_outcome_scatter(&table, &selection, range)
        );
    }
}
