use approx::assert_relative_eq;
use scrolldeck::DeckError;
use scrolldeck::content::{ReportData, palette};
use scrolldeck::render::{ChartKind, IndexAxis};

#[test]
fn built_in_report_is_valid() {
    let report = ReportData::vistaar();
    report.validate().expect("valid report");
    assert_eq!(report.sections.len(), 7);
    assert_eq!(report.sections[0].id.as_str(), "hero");
    assert_eq!(report.hero_counters.len(), 3);
    assert_eq!(report.solutions.len(), 3);
    assert_eq!(report.rollout.len(), 3);
    assert_eq!(report.risks.len(), 6);
}

#[test]
fn every_catalog_chart_passes_validation() {
    let catalog = ReportData::vistaar().chart_catalog().expect("catalog");
    let ids: Vec<&str> = catalog.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["market-size", "activation", "engagement", "health", "financials"]
    );
    for (id, config) in &catalog {
        assert!(config.validate().is_ok(), "chart `{id}` should validate");
    }
}

#[test]
fn activation_chart_is_a_doughnut_split() {
    let chart = ReportData::vistaar().activation_chart();
    assert_eq!(chart.kind, ChartKind::Doughnut);
    assert_eq!(chart.datasets[0].data, vec![80.0, 20.0]);
    assert_eq!(chart.options.cutout_percent, Some(70.0));
    assert!(!chart.options.legend.display);
}

#[test]
fn engagement_chart_uses_horizontal_bars() {
    let chart = ReportData::vistaar().engagement_chart().expect("chart");
    assert_eq!(chart.options.index_axis, IndexAxis::Y);
    assert_eq!(chart.datasets[0].data, vec![5.0, 2_500.0]);
}

#[test]
fn financials_plot_investment_below_zero_with_a_profit_line() {
    let chart = ReportData::vistaar().financials_chart().expect("chart");
    assert_eq!(chart.labels, vec!["Year 1".to_owned(), "Year 2".to_owned()]);
    assert_relative_eq!(chart.datasets[0].data[0], -12.0);
    assert_relative_eq!(chart.datasets[0].data[1], -15.0);
    assert_relative_eq!(chart.datasets[2].data[0], -7.2);

    let shape = chart.shape();
    assert_eq!(
        shape.datasets,
        vec![
            (ChartKind::Bar, 2),
            (ChartKind::Bar, 2),
            (ChartKind::Line, 2)
        ]
    );
    assert!(chart.options.y_axis.as_ref().is_some_and(|axis| axis.stacked));
}

#[test]
fn financial_summary_lists_each_year() {
    let summary = ReportData::vistaar().financial_summary();
    assert_eq!(summary.len(), 2);
    assert_eq!(
        summary[0],
        "Year 1: Total Investment: ₹12.0 Cr, Net Revenue: ₹4.8 Cr, Net Profit/Loss: ₹-7.2 Cr"
    );
}

#[test]
fn report_json_round_trips() {
    let report = ReportData::vistaar();
    let json = report.to_json_pretty().expect("serialize");
    let parsed = ReportData::from_json_str(&json).expect("parse");
    assert_eq!(parsed, report);
}

#[test]
fn misaligned_financial_series_are_rejected() {
    let mut report = ReportData::vistaar();
    report.financials.revenue_crore.pop();
    assert!(matches!(report.validate(), Err(DeckError::InvalidData(_))));

    let mut duplicated = ReportData::vistaar();
    duplicated.sections.push(duplicated.sections[0].clone());
    assert!(duplicated.validate().is_err());
}

#[test]
fn palette_colors_render_as_css() {
    assert_eq!(palette::PRIMARY_DARK_PURPLE.to_css(), "#430747");
    assert_eq!(palette::ACCENT_PINK.to_css(), "#ff4081");
}
