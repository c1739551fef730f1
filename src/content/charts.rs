use crate::core::{WidgetId, decimal_to_f64};
use crate::error::DeckResult;
use crate::render::{
    AxisOptions, ChartConfig, ChartDataset, ChartKind, ChartOptions, IndexAxis, LegendOptions,
    LegendPosition,
};

use super::palette;
use super::report::ReportData;

fn bottom_legend() -> LegendOptions {
    LegendOptions {
        display: true,
        position: LegendPosition::Bottom,
        label_color: Some(palette::TEXT_MEDIUM),
    }
}

fn titled_axis(title: &str) -> AxisOptions {
    AxisOptions {
        begin_at_zero: true,
        stacked: false,
        title: Some(title.to_owned()),
    }
}

impl ReportData {
    /// Total market vs online penetration, side by side.
    pub fn market_size_chart(&self) -> DeckResult<ChartConfig> {
        let total = decimal_to_f64(self.market.total_usd_bn, "market total")?;
        let online = decimal_to_f64(self.market.online_usd_bn, "market online")?;

        Ok(ChartConfig::new(ChartKind::Bar, vec!["Indian Handicrafts Market".to_owned()])
            .with_dataset(
                ChartDataset::new(vec![total])
                    .with_label("Total Market Size ($B)")
                    .with_background(palette::SECONDARY_PURPLE)
                    .with_border(palette::PRIMARY_DARK_PURPLE, 1.0),
            )
            .with_dataset(
                ChartDataset::new(vec![online])
                    .with_label("Online Penetration ($B)")
                    .with_background(palette::ACCENT_PINK)
                    .with_border(palette::ACCENT_PINK, 1.0),
            )
            .with_options(ChartOptions {
                y_axis: Some(titled_axis("Value in $ Billions")),
                legend: bottom_legend(),
                ..ChartOptions::default()
            }))
    }

    #[must_use]
    pub fn activation_chart(&self) -> ChartConfig {
        let activated = f64::from(self.kpis.activation_percent);
        ChartConfig::new(
            ChartKind::Doughnut,
            vec!["Activated".to_owned(), "Not Activated".to_owned()],
        )
        .with_dataset(
            ChartDataset::new(vec![activated, 100.0 - activated])
                .with_backgrounds(vec![palette::ACCENT_PINK, palette::PALE_PURPLE])
                .with_border(palette::WHITE, 4.0),
        )
        .with_options(ChartOptions {
            legend: LegendOptions::hidden(),
            tooltip_enabled: false,
            cutout_percent: Some(70.0),
            ..ChartOptions::default()
        })
    }

    pub fn engagement_chart(&self) -> DeckResult<ChartConfig> {
        let gmv = decimal_to_f64(self.kpis.avg_monthly_gmv_inr, "monthly gmv")?;
        Ok(ChartConfig::new(
            ChartKind::Bar,
            vec!["Avg. Listings".to_owned(), "Avg. Monthly GMV (₹)".to_owned()],
        )
        .with_dataset(
            ChartDataset::new(vec![f64::from(self.kpis.avg_listings), gmv])
                .with_label("Target")
                .with_backgrounds(vec![palette::PRIMARY_DARK_PURPLE, palette::ACCENT_BLUE])
                .with_bar_percentage(0.6),
        )
        .with_options(ChartOptions {
            index_axis: IndexAxis::Y,
            x_axis: Some(AxisOptions {
                begin_at_zero: true,
                ..AxisOptions::default()
            }),
            legend: LegendOptions::hidden(),
            ..ChartOptions::default()
        }))
    }

    pub fn health_chart(&self) -> DeckResult<ChartConfig> {
        let cpa = decimal_to_f64(self.kpis.cpa_inr, "cpa")?;
        Ok(ChartConfig::new(
            ChartKind::Bar,
            vec!["Unique Catalog ↑ (%)".to_owned(), "CPA (₹) ↓".to_owned()],
        )
        .with_dataset(
            ChartDataset::new(vec![f64::from(self.kpis.catalog_increase_percent), cpa])
                .with_label("Target")
                .with_backgrounds(vec![palette::ACCENT_PINK, palette::ACCENT_GREEN])
                .with_bar_percentage(0.6),
        )
        .with_options(ChartOptions {
            y_axis: Some(AxisOptions {
                begin_at_zero: true,
                ..AxisOptions::default()
            }),
            legend: LegendOptions::hidden(),
            ..ChartOptions::default()
        }))
    }

    /// Stacked investment/revenue bars with the net result drawn as a line.
    ///
    /// Investment is plotted below zero.
    pub fn financials_chart(&self) -> DeckResult<ChartConfig> {
        let financials = &self.financials;
        let investment = financials
            .investment_crore
            .iter()
            .map(|value| decimal_to_f64(*value, "investment").map(|v| -v))
            .collect::<DeckResult<Vec<_>>>()?;
        let revenue = financials
            .revenue_crore
            .iter()
            .map(|value| decimal_to_f64(*value, "revenue"))
            .collect::<DeckResult<Vec<_>>>()?;
        let net_profit = financials
            .net_profit_crore
            .iter()
            .map(|value| decimal_to_f64(*value, "net profit"))
            .collect::<DeckResult<Vec<_>>>()?;

        Ok(ChartConfig::new(ChartKind::Bar, financials.years.clone())
            .with_dataset(
                ChartDataset::new(investment)
                    .with_label("Investment")
                    .with_background(palette::ACCENT_PINK),
            )
            .with_dataset(
                ChartDataset::new(revenue)
                    .with_label("Net Revenue")
                    .with_background(palette::PRIMARY_DARK_PURPLE),
            )
            .with_dataset(
                ChartDataset::new(net_profit)
                    .with_label("Net Profit/Loss")
                    .with_background(palette::SECONDARY_PURPLE)
                    .with_border(palette::SECONDARY_PURPLE, 3.0)
                    .as_line(0.1),
            )
            .with_options(ChartOptions {
                x_axis: Some(AxisOptions {
                    stacked: true,
                    ..AxisOptions::default()
                }),
                y_axis: Some(AxisOptions {
                    stacked: true,
                    ..titled_axis("Amount in ₹ Crore")
                }),
                legend: bottom_legend(),
                ..ChartOptions::default()
            }))
    }

    /// Every chart widget of the deck with its configuration, in page order.
    pub fn chart_catalog(&self) -> DeckResult<Vec<(WidgetId, ChartConfig)>> {
        Ok(vec![
            (WidgetId::new("market-size"), self.market_size_chart()?),
            (WidgetId::new("activation"), self.activation_chart()),
            (WidgetId::new("engagement"), self.engagement_chart()?),
            (WidgetId::new("health"), self.health_chart()?),
            (WidgetId::new("financials"), self.financials_chart()?),
        ])
    }
}
