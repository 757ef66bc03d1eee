//! The price-range bar chart shown on the dashboard.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with a HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{html::HeadElement, month::MonthRange, query::PriceRangeCount};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for the chart.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div
                id=(chart.id)
                class="min-h-[380px] rounded dark:bg-gray-100"
            {}
        }
    )
}

/// Generates JavaScript initialization code for the chart.
///
/// The chart follows the browser's dark mode setting and is resized with the window.
pub(super) fn charts_script(chart: &DashboardChart) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        chart.id, chart.options
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// Build the bar chart of the number of transactions in each price range.
pub(super) fn price_range_chart(month: &MonthRange, histogram: &[PriceRangeCount]) -> DashboardChart {
    let labels: Vec<String> = histogram
        .iter()
        .map(|bucket| bucket.range.to_owned())
        .collect();
    let counts: Vec<f64> = histogram.iter().map(|bucket| bucket.count as f64).collect();

    let chart = Chart::new()
        .title(
            Title::new()
                .text("Price Range Statistics")
                .subtext(format!("{} {}", month.month, month.year)),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(bar::Bar::new().name("Transactions").data(counts));

    DashboardChart {
        id: "price-range-chart",
        options: chart.to_string(),
    }
}
