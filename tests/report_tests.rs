use activity_insights::aggregator::{analyze, LevelDistribution};
use activity_insights::parser::{load_activity_reader, ActivityLevel};
use activity_insights::report::{
    build_pdf, render_chart_svg, render_pages, ChartKind, ReportConfig,
};
use activity_insights::utils::RenderError;

const TWO_USERS_TWO_DAYS: &str = "\
Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes
A,2016-04-11,3000,1800,10,5,100,600
A,2016-04-12,12000,2600,10,5,100,600
B,2016-04-11,8000,2300,10,5,100,600
B,2016-04-12,6000,2100,10,5,100,600
";

fn scenario() -> activity_insights::aggregator::AnalysisResult {
    analyze(&load_activity_reader(TWO_USERS_TWO_DAYS.as_bytes()).unwrap()).unwrap()
}

#[test]
fn test_three_pages_in_order() {
    let pages = render_pages(&scenario(), &ReportConfig::default()).unwrap();

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].lines()[0], "Bellabeat Case Study Analysis Report");
    assert_eq!(pages[2].lines()[0], "Detailed Analysis Results");
    assert_eq!(pages[1].charts().count(), 4);
    assert_eq!(pages[0].charts().count(), 0);
}

#[test]
fn test_summary_findings_are_computed() {
    let pages = render_pages(&scenario(), &ReportConfig::default()).unwrap();
    let lines = pages[0].lines();

    let expected = [
        "- 4 activity records from 2 unique users",
        "- Data period: 2016-04-11 to 2016-04-12",
        "- Average daily steps: 7,250",
        "- Users spend 10.0 hours/day sedentary",
        "- 0.0% of users are classified as \"Very Active\"",
        "- 0.0% of users fall into \"Sedentary\" category",
        "- Monday shows lowest activity levels",
        "- Strong correlation (1.00) between steps and calories burned",
        "- Target sedentary behavior reduction",
    ];
    for line in expected {
        assert!(lines.iter().any(|l| l == line), "missing line: {}", line);
    }
}

#[test]
fn test_detail_page_lists_every_weekday() {
    let pages = render_pages(&scenario(), &ReportConfig::default()).unwrap();
    let lines = pages[2].lines();

    assert!(lines.contains(&"- Monday: 5,500 average steps".to_string()));
    assert!(lines.contains(&"- Tuesday: 9,000 average steps".to_string()));
    assert!(lines.contains(&"- Sunday: no data".to_string()));
    assert!(lines.contains(&"- Sedentary (<5000 steps): 25.0%".to_string()));
    assert!(lines.contains(&"- Fairly Active users: 50.0%".to_string()));
    assert!(lines.contains(&"- Weekends: no records".to_string()));
    assert!(lines.contains(&"- Target Monday activity improvement campaigns".to_string()));
}

#[test]
fn test_dashboard_chart_kinds() {
    let pages = render_pages(&scenario(), &ReportConfig::default()).unwrap();
    let kinds: Vec<ChartKind> = pages[1].charts().map(|c| c.kind).collect();

    assert_eq!(
        kinds,
        vec![
            ChartKind::Pie,
            ChartKind::VerticalBar,
            ChartKind::Line,
            ChartKind::HorizontalBar
        ]
    );
}

#[test]
fn test_custom_title() {
    let config = ReportConfig::default().with_title("Quarterly Activity Review");
    let pages = render_pages(&scenario(), &config).unwrap();

    assert_eq!(pages[0].lines()[0], "Quarterly Activity Review");
}

#[test]
fn test_missing_distribution_key_fails() {
    let mut result = scenario();
    result.activity_distribution = [(ActivityLevel::Sedentary, 100.0)]
        .into_iter()
        .collect::<LevelDistribution>();

    let err = render_pages(&result, &ReportConfig::default()).unwrap_err();
    match err {
        RenderError::MissingStatistic { section, key } => {
            assert_eq!(section, "activity distribution");
            assert_eq!(key, "Lightly Active");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pdf_has_one_page_per_report_page() {
    let config = ReportConfig::default();
    let pages = render_pages(&scenario(), &config).unwrap();

    let document = build_pdf(&pages, &config).unwrap();

    assert_eq!(document.get_pages().len(), 3);
}

#[test]
fn test_chart_svgs_render() {
    let pages = render_pages(&scenario(), &ReportConfig::default()).unwrap();

    for chart in pages[1].charts() {
        let svg = render_chart_svg(chart);
        assert!(svg.starts_with("<svg"), "{}", chart.slug());
        assert!(svg.contains("</svg>"));
    }
}
