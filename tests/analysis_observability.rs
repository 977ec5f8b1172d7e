use std::sync::{Arc, Mutex};

use rust_data_insights::analysis::{
    generate_charts_with, generate_insights_with, AnalysisEvent, AnalysisObserver, Analyzer,
    ChartKind, ChartOptions, CompositeObserver,
};
use rust_data_insights::ingestion::load_table;
use rust_data_insights::{ErrorKind, InsightError};

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    RuleFailed(ChartKind, ErrorKind),
    Charts(usize),
    Insights(usize),
    FellBack(String),
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<Seen>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<Seen> {
        self.events.lock().unwrap().clone()
    }
}

impl AnalysisObserver for RecordingObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        let seen = match event {
            AnalysisEvent::ChartRuleFailed { rule, error } => Seen::RuleFailed(*rule, error.kind()),
            AnalysisEvent::ChartsGenerated { count } => Seen::Charts(*count),
            AnalysisEvent::InsightsGenerated { count } => Seen::Insights(*count),
            AnalysisEvent::InsightsFellBack { error } => Seen::FellBack(error.to_string()),
        };
        self.events.lock().unwrap().push(seen);
    }
}

#[test]
fn failing_chart_rule_is_reported_and_skipped() {
    let table = load_table(b"category,value\nA,1\nB,2\nA,3\n").unwrap();
    let obs = RecordingObserver::default();
    let options = ChartOptions {
        distribution_bins: Some(0),
    };

    let charts = generate_charts_with(&table, options, &obs);

    let kinds: Vec<ChartKind> = charts.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![ChartKind::Bar, ChartKind::Line, ChartKind::Pie, ChartKind::Box]
    );
    assert_eq!(
        obs.events(),
        vec![
            Seen::RuleFailed(ChartKind::Histogram, ErrorKind::Internal),
            Seen::Charts(4),
        ]
    );
}

#[test]
fn successful_generation_reports_counts_only() {
    let table = load_table(b"x,y\n1,2\n2,4\n3,5\n").unwrap();
    let obs = RecordingObserver::default();

    generate_charts_with(&table, ChartOptions::default(), &obs);
    generate_insights_with(&table, &obs);

    assert_eq!(obs.events(), vec![Seen::Charts(2), Seen::Insights(2)]);
}

#[test]
fn insight_fallback_carries_the_cause() {
    let obs = RecordingObserver::default();

    let empty = load_table(b"a,b\n").unwrap();
    let insights = generate_insights_with(&empty, &obs);
    assert_eq!(insights.len(), 1);

    // A single value skips the summary rule without falling back.
    let single = load_table(b"v\n7\n").unwrap();
    assert!(generate_insights_with(&single, &obs).is_empty());

    assert_eq!(
        obs.events(),
        vec![
            Seen::FellBack(InsightError::EmptyTable.to_string()),
            Seen::Insights(0),
        ]
    );
}

#[test]
fn composite_observer_fans_out_through_the_analyzer() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let analyzer = Analyzer::new().with_observer(Arc::new(CompositeObserver::new(vec![
        a.clone(),
        b.clone(),
    ])));

    let table = load_table(b"v\n1\n2\n3\n").unwrap();
    let analysis = analyzer.analyze(&table);
    assert_eq!(analysis.charts.len(), 1);
    assert_eq!(analysis.insights.len(), 1);

    for obs in [&a, &b] {
        let mut events = obs.events();
        events.sort_by_key(|e| format!("{e:?}"));
        assert_eq!(events, vec![Seen::Charts(1), Seen::Insights(1)]);
    }
}
