use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use floatchat_core::{detect_region, reference, RegionKey, RUNTIME_FALLBACK};
use floatchat_dataset::plot::{Axis, PlotKind, PlotPoint, PlotSeries, PlotSpec, XValue};
use floatchat_dataset::{ArgoDataset, ArgoMeasurement, MOCK_REGIONS};
use floatchat_observability::AppMetrics;
use floatchat_storage::{expiry_after, ChatMessage, DashboardSession, SessionRepository};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

pub const DASHBOARD_GREETING: &str =
    "Hello! I'm FloatChat, your ARGO ocean data assistant. How can I help you explore ocean data today?";

pub const DASHBOARD_HELP: &str = "I can help you explore ARGO ocean data. Try asking about temperature, salinity, or specific ocean regions. For example, you could ask 'Show me temperature trends in the Atlantic Ocean' or 'What is the current salinity in the Pacific?'";

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "greetings"];

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("session `{0}` not found")]
    SessionNotFound(String),
    #[error("query text is empty")]
    EmptyQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Text,
    Plot,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReply {
    pub kind: ReplyKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<PlotSpec>,
}

impl DashboardReply {
    fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            content: content.into(),
            plot: None,
        }
    }

    fn plot(content: impl Into<String>, plot: PlotSpec) -> Self {
        Self {
            kind: ReplyKind::Plot,
            content: content.into(),
            plot: Some(plot),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub global_view: PlotSpec,
    pub temperature: PlotSpec,
    pub salinity: PlotSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardChatReply {
    pub session_id: String,
    #[serde(flatten)]
    pub reply: DashboardReply,
}

#[derive(Debug, Clone, Copy)]
enum Metric {
    Temperature,
    Salinity,
}

impl Metric {
    fn label(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Salinity => "Salinity",
        }
    }

    fn read(self, row: &ArgoMeasurement) -> f64 {
        match self {
            Self::Temperature => row.temperature,
            Self::Salinity => row.salinity,
        }
    }
}

pub struct DashboardAgent<S>
where
    S: SessionRepository,
{
    store: Arc<S>,
    metrics: Arc<AppMetrics>,
    rng: Mutex<StdRng>,
    session_ttl: Duration,
}

impl<S> DashboardAgent<S>
where
    S: SessionRepository,
{
    pub fn new(store: Arc<S>, metrics: Arc<AppMetrics>, session_ttl: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            metrics,
            rng: Mutex::new(rng),
            session_ttl,
        }
    }

    pub async fn create_session(&self) -> Result<DashboardSession> {
        let dataset = {
            let mut rng = self.rng.lock();
            ArgoDataset::generate_with(&mut *rng, Utc::now())
        };
        let session = DashboardSession::new(dataset, self.session_ttl);
        self.store.upsert_session(&session).await?;
        info!(session_id = %session.session_id, rows = session.dataset.len(), "dashboard session created");
        Ok(session)
    }

    #[instrument(skip(self, text))]
    pub async fn handle_chat(
        &self,
        session_id: Option<&str>,
        text: &str,
    ) -> Result<DashboardChatReply> {
        let started = Instant::now();
        self.metrics.inc_request();

        let text = text.trim();
        if text.is_empty() {
            return Err(DashboardError::EmptyQuery.into());
        }

        let session = match session_id {
            Some(id) => self
                .store
                .load_session(id)
                .await?
                .ok_or_else(|| DashboardError::SessionNotFound(id.to_string()))?,
            None => self.create_session().await?,
        };

        let reply = self.process_query(text, &session.dataset);
        match reply.kind {
            ReplyKind::Plot => self.metrics.inc_plot_reply(),
            ReplyKind::Text if reply.content == DASHBOARD_HELP => self.metrics.inc_default_reply(),
            ReplyKind::Text => {}
        }

        self.store
            .append_messages(
                &session.session_id,
                vec![
                    ChatMessage::user(text),
                    ChatMessage::assistant(reply.content.clone(), reply.plot.clone()),
                ],
                expiry_after(Utc::now(), self.session_ttl),
            )
            .await?;

        self.metrics.observe_latency(started.elapsed());
        info!(
            session_id = %session.session_id,
            kind = ?reply.kind,
            points = reply.plot.as_ref().map(PlotSpec::point_count).unwrap_or(0),
            "dashboard query handled"
        );

        Ok(DashboardChatReply {
            session_id: session.session_id,
            reply,
        })
    }

    pub async fn transcript(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let session = self.require_session(session_id).await?;
        Ok(session.messages)
    }

    pub async fn overview(&self, session_id: &str) -> Result<DashboardOverview> {
        let session = self.require_session(session_id).await?;
        Ok(build_overview(&session.dataset, Utc::now()))
    }

    pub async fn purge_expired_sessions(&self) -> Result<u64> {
        self.store.purge_expired(Utc::now()).await
    }

    pub fn process_query(&self, query: &str, dataset: &ArgoDataset) -> DashboardReply {
        self.process_query_at(query, dataset, Utc::now())
    }

    pub fn process_query_at(
        &self,
        query: &str,
        dataset: &ArgoDataset,
        now: DateTime<Utc>,
    ) -> DashboardReply {
        let query = query.to_lowercase();
        let words = query
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>();
        let region = detect_region(&query);
        let mentions_temperature = query.contains("temperature");
        let mentions_salinity = query.contains("salinity");

        if words.iter().any(|word| GREETING_WORDS.contains(word)) {
            return DashboardReply::text(DASHBOARD_GREETING);
        }

        if mentions_temperature && (query.contains("trend") || query.contains("change")) {
            return temperature_trend(dataset, region);
        }

        if let Some(key) = region {
            let metric = if mentions_temperature {
                Some(Metric::Temperature)
            } else if mentions_salinity {
                Some(Metric::Salinity)
            } else {
                None
            };
            return region_reply(dataset, key, metric, now);
        }

        if mentions_temperature {
            return DashboardReply::plot(
                "Here are recent ocean temperature measurements from ARGO floats:",
                recent_geo(dataset, Metric::Temperature, now),
            );
        }

        if mentions_salinity {
            return DashboardReply::plot(
                "Here are recent ocean salinity measurements from ARGO floats:",
                recent_geo(dataset, Metric::Salinity, now),
            );
        }

        if query.contains("float") || query.contains("argo") {
            let picked = {
                let mut rng = self.rng.lock();
                dataset.pick_float(&mut *rng).map(str::to_string)
            };
            let outcome = picked.and_then(|id| {
                let plot = float_series(dataset, &id)?;
                Ok((id, plot))
            });
            return match outcome {
                Ok((id, plot)) => {
                    DashboardReply::plot(format!("Here's data from ARGO float {id}:"), plot)
                }
                Err(err) => {
                    warn!(error = %err, "float series unavailable");
                    self.metrics.inc_fallback();
                    DashboardReply::text(RUNTIME_FALLBACK)
                }
            };
        }

        DashboardReply::text(DASHBOARD_HELP)
    }

    async fn require_session(&self, session_id: &str) -> Result<DashboardSession> {
        let session = self
            .store
            .load_session(session_id)
            .await?
            .ok_or_else(|| DashboardError::SessionNotFound(session_id.to_string()))?;
        Ok(session)
    }
}

pub fn build_overview(dataset: &ArgoDataset, now: DateTime<Utc>) -> DashboardOverview {
    let recent = dataset.recent_at(now);
    let mut global_view = PlotSpec::new(
        PlotKind::ScatterGeo,
        "Recent ARGO Float Locations",
        "longitude",
        "latitude",
    )
    .colored_by("region");
    for region in &MOCK_REGIONS {
        let points = recent
            .iter()
            .filter(|row| row.region == region.name)
            .map(|row| geo_point(row, None, &row.float_id))
            .collect();
        global_view = global_view.with_series(series(region.name, points));
    }

    let means = dataset.mean_by_region();
    let bar = |metric: Metric| {
        let points = means
            .iter()
            .map(|mean| PlotPoint {
                x: XValue::Text(mean.region.clone()),
                y: match metric {
                    Metric::Temperature => mean.temperature,
                    Metric::Salinity => mean.salinity,
                },
                value: None,
                label: None,
            })
            .collect();
        PlotSpec::new(
            PlotKind::Bar,
            format!("Average {} by Ocean Region", metric.title()),
            "region",
            metric.label(),
        )
        .with_series(series(metric.title(), points))
    };

    DashboardOverview {
        global_view,
        temperature: bar(Metric::Temperature),
        salinity: bar(Metric::Salinity),
    }
}

fn temperature_trend(dataset: &ArgoDataset, region: Option<RegionKey>) -> DashboardReply {
    let yearly = dataset
        .yearly_mean_temperature()
        .into_iter()
        .filter(|mean| region.map_or(true, |key| floatchat_dataset::region_matches(&mean.region, key)))
        .collect::<Vec<_>>();

    let first_year = yearly.iter().map(|mean| mean.year).min().unwrap_or_default();
    let last_year = yearly.iter().map(|mean| mean.year).max().unwrap_or_default();
    let mut plot = PlotSpec::new(
        PlotKind::Line,
        format!("Ocean Temperature Trends by Region ({first_year}-{last_year})"),
        "year",
        "temperature",
    );
    for region in &MOCK_REGIONS {
        let points = yearly
            .iter()
            .filter(|mean| mean.region == region.name)
            .map(|mean| PlotPoint {
                x: XValue::Number(f64::from(mean.year)),
                y: mean.temperature,
                value: None,
                label: None,
            })
            .collect::<Vec<_>>();
        if !points.is_empty() {
            plot = plot.with_series(series(region.name, points));
        }
    }

    let content = match region {
        Some(key) => format!(
            "Here's the temperature trend in the {} over the past 5 years:",
            reference::region(key).name
        ),
        None => "Here's the ocean temperature trend by region over the past 5 years:".to_string(),
    };
    DashboardReply::plot(content, plot)
}

fn region_reply(
    dataset: &ArgoDataset,
    key: RegionKey,
    metric: Option<Metric>,
    now: DateTime<Utc>,
) -> DashboardReply {
    let name = reference::region(key).name;
    let rows = dataset.for_ocean(key);

    match metric {
        Some(metric) => {
            let points = rows
                .iter()
                .map(|row| PlotPoint {
                    x: XValue::Text(row.date.format("%Y-%m-%d").to_string()),
                    y: metric.read(row),
                    value: Some(row.latitude),
                    label: Some(row.float_id.clone()),
                })
                .collect();
            let plot = PlotSpec::new(
                PlotKind::Scatter,
                format!("{} Measurements in {}", metric.title(), name),
                "date",
                metric.label(),
            )
            .colored_by("latitude")
            .with_series(series(name, points));
            DashboardReply::plot(
                format!("Here are {} measurements from the {}:", metric.label(), name),
                plot,
            )
        }
        None => {
            let cutoff = now - Duration::days(floatchat_dataset::RECENT_WINDOW_DAYS);
            let points = rows
                .iter()
                .filter(|row| row.date > cutoff)
                .map(|row| geo_point(row, Some(row.temperature), &row.float_id))
                .collect();
            let plot = PlotSpec::new(
                PlotKind::ScatterGeo,
                format!("Recent ARGO Float Measurements in {name}"),
                "longitude",
                "latitude",
            )
            .colored_by("temperature")
            .with_series(series(name, points));
            DashboardReply::plot(format!("Here are recent measurements from the {name}:"), plot)
        }
    }
}

fn recent_geo(dataset: &ArgoDataset, metric: Metric, now: DateTime<Utc>) -> PlotSpec {
    let points = dataset
        .recent_at(now)
        .into_iter()
        .map(|row| geo_point(row, Some(metric.read(row)), &row.region))
        .collect();
    PlotSpec::new(
        PlotKind::ScatterGeo,
        format!("Recent Ocean {} Measurements", metric.title()),
        "longitude",
        "latitude",
    )
    .colored_by(metric.label())
    .with_series(series("measurements", points))
}

fn float_series(
    dataset: &ArgoDataset,
    float_id: &str,
) -> Result<PlotSpec, floatchat_dataset::DatasetError> {
    let mut rows = dataset.for_float(float_id)?;
    rows.sort_by_key(|row| row.date);

    let trace = |metric: Metric, axis: Axis| PlotSeries {
        name: metric.title().to_string(),
        axis,
        points: rows
            .iter()
            .map(|row| PlotPoint {
                x: XValue::Text(row.date.format("%Y-%m-%d").to_string()),
                y: metric.read(row),
                value: None,
                label: None,
            })
            .collect(),
    };

    Ok(PlotSpec::new(
        PlotKind::Line,
        format!("Measurements from ARGO Float {float_id}"),
        "Date",
        "Temperature (°C)",
    )
    .with_secondary_axis("Salinity (PSU)")
    .with_series(trace(Metric::Temperature, Axis::Primary))
    .with_series(trace(Metric::Salinity, Axis::Secondary)))
}

fn geo_point(row: &ArgoMeasurement, value: Option<f64>, label: &str) -> PlotPoint {
    PlotPoint {
        x: XValue::Number(row.longitude),
        y: row.latitude,
        value,
        label: Some(label.to_string()),
    }
}

fn series(name: &str, points: Vec<PlotPoint>) -> PlotSeries {
    PlotSeries {
        name: name.to_string(),
        axis: Axis::Primary,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floatchat_storage::MemoryStore;
    use rand::rngs::StdRng;

    fn agent() -> DashboardAgent<MemoryStore> {
        DashboardAgent::new(
            Arc::new(MemoryStore::new()),
            AppMetrics::shared(),
            Duration::hours(1),
            Some(5),
        )
    }

    fn dataset() -> ArgoDataset {
        ArgoDataset::generate_with(&mut StdRng::seed_from_u64(9), Utc::now())
    }

    fn kind_and_title(reply: &DashboardReply) -> (ReplyKind, Option<&str>) {
        (reply.kind, reply.plot.as_ref().map(|plot| plot.title.as_str()))
    }

    #[test]
    fn greeting_needs_a_whole_word() {
        let agent = agent();
        let data = dataset();
        assert_eq!(agent.process_query("Hi there", &data).content, DASHBOARD_GREETING);
        assert_eq!(agent.process_query("this is odd", &data).content, DASHBOARD_HELP);
    }

    #[test]
    fn temperature_trend_is_a_line_per_region() {
        let agent = agent();
        let reply = agent.process_query("show the temperature trend", &dataset());
        let plot = reply.plot.expect("plot");
        assert_eq!(plot.kind, PlotKind::Line);
        assert_eq!(plot.series.len(), MOCK_REGIONS.len());
    }

    #[test]
    fn recent_temperature_and_salinity_maps() {
        let agent = agent();
        let data = dataset();
        let now = data.generated_at();

        let reply = agent.process_query_at("temperature please", &data, now);
        assert_eq!(
            kind_and_title(&reply),
            (ReplyKind::Plot, Some("Recent Ocean Temperature Measurements"))
        );
        assert_eq!(reply.plot.unwrap().point_count(), 35);

        let reply = agent.process_query_at("what is the salinity", &data, now);
        assert_eq!(
            kind_and_title(&reply),
            (ReplyKind::Plot, Some("Recent Ocean Salinity Measurements"))
        );
    }

    #[test]
    fn region_queries_use_both_halves() {
        let agent = agent();
        let data = dataset();
        let now = data.generated_at();

        let reply = agent.process_query_at("salinity in the atlantic", &data, now);
        assert_eq!(reply.content, "Here are salinity measurements from the Atlantic Ocean:");
        assert_eq!(reply.plot.unwrap().point_count(), 2 * 61 * 5);

        let reply = agent.process_query_at("pacific", &data, now);
        assert_eq!(reply.content, "Here are recent measurements from the Pacific Ocean:");
        assert_eq!(reply.plot.unwrap().point_count(), 10);
    }

    #[test]
    fn float_query_plots_two_axes() {
        let agent = agent();
        let reply = agent.process_query("show me an argo float", &dataset());
        assert!(reply.content.starts_with("Here's data from ARGO float ARGO_"));
        let plot = reply.plot.unwrap();
        assert_eq!(plot.series.len(), 2);
        assert_eq!(plot.series[1].axis, Axis::Secondary);
    }

    #[test]
    fn float_query_on_empty_dataset_falls_back() {
        let agent = agent();
        let empty = ArgoDataset::from_rows(Utc::now(), Vec::new());
        let reply = agent.process_query("float", &empty);
        assert_eq!(reply.content, RUNTIME_FALLBACK);
    }

    #[test]
    fn overview_has_three_tabs() {
        let data = dataset();
        let overview = build_overview(&data, data.generated_at());
        assert_eq!(overview.global_view.point_count(), 35);
        assert_eq!(overview.temperature.series[0].points.len(), 7);
        assert_eq!(overview.salinity.title, "Average Salinity by Ocean Region");
    }

    #[test]
    fn chat_reply_is_flat_on_the_wire() {
        let reply = DashboardChatReply {
            session_id: "abc".to_string(),
            reply: DashboardReply::text(DASHBOARD_HELP),
        };
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["session_id"], "abc");
        assert_eq!(value["kind"], "text");
        assert!(value.get("plot").is_none());
    }

    #[tokio::test]
    async fn chat_records_transcript() {
        let agent = agent();
        let first = agent.handle_chat(None, "temperature").await.unwrap();
        agent
            .handle_chat(Some(&first.session_id), "hello")
            .await
            .unwrap();

        let transcript = agent.transcript(&first.session_id).await.unwrap();
        assert_eq!(transcript.len(), 4);
        assert!(transcript[1].plot.is_some());
        assert!(transcript[3].plot.is_none());
    }

    #[tokio::test]
    async fn huge_ttl_does_not_overflow() {
        let agent = DashboardAgent::new(
            Arc::new(MemoryStore::new()),
            AppMetrics::shared(),
            Duration::days(365 * 300_000),
            Some(5),
        );
        let first = agent.handle_chat(None, "salinity").await.unwrap();
        agent
            .handle_chat(Some(&first.session_id), "hello")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expired_session_is_not_found() {
        let agent = DashboardAgent::new(
            Arc::new(MemoryStore::new()),
            AppMetrics::shared(),
            Duration::seconds(-1),
            Some(5),
        );
        let session = agent.create_session().await.unwrap();
        let err = agent
            .handle_chat(Some(&session.session_id), "hello")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn unknown_session_is_an_error() {
        let agent = agent();
        let err = agent.handle_chat(Some("nope"), "hello").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::SessionNotFound(_))
        ));
    }
}
