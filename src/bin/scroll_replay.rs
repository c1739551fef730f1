use scrolldeck::api::{CounterDisplay, DeckConfig, DeckPage, DeckSnapshot, NavigationOutcome};
use scrolldeck::content::ReportData;
use scrolldeck::core::{RegionBounds, RegionId, SectionId, Viewport, WidgetId};
use scrolldeck::platform::{HeadlessViewport, ManualFrameScheduler, ScrollHost};
use scrolldeck::render::{ChartConfig, RecordingBackend, SurfaceId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: scroll_replay --input <script.json> --output <trace.json> [--report <report.json>]";
const FRAME_INTERVAL_MS: f64 = 16.0;
const DEFAULT_SECTION_HEIGHT: f64 = 900.0;
/// Longest single wait a script may ask for (one hour).
const MAX_WAIT_MS: f64 = 3_600_000.0;

type HeadlessDeck = DeckPage<HeadlessViewport, ManualFrameScheduler, RecordingBackend>;

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScrollScript {
    name: String,
    viewport: ScriptViewport,
    #[serde(default)]
    header_height: f64,
    #[serde(default)]
    config: Option<serde_json::Value>,
    /// Section layout; sections of the report are stacked when empty.
    #[serde(default)]
    sections: Vec<PlacedSection>,
    #[serde(default)]
    counters: Vec<PlacedCounter>,
    #[serde(default)]
    charts: Vec<PlacedChart>,
    steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScriptViewport {
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlacedSection {
    id: String,
    top: f64,
    height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlacedCounter {
    widget: String,
    top: f64,
    height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlacedChart {
    widget: String,
    surface: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScriptStep {
    Scroll { y: f64 },
    Wait { ms: f64 },
    Navigate { target: String },
    RemountChart { widget: String },
    Teardown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TraceStep {
    index: usize,
    step: ScriptStep,
    scroll_y: f64,
    active_section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    navigation_top: Option<f64>,
    counters: Vec<TraceCounter>,
    live_charts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TraceCounter {
    widget: String,
    text: String,
    phase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TraceFile {
    trace_name: String,
    steps: Vec<TraceStep>,
    final_snapshot: DeckSnapshot,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = scrolldeck::telemetry::init_default_tracing();
    let args = parse_args()?;

    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let script: ScrollScript =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;

    let report = match &args.report {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ReportData::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ReportData::vistaar(),
    };

    let trace = replay(&script, &report)?;
    write_json(&args.output, &trace)
}

fn replay(script: &ScrollScript, report: &ReportData) -> Result<TraceFile, String> {
    let config = match &script.config {
        Some(value) => DeckConfig::from_json_str(&value.to_string()).map_err(|err| err.to_string())?,
        None => DeckConfig::default(),
    };
    let viewport = HeadlessViewport::new(
        Viewport::new(script.viewport.width, script.viewport.height),
        script.header_height,
    )
    .map_err(|err| err.to_string())?;
    let mut deck: HeadlessDeck = DeckPage::from_report(
        config,
        report,
        viewport,
        ManualFrameScheduler::new(),
        RecordingBackend::new(),
    )
    .map_err(|err| err.to_string())?;

    let mut next_region = 0_u64;
    let mut place = |deck: &mut HeadlessDeck, top: f64, height: f64| -> Result<RegionId, String> {
        next_region += 1;
        let region = RegionId(next_region);
        let bounds = RegionBounds::new(top, height).map_err(|err| err.to_string())?;
        deck.visibility_mut().place_region(region, bounds);
        Ok(region)
    };

    let sections = if script.sections.is_empty() {
        stacked_sections(report)
    } else {
        script.sections.clone()
    };
    for section in &sections {
        let region = place(&mut deck, section.top, section.height)?;
        deck.mount_section(SectionId::new(section.id.as_str()), region)
            .map_err(|err| err.to_string())?;
    }

    for counter in &script.counters {
        let hero = report
            .hero_counters
            .iter()
            .find(|hero| hero.widget == counter.widget)
            .ok_or_else(|| format!("unknown counter `{}`", counter.widget))?;
        let region = place(&mut deck, counter.top, counter.height)?;
        deck.mount_counter(
            WidgetId::new(counter.widget.as_str()),
            region,
            hero.target,
            CounterDisplay::new(hero.prefix.as_str(), hero.suffix.as_str()),
        )
        .map_err(|err| err.to_string())?;
    }

    let catalog = report.chart_catalog().map_err(|err| err.to_string())?;
    let chart_config = |widget: &str| -> Result<ChartConfig, String> {
        catalog
            .iter()
            .find(|(id, _)| id.as_str() == widget)
            .map(|(_, config)| config.clone())
            .ok_or_else(|| format!("unknown chart `{widget}`"))
    };
    let mut surfaces = Vec::with_capacity(script.charts.len());
    for chart in &script.charts {
        let surface = SurfaceId(chart.surface);
        deck.mount_chart(WidgetId::new(chart.widget.as_str()), surface, chart_config(&chart.widget)?)
            .map_err(|err| err.to_string())?;
        surfaces.push((chart.widget.clone(), surface));
    }
    deck.flush_visibility();

    let mut steps = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let mut navigation_top = None;
        match step {
            ScriptStep::Scroll { y } => {
                deck.scroll_page_to(*y);
            }
            ScriptStep::Wait { ms } => {
                for tick in frame_ticks(*ms).map_err(|err| format!("step {index}: {err}"))? {
                    deck.visibility_mut().advance_clock(tick);
                    let now = deck.visibility().clock_ms();
                    deck.pump_frames(now);
                }
            }
            ScriptStep::Navigate { target } => {
                let activation = deck.navigate_in_place(&SectionId::new(target.as_str()));
                if let NavigationOutcome::Scrolled { top } = activation.outcome {
                    navigation_top = Some(top);
                }
                deck.flush_visibility();
            }
            ScriptStep::RemountChart { widget } => {
                let surface = surfaces
                    .iter()
                    .find(|(id, _)| id == widget)
                    .map(|(_, surface)| *surface)
                    .ok_or_else(|| format!("chart `{widget}` was never mounted"))?;
                deck.mount_chart(WidgetId::new(widget.as_str()), surface, chart_config(widget)?)
                    .map_err(|err| err.to_string())?;
            }
            ScriptStep::Teardown => {
                deck.teardown();
            }
        }
        steps.push(trace_step(index, step, &deck, navigation_top));
    }

    Ok(TraceFile {
        trace_name: script.name.clone(),
        steps,
        final_snapshot: deck.snapshot(),
    })
}

/// Splits a wait into frame-sized clock steps, the last one partial.
fn frame_ticks(ms: f64) -> Result<impl Iterator<Item = f64>, String> {
    if !ms.is_finite() || ms > MAX_WAIT_MS {
        return Err(format!("wait of {ms} ms is outside 0..={MAX_WAIT_MS} ms"));
    }
    let ms = ms.max(0.0);
    let full = (ms / FRAME_INTERVAL_MS).floor() as u64;
    let rest = ms - full as f64 * FRAME_INTERVAL_MS;
    let tail = (rest > 0.0).then_some(rest);
    Ok((0..full).map(|_| FRAME_INTERVAL_MS).chain(tail))
}

fn stacked_sections(report: &ReportData) -> Vec<PlacedSection> {
    report
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| PlacedSection {
            id: section.id.to_string(),
            top: index as f64 * DEFAULT_SECTION_HEIGHT,
            height: DEFAULT_SECTION_HEIGHT,
        })
        .collect()
}

fn trace_step(
    index: usize,
    step: &ScriptStep,
    deck: &HeadlessDeck,
    navigation_top: Option<f64>,
) -> TraceStep {
    let snapshot = deck.snapshot();
    TraceStep {
        index,
        step: step.clone(),
        scroll_y: deck.visibility().scroll_y(),
        active_section: snapshot.active_section.to_string(),
        navigation_top,
        counters: snapshot
            .counters
            .iter()
            .map(|counter| TraceCounter {
                widget: counter.widget.to_string(),
                text: counter.text.clone(),
                phase: format!("{:?}", counter.phase),
            })
            .collect(),
        live_charts: snapshot.live_chart_count(),
    }
}

fn write_json<T: Serialize>(path: &PathBuf, value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    fs::write(path, payload).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut report = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--report" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --report".to_owned())?;
                report = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    let output = output.ok_or_else(|| format!("missing --output\n{USAGE}"))?;
    Ok(CliArgs {
        input,
        output,
        report,
    })
}
