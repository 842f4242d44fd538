// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writes an SVG snapshot of every chart type, plus a few mid-animation frames.
//!
//! Usage: `amchart_demo [OUT_DIR]` (default `amchart_demo_out`). Set
//! `RUST_LOG=amchart_charts=debug` to see reload traces.

mod svg;

use std::error::Error;
use std::path::{Path, PathBuf};

use amchart_charts::{
    AxisSpec, BarChart, BarChartConfig, BarDataSource, ChartView, IndexPath, LineChart,
    LineChartConfig, LineDataSource, MarkerType, PieChart, PieChartConfig, PieChartDelegate,
    PieDataSource, RadarChart, RadarChartConfig, RadarDataSource, ReloadEnv, ScatterChart,
    ScatterChartConfig, ScatterDataSource, ScatterValue,
};
use amchart_core::{FontWeight, HeuristicTextMeasurer, Scene, TextStyle, TransitionLog};
use kurbo::{Point, Size};
use peniko::Color;
use peniko::color::palette::css;
use tracing::info;
use tracing_subscriber::EnvFilter;

const VIEW: Size = Size::new(480.0, 320.0);
const SQUARE: Size = Size::new(360.0, 360.0);

const PALETTE: [Color; 4] = [css::STEEL_BLUE, css::TOMATO, css::SEA_GREEN, css::GOLDENROD];

struct Sales {
    quarters: Vec<Vec<f64>>,
}

impl BarDataSource for Sales {
    fn number_of_sections(&self) -> usize {
        self.quarters.len()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.quarters[section].len()
    }

    fn value(&self, index: IndexPath) -> f64 {
        self.quarters[index.section][index.row]
    }

    fn color(&self, index: IndexPath) -> Color {
        PALETTE[index.row % PALETTE.len()]
    }

    fn x_label(&self, section: usize) -> String {
        format!("Q{}", section + 1)
    }
}

struct Temperatures {
    series: Vec<Vec<f64>>,
}

impl LineDataSource for Temperatures {
    fn number_of_sections(&self) -> usize {
        self.series.len()
    }

    fn number_of_rows(&self) -> usize {
        self.series.first().map_or(0, Vec::len)
    }

    fn value(&self, index: IndexPath) -> f64 {
        self.series[index.section][index.row]
    }

    fn color(&self, section: usize) -> Color {
        PALETTE[section % PALETTE.len()]
    }

    fn x_label(&self, row: usize) -> String {
        ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .get(row)
            .map_or_else(|| row.to_string(), |day| (*day).to_string())
    }

    fn marker_type(&self, section: usize) -> MarkerType {
        MarkerType::ALL[section % MarkerType::ALL.len()]
    }
}

struct Shares(Vec<f64>);

impl PieDataSource for Shares {
    fn number_of_sections(&self) -> usize {
        self.0.len()
    }

    fn value(&self, section: usize) -> f64 {
        self.0[section]
    }

    fn color(&self, section: usize) -> Color {
        PALETTE[section % PALETTE.len()]
    }
}

struct Skills {
    titles: Vec<&'static str>,
    players: Vec<Vec<f64>>,
}

impl RadarDataSource for Skills {
    fn number_of_sections(&self) -> usize {
        self.players.len()
    }

    fn number_of_rows(&self) -> usize {
        self.titles.len()
    }

    fn value(&self, index: IndexPath) -> f64 {
        self.players[index.section][index.row]
    }

    fn fill_color(&self, section: usize) -> Color {
        PALETTE[section % PALETTE.len()].with_alpha(0.3)
    }

    fn stroke_color(&self, section: usize) -> Color {
        PALETTE[section % PALETTE.len()]
    }

    fn vertex_title(&self, row: usize) -> String {
        self.titles[row].to_string()
    }
}

struct Samples {
    clusters: Vec<Vec<ScatterValue>>,
}

impl ScatterDataSource for Samples {
    fn number_of_sections(&self) -> usize {
        self.clusters.len()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.clusters[section].len()
    }

    fn value(&self, index: IndexPath) -> ScatterValue {
        self.clusters[index.section][index.row]
    }

    fn color(&self, section: usize) -> Color {
        PALETTE[section % PALETTE.len()]
    }

    fn marker_type(&self, section: usize) -> MarkerType {
        [MarkerType::FilledCircle, MarkerType::Cross, MarkerType::Diamond][section % 3]
    }
}

struct SelectionLog;

impl PieChartDelegate for SelectionLog {
    fn did_select_section(&mut self, section: usize) {
        info!(section, "selected");
    }

    fn did_deselect_section(&mut self, section: usize) {
        info!(section, "deselected");
    }
}

fn write_svg(out_dir: &Path, name: &str, scene: &Scene, size: Size) -> Result<(), Box<dyn Error>> {
    let path = out_dir.join(name);
    std::fs::write(&path, svg::scene_to_svg(scene, size))?;
    info!(path = %path.display(), primitives = scene.len(), "wrote");
    Ok(())
}

fn bar_demo(out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let sales = Sales {
        quarters: vec![
            vec![120.0, 80.0, 60.0],
            vec![200.0, 140.0, 90.0],
            vec![90.0, 210.0, 40.0],
            vec![310.0, 120.0, 150.0],
        ],
    };
    let mut chart = BarChart::with_config(
        BarChartConfig::default().with_y_axis(AxisSpec::new(0.0, 600.0, 7)),
    );
    let mut log = TransitionLog::new();
    let mut env = ReloadEnv::new(&HeuristicTextMeasurer, &mut log);
    chart.reload(VIEW, Some(&sales), &mut env)?;
    info!(transitions = log.len(), "bar chart reloaded");
    write_svg(out_dir, "bar.svg", chart.scene(), VIEW)
}

fn line_demo(out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut temperatures = Temperatures {
        series: vec![
            vec![12.0, 14.0, 13.0, 17.0, 21.0, 19.0, 16.0],
            vec![4.0, 6.0, 5.0, 9.0, 11.0, 10.0, 8.0],
        ],
    };
    let mut chart = LineChart::with_config(
        LineChartConfig::default()
            .with_y_axis(AxisSpec::new(0.0, 25.0, 6))
            .with_line_width(2.0),
    );
    let mut log = TransitionLog::new();
    chart.reload(
        VIEW,
        Some(&temperatures),
        &mut ReloadEnv::new(&HeuristicTextMeasurer, &mut log),
    )?;
    chart.finish_animations();
    write_svg(out_dir, "line.svg", chart.scene(), VIEW)?;

    // A second reload morphs from the committed lines.
    for value in &mut temperatures.series[0] {
        *value += 3.0;
    }
    log.take();
    chart.reload(
        VIEW,
        Some(&temperatures),
        &mut ReloadEnv::new(&HeuristicTextMeasurer, &mut log),
    )?;
    let mut frame = chart.scene().clone();
    for transition in log.transitions() {
        if let Some(shape) = frame.shape_mut(transition.layer) {
            shape.path = transition.sample(0.5);
        }
    }
    write_svg(out_dir, "line_morph_half.svg", &frame, VIEW)?;
    chart.finish_animations();
    write_svg(out_dir, "line_updated.svg", chart.scene(), VIEW)
}

fn pie_demo(out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let shares = Shares(vec![35.0, 25.0, 25.0, 15.0]);
    let mut chart = PieChart::with_config(
        PieChartConfig::default()
            .with_donut(true)
            .with_center_label("Market")
            .with_center_label_style(
                TextStyle::new(18.0).with_weight(FontWeight::BOLD),
                css::DIM_GRAY,
            ),
    );
    let mut log = TransitionLog::new();
    chart.reload(
        SQUARE,
        Some(&shares),
        &mut ReloadEnv::new(&HeuristicTextMeasurer, &mut log),
    )?;

    let mut frame = chart.scene().clone();
    for transition in log.transitions() {
        if let Some(shape) = frame.shape_mut(transition.layer) {
            shape.path = transition.sample(0.5);
        }
    }
    write_svg(out_dir, "pie_sweep_half.svg", &frame, SQUARE)?;
    chart.finish_animations();
    write_svg(out_dir, "pie.svg", chart.scene(), SQUARE)?;

    // Tap the middle of the second wedge.
    let target = chart.geometry().zip(chart.sweeps().get(1).copied());
    if let Some((geometry, sweep)) = target {
        let distance = (geometry.radius + geometry.hole_radius) / 2.0;
        let angle = sweep.mid_angle();
        let point = Point::new(
            geometry.center.x + distance * angle.cos(),
            geometry.center.y + distance * angle.sin(),
        );
        let mut delegate = SelectionLog;
        let changes = chart.tap(point, &mut log, Some(&mut delegate));
        info!(changes = changes.len(), "pie tapped");
        write_svg(out_dir, "pie_selected.svg", chart.scene(), SQUARE)?;
    }
    Ok(())
}

fn radar_demo(out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let skills = Skills {
        titles: vec!["Speed", "Power", "Defense", "Stamina", "Technique", "Vision"],
        players: vec![
            vec![4.0, 3.0, 2.5, 4.5, 3.0, 2.0],
            vec![2.0, 4.5, 4.0, 3.0, 2.5, 4.0],
        ],
    };
    let mut chart = RadarChart::with_config(
        RadarChartConfig::default()
            .with_axis_line(css::LIGHT_GRAY, 1.0)
            .with_dotted_lines(true),
    );
    let mut log = TransitionLog::new();
    chart.reload(
        SQUARE,
        Some(&skills),
        &mut ReloadEnv::new(&HeuristicTextMeasurer, &mut log),
    )?;
    chart.finish_animations();
    write_svg(out_dir, "radar.svg", chart.scene(), SQUARE)
}

fn scatter_demo(out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let cluster = |cx: f64, cy: f64| -> Vec<ScatterValue> {
        (0..12)
            .map(|i| {
                let t = i as f64;
                ScatterValue::new(cx + (t * 1.7).sin() * 80.0, cy + (t * 2.3).cos() * 90.0)
            })
            .collect()
    };
    let samples = Samples {
        clusters: vec![cluster(250.0, 300.0), cluster(650.0, 700.0)],
    };
    let mut chart = ScatterChart::with_config(
        ScatterChartConfig::default().with_x_axis(AxisSpec::new(0.0, 1000.0, 6)),
    );
    let mut log = TransitionLog::new();
    chart.reload(
        VIEW,
        Some(&samples),
        &mut ReloadEnv::new(&HeuristicTextMeasurer, &mut log),
    )?;
    chart.finish_animations();
    write_svg(out_dir, "scatter.svg", chart.scene(), VIEW)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("amchart_demo_out"), PathBuf::from);
    std::fs::create_dir_all(&out_dir)?;

    bar_demo(&out_dir)?;
    line_demo(&out_dir)?;
    pie_demo(&out_dir)?;
    radar_demo(&out_dir)?;
    scatter_demo(&out_dir)?;
    Ok(())
}
