// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `gitglyph`: render a classified commit list to an SVG glyph.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use gitglyph::{
    Annotation, GlyphConfig, GlyphSession, GlyphStats, GoalProgress, JsonSource, LayoutConfig,
    Theme, ThemeKind, Timeline,
};
use gitglyph_imaging_svg::SvgSurface;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a commit list to an SVG file.
    Render(RenderArgs),
    /// Print health statistics for a commit list as JSON.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON file with the commit list.
    commits: PathBuf,
    /// Where to write the SVG.
    #[arg(short, long, default_value = "glyph.svg")]
    output: PathBuf,
    /// Canvas width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    /// Canvas height.
    #[arg(long, default_value_t = 800.0)]
    height: f64,
    /// Color theme, `light` or `dark`.
    #[arg(long, default_value_t = ThemeKind::Light)]
    theme: ThemeKind,
    /// Size of a node without churn.
    #[arg(long, default_value_t = 8.0)]
    base_size: f64,
    /// Fraction of the canvas half-extent used by the outermost ring.
    #[arg(long, default_value_t = 0.8)]
    margin: f64,
    /// JSON file with story annotations.
    #[arg(long)]
    annotations: Option<PathBuf>,
    /// Also write the share bundle (SVG, pinned markers, last commit) as JSON.
    #[arg(long)]
    bundle: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// JSON file with the commit list.
    commits: PathBuf,
    /// Goal keywords to score commit messages against.
    #[arg(long = "goal", value_name = "KEYWORD")]
    goals: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Render(args) => render(args),
        Command::Stats(args) => stats(&args),
    }
}

fn render(args: RenderArgs) -> anyhow::Result<()> {
    let config = GlyphConfig::default()
        .with_base_size(args.base_size)
        .with_layout(LayoutConfig::default().with_margin(args.margin));
    let mut session = GlyphSession::new(config);
    if let Some(path) = &args.annotations {
        for annotation in read_annotations(path)? {
            session.add_annotation(annotation);
        }
    }

    let mut source = JsonSource::from_path(&args.commits);
    let mut surface = SvgSurface::new(args.width, args.height);
    let frame = session
        .fetch_and_render(&mut source, Theme::from(args.theme), &mut surface)
        .with_context(|| format!("failed to load commits from {}", args.commits.display()))?;
    let (nodes, markers) = (frame.nodes.len(), frame.markers);

    match session.share() {
        Some(bundle) => {
            write(&args.output, &bundle.svg)?;
            if let Some(path) = &args.bundle {
                write(path, &serde_json::to_string_pretty(&bundle)?)?;
            }
        }
        None => {
            tracing::warn!("no commits to draw; writing placeholder only");
            write(&args.output, &surface.to_svg())?;
        }
    }
    tracing::info!(
        nodes,
        markers,
        output = %args.output.display(),
        "glyph written"
    );
    Ok(())
}

fn stats(args: &StatsArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.commits)
        .with_context(|| format!("failed to read {}", args.commits.display()))?;
    let records = JsonSource::parse(&text)
        .with_context(|| format!("failed to parse {}", args.commits.display()))?;
    let timeline = Timeline::normalize_records(records);

    let mut report = serde_json::json!({
        "stats": GlyphStats::from_commits(timeline.commits()),
        "rejected": timeline.rejected(),
    });
    if !args.goals.is_empty() {
        let progress = GoalProgress::evaluate(timeline.commits(), args.goals.as_slice());
        report["goal"] = serde_json::to_value(progress)?;
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_annotations(path: &Path) -> anyhow::Result<Vec<Annotation>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read annotations from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse annotations in {}", path.display()))
}

fn write(path: &Path, contents: &str) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
