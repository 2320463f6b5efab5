use std::path::{Path, PathBuf};

use anyhow::Context;
use stance_analysis::{
    analyzer::Analyzer,
    config::{AnalysisConfig, Calibration},
};
use stance_engine::track::RecordedLandmarkSource;
use tracing::debug;

use crate::util::{self, Output};

const POSE_TRACK_SUFFIX: &str = ".pose.json";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Video to analyze
    video_path: PathBuf,
    /// Instrument label stored with the result
    instrument: String,
    /// Where to write the analysis JSON
    output_path: PathBuf,
    /// Pose track extracted from the video [default: <VIDEO_PATH>.pose.json]
    #[arg(long)]
    pose_track: Option<PathBuf>,
    /// Analyze every Nth frame
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_FRAME_SAMPLE_RATE)]
    sample_rate: u32,
    /// Minimum landmark confidence for a frame to count as detected
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_POSE_CONFIDENCE)]
    pose_confidence: f64,
    /// JSON file overriding scoring calibration constants
    #[arg(long)]
    calibration: Option<PathBuf>,
}

fn default_pose_track_path(video_path: &Path) -> PathBuf {
    let mut path = video_path.as_os_str().to_owned();
    path.push(POSE_TRACK_SUFFIX);
    PathBuf::from(path)
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        video_path,
        instrument,
        output_path,
        pose_track,
        sample_rate,
        pose_confidence,
        calibration,
    } = arg;

    if !video_path.exists() {
        anyhow::bail!("Video file not found: {}", video_path.display());
    }

    let calibration = match calibration {
        Some(path) => util::read_calibration_file(path)?,
        None => Calibration::default(),
    };
    let config = AnalysisConfig {
        frame_sample_rate: *sample_rate,
        pose_confidence: *pose_confidence,
        calibration,
        ..AnalysisConfig::default()
    };
    let analyzer = Analyzer::new(config)?;
    let mut detector = RecordedLandmarkSource {
        min_confidence: analyzer.config().pose_confidence,
    };

    let pose_track_path = pose_track
        .clone()
        .unwrap_or_else(|| default_pose_track_path(video_path));
    debug!(path = %pose_track_path.display(), "opening pose track");
    let track = util::read_pose_track_file(&pose_track_path)
        .with_context(|| format!("Failed to open video stream: {}", video_path.display()))?;

    let video_path_str = video_path.to_string_lossy();
    let analysis = analyzer.analyze(
        &video_path_str,
        instrument,
        &mut track.into_frames(),
        &mut detector,
    )?;

    Output::save_json(&analysis.result, Some(output_path.clone()))?;

    println!(
        "Analysis complete: score={} ({}), sampled coverage={:.1}%",
        analysis.result.overall_score,
        analysis.result.weak_label,
        analysis.stats.pose_coverage_sampled * 100.0
    );

    Ok(())
}
