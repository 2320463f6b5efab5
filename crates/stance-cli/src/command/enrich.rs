use std::path::{Path, PathBuf};

use stance_analysis::{
    advice::{AdviceInput, AdviceThresholds, generate_advice},
    classifier::{CentroidClassifier, ClassifierError, ClassifierInput, PredictionOutcome},
    result::{AnalysisResult, EnrichedAnalysis},
};
use tracing::warn;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EnrichArg {
    /// Analysis JSON written by `analyze`
    analysis: PathBuf,
    /// Centroid classifier model JSON
    #[arg(long)]
    model: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_classifier(model: Option<&Path>) -> Result<CentroidClassifier, ClassifierError> {
    let path = model.ok_or_else(|| ClassifierError::Unavailable {
        reason: "no model configured".to_owned(),
    })?;
    util::read_classifier_file(path).map_err(|e| ClassifierError::Unavailable {
        reason: format!("{e:#}"),
    })
}

pub(crate) fn enrich(analysis: AnalysisResult, model: Option<&Path>) -> EnrichedAnalysis {
    let classifier = load_classifier(model);
    if let Err(e) = &classifier {
        warn!("{e}");
    }
    let ml_prediction = PredictionOutcome::run(
        classifier.as_ref().map_err(Clone::clone),
        &ClassifierInput::from(&analysis.feature_vector),
    );
    let advice = generate_advice(
        &AdviceInput::from(&analysis.metrics),
        &AdviceThresholds::default(),
    );
    EnrichedAnalysis {
        analysis,
        advice,
        ml_prediction,
    }
}

pub(crate) fn run(arg: &EnrichArg) -> anyhow::Result<()> {
    let EnrichArg {
        analysis,
        model,
        output,
    } = arg;
    let analysis: AnalysisResult = util::read_json_file("analysis", analysis)?;
    let enriched = enrich(analysis, model.as_deref());
    Output::save_json(&enriched, output.clone())?;
    Ok(())
}
