use stance_analysis::advice::{AdviceInput, AdviceThresholds, generate_advice};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AdviseArg {
    /// Head deviation from the ideal angle, in degrees
    #[arg(long)]
    head_dev: Option<f64>,
    /// Torso deviation from the ideal angle, in degrees
    #[arg(long)]
    torso_dev: Option<f64>,
    /// Standard deviation of the per-frame head deviation, in degrees
    #[arg(long)]
    stability: Option<f64>,
    /// Session length in seconds
    #[arg(long)]
    duration: Option<f64>,
}

impl From<&AdviseArg> for AdviceInput {
    fn from(arg: &AdviseArg) -> Self {
        Self {
            head_dev_deg: arg.head_dev,
            torso_dev_deg: arg.torso_dev,
            stability_std_dev_deg: arg.stability,
            session_duration_sec: arg.duration,
        }
    }
}

pub(crate) fn run(arg: &AdviseArg) {
    for line in generate_advice(&AdviceInput::from(arg), &AdviceThresholds::default()) {
        println!("{line}");
    }
}
