use stance_analysis::{
    advice::{self, AdviceInput, AdviceThresholds, generate_advice},
    analyzer::Analyzer,
    classifier::{Centroid, CentroidClassifier, ClassifierInput, PredictionOutcome},
    config::AnalysisConfig,
    result::EnrichedAnalysis,
    score::WeakLabel,
};
use stance_engine::{
    Landmark, PoseLandmarks,
    geometry::round_to,
    track::{PoseTrack, RecordedLandmarkSource},
};

/// Pose whose left-side head angle is `head_deg` and torso angle is `torso_deg`.
fn pose_with_angles(head_deg: f64, torso_deg: f64) -> PoseLandmarks {
    let (head_sin, head_cos) = head_deg.to_radians().sin_cos();
    let (torso_sin, torso_cos) = torso_deg.to_radians().sin_cos();
    let hip = (0.5, 0.8);
    let shoulder = (hip.0 + 0.4 * torso_sin, hip.1 + 0.4 * torso_cos);
    let ear = (shoulder.0 + 0.15 * head_sin, shoulder.1 + 0.15 * head_cos);
    PoseLandmarks {
        left_ear: Landmark::new(ear.0, ear.1),
        right_ear: Landmark::new(ear.0, ear.1),
        left_shoulder: Landmark::new(shoulder.0, shoulder.1),
        right_shoulder: Landmark::new(shoulder.0 + 0.1, shoulder.1),
        left_hip: Landmark::new(hip.0, hip.1),
        right_hip: Landmark::new(hip.0 + 0.1, hip.1),
    }
}

fn run(track: PoseTrack, config: AnalysisConfig) -> stance_analysis::analyzer::Analysis {
    let analyzer = Analyzer::new(config).unwrap();
    let mut detector = RecordedLandmarkSource {
        min_confidence: analyzer.config().pose_confidence,
    };
    analyzer
        .analyze(
            "videos/session.mp4",
            "cello",
            &mut track.into_frames(),
            &mut detector,
        )
        .unwrap()
}

#[test]
fn upright_session_scores_excellent() {
    // 10 frames at 0.2 fps is a 50 second session, long enough to skip the caveat
    let track = PoseTrack {
        fps: 0.2,
        frames: vec![Some(pose_with_angles(163.0, 179.0)); 10],
    };
    let analysis = run(track, AnalysisConfig::default());
    let result = &analysis.result;

    assert_eq!(analysis.stats.total_frames, 10);
    assert_eq!(analysis.stats.sampled_frames, 5);
    assert_eq!(analysis.stats.frames_with_pose, 5);
    assert_eq!(analysis.stats.pose_coverage_sampled, 1.0);
    assert_eq!(analysis.stats.pose_coverage, 0.5);
    assert!(analysis.stats.head_dev < 1e-9);
    assert!(analysis.stats.torso_dev < 1e-9);
    assert!(analysis.stats.stability_std < 1e-9);

    assert_eq!(result.overall_score, 100);
    assert_eq!(result.weak_label, WeakLabel::Excellent);
    assert_eq!(result.metrics.head_dev_deg, 0.0);
    assert_eq!(result.metrics.torso_dev_deg, 0.0);
    assert_eq!(result.feedback, vec![advice::GENERIC_PRAISE]);
    assert!(result.metadata.pose_detected);
    assert_eq!(result.metadata.duration_sec, 50.0);
}

#[test]
fn session_without_pose_is_unknown() {
    let track = PoseTrack {
        fps: 30.0,
        frames: vec![None; 10],
    };
    let analysis = run(track, AnalysisConfig::default());
    let result = &analysis.result;

    assert_eq!(analysis.stats.frames_with_pose, 0);
    assert_eq!(analysis.stats.pose_coverage, 0.0);
    assert_eq!(analysis.stats.pose_coverage_sampled, 0.0);
    assert_eq!(result.weak_label, WeakLabel::Unknown);
    // zero mean angles saturate head and torso penalties:
    // quality = 1 - (0.40 + 0.35) = 0.25, times the 0.60 coverage floor
    assert_eq!(result.overall_score, 15);
    assert!(!result.metadata.pose_detected);

    assert_eq!(result.metrics.head_dev_deg, 163.0);
    assert_eq!(result.metrics.torso_dev_deg, 179.0);
    assert_eq!(result.feature_vector.head_dev_deg, 163.0);
    assert_eq!(result.feature_vector.torso_dev_deg, 179.0);
    // a third of a second of footage also earns the short-session caveat
    assert_eq!(
        result.feedback,
        vec![
            advice::HEAD_FORWARD,
            advice::TORSO_LEANING,
            advice::STABILITY_VERY,
            advice::SHORT_SESSION,
        ]
    );
    assert!(!result.feedback.iter().any(|f| f == advice::GENERIC_PRAISE));
}

#[test]
fn empty_stream_does_not_fail() {
    let track = PoseTrack {
        fps: 0.0,
        frames: vec![],
    };
    let analysis = run(track, AnalysisConfig::default());
    assert_eq!(analysis.stats.total_frames, 0);
    assert_eq!(analysis.stats.duration_sec, 0.0);
    assert_eq!(analysis.result.weak_label, WeakLabel::Unknown);
}

#[test]
fn metrics_agree_with_persisted_feature_vector() {
    let frames = (0..120)
        .map(|i| {
            let wobble = f64::from(i % 7) * 1.37;
            Some(pose_with_angles(148.3 + wobble, 171.9 - wobble * 0.5))
        })
        .collect();
    let track = PoseTrack { fps: 30.0, frames };
    let analysis = run(track, AnalysisConfig::default());
    let result = &analysis.result;

    let fv = &result.feature_vector;
    assert_eq!(result.metrics.head_dev_deg, round_to(fv.head_dev_deg, 2));
    assert_eq!(result.metrics.torso_dev_deg, round_to(fv.torso_dev_deg, 2));
    assert_eq!(
        result.metrics.stability_std_dev_deg,
        round_to(fv.stability_std_dev_deg, 2)
    );
    assert!((analysis.feature_vector.head_dev_deg - fv.head_dev_deg).abs() <= 5e-7);
    assert!(analysis.stats.stability_std > 0.0);
    assert!(result.overall_score < 100);

    let expected = generate_advice(
        &AdviceInput::from(&result.metrics),
        &AdviceThresholds::default(),
    );
    assert_eq!(result.feedback, expected);
}

#[test]
fn low_visibility_frames_lower_coverage() {
    let good = pose_with_angles(163.0, 179.0);
    let mut blurry = good;
    blurry.left_hip.visibility = 0.2;
    let frames = (0..20)
        .map(|i| Some(if i % 4 == 1 { blurry } else { good }))
        .collect::<Vec<_>>();

    let analysis = run(
        PoseTrack {
            fps: 30.0,
            frames: frames.clone(),
        },
        AnalysisConfig {
            frame_sample_rate: 1,
            ..AnalysisConfig::default()
        },
    );
    assert_eq!(analysis.stats.sampled_frames, 20);
    assert_eq!(analysis.stats.frames_with_pose, 15);

    let lenient = run(
        PoseTrack { fps: 30.0, frames },
        AnalysisConfig {
            frame_sample_rate: 1,
            pose_confidence: 0.1,
            ..AnalysisConfig::default()
        },
    );
    assert_eq!(lenient.stats.frames_with_pose, 20);
}

#[test]
fn invalid_config_is_rejected_before_reading() {
    let config = AnalysisConfig {
        frame_sample_rate: 0,
        ..AnalysisConfig::default()
    };
    assert!(Analyzer::new(config).is_err());
}

#[test]
fn enrichment_keeps_scored_fields() {
    let track = PoseTrack {
        fps: 30.0,
        frames: vec![Some(pose_with_angles(150.0, 170.0)); 40],
    };
    let analysis = run(track, AnalysisConfig::default());
    let classifier = CentroidClassifier {
        name: "demo".to_owned(),
        centroids: vec![
            Centroid {
                label: "Good".to_owned(),
                head_dev_deg: 2.0,
                torso_dev_deg: 2.0,
            },
            Centroid {
                label: "Risky".to_owned(),
                head_dev_deg: 14.0,
                torso_dev_deg: 10.0,
            },
        ],
    };
    let enriched = EnrichedAnalysis {
        advice: generate_advice(
            &AdviceInput::from(&analysis.result.metrics),
            &AdviceThresholds::default(),
        ),
        ml_prediction: PredictionOutcome::run(
            Ok(&classifier),
            &ClassifierInput::from(&analysis.feature_vector),
        ),
        analysis: analysis.result.clone(),
    };

    let PredictionOutcome::Prediction(prediction) = &enriched.ml_prediction else {
        panic!("expected a prediction");
    };
    assert_eq!(prediction.label, "Risky");

    let json = serde_json::to_value(&enriched).unwrap();
    assert_eq!(json["overall_score"], analysis.result.overall_score);
    assert_eq!(json["weak_label"], analysis.result.weak_label.to_string());
    assert!(json["advice"].is_array());
    assert_eq!(json["ml_prediction"]["label"], "Risky");
}

#[test]
fn analyzer_reports_the_configuration_it_ran_with() {
    let config = AnalysisConfig {
        frame_sample_rate: 3,
        pose_confidence: 0.5,
        ..AnalysisConfig::default()
    };
    let analyzer = Analyzer::new(config.clone()).unwrap();
    assert_eq!(analyzer.config(), &config);

    let analysis = run(
        PoseTrack {
            fps: 30.0,
            frames: vec![Some(pose_with_angles(163.0, 179.0)); 9],
        },
        config,
    );
    assert_eq!(analysis.result.metadata.frame_sample_rate, 3);
    assert_eq!(analysis.result.metadata.pose_confidence, 0.5);
    assert_eq!(analysis.stats.sampled_frames, 3);
}
