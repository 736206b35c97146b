mod common;

use std::sync::Arc;

use common::{StandIns, UnavailableModel, FULL_TRANSCRIPT};
use notetaker::models::{DEFAULT_OBSERVATIONS, NO_CONTEXT};
use notetaker::{
    Capabilities, Intent, NotetakerPipeline, RuleTable, Sentiment, SentimentResult, Transcript,
};

#[tokio::test]
async fn full_consultation_produces_all_sections() {
    let stand_ins = StandIns::new();
    let pipeline = NotetakerPipeline::new(stand_ins.capabilities());

    let report = pipeline
        .run_full_analysis(&Transcript::new(FULL_TRANSCRIPT))
        .await
        .expect("analysis should succeed");

    let summary = &report.medical_summary;
    assert_eq!(summary.patient_name, "Ms. Jones");
    assert_eq!(summary.symptoms, vec!["Neck pain", "Back pain", "Head impact"]);
    assert_eq!(summary.diagnosis, "Whiplash injury");
    assert_eq!(summary.treatment, vec!["10 physiotherapy sessions", "Painkillers"]);
    assert_eq!(summary.current_status, "Occasional backaches");
    assert_eq!(summary.prognosis, "Full recovery expected within six months");

    match &report.sentiment {
        SentimentResult::Classified {
            analyzed_line,
            sentiment,
            intent,
        } => {
            assert!(analyzed_line.starts_with("The first four weeks were rough."));
            assert_eq!(*sentiment, Sentiment::Anxious);
            assert_eq!(*intent, Intent::SeekingReassurance);
        }
        other => panic!("expected classification, got {:?}", other),
    }

    let note = &report.soap_note;
    assert_eq!(note.subjective.chief_complaint, "Stand-in summary.");
    assert_eq!(note.objective.physical_exam, "Stand-in summary.");
    assert_eq!(note.plan.follow_up, "Stand-in summary.");
    assert_eq!(note.objective.observations, DEFAULT_OBSERVATIONS);

    assert_eq!(stand_ins.classifier_calls(), 2);
    assert_eq!(stand_ins.generator_calls(), 7);
}

#[tokio::test]
async fn missing_patient_dialogue_is_reported_not_fatal() {
    let stand_ins = StandIns::new();
    let pipeline = NotetakerPipeline::new(stand_ins.capabilities());
    let transcript = Transcript::new(
        "Physician: The scan confirms a whiplash injury.\nPhysician: Come back in two weeks.",
    );

    let report = pipeline.run_full_analysis(&transcript).await.unwrap();

    assert_eq!(report.sentiment, SentimentResult::no_patient_dialogue());
    assert_eq!(report.medical_summary.diagnosis, "Whiplash injury");
    assert_eq!(report.soap_note.subjective.chief_complaint, NO_CONTEXT);
    assert_eq!(report.soap_note.assessment.diagnosis, "Stand-in summary.");
    assert_eq!(stand_ins.classifier_calls(), 0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json["Patient_Sentiment_Analysis"],
        serde_json::json!({"Error": "No patient dialogue found."})
    );
    assert!(json["Medical_Summary"].is_object());
    assert!(json["Generated_SOAP_Note"].is_object());
}

#[tokio::test]
async fn no_physician_lines_skip_follow_up_generation() {
    let stand_ins = StandIns::new();
    let pipeline = NotetakerPipeline::new(stand_ins.capabilities());
    let transcript = Transcript::new("Patient: I'm worried about my neck.\nPatient: It hurts.");

    let report = pipeline.run_full_analysis(&transcript).await.unwrap();

    assert_eq!(report.soap_note.plan.follow_up, NO_CONTEXT);
    assert_eq!(report.soap_note.assessment.prognosis, NO_CONTEXT);
    // chief complaint, history of present illness and treatment plan only
    assert_eq!(stand_ins.generator_calls(), 3);
}

#[tokio::test]
async fn empty_transcript_degrades_to_defaults() {
    let stand_ins = StandIns::new();
    let pipeline = NotetakerPipeline::new(stand_ins.capabilities());

    let report = pipeline.run_full_analysis(&Transcript::new("")).await.unwrap();

    assert!(report.sentiment.is_error());
    assert_eq!(report.medical_summary.diagnosis, "Not mentioned");
    assert_eq!(report.soap_note.plan.treatment, NO_CONTEXT);
    assert_eq!(stand_ins.generator_calls(), 0);
}

#[tokio::test]
async fn classifier_failure_aborts_the_run() {
    let stand_ins = StandIns::new();
    let capabilities = Capabilities::new(Arc::new(UnavailableModel), stand_ins.generator.clone());
    let pipeline = NotetakerPipeline::new(capabilities);

    let err = pipeline
        .run_full_analysis(&Transcript::new(FULL_TRANSCRIPT))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("503"));
}

#[tokio::test]
async fn generator_failure_aborts_the_run() {
    let stand_ins = StandIns::new();
    let capabilities = Capabilities::new(stand_ins.classifier.clone(), Arc::new(UnavailableModel));
    let pipeline = NotetakerPipeline::new(capabilities);

    let err = pipeline
        .run_full_analysis(&Transcript::new(FULL_TRANSCRIPT))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("Generation failed"));
}

#[test]
fn summary_is_idempotent() {
    let transcript = Transcript::new(FULL_TRANSCRIPT);
    let rules = RuleTable::default();

    let first = serde_json::to_vec(&NotetakerPipeline::summarize_only(&transcript, &rules)).unwrap();
    let second = serde_json::to_vec(&NotetakerPipeline::summarize_only(&transcript, &rules)).unwrap();

    assert_eq!(first, second);
}
