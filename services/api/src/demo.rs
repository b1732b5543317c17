use crate::infra::build_feedback_service;
use clap::Args;
use interview_feedback::config::AppConfig;
use interview_feedback::error::AppError;
use interview_feedback::workflows::feedback::{
    Answer, Evaluation, Feedback, FeedbackRequest, Interview, InterviewId, QuestionId, User,
    UserId,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Path to a JSON file holding `{ interview, answers, user }`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Pretty-print the resulting feedback JSON
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the feedback record as JSON after the readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let GenerateArgs { input, pretty } = args;

    let raw = std::fs::read_to_string(&input)?;
    let request: FeedbackRequest = serde_json::from_str(&raw)?;

    let config = AppConfig::load()?;
    let service = build_feedback_service(&config)?;
    let (feedback, _) = service.generate_with_path(request).await;

    let rendered = if pretty {
        serde_json::to_string_pretty(&feedback)?
    } else {
        serde_json::to_string(&feedback)?
    };
    println!("{rendered}");

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_feedback_service(&config)?;

    println!("Interview feedback demo");
    if !config.text_generation.is_enabled() {
        println!("(text generation disabled; set GEMINI_API_KEY to enable assisted feedback)");
    }

    let (feedback, path) = service.generate_with_path(demo_request()).await;
    println!("Route taken: {}", path.label());
    render_feedback(&feedback);

    if args.json {
        println!("\n{}", serde_json::to_string_pretty(&feedback)?);
    }

    Ok(())
}

fn render_feedback(feedback: &Feedback) {
    println!(
        "\nInterview {} for user {}",
        feedback.interview_id.0, feedback.user_id.0
    );
    println!(
        "- Overall {}/10 | Technical {}/10 | Communication {}/10",
        feedback.overall_score, feedback.technical_score, feedback.communication_score
    );

    for (heading, points) in [
        ("Strengths", &feedback.strengths),
        ("Weaknesses", &feedback.weaknesses),
        ("Suggestions", &feedback.suggestions),
    ] {
        if points.is_empty() {
            continue;
        }
        println!("{heading}:");
        for point in points {
            println!("  - {point}");
        }
    }

    println!("\n{}", feedback.detailed_feedback);

    println!("\nPer-question feedback:");
    for entry in &feedback.question_feedback {
        println!(
            "  - {} ({}/10): {}",
            entry.question_id.0, entry.score, entry.comments
        );
    }
}

fn demo_request() -> FeedbackRequest {
    let user_id = UserId("demo-user".to_string());

    let answers = vec![
        demo_answer(
            "q-1",
            "Describe how you would design a rate limiter.",
            Evaluation {
                score: Some(8),
                strengths: Some(vec![
                    "Explained token bucket trade-offs".to_string(),
                    "Considered distributed state".to_string(),
                ]),
                weaknesses: Some(vec!["Did not size the storage layer".to_string()]),
                suggestions: Some(vec!["Quantify capacity assumptions".to_string()]),
            },
        ),
        demo_answer(
            "q-2",
            "Tell me about a production incident you owned.",
            Evaluation {
                score: Some(6),
                strengths: Some(vec!["Clear timeline".to_string()]),
                weaknesses: Some(vec!["Root cause analysis was shallow".to_string()]),
                suggestions: Some(vec!["Use a structured postmortem format".to_string()]),
            },
        ),
        demo_answer(
            "q-3",
            "How do you review a large pull request?",
            Evaluation {
                score: Some(4),
                strengths: None,
                weaknesses: Some(vec!["Answer lacked concrete examples".to_string()]),
                suggestions: Some(vec!["Quantify capacity assumptions".to_string()]),
            },
        ),
    ];

    FeedbackRequest {
        interview: Interview {
            id: InterviewId("demo-interview".to_string()),
            user_id: user_id.clone(),
            title: Some("Senior backend loop".to_string()),
            job_role: Some("Backend Engineer".to_string()),
        },
        answers,
        user: User {
            id: user_id,
            name: Some("Demo Candidate".to_string()),
        },
    }
}

fn demo_answer(question_id: &str, question: &str, evaluation: Evaluation) -> Answer {
    Answer {
        question_id: QuestionId(question_id.to_string()),
        question: Some(question.to_string()),
        response: None,
        evaluation: Some(evaluation),
    }
}
