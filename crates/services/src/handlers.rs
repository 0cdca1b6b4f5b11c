//! One function per verb. Each runs to completion before the session reads
//! the next line; failures come back as `CommandError` and are reported by
//! [`report`].

use quiz_core::model::{Quiz, QuizDraft};

use crate::command::VERBS;
use crate::error::CommandError;
use crate::exam::{Draw, run_exam};
use crate::io::{Line, SessionIo, Tone, TransportError};
use crate::quiz_service::QuizService;
use crate::validation::validate_id;

pub const AUTHORS: &[&str] = &["The quiz trainer contributors"];

fn quiz_line(quiz: &Quiz) -> Line {
    Line::new()
        .push("[")
        .push_toned(quiz.id().to_string(), Tone::Accent)
        .push("]: ")
        .push(quiz.question())
}

fn quiz_with_answer(line: Line, quiz: &Quiz) -> Line {
    line.push_toned(" => ", Tone::Accent).push(quiz.answer())
}

pub(crate) async fn help(io: &mut dyn SessionIo) -> Result<(), CommandError> {
    io.write_line(Line::plain("Commands:")).await?;
    for spec in VERBS {
        io.write_line(Line::plain(format!(
            "  {} - {}",
            spec.usage(),
            spec.description
        )))
        .await?;
    }
    Ok(())
}

pub(crate) async fn list(io: &mut dyn SessionIo, quizzes: &QuizService) -> Result<(), CommandError> {
    for quiz in quizzes.list_quizzes().await? {
        io.write_line(quiz_line(&quiz)).await?;
    }
    Ok(())
}

pub(crate) async fn show(
    io: &mut dyn SessionIo,
    quizzes: &QuizService,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = quizzes.get_quiz(id).await?;
    io.write_line(quiz_with_answer(quiz_line(&quiz), &quiz)).await?;
    Ok(())
}

pub(crate) async fn add(io: &mut dyn SessionIo, quizzes: &QuizService) -> Result<(), CommandError> {
    let question = io
        .prompt(Line::toned("Enter a question: ", Tone::Danger), None)
        .await?;
    let answer = io
        .prompt(Line::toned("Enter the answer: ", Tone::Danger), None)
        .await?;

    let quiz = quizzes
        .create_quiz(QuizDraft::new(question, answer))
        .await?;

    let line = Line::new()
        .push_toned("Added", Tone::Accent)
        .push(": ")
        .push(quiz.question());
    io.write_line(quiz_with_answer(line, &quiz)).await?;
    Ok(())
}

/// Succeeds silently: unlike `add` and `edit`, a deletion prints nothing.
pub(crate) async fn delete(
    quizzes: &QuizService,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    quizzes.delete_quiz(id).await?;
    Ok(())
}

pub(crate) async fn edit(
    io: &mut dyn SessionIo,
    quizzes: &QuizService,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = quizzes.get_quiz(id).await?;

    let question = io
        .prompt(
            Line::toned("Enter the question: ", Tone::Danger),
            Some(quiz.question()),
        )
        .await?;
    let answer = io
        .prompt(
            Line::toned("Enter the answer: ", Tone::Danger),
            Some(quiz.answer()),
        )
        .await?;

    let quiz = quizzes
        .revise_quiz(quiz, QuizDraft::new(question, answer))
        .await?;

    let line = Line::new()
        .push("Quiz ")
        .push_toned(quiz.id().to_string(), Tone::Accent)
        .push(" changed to: ")
        .push(quiz.question());
    io.write_line(quiz_with_answer(line, &quiz)).await?;
    Ok(())
}

pub(crate) async fn test(
    io: &mut dyn SessionIo,
    quizzes: &QuizService,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = quizzes.get_quiz(id).await?;
    io.write_line(quiz_line(&quiz)).await?;

    let given = io
        .prompt(Line::toned(format!("{}? ", quiz.question()), Tone::Danger), None)
        .await?;

    if quiz.is_correct(&given) {
        io.write_line(Line::plain("Your answer is correct.")).await?;
        io.write_banner("Correct", Some(Tone::Success)).await?;
    } else {
        io.write_line(Line::plain("Your answer is incorrect.")).await?;
        io.write_banner("Incorrect", Some(Tone::Danger)).await?;
    }
    Ok(())
}

/// Run an exam and finish with the score as a banner. A failed snapshot is
/// reported and still ends with a `0` banner.
pub(crate) async fn play(
    io: &mut dyn SessionIo,
    quizzes: &QuizService,
    draw: &mut dyn Draw,
) -> Result<(), CommandError> {
    let score = match quizzes.list_quizzes().await {
        Ok(pool) => {
            let summary = run_exam(io, pool, draw).await?;
            tracing::debug!(
                score = summary.score,
                outcome = ?summary.outcome,
                unasked = summary.unasked,
                "exam finished"
            );
            summary.score
        }
        Err(err) => {
            report(io, err.into()).await?;
            0
        }
    };
    io.write_banner(&score.to_string(), Some(Tone::Accent)).await?;
    Ok(())
}

pub(crate) async fn credits(io: &mut dyn SessionIo) -> Result<(), CommandError> {
    io.write_line(Line::plain("Authors:")).await?;
    for author in AUTHORS {
        io.write_line(Line::toned(*author, Tone::Success)).await?;
    }
    Ok(())
}

/// Turn a handler failure into output lines.
///
/// Validation failures get a header plus one line per field; everything else
/// is one `Error:` line. Transport failures are handed back untouched.
pub(crate) async fn report(io: &mut dyn SessionIo, err: CommandError) -> Result<(), TransportError> {
    match err {
        CommandError::Transport(e) => Err(e),
        CommandError::Validation(e) => {
            io.write_line(Line::error("The quiz is invalid:")).await?;
            for field in e.iter() {
                io.write_line(Line::error(field)).await?;
            }
            Ok(())
        }
        other => {
            if let CommandError::Storage(e) = &other {
                tracing::warn!(error = %e, "storage failure while running a command");
            }
            io.write_line(Line::error(&other)).await
        }
    }
}
