//! The `play` exam: every quiz once, in random order, until the first mistake.

use quiz_core::model::Quiz;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::io::{Line, SessionIo, Tone, TransportError};

/// Source of the random index picked at each step of an exam.
pub trait Draw: Send {
    /// Return an index in `0..len`. Never called with `len == 0`.
    fn draw(&mut self, len: usize) -> usize;
}

/// Uniform draws from a `StdRng`.
pub struct RandomDraw(StdRng);

impl RandomDraw {
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Reproducible sequence, for demos and debugging.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Draw for RandomDraw {
    fn draw(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// How an exam run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamOutcome {
    /// Every quiz was answered correctly.
    Exhausted,
    /// The run stopped at a wrong answer.
    Incorrect,
}

/// Final state of one exam run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamReport {
    pub outcome: ExamOutcome,
    pub score: usize,
    /// Quizzes that were never asked.
    pub unasked: usize,
}

/// Score and pending pool of a single run.
///
/// The pool is a snapshot taken when the run starts; later repository changes
/// do not reach it.
#[derive(Debug)]
pub struct Exam {
    score: usize,
    pending: Vec<Quiz>,
}

impl Exam {
    #[must_use]
    pub fn new(pool: Vec<Quiz>) -> Self {
        Self {
            score: 0,
            pending: pool,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return a random pending quiz, or `None` once the pool is
    /// exhausted.
    pub fn next_quiz(&mut self, draw: &mut dyn Draw) -> Option<Quiz> {
        let len = self.pending.len();
        if len == 0 {
            return None;
        }
        let index = draw.draw(len).min(len - 1);
        Some(self.pending.remove(index))
    }

    /// Check `given` against `quiz` and count it when correct.
    pub fn grade(&mut self, quiz: &Quiz, given: &str) -> bool {
        let correct = quiz.is_correct(given);
        if correct {
            self.score += 1;
        }
        correct
    }
}

/// Ask every quiz of `pool` over `io` until one is answered wrong.
///
/// Writes a running score after each correct answer and a closing summary,
/// but not the final banner; that belongs to the caller.
///
/// # Errors
///
/// Returns `TransportError` if the session closes mid-run.
pub async fn run_exam(
    io: &mut dyn SessionIo,
    pool: Vec<Quiz>,
    draw: &mut dyn Draw,
) -> Result<ExamReport, TransportError> {
    let mut exam = Exam::new(pool);

    let outcome = loop {
        let Some(quiz) = exam.next_quiz(draw) else {
            io.write_line(Line::plain("Nothing left to ask.")).await?;
            break ExamOutcome::Exhausted;
        };

        let given = io
            .prompt(Line::toned(format!("{}? ", quiz.question()), Tone::Danger), None)
            .await?;

        if exam.grade(&quiz, &given) {
            io.write_line(
                Line::new()
                    .push_toned("CORRECT", Tone::Success)
                    .push(format!(" - {} right so far", exam.score())),
            )
            .await?;
        } else {
            io.write_line(Line::toned("INCORRECT", Tone::Danger)).await?;
            break ExamOutcome::Incorrect;
        }
    };

    io.write_line(Line::plain(format!("End of exam. Score: {}", exam.score())))
        .await?;

    Ok(ExamReport {
        outcome,
        score: exam.score(),
        unasked: exam.remaining(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuizDraft, QuizId};
    use quiz_core::time::fixed_now;

    struct AlwaysLast;

    impl Draw for AlwaysLast {
        fn draw(&mut self, len: usize) -> usize {
            len - 1
        }
    }

    struct OutOfRange;

    impl Draw for OutOfRange {
        fn draw(&mut self, len: usize) -> usize {
            len + 10
        }
    }

    fn pool(n: i64) -> Vec<Quiz> {
        (1..=n)
            .map(|i| {
                QuizDraft::new(format!("Q{i}"), format!("A{i}"))
                    .validate(fixed_now())
                    .unwrap()
                    .assign_id(QuizId::new(i))
            })
            .collect()
    }

    #[test]
    fn draws_without_replacement() {
        let mut exam = Exam::new(pool(3));
        let mut draw = AlwaysLast;
        let ids: Vec<i64> = std::iter::from_fn(|| exam.next_quiz(&mut draw))
            .map(|q| q.id().value())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(exam.remaining(), 0);
    }

    #[test]
    fn out_of_range_draw_is_clamped() {
        let mut exam = Exam::new(pool(2));
        let quiz = exam.next_quiz(&mut OutOfRange).unwrap();
        assert_eq!(quiz.id(), QuizId::new(2));
    }

    #[test]
    fn grade_counts_only_correct_answers() {
        let quizzes = pool(2);
        let mut exam = Exam::new(quizzes.clone());
        assert!(exam.grade(&quizzes[0], " a1 "));
        assert!(!exam.grade(&quizzes[1], "nope"));
        assert_eq!(exam.score(), 1);
    }

    #[test]
    fn seeded_draw_is_uniform_enough_and_in_range() {
        let mut draw = RandomDraw::seeded(7);
        let mut hits = [0usize; 4];
        for _ in 0..4000 {
            let index = draw.draw(4);
            assert!(index < 4);
            hits[index] += 1;
        }
        assert!(hits.iter().all(|&h| h > 800), "skewed draws: {hits:?}");
    }

    #[test]
    fn random_draw_visits_every_quiz_once() {
        let mut exam = Exam::new(pool(10));
        let mut draw = RandomDraw::seeded(42);
        let mut ids: Vec<i64> = std::iter::from_fn(|| exam.next_quiz(&mut draw))
            .map(|q| q.id().value())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }
}
