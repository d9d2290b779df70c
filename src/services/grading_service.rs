use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::quiz_dto::QuestionResult;
use crate::models::question::Question;

#[derive(Debug, Clone)]
pub struct GradeOutcome {
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub passed: bool,
    pub detailed_results: Vec<QuestionResult>,
}

pub struct GradingService;

impl GradingService {
    /// Grades a submitted answer map against a quiz's question list.
    ///
    /// Total over all inputs: an unanswered question scores as incorrect,
    /// an option id that matches no option of the question scores as
    /// incorrect, and answers keyed by a question id that is not part of
    /// the quiz are ignored. A quiz with zero questions grades to score 0,
    /// not passed. The passing threshold is inclusive.
    pub fn grade(
        questions: &[Question],
        answers: &HashMap<Uuid, Uuid>,
        passing_score: i32,
    ) -> GradeOutcome {
        let total_questions = questions.len() as i32;
        let mut correct_answers = 0;
        let mut detailed_results = Vec::with_capacity(questions.len());

        for question in questions {
            let selected = answers.get(&question.id).copied();
            // Id equality, never text equality: duplicate option texts must
            // not grade as correct.
            let is_correct = selected == Some(question.correct_option_id);
            if is_correct {
                correct_answers += 1;
            }

            detailed_results.push(QuestionResult {
                question_id: question.id,
                question_text: question.text.clone(),
                options: question.options.clone(),
                selected_option_id: selected,
                correct_option_id: question.correct_option_id,
                is_correct,
            });
        }

        let score = if total_questions > 0 {
            ((correct_answers as f64 / total_questions as f64) * 100.0).round() as i32
        } else {
            0
        };

        GradeOutcome {
            score,
            correct_answers,
            total_questions,
            passed: score >= passing_score,
            detailed_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::AnswerOption;

    fn option(text: &str) -> AnswerOption {
        AnswerOption {
            id: Uuid::new_v4(),
            text: text.to_string(),
            explanation: None,
        }
    }

    fn question_with_options(count: usize, correct_idx: usize) -> Question {
        let options: Vec<AnswerOption> = (0..count)
            .map(|i| option(&format!("Option {}", i)))
            .collect();
        Question {
            id: Uuid::new_v4(),
            text: "What is being asked?".to_string(),
            correct_option_id: options[correct_idx].id,
            options,
        }
    }

    fn quiz_questions(count: usize) -> Vec<Question> {
        (0..count).map(|_| question_with_options(4, 0)).collect()
    }

    fn correct_answer(q: &Question) -> (Uuid, Uuid) {
        (q.id, q.correct_option_id)
    }

    fn wrong_answer(q: &Question) -> (Uuid, Uuid) {
        let wrong = q
            .options
            .iter()
            .find(|o| o.id != q.correct_option_id)
            .expect("question has a wrong option");
        (q.id, wrong.id)
    }

    #[test]
    fn four_of_five_correct_passes_at_seventy() {
        let questions = quiz_questions(5);
        let mut answers = HashMap::new();
        for q in &questions[..4] {
            let (k, v) = correct_answer(q);
            answers.insert(k, v);
        }
        let (k, v) = wrong_answer(&questions[4]);
        answers.insert(k, v);

        let outcome = GradingService::grade(&questions, &answers, 70);
        assert_eq!(outcome.score, 80);
        assert_eq!(outcome.correct_answers, 4);
        assert_eq!(outcome.total_questions, 5);
        assert!(outcome.passed);
    }

    #[test]
    fn three_of_five_correct_fails_at_seventy() {
        let questions = quiz_questions(5);
        let mut answers = HashMap::new();
        for q in &questions[..3] {
            let (k, v) = correct_answer(q);
            answers.insert(k, v);
        }
        for q in &questions[3..] {
            let (k, v) = wrong_answer(q);
            answers.insert(k, v);
        }

        let outcome = GradingService::grade(&questions, &answers, 70);
        assert_eq!(outcome.score, 60);
        assert!(!outcome.passed);
    }

    #[test]
    fn score_equal_to_threshold_passes() {
        let questions = quiz_questions(5);
        let mut answers = HashMap::new();
        for q in &questions[..4] {
            let (k, v) = correct_answer(q);
            answers.insert(k, v);
        }

        let outcome = GradingService::grade(&questions, &answers, 80);
        assert_eq!(outcome.score, 80);
        assert!(outcome.passed);
    }

    #[test]
    fn unanswered_questions_score_incorrect_not_error() {
        let questions = quiz_questions(5);
        let mut answers = HashMap::new();
        for q in &questions[..2] {
            let (k, v) = correct_answer(q);
            answers.insert(k, v);
        }

        let outcome = GradingService::grade(&questions, &answers, 70);
        assert_eq!(outcome.total_questions, 5);
        assert_eq!(outcome.correct_answers, 2);
        assert_eq!(outcome.score, 40);
        let unanswered = outcome
            .detailed_results
            .iter()
            .filter(|r| r.selected_option_id.is_none())
            .count();
        assert_eq!(unanswered, 3);
    }

    #[test]
    fn empty_answer_map_grades_zero_correct() {
        let questions = quiz_questions(3);
        let outcome = GradingService::grade(&questions, &HashMap::new(), 70);
        assert_eq!(outcome.correct_answers, 0);
        assert_eq!(outcome.score, 0);
        assert!(!outcome.passed);
    }

    #[test]
    fn zero_questions_grades_zero_not_panic() {
        let outcome = GradingService::grade(&[], &HashMap::new(), 70);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.total_questions, 0);
        assert!(!outcome.passed);
        assert!(outcome.detailed_results.is_empty());
    }

    #[test]
    fn zero_questions_with_zero_threshold_still_passes() {
        // score >= passing_score is inclusive, so 0 >= 0 holds.
        let outcome = GradingService::grade(&[], &HashMap::new(), 0);
        assert!(outcome.passed);
    }

    #[test]
    fn answer_for_foreign_question_is_ignored() {
        let questions = quiz_questions(2);
        let mut answers = HashMap::new();
        for q in &questions {
            let (k, v) = correct_answer(q);
            answers.insert(k, v);
        }
        answers.insert(Uuid::new_v4(), Uuid::new_v4());

        let outcome = GradingService::grade(&questions, &answers, 70);
        assert_eq!(outcome.correct_answers, 2);
        assert_eq!(outcome.total_questions, 2);
        assert_eq!(outcome.score, 100);
    }

    #[test]
    fn unknown_option_id_grades_incorrect() {
        let questions = quiz_questions(1);
        let mut answers = HashMap::new();
        answers.insert(questions[0].id, Uuid::new_v4());

        let outcome = GradingService::grade(&questions, &answers, 70);
        assert_eq!(outcome.correct_answers, 0);
        assert!(!outcome.detailed_results[0].is_correct);
    }

    #[test]
    fn duplicate_option_text_does_not_count_as_correct() {
        let mut question = question_with_options(2, 0);
        question.options[1].text = question.options[0].text.clone();
        let decoy_id = question.options[1].id;

        let mut answers = HashMap::new();
        answers.insert(question.id, decoy_id);

        let outcome = GradingService::grade(&[question], &answers, 70);
        assert_eq!(outcome.correct_answers, 0);
    }

    #[test]
    fn grading_is_order_independent() {
        let questions = quiz_questions(5);
        let mut answers = HashMap::new();
        for q in &questions[..3] {
            let (k, v) = correct_answer(q);
            answers.insert(k, v);
        }

        let first = GradingService::grade(&questions, &answers, 70);
        let mut pairs: Vec<(Uuid, Uuid)> = answers.into_iter().collect();
        pairs.reverse();
        let reordered: HashMap<Uuid, Uuid> = pairs.into_iter().collect();
        let second = GradingService::grade(&questions, &reordered, 70);

        assert_eq!(first.score, second.score);
        assert_eq!(first.correct_answers, second.correct_answers);
        assert_eq!(first.passed, second.passed);
    }

    #[test]
    fn score_stays_in_bounds() {
        for answered in 0..=7 {
            let questions = quiz_questions(7);
            let mut answers = HashMap::new();
            for q in &questions[..answered] {
                let (k, v) = correct_answer(q);
                answers.insert(k, v);
            }
            let outcome = GradingService::grade(&questions, &answers, 70);
            assert!((0..=100).contains(&outcome.score));
        }
    }

    #[test]
    fn detailed_results_reveal_explanations() {
        let mut question = question_with_options(2, 0);
        question.options[0].explanation = Some("Because it is.".to_string());

        let outcome = GradingService::grade(&[question], &HashMap::new(), 70);
        assert_eq!(
            outcome.detailed_results[0].options[0].explanation.as_deref(),
            Some("Because it is.")
        );
    }
}
