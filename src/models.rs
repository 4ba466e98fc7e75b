use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

// Frontends send {id: 0, type: "click"} as quiz_category when playing
// across all categories.
pub const ALL_CATEGORIES_TYPE: &str = "click";

#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    pub id: i64,
    #[serde(rename = "type")]
    pub category_type: String,
}

impl QuizCategory {
    pub fn is_all(&self) -> bool {
        self.id == 0 || self.category_type == ALL_CATEGORIES_TYPE
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRound {
    pub previous_questions: Vec<i64>,
    pub quiz_category: QuizCategory,
}

pub fn paginate<T>(items: &[T], page: i64, page_size: usize) -> &[T] {
    let page = page.max(1) as usize;
    let start = (page - 1) * page_size;
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

// Required keys must be present and truthy (empty strings and zero
// numbers count as missing); the typed store further requires string
// question/answer and numeric category/difficulty.
pub fn parse_new_question(body: &Value) -> Option<NewQuestion> {
    let required = ["question", "answer", "difficulty", "category"];
    for key in required {
        if !truthy(body.get(key)?) {
            return None;
        }
    }
    Some(NewQuestion {
        question: body.get("question")?.as_str()?.to_string(),
        answer: body.get("answer")?.as_str()?.to_string(),
        category: body.get("category")?.as_i64()?,
        difficulty: body.get("difficulty")?.as_i64()?,
    })
}

pub fn search_questions(questions: &[QuestionRecord], term: &str) -> Vec<QuestionRecord> {
    let needle = term.to_lowercase();
    questions
        .iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn next_question(previous: &[i64], pool: &[QuestionRecord]) -> Option<QuestionRecord> {
    // Exhaustion is detected by length, not by id set.
    if previous.len() == pool.len() {
        return None;
    }
    let unseen: Vec<&QuestionRecord> = pool
        .iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    use rand::seq::SliceRandom;
    let picked = unseen.choose(&mut rand::thread_rng()).copied().cloned();
    if let Some(q) = &picked {
        debug_assert!(!previous.contains(&q.id));
    }
    picked
}
