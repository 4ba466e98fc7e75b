use crate::models::{NewQuestion, QuestionRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::fs;
use tokio::sync::RwLock;
use tracing::warn;

pub struct TriviaDb {
    pub categories: RwLock<BTreeMap<i64, String>>,
    pub questions: RwLock<BTreeMap<i64, QuestionRecord>>,
    next_question_id: AtomicI64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistentSnapshot {
    categories: BTreeMap<i64, String>,
    questions: BTreeMap<i64, QuestionRecord>,
    next_question_id: i64,
}

pub fn seed_categories() -> BTreeMap<i64, String> {
    [
        (1, "Science"),
        (2, "Art"),
        (3, "Geography"),
        (4, "History"),
        (5, "Entertainment"),
        (6, "Sports"),
    ]
    .into_iter()
    .map(|(id, name)| (id, name.to_string()))
    .collect()
}

pub fn seed_questions() -> BTreeMap<i64, QuestionRecord> {
    let rows: [(i64, &str, &str, i64, i64); 19] = [
        (2, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
        (4, "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
        (5, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
        (6, "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
        (9, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
        (10, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
        (11, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
        (12, "Who invented Peanut Butter?", "George Washington Carver", 4, 2),
        (13, "What is the largest lake in Africa?", "Lake Victoria", 3, 2),
        (14, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
        (15, "The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
        (16, "Which Dutch graphic artist-initials M C was a creator of optical illusions?", "Escher", 2, 1),
        (17, "La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        (18, "How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
        (19, "Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
        (20, "What is the heaviest organ in the human body?", "The Liver", 1, 4),
        (21, "Who discovered penicillin?", "Alexander Fleming", 1, 3),
        (22, "Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
        (23, "Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
    ];
    rows.into_iter()
        .map(|(id, question, answer, category, difficulty)| {
            (
                id,
                QuestionRecord {
                    id,
                    question: question.to_string(),
                    answer: answer.to_string(),
                    category,
                    difficulty,
                },
            )
        })
        .collect()
}

impl TriviaDb {
    pub fn new(snapshot_path: Option<&str>) -> Self {
        let snapshot = snapshot_path.and_then(|path| {
            let raw = fs::read_to_string(path).ok()?;
            match serde_json::from_str::<PersistentSnapshot>(&raw) {
                Ok(s) => Some(s),
                Err(err) => {
                    warn!("failed to read local snapshot {}: {}", path, err);
                    None
                }
            }
        });

        let categories = snapshot
            .as_ref()
            .map(|s| s.categories.clone())
            .unwrap_or_else(seed_categories);
        let questions = snapshot
            .as_ref()
            .map(|s| s.questions.clone())
            .unwrap_or_else(seed_questions);
        let next_question_id = snapshot
            .as_ref()
            .map(|s| s.next_question_id)
            .unwrap_or(1)
            .max(questions.keys().max().copied().unwrap_or(0) + 1);

        Self {
            categories: RwLock::new(categories),
            questions: RwLock::new(questions),
            next_question_id: AtomicI64::new(next_question_id),
        }
    }

    pub fn next_question_id(&self) -> i64 {
        self.next_question_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn snapshot(&self) -> PersistentSnapshot {
        PersistentSnapshot {
            categories: self.categories.read().await.clone(),
            questions: self.questions.read().await.clone(),
            next_question_id: self.next_question_id.load(Ordering::SeqCst),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<TriviaDb>,
    pub local_state_path: Option<String>,
}

impl AppState {
    pub fn new(local_state_path: Option<String>) -> Self {
        Self {
            db: Arc::new(TriviaDb::new(local_state_path.as_deref())),
            local_state_path,
        }
    }

    pub async fn create_question(&self, new: NewQuestion) -> i64 {
        let id = self.db.next_question_id();
        let record = QuestionRecord {
            id,
            question: new.question,
            answer: new.answer,
            category: new.category,
            difficulty: new.difficulty,
        };
        self.db.questions.write().await.insert(id, record);
        if let Err(err) = self.persist_core_data().await {
            warn!("failed to persist local state after create_question: {}", err);
        }
        id
    }

    pub async fn delete_question(&self, id: i64) -> bool {
        let removed = self.db.questions.write().await.remove(&id).is_some();
        if removed {
            if let Err(err) = self.persist_core_data().await {
                warn!("failed to persist local state after delete_question: {}", err);
            }
        }
        removed
    }

    pub async fn persist_core_data(&self) -> anyhow::Result<()> {
        let Some(path) = self.local_state_path.as_ref() else {
            return Ok(());
        };
        let snapshot = self.db.snapshot().await;
        let serialized = serde_json::to_vec_pretty(&snapshot)?;
        if let Some(parent) = Path::new(path).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, serialized).await?;
        Ok(())
    }
}
