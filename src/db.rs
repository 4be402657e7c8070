use crate::api::*;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{query, Executor, Row, SqlitePool};
use std::sync::Mutex;

pub const DB_CONN: &str = "sqlite::memory:";

/// Read side of the content provider feeding the question cards.
#[async_trait]
pub trait QuestionSource {
    async fn get_questions(&self) -> Result<Vec<Question>>;
    async fn get_featured(&self) -> Result<Vec<Question>>;
    async fn add_question(&self, question: &Question, featured: bool) -> Result<()>;
}

/// Layout of a question import file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuestionFile {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub featured: Vec<Question>,
}

pub async fn import(source: &(dyn QuestionSource + Send + Sync), contents: &str) -> Result<usize> {
    let file: QuestionFile =
        serde_json::from_str(contents).context("couldn't parse question file")?;
    for question in &file.questions {
        source.add_question(question, false).await?;
    }
    for question in &file.featured {
        source.add_question(question, true).await?;
    }
    Ok(file.questions.len() + file.featured.len())
}

pub struct SQLite {
    connection: SqlitePool,
}
impl SQLite {
    pub async fn new(db_conn: Option<String>) -> Result<Self> {
        let url = db_conn.unwrap_or(DB_CONN.to_string());
        let connection = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .with_context(|| format!("couldn't open database {}", url))?;
        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS questions (\
                seq INTEGER PRIMARY KEY AUTOINCREMENT,\
                id INTEGER UNIQUE NOT NULL,\
                title NOT NULL,\
                category NOT NULL,\
                yes_odds REAL NOT NULL,\
                no_odds REAL NOT NULL,\
                boosted_yes_odds REAL,\
                boosted_no_odds REAL,\
                yes_percentage INTEGER NOT NULL,\
                votes,\
                time_left,\
                featured BOOLEAN NOT NULL DEFAULT FALSE\
                )",
            )
            .await
            .context("couldn't create questions table")?;
        Ok(Self { connection })
    }
    async fn get_list(&self, featured: bool) -> Result<Vec<Question>> {
        let rows = self
            .connection
            .fetch_all(
                query("SELECT * FROM questions WHERE featured = ? ORDER BY seq").bind(featured),
            )
            .await?;
        rows.iter().map(question_from_row).collect()
    }
}
fn question_from_row(row: &SqliteRow) -> Result<Question> {
    let id: QuestionId = row.try_get("id")?;
    let yes_percentage: i64 = row.try_get("yes_percentage")?;
    Ok(Question {
        id,
        title: row.try_get("title")?,
        category: row.try_get("category")?,
        yes_odds: row.try_get("yes_odds")?,
        no_odds: row.try_get("no_odds")?,
        boosted_yes_odds: row.try_get("boosted_yes_odds")?,
        boosted_no_odds: row.try_get("boosted_no_odds")?,
        yes_percentage: u8::try_from(yes_percentage)
            .with_context(|| format!("yes_percentage out of range for question {}", id))?,
        votes: row.try_get::<Option<String>, _>("votes")?.unwrap_or_default(),
        time_left: row
            .try_get::<Option<String>, _>("time_left")?
            .unwrap_or_default(),
    })
}
#[async_trait]
impl QuestionSource for SQLite {
    async fn get_questions(&self) -> Result<Vec<Question>> {
        self.get_list(false).await
    }
    async fn get_featured(&self) -> Result<Vec<Question>> {
        self.get_list(true).await
    }
    async fn add_question(&self, question: &Question, featured: bool) -> Result<()> {
        question
            .validate()
            .with_context(|| format!("couldn't add question {}", question.id))?;
        self.connection
            .execute(
                query(
                    "INSERT INTO questions (\
                id,\
                title,\
                category,\
                yes_odds,\
                no_odds,\
                boosted_yes_odds,\
                boosted_no_odds,\
                yes_percentage,\
                votes,\
                time_left,\
                featured)\
                VALUES (?,?,?,?,?,?,?,?,?,?,?)",
                )
                .bind(question.id)
                .bind(question.title.clone())
                .bind(question.category.clone())
                .bind(question.yes_odds)
                .bind(question.no_odds)
                .bind(question.boosted_yes_odds)
                .bind(question.boosted_no_odds)
                .bind(i64::from(question.yes_percentage))
                .bind(question.votes.clone())
                .bind(question.time_left.clone())
                .bind(featured),
            )
            .await
            .with_context(|| format!("couldn't add question {}", question.id))?;
        Ok(())
    }
}

/// Lists held in memory, filled through `add_question`.
#[derive(Debug, Default)]
pub struct StaticQuestions {
    questions: Mutex<Vec<Question>>,
    featured: Mutex<Vec<Question>>,
}
#[async_trait]
impl QuestionSource for StaticQuestions {
    async fn get_questions(&self) -> Result<Vec<Question>> {
        Ok(self
            .questions
            .lock()
            .map_err(|_| anyhow::anyhow!("question list poisoned"))?
            .clone())
    }
    async fn get_featured(&self) -> Result<Vec<Question>> {
        Ok(self
            .featured
            .lock()
            .map_err(|_| anyhow::anyhow!("featured list poisoned"))?
            .clone())
    }
    async fn add_question(&self, question: &Question, featured: bool) -> Result<()> {
        question
            .validate()
            .with_context(|| format!("couldn't add question {}", question.id))?;
        let mut questions = self
            .questions
            .lock()
            .map_err(|_| anyhow::anyhow!("question list poisoned"))?;
        let mut featured_list = self
            .featured
            .lock()
            .map_err(|_| anyhow::anyhow!("featured list poisoned"))?;
        // Ids are unique across both lists, as in the questions table
        if questions
            .iter()
            .chain(featured_list.iter())
            .any(|q| q.id == question.id)
        {
            anyhow::bail!("Question {} already exists", question.id);
        }
        if featured {
            featured_list.push(question.clone());
        } else {
            questions.push(question.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn question(id: QuestionId, boosted: Option<Odds>) -> Question {
        Question {
            id,
            title: format!("Will event {} happen?", id),
            category: "Culture".into(),
            yes_odds: 1.6,
            no_odds: 2.4,
            boosted_yes_odds: boosted,
            boosted_no_odds: None,
            yes_percentage: 35,
            votes: "120".into(),
            time_left: "2d".into(),
        }
    }

    #[tokio::test]
    async fn sqlite_keeps_order() {
        let db = SQLite::new(None).await.unwrap();
        db.add_question(&question(9, Some(2.1)), false).await.unwrap();
        db.add_question(&question(2, None), false).await.unwrap();
        db.add_question(&question(5, None), true).await.unwrap();
        let questions = db.get_questions().await.unwrap();
        assert_eq!(
            questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![9, 2]
        );
        assert_eq!(questions[0], question(9, Some(2.1)));
        let featured = db.get_featured().await.unwrap();
        assert_eq!(featured, vec![question(5, None)]);
    }

    #[tokio::test]
    async fn sqlite_rejects_duplicate_id() {
        let db = SQLite::new(None).await.unwrap();
        db.add_question(&question(1, None), false).await.unwrap();
        assert!(db.add_question(&question(1, None), true).await.is_err());
    }

    #[tokio::test]
    async fn static_ids_are_unique_across_lists() {
        let db = StaticQuestions::default();
        db.add_question(&question(1, None), false).await.unwrap();
        assert!(db.add_question(&question(1, None), false).await.is_err());
        assert!(db.add_question(&question(1, None), true).await.is_err());
        db.add_question(&question(2, None), true).await.unwrap();
        assert!(db.add_question(&question(2, None), false).await.is_err());
        assert_eq!(db.get_questions().await.unwrap().len(), 1);
        assert_eq!(db.get_featured().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_questions_are_refused() {
        let contents = r#"{"questions":[{"id":4,"title":"t","category":"c","yes_odds":-3.0,"no_odds":0.0,"yes_percentage":250}]}"#;
        let db = SQLite::new(None).await.unwrap();
        assert!(import(&db, contents).await.is_err());
        assert!(db.get_questions().await.unwrap().is_empty());
        let db = StaticQuestions::default();
        assert!(import(&db, contents).await.is_err());
        assert!(db.get_questions().await.unwrap().is_empty());

        let mut boosted = question(5, Some(0.5));
        assert!(SQLite::new(None)
            .await
            .unwrap()
            .add_question(&boosted, true)
            .await
            .is_err());
        boosted.boosted_yes_odds = Some(1.5);
        StaticQuestions::default()
            .add_question(&boosted, true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn import_file() {
        let db = StaticQuestions::default();
        let contents = serde_json::to_string(&QuestionFile {
            questions: vec![question(1, None), question(2, None)],
            featured: vec![question(3, Some(1.9))],
        })
        .unwrap();
        assert_eq!(import(&db, &contents).await.unwrap(), 3);
        assert_eq!(db.get_questions().await.unwrap().len(), 2);
        assert_eq!(db.get_featured().await.unwrap()[0].id, 3);
        assert!(import(&db, "not json").await.is_err());
    }
}
