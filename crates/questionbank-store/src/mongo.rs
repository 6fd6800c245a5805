//! MongoDB question store
//!
//! Each question is one document in a single collection:
//!
//! ```text
//! { _id: ObjectId, title, content, template, difficulty, tags: [..],
//!   test_cases: [{input, output}], editorial: {explanation} }
//! ```
//!
//! `difficulty` is stored as its lowercase text, `""` when unset.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{self, Document, doc, oid::ObjectId},
};
use questionbank_types::{
    AlgorithmQuestion, Difficulty, Editorial, StoreError, StoreResult, Tag, TestCase,
    null_as_default,
};
use serde::{Deserialize, Serialize};

use crate::QuestionStore;

/// Connection settings for [`MongoBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "listing".to_string(),
            collection: "question".to_string(),
        }
    }
}

/// Stored form of a question
///
/// Missing and `null` fields both decode as empty; nil slices written by
/// older clients are stored as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct QuestionDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    template: String,
    #[serde(default, deserialize_with = "null_as_default")]
    difficulty: String,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    test_cases: Vec<TestCase>,
    #[serde(default, deserialize_with = "null_as_default")]
    editorial: Editorial,
}

impl QuestionDocument {
    fn new(id: ObjectId, question: &AlgorithmQuestion) -> Self {
        Self {
            id,
            title: question.title.clone(),
            content: question.content.clone(),
            template: question.template.clone(),
            difficulty: difficulty_text(question.difficulty).to_string(),
            tags: question.tag_strings(),
            test_cases: question.test_cases.clone(),
            editorial: question.editorial.clone(),
        }
    }

    fn into_question(self) -> StoreResult<AlgorithmQuestion> {
        let difficulty = Difficulty::parse_optional(&self.difficulty)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        Ok(AlgorithmQuestion {
            id: self.id.to_hex(),
            title: self.title,
            content: self.content,
            template: self.template,
            difficulty,
            tags: self.tags.into_iter().map(Tag::from).collect(),
            test_cases: self.test_cases,
            editorial: self.editorial,
        })
    }
}

fn difficulty_text(difficulty: Option<Difficulty>) -> &'static str {
    difficulty.map(|d| d.as_str()).unwrap_or_default()
}

fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

fn database_error(err: mongodb::error::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

/// Build the query document for a filtered listing
///
/// Each criterion is omitted when it places no constraint.
pub(crate) fn find_filter(tags: &[String], difficulty: Option<Difficulty>) -> Document {
    let mut filter = Document::new();
    if !tags.is_empty() {
        filter.insert("tags", doc! { "$in": tags.to_vec() });
    }
    if let Some(difficulty) = difficulty {
        filter.insert("difficulty", difficulty.as_str());
    }
    filter
}

/// Build the `$set` update replacing every mutable field
///
/// Empty `test_cases` and `editorial` are written as-is and clear the stored values.
pub(crate) fn update_document(question: &AlgorithmQuestion) -> StoreResult<Document> {
    let test_cases = bson::to_bson(&question.test_cases)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    let editorial = bson::to_bson(&question.editorial)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    Ok(doc! {
        "$set": {
            "title": question.title.clone(),
            "content": question.content.clone(),
            "template": question.template.clone(),
            "difficulty": difficulty_text(question.difficulty),
            "tags": question.tag_strings(),
            "test_cases": test_cases,
            "editorial": editorial,
        }
    })
}

/// Question store backed by a MongoDB collection
///
/// Holds one pooled client for the lifetime of the process.
#[derive(Clone)]
pub struct MongoBackend {
    client: Client,
    collection: Collection<QuestionDocument>,
    database: String,
}

impl MongoBackend {
    /// Connect using the given settings
    ///
    /// The driver connects lazily, so this only fails on a malformed URI or
    /// unresolvable SRV record. Use [`QuestionStore::ping`] to probe the server.
    pub async fn connect(settings: &MongoSettings) -> StoreResult<Self> {
        let client = Client::with_uri_str(&settings.uri).await.map_err(database_error)?;
        Ok(Self::from_client(client, &settings.database, &settings.collection))
    }

    /// Wrap an existing client
    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection(collection);
        Self { client, collection, database: database.to_string() }
    }
}

#[async_trait]
impl QuestionStore for MongoBackend {
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: &str) -> StoreResult<AlgorithmQuestion> {
        let oid = parse_id(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(database_error)?
            .ok_or(StoreError::NotFound)?;
        document.into_question()
    }

    #[tracing::instrument(skip(self, question), fields(title = %question.title))]
    async fn save(&self, question: &AlgorithmQuestion) -> StoreResult<String> {
        let id = ObjectId::new();
        self.collection
            .insert_one(QuestionDocument::new(id, question))
            .await
            .map_err(database_error)?;
        Ok(id.to_hex())
    }

    #[tracing::instrument(skip(self))]
    async fn find(
        &self,
        tags: &[String],
        difficulty: Option<Difficulty>,
    ) -> StoreResult<Vec<AlgorithmQuestion>> {
        let cursor =
            self.collection.find(find_filter(tags, difficulty)).await.map_err(database_error)?;
        let documents: Vec<QuestionDocument> = cursor.try_collect().await.map_err(database_error)?;

        tracing::debug!(count = documents.len(), "Questions fetched");
        documents.into_iter().map(QuestionDocument::into_question).collect()
    }

    #[tracing::instrument(skip(self, question))]
    async fn update(&self, id: &str, question: &AlgorithmQuestion) -> StoreResult<()> {
        let oid = parse_id(id)?;
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, update_document(question)?)
            .await
            .map_err(database_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<()> {
        let oid = parse_id(id)?;
        let result =
            self.collection.delete_one(doc! { "_id": oid }).await.map_err(database_error)?;

        if result.deleted_count == 0 {
            tracing::debug!("Delete matched no question");
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(database_error)?;
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        self.client.clone().shutdown().await;
        tracing::debug!("MongoDB client shut down");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use mongodb::bson::Bson;

    use super::*;

    fn sample() -> AlgorithmQuestion {
        AlgorithmQuestion::builder()
            .title("Two Sum")
            .content("Find two numbers adding to target")
            .template("fn two_sum() {}")
            .difficulty(Difficulty::Easy)
            .tags(vec![Tag::from("array"), Tag::from("hash")])
            .test_cases(vec![TestCase::new("[2,7,11,15], 9", "[0,1]")])
            .editorial(Editorial { explanation: "Use a map".to_string() })
            .build()
    }

    // ===== FILTER DOCUMENT TESTS =====

    #[test]
    fn test_find_filter_empty() {
        assert_eq!(find_filter(&[], None), Document::new());
    }

    #[test]
    fn test_find_filter_tags_only() {
        let filter = find_filter(&["tree".to_string(), "dp".to_string()], None);
        assert_eq!(filter, doc! { "tags": { "$in": ["tree", "dp"] } });
    }

    #[test]
    fn test_find_filter_difficulty_only() {
        assert_eq!(find_filter(&[], Some(Difficulty::Hard)), doc! { "difficulty": "hard" });
    }

    #[test]
    fn test_find_filter_tags_and_difficulty() {
        let filter = find_filter(&["tree".to_string()], Some(Difficulty::Medium));
        assert_eq!(filter, doc! { "tags": { "$in": ["tree"] }, "difficulty": "medium" });
    }

    // ===== DOCUMENT MAPPING TESTS =====

    #[test]
    fn test_update_document_sets_every_mutable_field() {
        let update = update_document(&sample()).unwrap();
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("title").unwrap(), "Two Sum");
        assert_eq!(set.get_str("difficulty").unwrap(), "easy");
        assert_eq!(set.get_array("tags").unwrap().len(), 2);
        assert_eq!(set.get_array("test_cases").unwrap().len(), 1);
        assert_eq!(
            set.get_document("editorial").unwrap().get_str("explanation").unwrap(),
            "Use a map"
        );
        assert!(!set.contains_key("_id"));
    }

    #[test]
    fn test_update_document_unset_difficulty_is_empty_text() {
        let question = AlgorithmQuestion::builder().title("T").build();
        let update = update_document(&question).unwrap();
        assert_eq!(update.get_document("$set").unwrap().get_str("difficulty").unwrap(), "");
    }

    #[test]
    fn test_update_document_writes_empty_test_cases_and_editorial() {
        let question = AlgorithmQuestion::builder().title("T").build();
        let update = update_document(&question).unwrap();
        let set = update.get_document("$set").unwrap();

        assert!(set.get_array("test_cases").unwrap().is_empty());
        assert_eq!(set.get_document("editorial").unwrap().get_str("explanation").unwrap(), "");
    }

    #[test]
    fn test_document_preserves_question_fields() {
        let id = ObjectId::new();
        let stored = bson::to_document(&QuestionDocument::new(id, &sample())).unwrap();
        assert_eq!(stored.get_object_id("_id").unwrap(), id);

        let document: QuestionDocument = bson::from_document(stored).unwrap();
        let question = document.into_question().unwrap();
        assert_eq!(question, AlgorithmQuestion { id: id.to_hex(), ..sample() });
    }

    #[test]
    fn test_document_with_missing_fields_uses_defaults() {
        let id = ObjectId::new();
        let document: QuestionDocument =
            bson::from_document(doc! { "_id": id, "title": "Bare" }).unwrap();
        let question = document.into_question().unwrap();

        assert_eq!(question.title, "Bare");
        assert_eq!(question.difficulty, None);
        assert!(question.tags.is_empty());
    }

    #[test]
    fn test_document_with_null_fields_uses_defaults() {
        let id = ObjectId::new();
        let document: QuestionDocument = bson::from_document(doc! {
            "_id": id,
            "title": "T",
            "content": "C",
            "template": Bson::Null,
            "difficulty": Bson::Null,
            "tags": Bson::Null,
            "test_cases": Bson::Null,
            "editorial": Bson::Null,
        })
        .unwrap();
        let question = document.into_question().unwrap();

        assert_eq!(question.title, "T");
        assert_eq!(question.content, "C");
        assert_eq!(question.template, "");
        assert_eq!(question.difficulty, None);
        assert!(question.tags.is_empty());
        assert!(question.test_cases.is_empty());
        assert_eq!(question.editorial, Editorial::default());
    }

    #[test]
    fn test_document_with_unknown_difficulty_is_serialization_error() {
        let document: QuestionDocument =
            bson::from_document(doc! { "_id": ObjectId::new(), "difficulty": "legendary" })
                .unwrap();
        assert!(matches!(document.into_question(), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_parse_id() {
        let id = ObjectId::new();
        assert_eq!(parse_id(&id.to_hex()).unwrap(), id);
        assert_eq!(parse_id("abc"), Err(StoreError::InvalidId("abc".to_string())));
    }

    // ===== LIVE DATABASE TESTS =====

    async fn live_backend() -> MongoBackend {
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let settings = MongoSettings {
            uri,
            database: "questionbank_test".to_string(),
            collection: format!("question_{}", ObjectId::new().to_hex()),
        };
        MongoBackend::connect(&settings).await.unwrap()
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB (set MONGODB_URI)"]
    async fn test_live_crud_cycle() {
        let store = live_backend().await;
        store.ping().await.unwrap();

        let id = store.save(&sample()).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap().title, "Two Sum");

        let found = store.find(&["hash".to_string()], Some(Difficulty::Easy)).await.unwrap();
        assert_eq!(found.len(), 1);

        let mut changed = sample();
        changed.title = "Three Sum".to_string();
        store.update(&id, &changed).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap().title, "Three Sum");

        store.delete(&id).await.unwrap();
        assert_eq!(store.get(&id).await, Err(StoreError::NotFound));
        store.delete(&id).await.unwrap();

        let missing = ObjectId::new().to_hex();
        assert_eq!(store.update(&missing, &sample()).await, Err(StoreError::NotFound));

        store.collection.drop().await.unwrap();
        store.close().await.unwrap();
    }
}
