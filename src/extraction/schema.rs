//! Record types returned by the extraction pipeline
//!
//! The wire shape of `ScrapedRecord` is a discriminated object:
//! `{"success": true, "data": {...}}` or `{"success": false, "error": {...}}`.

use serde::{Deserialize, Serialize};

/// The five positional fields of the composite metadata line
///
/// Position in the source text is the only thing that gives a field its
/// meaning; nothing here is keyword-matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetadata {
    pub location: String,
    pub announcement: String,
    pub apply_count: String,
    pub promoted_by: String,
    pub answer_management: String,
}

impl JobMetadata {
    /// Wire names of the fields, in positional order
    pub const FIELD_NAMES: [&'static str; 5] = [
        "location",
        "announcement",
        "applyCount",
        "promotedBy",
        "answerManagement",
    ];

    /// Field values in positional order
    #[must_use]
    pub fn fields(&self) -> [&str; 5] {
        [
            self.location.as_str(),
            self.announcement.as_str(),
            self.apply_count.as_str(),
            self.promoted_by.as_str(),
            self.answer_management.as_str(),
        ]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|field| field.is_empty())
    }
}

/// One job posting as read from the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub metadata: JobMetadata,
    pub description: String,
}

/// Opaque capture of whatever went wrong during an extraction
///
/// Holds the error's message and the messages of its source chain, nothing
/// more. Consumers check the record's success flag before looking here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ExtractionFailure {
    #[must_use]
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: error.to_string(),
            causes,
        }
    }
}

/// Result of one extraction: either the full posting or the failure, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RecordWire", try_from = "RecordWire")]
pub enum ScrapedRecord {
    Success(JobPosting),
    Failure(ExtractionFailure),
}

impl ScrapedRecord {
    #[must_use]
    pub fn failure(error: &(dyn std::error::Error + 'static)) -> Self {
        Self::Failure(ExtractionFailure::from_error(error))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn data(&self) -> Option<&JobPosting> {
        match self {
            Self::Success(posting) => Some(posting),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ExtractionFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<JobPosting, ExtractionFailure> {
        match self {
            Self::Success(posting) => Ok(posting),
            Self::Failure(failure) => Err(failure),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RecordWire {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<JobPosting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ExtractionFailure>,
}

/// A wire record whose payload does not match its `success` flag
#[derive(Debug, thiserror::Error)]
#[error("malformed scraped record: {0}")]
pub struct RecordShapeError(&'static str);

impl From<ScrapedRecord> for RecordWire {
    fn from(record: ScrapedRecord) -> Self {
        match record {
            ScrapedRecord::Success(posting) => Self {
                success: true,
                data: Some(posting),
                error: None,
            },
            ScrapedRecord::Failure(failure) => Self {
                success: false,
                data: None,
                error: Some(failure),
            },
        }
    }
}

impl TryFrom<RecordWire> for ScrapedRecord {
    type Error = RecordShapeError;

    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        match (wire.success, wire.data, wire.error) {
            (true, Some(posting), None) => Ok(Self::Success(posting)),
            (false, None, Some(failure)) => Ok(Self::Failure(failure)),
            (true, _, Some(_)) | (false, Some(_), _) => {
                Err(RecordShapeError("both data and error present"))
            }
            (true, None, None) => Err(RecordShapeError("success without data")),
            (false, None, None) => Err(RecordShapeError("failure without error")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_wire_shape() {
        let record = ScrapedRecord::Success(JobPosting {
            title: "Backend Engineer".into(),
            metadata: JobMetadata {
                location: "Remote".into(),
                apply_count: "100+ applicants".into(),
                ..JobMetadata::default()
            },
            ..JobPosting::default()
        });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["title"], json!("Backend Engineer"));
        assert_eq!(value["data"]["metadata"]["applyCount"], json!("100+ applicants"));
        assert_eq!(value["data"]["metadata"]["answerManagement"], json!(""));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_wire_shape() {
        let io = std::io::Error::other("socket closed");
        let record = ScrapedRecord::failure(&io);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"]["message"], json!("socket closed"));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_mixed_payload_is_rejected() {
        let mixed = json!({
            "success": true,
            "data": { "title": "", "company": "", "description": "",
                      "metadata": { "location": "", "announcement": "", "applyCount": "",
                                    "promotedBy": "", "answerManagement": "" } },
            "error": { "message": "boom" }
        });
        assert!(serde_json::from_value::<ScrapedRecord>(mixed).is_err());
        assert!(serde_json::from_value::<ScrapedRecord>(json!({ "success": false })).is_err());
    }

    #[test]
    fn test_failure_keeps_source_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let failure = ExtractionFailure::from_error(&Outer(std::io::Error::other("inner")));
        assert_eq!(failure.message, "outer");
        assert_eq!(failure.causes, vec!["inner".to_string()]);
    }
}
