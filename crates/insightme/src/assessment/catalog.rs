use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const DEFAULT_SCALE_MIN: i64 = 1;
const DEFAULT_SCALE_MAX: i64 = 5;

/// Question formats understood by the collectors. Unknown wire strings are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Likert,
    YesNo,
    SingleChoice,
    OpenShort,
    OpenLong,
    Other(String),
}

impl QuestionKind {
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "likert" => Self::Likert,
            "yes_no" => Self::YesNo,
            "multiple_choice_single" => Self::SingleChoice,
            "open_short" => Self::OpenShort,
            "open_long" => Self::OpenLong,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Likert => "likert",
            Self::YesNo => "yes_no",
            Self::SingleChoice => "multiple_choice_single",
            Self::OpenShort => "open_short",
            Self::OpenLong => "open_long",
            Self::Other(value) => value.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Likert => "Likert scale",
            Self::YesNo => "Yes / No",
            Self::SingleChoice => "Single choice",
            Self::OpenShort => "Short answer",
            Self::OpenLong => "Long answer",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Open questions capture text for the report and never produce a score.
    pub fn is_open_ended(&self) -> bool {
        matches!(self, Self::OpenShort | Self::OpenLong)
    }
}

impl Serialize for QuestionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for QuestionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

/// Selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub text: String,
}

/// How a likert answer maps onto its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Direct,
    Inverse,
}

impl Interpretation {
    fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("inverse") => Self::Inverse,
            _ => Self::Direct,
        }
    }
}

/// Points awarded to a dimension when a particular option is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoicePoints {
    pub dimension: String,
    pub points: f64,
}

/// Typed scoring rule, one variant per scorable question kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ScoringRule {
    Likert {
        dimension: String,
        interpretation: Interpretation,
    },
    YesNo {
        dimension: String,
        yes_value: f64,
        no_value: f64,
    },
    Choice {
        points: BTreeMap<String, ChoicePoints>,
    },
}

impl ScoringRule {
    /// Whether this rule is the one scored for questions of `kind`.
    pub fn fits(&self, kind: &QuestionKind) -> bool {
        matches!(
            (kind, self),
            (QuestionKind::Likert, Self::Likert { .. })
                | (QuestionKind::YesNo, Self::YesNo { .. })
                | (QuestionKind::SingleChoice, Self::Choice { .. })
        )
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Likert { .. } => "likert",
            Self::YesNo { .. } => "yes/no",
            Self::Choice { .. } => "choice",
        }
    }
}

/// Immutable question definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub scale_min: i64,
    pub scale_max: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringRule>,
}

impl Question {
    /// Display text of the option whose value equals `value`.
    pub fn option_text(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.text.as_str())
    }
}

/// Wire shape of a question as stored in catalog files.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub scale_min: Option<i64>,
    #[serde(default)]
    pub scale_max: Option<i64>,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub scoring_info: Option<Value>,
}

/// A catalog entry whose scoring payload was dropped while building the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogWarning {
    pub question_id: String,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read question catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid question catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question id '{id}' appears more than once")]
    DuplicateQuestion { id: String },
}

/// Read-only question index shared by every scoring call.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
    warnings: Vec<CatalogWarning>,
}

impl QuestionCatalog {
    /// Rules that do not fit their question's kind are dropped with a warning.
    pub fn from_questions(mut questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut warnings = Vec::new();
        for question in &mut questions {
            let fits = match &question.scoring {
                Some(rule) => rule.fits(&question.kind),
                None => true,
            };
            if fits {
                continue;
            }
            let Some(rule) = question.scoring.take() else {
                continue;
            };
            let warning = CatalogWarning {
                question_id: question.id.clone(),
                reason: format!(
                    "{} rule does not apply to {} questions",
                    rule.label(),
                    question.kind.as_wire()
                ),
            };
            warn!(
                question_id = %warning.question_id,
                reason = %warning.reason,
                "scoring rule ignored"
            );
            warnings.push(warning);
        }

        Self::build(questions, warnings)
    }

    pub fn from_records(records: Vec<QuestionRecord>) -> Result<Self, CatalogError> {
        let mut questions = Vec::with_capacity(records.len());
        let mut warnings = Vec::new();

        for record in records {
            let (question, warning) = question_from_record(record);
            if let Some(warning) = warning {
                warn!(
                    question_id = %warning.question_id,
                    reason = %warning.reason,
                    "scoring_info ignored"
                );
                warnings.push(warning);
            }
            questions.push(question);
        }

        Self::build(questions, warnings)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let records: Vec<QuestionRecord> = serde_json::from_reader(reader)?;
        Self::from_records(records)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path.as_ref())?;
        let catalog = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            path = %path.as_ref().display(),
            questions = catalog.len(),
            "loaded question catalog"
        );
        Ok(catalog)
    }

    /// Built-in sample catalog, used when no catalog file is configured.
    pub fn standard() -> Self {
        let questions = super::blueprint::standard_questions();
        let index = questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id.clone(), position))
            .collect();

        Self {
            questions,
            index,
            warnings: Vec::new(),
        }
    }

    fn build(questions: Vec<Question>, warnings: Vec<CatalogWarning>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if index.insert(question.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateQuestion {
                    id: question.id.clone(),
                });
            }
        }

        Ok(Self {
            questions,
            index,
            warnings,
        })
    }

    pub fn get(&self, question_id: &str) -> Option<&Question> {
        self.index
            .get(question_id)
            .map(|position| &self.questions[*position])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn by_category(&self, category: &str) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for question in &self.questions {
            if !seen.contains(&question.category.as_str()) {
                seen.push(&question.category);
            }
        }
        seen
    }

    pub fn warnings(&self) -> &[CatalogWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn question_from_record(record: QuestionRecord) -> (Question, Option<CatalogWarning>) {
    let QuestionRecord {
        id,
        text,
        category,
        kind,
        scale_min,
        scale_max,
        options,
        scoring_info,
    } = record;

    let (scoring, warning) = match scoring_info {
        None | Some(Value::Null) => (None, None),
        Some(raw) => match rule_from_value(&kind, &raw) {
            Ok(rule) => (Some(rule), None),
            Err(reason) => (
                None,
                Some(CatalogWarning {
                    question_id: id.clone(),
                    reason,
                }),
            ),
        },
    };

    let question = Question {
        id,
        text,
        category,
        kind,
        scale_min: scale_min.unwrap_or(DEFAULT_SCALE_MIN),
        scale_max: scale_max.unwrap_or(DEFAULT_SCALE_MAX),
        options,
        scoring,
    };

    (question, warning)
}

fn rule_from_value(kind: &QuestionKind, raw: &Value) -> Result<ScoringRule, String> {
    let Some(fields) = raw.as_object() else {
        return Err("scoring_info must be an object".to_string());
    };

    match kind {
        QuestionKind::Likert => {
            let dimension = dimension_of(raw)
                .ok_or_else(|| "likert scoring requires a dimension".to_string())?;
            let interpretation =
                Interpretation::from_wire(fields.get("interpretation").and_then(Value::as_str));
            Ok(ScoringRule::Likert {
                dimension,
                interpretation,
            })
        }
        QuestionKind::YesNo => {
            let dimension = dimension_of(raw)
                .ok_or_else(|| "yes/no scoring requires a dimension".to_string())?;
            Ok(ScoringRule::YesNo {
                dimension,
                yes_value: fields.get("yes_value").and_then(numeric).unwrap_or(0.0),
                no_value: fields.get("no_value").and_then(numeric).unwrap_or(0.0),
            })
        }
        QuestionKind::SingleChoice => {
            let points: BTreeMap<String, ChoicePoints> = fields
                .iter()
                .filter_map(|(value, entry)| {
                    let dimension = entry.get("dimension")?.as_str()?.to_string();
                    let points = entry.get("points").and_then(numeric)?;
                    Some((value.clone(), ChoicePoints { dimension, points }))
                })
                .collect();

            if points.is_empty() {
                Err("no option carries a dimension and points".to_string())
            } else {
                Ok(ScoringRule::Choice { points })
            }
        }
        QuestionKind::OpenShort | QuestionKind::OpenLong | QuestionKind::Other(_) => Err(format!(
            "question type '{}' is never scored",
            kind.as_wire()
        )),
    }
}

fn dimension_of(raw: &Value) -> Option<String> {
    raw.get("dimension")
        .and_then(Value::as_str)
        .filter(|dimension| !dimension.is_empty())
        .map(str::to_string)
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
