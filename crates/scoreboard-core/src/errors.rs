use thiserror::Error;

/// Result of any repository, schema or configuration call
pub type Result<T> = std::result::Result<T, ExError>;

/// Failure classes with stable `ERR_*` codes
///
/// Callers branch on the kind, never on message text. Setup failures
/// (schema, config, opening the database) end the program; the rest fail
/// a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    InvalidInput,
    InvalidColor,

    NotFound,
    AlreadyExists,
    ConstraintViolation,

    SchemaDrift,
    Migration,

    Persistence,
    Serialization,
    Io,
    Config,
    /// Database could not be opened or prepared at startup
    Setup,

    Internal,
}

impl ExErrorKind {
    pub fn code(&self) -> &'static str {
        use ExErrorKind::*;
        match self {
            InvalidInput => "ERR_INVALID_INPUT",
            InvalidColor => "ERR_INVALID_COLOR",
            NotFound => "ERR_NOT_FOUND",
            AlreadyExists => "ERR_ALREADY_EXISTS",
            ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            SchemaDrift => "ERR_SCHEMA_DRIFT",
            Migration => "ERR_MIGRATION",
            Persistence => "ERR_PERSISTENCE",
            Serialization => "ERR_SERIALIZATION",
            Io => "ERR_IO",
            Config => "ERR_CONFIG",
            Setup => "ERR_SETUP",
            Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the program can keep going after this failure
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ExErrorKind::SchemaDrift
                | ExErrorKind::Migration
                | ExErrorKind::Config
                | ExErrorKind::Setup
        )
    }
}

/// Error returned across the workspace
///
/// A kind plus whatever context the failing layer knew: the operation
/// name, the entity kind and the row id.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    entity_id: Option<i64>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        ExError {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            message: String::new(),
        }
    }

    pub fn with_op(self, op: impl Into<String>) -> Self {
        ExError {
            op: Some(op.into()),
            ..self
        }
    }

    /// Entity kind, e.g. `"team"` or `"template"`
    pub fn with_entity(self, entity: impl Into<String>) -> Self {
        ExError {
            entity: Some(entity.into()),
            ..self
        }
    }

    pub fn with_entity_id(self, id: i64) -> Self {
        ExError {
            entity_id: Some(id),
            ..self
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        ExError {
            message: message.into(),
            ..self
        }
    }

    /// Reclassify, keeping op, entity and message
    pub fn with_kind(self, kind: ExErrorKind) -> Self {
        ExError { kind, ..self }
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Stable code of the kind, e.g. `ERR_NOT_FOUND`
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn entity_id(&self) -> Option<i64> {
        self.entity_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

/// `[ERR_CODE] in operation 'op': message (entity: team) (id: 3)`
impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(id) = self.entity_id {
            write!(f, " (id: {})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

/// Domain-level failures raised by validation and referential checks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreboardError {
    /// Sport definition not found by id
    #[error("Sport definition not found: {id}")]
    SportIdNotFound { id: i64 },

    #[error("Team not found: {id}")]
    TeamNotFound { id: i64 },

    #[error("Template not found: {id}")]
    TemplateNotFound { id: i64 },

    #[error("Match not found: {id}")]
    MatchNotFound { id: i64 },

    /// A required text field is empty or whitespace
    #[error("{entity}.{field} must not be empty")]
    EmptyField { entity: String, field: String },

    /// A numeric field is out of range
    #[error("{entity}.{field} out of range: {value}")]
    OutOfRange {
        entity: String,
        field: String,
        value: i64,
    },

    /// A color string is not `#RRGGBB`
    #[error("Invalid color code for {field}: {value:?}")]
    InvalidColor { field: String, value: String },

    #[error("Unknown clock format: {value:?}")]
    UnknownClockFormat { value: String },

    #[error("Unknown clock direction: {value:?}")]
    UnknownClockDirection { value: String },

    /// A match names the same team on both sides
    #[error("Match {id} uses team {team_id} as both home and away")]
    SameTeamTwice { id: i64, team_id: i64 },

    /// Sport still referenced by teams, templates or matches
    #[error("Sport {name} is still referenced by {references} rows")]
    SportInUse { name: String, references: i64 },

    /// A stored row references an id that no longer exists
    #[error("{entity} {id} references missing {target} {target_id}")]
    DanglingReference {
        entity: String,
        id: i64,
        target: String,
        target_id: i64,
    },

    /// Unparseable timestamp text
    #[error("Invalid timestamp: {value:?}")]
    InvalidTimestamp { value: String },
}

/// Conversion from ScoreboardError to ExError
impl From<ScoreboardError> for ExError {
    fn from(err: ScoreboardError) -> Self {
        let message = err.to_string();
        match err {
            ScoreboardError::SportIdNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity("sport")
                .with_entity_id(id)
                .with_message(message),

            ScoreboardError::TeamNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity("team")
                .with_entity_id(id)
                .with_message(message),

            ScoreboardError::TemplateNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity("template")
                .with_entity_id(id)
                .with_message(message),

            ScoreboardError::MatchNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity("match")
                .with_entity_id(id)
                .with_message(message),

            ScoreboardError::EmptyField { entity, .. }
            | ScoreboardError::OutOfRange { entity, .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity(entity)
                    .with_message(message)
            }

            ScoreboardError::InvalidColor { .. } => {
                ExError::new(ExErrorKind::InvalidColor).with_message(message)
            }

            ScoreboardError::UnknownClockFormat { .. }
            | ScoreboardError::UnknownClockDirection { .. }
            | ScoreboardError::InvalidTimestamp { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            ScoreboardError::SameTeamTwice { id, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity("match")
                .with_entity_id(id)
                .with_message(message),

            ScoreboardError::SportInUse { .. } => ExError::new(ExErrorKind::ConstraintViolation)
                .with_entity("sport")
                .with_message(message),

            ScoreboardError::DanglingReference { entity, id, .. } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_entity(entity)
                    .with_entity_id(id)
                    .with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to ExError
impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
