//! Diagnostic codes and error reporting.

use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// Diagnostic error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum DiagnosticCode {
    // Input / step errors (E01xx)
    E0101UrlInvalid,
    E0102StepOrder,
    E0103FieldUnknown,
    E0104ValueEmpty,

    // Analysis errors (E02xx)
    E0201AnalysisMissing,
    E0202AnalysisEditInvalid,

    // Strategy errors (E03xx)
    E0301StrategyOutOfRange,
    E0302StrategyLocked,
    E0303StrategyNotSelected,

    // Topic errors (E04xx)
    E0401TopicsNotGenerated,
    E0402TopicNotFound,
    E0403TopicsUnavailable,
    E0404TopicNotSelected,

    // Content errors (E05xx)
    E0501ContentMissing,
    E0502GenerationFailed,
    E0503StrategyFrozen,

    // Auth / gate errors (E06xx)
    E0601AccountRequired,
    E0602AuthFailed,
    E0603NotLoggedIn,

    // Export errors (E07xx)
    E0701FormatUnsupported,
    E0702ExportFailed,

    // Storage errors (E08xx)
    E0801StorageRead,
    E0802StorageWrite,
    E0803SnapshotExpired,
    E0804SnapshotMissing,

    // General errors (E09xx)
    E0901IoError,
    E0902JsonParseError,
    E0903ApiError,
    E0904Timeout,

    // Warnings (W01xx)
    W0101AnalysisFallback,
    W0102EnhancementIncomplete,
    W0103PostLocked,
    W0104StorageDegraded,
    W0105TopicsFromScenario,
    W0106SnapshotStale,
}

impl DiagnosticCode {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Self::W0101AnalysisFallback
            | Self::W0102EnhancementIncomplete
            | Self::W0103PostLocked
            | Self::W0104StorageDegraded
            | Self::W0105TopicsFromScenario
            | Self::W0106SnapshotStale => DiagnosticLevel::Warning,
            _ => DiagnosticLevel::Error,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            // E01xx - Input / step
            Self::E0101UrlInvalid => "E0101",
            Self::E0102StepOrder => "E0102",
            Self::E0103FieldUnknown => "E0103",
            Self::E0104ValueEmpty => "E0104",
            // E02xx - Analysis
            Self::E0201AnalysisMissing => "E0201",
            Self::E0202AnalysisEditInvalid => "E0202",
            // E03xx - Strategy
            Self::E0301StrategyOutOfRange => "E0301",
            Self::E0302StrategyLocked => "E0302",
            Self::E0303StrategyNotSelected => "E0303",
            // E04xx - Topics
            Self::E0401TopicsNotGenerated => "E0401",
            Self::E0402TopicNotFound => "E0402",
            Self::E0403TopicsUnavailable => "E0403",
            Self::E0404TopicNotSelected => "E0404",
            // E05xx - Content
            Self::E0501ContentMissing => "E0501",
            Self::E0502GenerationFailed => "E0502",
            Self::E0503StrategyFrozen => "E0503",
            // E06xx - Auth / gate
            Self::E0601AccountRequired => "E0601",
            Self::E0602AuthFailed => "E0602",
            Self::E0603NotLoggedIn => "E0603",
            // E07xx - Export
            Self::E0701FormatUnsupported => "E0701",
            Self::E0702ExportFailed => "E0702",
            // E08xx - Storage
            Self::E0801StorageRead => "E0801",
            Self::E0802StorageWrite => "E0802",
            Self::E0803SnapshotExpired => "E0803",
            Self::E0804SnapshotMissing => "E0804",
            // E09xx - General
            Self::E0901IoError => "E0901",
            Self::E0902JsonParseError => "E0902",
            Self::E0903ApiError => "E0903",
            Self::E0904Timeout => "E0904",
            // W01xx - Warnings
            Self::W0101AnalysisFallback => "W0101",
            Self::W0102EnhancementIncomplete => "W0102",
            Self::W0103PostLocked => "W0103",
            Self::W0104StorageDegraded => "W0104",
            Self::W0105TopicsFromScenario => "W0105",
            Self::W0106SnapshotStale => "W0106",
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub context: String,
    pub level: DiagnosticLevel,
}

impl Diagnostic {
    pub fn new(
        code: DiagnosticCode,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            level: code.level(),
            code,
            message: message.into(),
            context: context.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self.level {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
        };
        write!(
            f,
            "{}[{}]: {} ({})",
            level_str,
            self.code.code(),
            self.message,
            self.context
        )
    }
}

impl std::error::Error for Diagnostic {}
